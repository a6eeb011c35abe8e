use chrono::NaiveDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Tx,
    Rx,
}

impl Direction {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Tx" => Some(Direction::Tx),
            "Rx" => Some(Direction::Rx),
            _ => None,
        }
    }
}

/// One decoded or transmitted line of a WSJT-X `ALL.TXT` log.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub timestamp: NaiveDateTime,
    /// Timestamp as written in the log (`YYMMDD_HHMMSS`).
    pub timestamp_text: String,
    /// Dial frequency as logged.
    pub frequency: f64,
    pub direction: Direction,
    pub mode: String,
    pub snr_db: i32,
    pub dt_s: f64,
    /// Audio offset within the passband.
    pub offset_hz: i32,
    pub message: String,
}

/// A single status line of the satellite tracker.
///
/// Radio frequencies fit in `u32` and Doppler-sized values in `i32`; lines
/// outside those ranges are rejected by the parser.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySample {
    pub timestamp: NaiveDateTime,
    pub satellite: String,
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
    pub range_km: f64,
    pub main_hz: u32,
    pub sub_hz: u32,
    pub doppler_up_hz: i32,
    pub doppler_down_hz: i32,
    pub doppler_up_rate_hz: i32,
    pub doppler_down_rate_hz: i32,
    pub tuning_offset_hz: i32,
    pub tracking: String,
    pub freq_scaling: String,
    pub rit: String,
    pub rit_freq_hz: i32,
}

impl TelemetrySample {
    /// Total tuned frequency of both sub-bands.
    pub fn total_freq_hz(&self) -> i64 {
        i64::from(self.main_hz) + i64::from(self.sub_hz)
    }
}
