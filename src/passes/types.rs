use chrono::NaiveDateTime;

use crate::echo::CombinedEcho;

pub const UNKNOWN_SATELLITE: &str = "Unknown";

/// Echoes judged to belong to one overflight, in time order. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Pass {
    echoes: Vec<CombinedEcho>,
}

impl Pass {
    pub fn new(first: CombinedEcho) -> Self {
        Self {
            echoes: vec![first],
        }
    }

    pub fn push(&mut self, echo: CombinedEcho) {
        self.echoes.push(echo);
    }

    pub fn echoes(&self) -> &[CombinedEcho] {
        &self.echoes
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.echoes.len()
    }

    pub fn last(&self) -> &CombinedEcho {
        &self.echoes[self.echoes.len() - 1]
    }

    /// Members that carry telemetry, in pass order.
    pub fn with_telemetry(&self) -> impl Iterator<Item = &CombinedEcho> {
        self.echoes.iter().filter(|c| c.telemetry.is_some())
    }

    pub fn first_with_telemetry(&self) -> Option<&CombinedEcho> {
        self.with_telemetry().next()
    }

    /// Satellite of the first telemetry-bearing member, or "Unknown".
    pub fn satellite(&self) -> &str {
        self.first_with_telemetry()
            .and_then(|c| c.sample())
            .map(|s| s.satellite.as_str())
            .unwrap_or(UNKNOWN_SATELLITE)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SatelliteStatistics {
    pub num_echoes: usize,
    pub num_with_sat: usize,
    pub offset_delta_mean_hz: f64,
    pub offset_delta_std_hz: f64,
    pub snr_mean_db: f64,
    pub snr_min_db: i32,
    pub snr_max_db: i32,
    pub dt_mean_s: f64,
    pub az_mean_deg: f64,
    pub az_min_deg: f64,
    pub az_max_deg: f64,
    pub el_mean_deg: f64,
    pub el_max_deg: f64,
    pub range_min_km: i64,
    pub dop_up_mean_hz: i64,
    pub dop_down_mean_hz: i64,
    pub total_freq_min_hz: i64,
    pub total_freq_max_hz: i64,
    pub total_freq_mean_hz: f64,
    pub total_freq_std_hz: f64,
    pub center_drift_hz: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PassStatistics {
    /// No member had telemetry; only the echo count is known.
    NoSatelliteData { num_echoes: usize },
    WithSatellite(SatelliteStatistics),
}

impl PassStatistics {
    pub const NO_SATELLITE_NOTE: &'static str = "No satellite data available";

    pub fn center_drift_hz(&self) -> i64 {
        match self {
            PassStatistics::NoSatelliteData { .. } => 0,
            PassStatistics::WithSatellite(s) => s.center_drift_hz,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackPoint {
    pub azimuth_deg: f64,
    /// Floored at the horizon.
    pub elevation_deg: f64,
    pub range_km: f64,
    pub main_hz: i64,
    pub sub_hz: i64,
    pub doppler_up_hz: i64,
    pub doppler_down_hz: i64,
}

/// Where the satellite actually went around a pass, from every telemetry
/// sample in the window rather than only the ones that matched echoes.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub satellite: String,
    /// First telemetry-bearing echo.
    pub start: NaiveDateTime,
    /// Last telemetry-bearing echo.
    pub end: NaiveDateTime,
    pub window_start: NaiveDateTime,
    pub window_end: NaiveDateTime,
    pub points: Vec<TrackPoint>,
}
