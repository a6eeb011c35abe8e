use chrono::NaiveDateTime;

use crate::logs::TelemetrySample;

/// A transmission heard back on the receive side.
#[derive(Debug, Clone, PartialEq)]
pub struct Echo {
    /// Transmission time.
    pub timestamp: NaiveDateTime,
    pub timestamp_text: String,
    pub tx_frequency: f64,
    pub tx_offset_hz: i32,
    pub rx_frequency: f64,
    pub rx_offset_hz: i32,
    /// Reception SNR.
    pub snr_db: i32,
    /// Reception time offset.
    pub dt_s: f64,
    pub message: String,
}

impl Echo {
    pub fn offset_delta_hz(&self) -> i64 {
        i64::from(self.tx_offset_hz) - i64::from(self.rx_offset_hz)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryMatch {
    pub sample: TelemetrySample,
    /// Absolute distance between echo and sample, in seconds.
    pub time_diff_s: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CombinedEcho {
    pub echo: Echo,
    pub telemetry: Option<TelemetryMatch>,
}

impl CombinedEcho {
    pub fn sample(&self) -> Option<&TelemetrySample> {
        self.telemetry.as_ref().map(|t| &t.sample)
    }

    /// Uncentered frequency drift: `main + rx_offset + sub - tx_offset`.
    pub fn raw_drift_hz(&self) -> Option<i64> {
        self.sample().map(|s| {
            s.total_freq_hz() + i64::from(self.echo.rx_offset_hz)
                - i64::from(self.echo.tx_offset_hz)
        })
    }
}
