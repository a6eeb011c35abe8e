//! Builders shared by unit tests.

use chrono::{NaiveDate, NaiveDateTime};

use crate::echo::{CombinedEcho, Echo, TelemetryMatch};
use crate::logs::TelemetrySample;

pub fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

pub fn echo(ts: NaiveDateTime) -> Echo {
    Echo {
        timestamp: ts,
        timestamp_text: ts.format("%y%m%d_%H%M%S").to_string(),
        tx_frequency: 14.074,
        tx_offset_hz: 1500,
        rx_frequency: 14.075,
        rx_offset_hz: 1490,
        snr_db: -10,
        dt_s: 0.2,
        message: "CQ M0SNZ IO91".into(),
    }
}

pub fn sample(ts: NaiveDateTime, sat: &str) -> TelemetrySample {
    TelemetrySample {
        timestamp: ts,
        satellite: sat.into(),
        azimuth_deg: 100.0,
        elevation_deg: 20.0,
        range_km: 1200.0,
        main_hz: 435_000_000,
        sub_hz: 145_000_000,
        doppler_up_hz: 1000,
        doppler_down_hz: -3000,
        doppler_up_rate_hz: 1,
        doppler_down_rate_hz: -1,
        tuning_offset_hz: 0,
        tracking: "True".into(),
        freq_scaling: "False".into(),
        rit: "Off".into(),
        rit_freq_hz: 0,
    }
}

/// An echo at `ts` with telemetry from `sat` taken at the same instant.
pub fn combined(ts: NaiveDateTime, sat: &str) -> CombinedEcho {
    CombinedEcho {
        echo: echo(ts),
        telemetry: Some(TelemetryMatch {
            sample: sample(ts, sat),
            time_diff_s: 0.0,
        }),
    }
}

pub fn bare(ts: NaiveDateTime) -> CombinedEcho {
    CombinedEcho {
        echo: echo(ts),
        telemetry: None,
    }
}
