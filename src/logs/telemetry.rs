use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

use crate::logs::TelemetrySample;

fn line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(concat!(
            r"^(\d{4}-\d{2}-\d{2})\s+",
            r"(\d{2}:\d{2})\s+",
            r"INFO\s+\[Pycom\.lib\.csnsat\.csnSatManager\]\s+",
            r"Timestamp:\s+(\d{2}:\d{2}:\d{2}),\s+",
            r"Sat:\s+(\S+),\s+",
            r"Az:\s+([\d\.]+),\s+",
            r"El:\s+([\d\.-]+),\s+",
            r"Range km:\s+([\d\.]+),\s+",
            r"Main:\s+(\d+),\s+",
            r"Sub:\s+(\d+),\s+",
            r"Doppler up:\s+(-?\d+),\s+",
            r"Doppler down:\s+(-?\d+),\s+",
            r"Doppler up rate:\s+(-?\d+),\s+",
            r"Doppler down rate:\s+(-?\d+),\s+",
            r"Offset:\s+(-?\d+),\s+",
            r"Tracking:\s+(\S+),\s+",
            r"Freq Scaling:\s+(\S+),\s+",
            r"RIT:\s+(\S+),\s+",
            r"RIT Freq:\s+(-?\d+)",
        ))
        .expect("telemetry line pattern is valid")
    })
}

/// Parse one tracker status line.
///
/// The sample time combines the log line's date with the tracker's own
/// `Timestamp:` field; the log line's minute stamp is ignored.
pub fn parse_line(line: &str) -> Option<TelemetrySample> {
    let caps = line_pattern().captures(line.trim())?;

    let date = NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(&caps[3], "%H:%M:%S").ok()?;

    Some(TelemetrySample {
        timestamp: NaiveDateTime::new(date, time),
        satellite: caps[4].to_string(),
        azimuth_deg: caps[5].parse().ok()?,
        elevation_deg: caps[6].parse().ok()?,
        range_km: caps[7].parse().ok()?,
        main_hz: caps[8].parse().ok()?,
        sub_hz: caps[9].parse().ok()?,
        doppler_up_hz: caps[10].parse().ok()?,
        doppler_down_hz: caps[11].parse().ok()?,
        doppler_up_rate_hz: caps[12].parse().ok()?,
        doppler_down_rate_hz: caps[13].parse().ok()?,
        tuning_offset_hz: caps[14].parse().ok()?,
        tracking: caps[15].to_string(),
        freq_scaling: caps[16].to_string(),
        rit: caps[17].to_string(),
        rit_freq_hz: caps[18].parse().ok()?,
    })
}
