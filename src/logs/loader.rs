use std::fs;
use std::path::Path;

use crate::logs::{telemetry, wsjt, Direction, LogRecord, TelemetrySample};

/// Read a whole log file, treating a missing or unreadable file as empty.
fn read_log(path: &Path) -> Option<String> {
    if !path.exists() {
        log::warn!("File not found: {}", path.display());
        return None;
    }

    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            log::warn!("Failed to read {}: {}", path.display(), e);
            None
        }
    }
}

/// Load every WSJT record of the given direction, in file order.
pub fn load_log_records(path: &Path, direction: Direction) -> Vec<LogRecord> {
    let Some(content) = read_log(path) else {
        return Vec::new();
    };

    let records: Vec<LogRecord> = content
        .lines()
        .filter_map(wsjt::parse_line)
        .filter(|r| r.direction == direction)
        .collect();

    log::debug!(
        "Loaded {} {:?} records from {}",
        records.len(),
        direction,
        path.display()
    );
    records
}

/// Load every tracker sample, ordered by timestamp.
pub fn load_telemetry(path: &Path) -> Vec<TelemetrySample> {
    let Some(content) = read_log(path) else {
        return Vec::new();
    };

    let mut samples: Vec<TelemetrySample> =
        content.lines().filter_map(telemetry::parse_line).collect();
    samples.sort_by_key(|s| s.timestamp);

    log::debug!(
        "Loaded {} telemetry samples from {}",
        samples.len(),
        path.display()
    );
    samples
}
