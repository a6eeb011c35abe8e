use crate::logs::wsjt::parse_compact_timestamp;
use crate::passes::Pass;

/// File stem `<YYYYMMDD>_<HHMMSS>_<SAT>` shared by a pass's CSV and JSON.
///
/// Taken from the first telemetry-bearing echo; a pass without telemetry has
/// no files.
pub fn base_name(pass: &Pass) -> Option<String> {
    let first = pass.first_with_telemetry()?;
    let sample = first.sample()?;
    let start = parse_compact_timestamp(&first.echo.timestamp_text).unwrap_or(first.echo.timestamp);
    Some(format!("{}_{}", start.format("%Y%m%d_%H%M%S"), sample.satellite))
}
