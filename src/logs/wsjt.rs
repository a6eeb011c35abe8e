use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::logs::{Direction, LogRecord};

fn line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(concat!(
            r"^(\d{6}_\d{6})\s+",
            r"(\d+\.\d+)\s+",
            r"(Rx|Tx)\s+",
            r"(\w+)\s+",
            r"(-?\d+)\s+",
            r"(-?\d+\.\d+)\s+",
            r"(\d+)\s+",
            r"(.{0,20})",
        ))
        .expect("WSJT line pattern is valid")
    })
}

/// Parse a single `ALL.TXT` line.
///
/// Returns `None` for anything that is not a decode/transmit line, including
/// lines whose date or numeric fields do not parse.
pub fn parse_line(line: &str) -> Option<LogRecord> {
    let caps = line_pattern().captures(line.trim())?;

    let timestamp_text = caps[1].to_string();
    let timestamp = parse_compact_timestamp(&timestamp_text)?;

    Some(LogRecord {
        timestamp,
        timestamp_text,
        frequency: caps[2].parse().ok()?,
        direction: Direction::from_tag(&caps[3])?,
        mode: caps[4].to_string(),
        snr_db: caps[5].parse().ok()?,
        dt_s: caps[6].parse().ok()?,
        offset_hz: caps[7].parse().ok()?,
        message: caps[8].trim().to_string(),
    })
}

/// Parse `YYMMDD_HHMMSS`, with the year taken as `2000 + YY`.
pub fn parse_compact_timestamp(text: &str) -> Option<NaiveDateTime> {
    if text.len() != 13 || !text.is_ascii() || text.as_bytes()[6] != b'_' {
        return None;
    }
    let field = |range: std::ops::Range<usize>| text[range].parse::<u32>().ok();

    let year = 2000 + field(0..2)? as i32;
    let date = NaiveDate::from_ymd_opt(year, field(2..4)?, field(4..6)?)?;
    date.and_hms_opt(field(7..9)?, field(9..11)?, field(11..13)?)
}
