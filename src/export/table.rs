use std::fs;
use std::path::Path;

use crate::echo::CombinedEcho;
use crate::export::ExportError;
use crate::passes::{row_metrics, Pass};

pub const CSV_HEADER: [&str; 24] = [
    "Timestamp",
    "TxOffsetHz",
    "RxOffsetHz",
    "OffsetDeltaHz",
    "Message",
    "SNRdB",
    "DTs",
    "Sat",
    "AzDeg",
    "ElDeg",
    "RangeKm",
    "MainHz",
    "SubHz",
    "MainPlusSubHz",
    "DopplerUpHz",
    "DopplerDownHz",
    "TuningOffsetHz",
    "RIT",
    "RITFreqHz",
    "TimeDiffS",
    "Drift",
    "ResidualDoppler",
    "DopplerUpRate",
    "DopplerDownRate",
];

/// One exported line: a telemetry-bearing echo with its derived values.
#[derive(Debug, Clone, PartialEq)]
pub struct PassRow {
    pub timestamp_text: String,
    pub tx_offset_hz: i64,
    pub rx_offset_hz: i64,
    pub offset_delta_hz: i64,
    pub message: String,
    pub snr_db: i64,
    pub dt_s: f64,
    pub satellite: String,
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
    pub range_km: f64,
    pub main_hz: i64,
    pub sub_hz: i64,
    pub main_plus_sub_hz: i64,
    pub doppler_up_hz: i64,
    pub doppler_down_hz: i64,
    pub tuning_offset_hz: i64,
    pub rit: String,
    pub rit_freq_hz: i64,
    pub time_diff_s: f64,
    pub drift_hz: i64,
    pub residual_doppler_hz: i64,
    pub doppler_up_rate_hz: i64,
    pub doppler_down_rate_hz: i64,
}

impl PassRow {
    pub fn new(combined: &CombinedEcho, center_drift_hz: i64) -> Option<Self> {
        let telemetry = combined.telemetry.as_ref()?;
        let metrics = row_metrics(combined, center_drift_hz)?;
        let e = &combined.echo;
        let s = &telemetry.sample;

        Some(Self {
            timestamp_text: e.timestamp_text.clone(),
            tx_offset_hz: i64::from(e.tx_offset_hz),
            rx_offset_hz: i64::from(e.rx_offset_hz),
            offset_delta_hz: metrics.offset_delta_hz,
            message: e.message.clone(),
            snr_db: i64::from(e.snr_db),
            dt_s: e.dt_s,
            satellite: s.satellite.clone(),
            azimuth_deg: s.azimuth_deg,
            elevation_deg: s.elevation_deg,
            range_km: s.range_km,
            main_hz: i64::from(s.main_hz),
            sub_hz: i64::from(s.sub_hz),
            main_plus_sub_hz: s.total_freq_hz(),
            doppler_up_hz: i64::from(s.doppler_up_hz),
            doppler_down_hz: i64::from(s.doppler_down_hz),
            tuning_offset_hz: i64::from(s.tuning_offset_hz),
            rit: s.rit.clone(),
            rit_freq_hz: i64::from(s.rit_freq_hz),
            time_diff_s: telemetry.time_diff_s,
            drift_hz: metrics.drift_hz,
            residual_doppler_hz: metrics.residual_doppler_hz,
            doppler_up_rate_hz: i64::from(s.doppler_up_rate_hz),
            doppler_down_rate_hz: i64::from(s.doppler_down_rate_hz),
        })
    }

    /// Column values in header order, formatted for output.
    pub fn fields(&self) -> Vec<String> {
        vec![
            self.timestamp_text.clone(),
            self.tx_offset_hz.to_string(),
            self.rx_offset_hz.to_string(),
            self.offset_delta_hz.to_string(),
            self.message.clone(),
            self.snr_db.to_string(),
            format_decimal(self.dt_s),
            self.satellite.clone(),
            format!("{:.1}", self.azimuth_deg),
            format!("{:.1}", self.elevation_deg),
            format!("{:.0}", self.range_km),
            self.main_hz.to_string(),
            self.sub_hz.to_string(),
            self.main_plus_sub_hz.to_string(),
            self.doppler_up_hz.to_string(),
            self.doppler_down_hz.to_string(),
            self.tuning_offset_hz.to_string(),
            self.rit.clone(),
            self.rit_freq_hz.to_string(),
            format!("{:.0}", self.time_diff_s),
            self.drift_hz.to_string(),
            self.residual_doppler_hz.to_string(),
            self.doppler_up_rate_hz.to_string(),
            self.doppler_down_rate_hz.to_string(),
        ]
    }

    pub fn to_csv_record(&self) -> String {
        self.fields()
            .iter()
            .map(|f| quote(f))
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn from_csv_record(line: &str, line_no: usize) -> Result<Self, ExportError> {
        let fields = split_record(line);
        if fields.len() != CSV_HEADER.len() {
            return Err(ExportError::Csv {
                line: line_no,
                message: format!("expected {} fields, got {}", CSV_HEADER.len(), fields.len()),
            });
        }

        let int = |i: usize| -> Result<i64, ExportError> {
            fields[i].trim().parse().map_err(|e| ExportError::Csv {
                line: line_no,
                message: format!("{}: {}", CSV_HEADER[i], e),
            })
        };
        let float = |i: usize| -> Result<f64, ExportError> {
            fields[i].trim().parse().map_err(|e| ExportError::Csv {
                line: line_no,
                message: format!("{}: {}", CSV_HEADER[i], e),
            })
        };

        Ok(Self {
            timestamp_text: fields[0].clone(),
            tx_offset_hz: int(1)?,
            rx_offset_hz: int(2)?,
            offset_delta_hz: int(3)?,
            message: fields[4].clone(),
            snr_db: int(5)?,
            dt_s: float(6)?,
            satellite: fields[7].clone(),
            azimuth_deg: float(8)?,
            elevation_deg: float(9)?,
            range_km: float(10)?,
            main_hz: int(11)?,
            sub_hz: int(12)?,
            main_plus_sub_hz: int(13)?,
            doppler_up_hz: int(14)?,
            doppler_down_hz: int(15)?,
            tuning_offset_hz: int(16)?,
            rit: fields[17].clone(),
            rit_freq_hz: int(18)?,
            time_diff_s: float(19)?,
            drift_hz: int(20)?,
            residual_doppler_hz: int(21)?,
            doppler_up_rate_hz: int(22)?,
            doppler_down_rate_hz: int(23)?,
        })
    }
}

/// Rows for every telemetry-bearing echo of a pass, drift centered on
/// `center_drift_hz`.
pub fn pass_rows(pass: &Pass, center_drift_hz: i64) -> Vec<PassRow> {
    pass.echoes()
        .iter()
        .filter_map(|c| PassRow::new(c, center_drift_hz))
        .collect()
}

/// Read back a CSV written by the exporter.
pub fn read_pass_csv(path: &Path) -> Result<Vec<PassRow>, ExportError> {
    let content = fs::read_to_string(path)?;
    content
        .lines()
        .enumerate()
        .skip(1)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| PassRow::from_csv_record(line, i + 1))
        .collect()
}

/// Shortest round-trip form, always with a decimal point (`1.0`, `-0.3`).
fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            ('"', true) => in_quotes = false,
            ('"', false) if current.is_empty() => in_quotes = true,
            (',', false) => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}
