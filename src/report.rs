use std::fmt::{self, Write};

use crate::echo::CombinedEcho;
use crate::export::{PassRow, CSV_HEADER};
use crate::passes::PassStatistics;
use crate::pipeline::{Analysis, PassReport};

/// Human-readable summary of a run, one block per pass.
pub fn render(analysis: &Analysis) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_analysis(&mut out, analysis);
    out
}

fn write_analysis(out: &mut String, analysis: &Analysis) -> fmt::Result {
    writeln!(
        out,
        "Found {} total echoes in {} pass(es):",
        analysis.total_echoes,
        analysis.passes.len()
    )?;

    for report in &analysis.passes {
        write_pass(out, report)?;
    }

    if analysis.total_echoes == 0 {
        writeln!(out, "No echoes found.")?;
    }
    Ok(())
}

fn write_pass(out: &mut String, report: &PassReport) -> fmt::Result {
    let pass = &report.pass;
    let start = pass.first_with_telemetry().unwrap_or(&pass.echoes()[0]);
    writeln!(
        out,
        "\n--- Pass {}: {} starting at {} ({} echoes) ---",
        report.number,
        pass.satellite(),
        start.echo.timestamp_text,
        pass.len()
    )?;

    writeln!(out, "\nPass Statistics:")?;
    match &report.statistics {
        PassStatistics::NoSatelliteData { num_echoes } => {
            writeln!(
                out,
                "   Echoes: {} | {}",
                num_echoes,
                PassStatistics::NO_SATELLITE_NOTE
            )?;
        }
        PassStatistics::WithSatellite(s) => {
            writeln!(out, "   Echoes: {} ({} with satellite data)", s.num_echoes, s.num_with_sat)?;
            writeln!(
                out,
                "   Offset delta mean: {} Hz (+/-{})",
                s.offset_delta_mean_hz, s.offset_delta_std_hz
            )?;
            writeln!(
                out,
                "   SNR: {} to {} dB (mean {} dB)",
                s.snr_min_db, s.snr_max_db, s.snr_mean_db
            )?;
            writeln!(out, "   DT mean: {} s", s.dt_mean_s)?;
            writeln!(
                out,
                "   Azimuth: {}° -> {}° (mean {}°)",
                s.az_min_deg, s.az_max_deg, s.az_mean_deg
            )?;
            writeln!(
                out,
                "   Elevation: mean {}°, peak {}°",
                s.el_mean_deg, s.el_max_deg
            )?;
            writeln!(out, "   Closest range: {} km", s.range_min_km)?;
            writeln!(out, "   Doppler up mean: {} Hz", s.dop_up_mean_hz)?;
            writeln!(out, "   Doppler down mean: {} Hz", s.dop_down_mean_hz)?;
            writeln!(
                out,
                "   Total tuned freq: {} -> {} Hz (mean {}, std {})",
                s.total_freq_min_hz, s.total_freq_max_hz, s.total_freq_mean_hz, s.total_freq_std_hz
            )?;
            writeln!(out, "   Center drift: {} Hz\n", s.center_drift_hz)?;
        }
    }

    writeln!(out, "{}", CSV_HEADER.join(","))?;
    let center = report.statistics.center_drift_hz();
    for combined in pass.echoes() {
        writeln!(out, "{}", echo_line(combined, center))?;
    }

    match &report.track {
        Some(track) => {
            writeln!(
                out,
                "Track: {} points between {} and {}",
                track.points.len(),
                track.window_start,
                track.window_end
            )?;
        }
        None => {
            writeln!(out, "Track: not available")?;
        }
    }
    Ok(())
}

fn echo_line(combined: &CombinedEcho, center_drift_hz: i64) -> String {
    match PassRow::new(combined, center_drift_hz) {
        Some(row) => row.fields().join(", "),
        None => {
            let e = &combined.echo;
            format!(
                "{}, {}, {}, {}, {}, {}, {}, {}",
                e.timestamp_text,
                e.tx_offset_hz,
                e.rx_offset_hz,
                e.offset_delta_hz(),
                e.message,
                e.snr_db,
                e.dt_s,
                PassStatistics::NO_SATELLITE_NOTE
            )
        }
    }
}
