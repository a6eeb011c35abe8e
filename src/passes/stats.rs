use crate::echo::CombinedEcho;
use crate::logs::TelemetrySample;
use crate::passes::{Pass, PassStatistics, SatelliteStatistics};

/// Round half to even at the given number of decimals.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
fn std_dev(values: &[f64]) -> f64 {
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

fn min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn column<F>(valid: &[(&CombinedEcho, &TelemetrySample)], f: F) -> Vec<f64>
where
    F: Fn(&CombinedEcho, &TelemetrySample) -> f64,
{
    valid.iter().map(|&(c, s)| f(c, s)).collect()
}

/// Summarise the telemetry-bearing members of a pass.
///
/// Center drift comes from the first and last such member only, not from
/// the mean over all of them.
pub fn pass_statistics(pass: &Pass) -> PassStatistics {
    let valid: Vec<(&CombinedEcho, &TelemetrySample)> = pass
        .echoes()
        .iter()
        .filter_map(|c| c.sample().map(|s| (c, s)))
        .collect();
    let num_echoes = pass.len();

    let (Some((first, _)), Some((last, _))) = (valid.first(), valid.last()) else {
        return PassStatistics::NoSatelliteData { num_echoes };
    };

    let offset_deltas = column(&valid, |c, _| c.echo.offset_delta_hz() as f64);
    let snrs = column(&valid, |c, _| f64::from(c.echo.snr_db));
    let dts = column(&valid, |c, _| c.echo.dt_s);
    let azs = column(&valid, |_, s| s.azimuth_deg);
    let els = column(&valid, |_, s| s.elevation_deg);
    let ranges = column(&valid, |_, s| s.range_km);
    let dop_ups = column(&valid, |_, s| f64::from(s.doppler_up_hz));
    let dop_downs = column(&valid, |_, s| f64::from(s.doppler_down_hz));
    let total_freqs = column(&valid, |_, s| s.total_freq_hz() as f64);

    let drift_first = first.raw_drift_hz().unwrap_or_default();
    let drift_last = last.raw_drift_hz().unwrap_or_default();
    let center_drift_hz = ((drift_first + drift_last) as f64 / 2.0).round_ties_even() as i64;

    PassStatistics::WithSatellite(SatelliteStatistics {
        num_echoes,
        num_with_sat: valid.len(),
        offset_delta_mean_hz: round_to(mean(&offset_deltas), 1),
        offset_delta_std_hz: round_to(std_dev(&offset_deltas), 1),
        snr_mean_db: round_to(mean(&snrs), 1),
        snr_min_db: min(&snrs) as i32,
        snr_max_db: max(&snrs) as i32,
        dt_mean_s: round_to(mean(&dts), 1),
        az_mean_deg: round_to(mean(&azs), 1),
        az_min_deg: round_to(min(&azs), 1),
        az_max_deg: round_to(max(&azs), 1),
        el_mean_deg: round_to(mean(&els), 1),
        el_max_deg: round_to(max(&els), 1),
        range_min_km: min(&ranges) as i64,
        dop_up_mean_hz: mean(&dop_ups).round_ties_even() as i64,
        dop_down_mean_hz: mean(&dop_downs).round_ties_even() as i64,
        total_freq_min_hz: min(&total_freqs) as i64,
        total_freq_max_hz: max(&total_freqs) as i64,
        total_freq_mean_hz: round_to(mean(&total_freqs), 1),
        total_freq_std_hz: round_to(std_dev(&total_freqs), 1),
        center_drift_hz,
    })
}

/// Derived per-row values of a telemetry-bearing echo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowMetrics {
    pub offset_delta_hz: i64,
    /// `main + rx_offset + sub - tx_offset - center_drift`.
    pub drift_hz: i64,
    /// Drift left after removing both predicted Doppler shifts.
    pub residual_doppler_hz: i64,
}

pub fn row_metrics(echo: &CombinedEcho, center_drift_hz: i64) -> Option<RowMetrics> {
    let sample = echo.sample()?;
    let drift_hz = echo.raw_drift_hz()? - center_drift_hz;
    Some(RowMetrics {
        offset_delta_hz: echo.echo.offset_delta_hz(),
        drift_hz,
        residual_doppler_hz: drift_hz
            - i64::from(sample.doppler_up_hz)
            - i64::from(sample.doppler_down_hz),
    })
}
