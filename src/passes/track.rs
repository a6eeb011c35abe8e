use chrono::Duration;

use crate::logs::TelemetrySample;
use crate::passes::{Pass, Track, TrackPoint};

/// Reconstruct the satellite's path around a pass from the full telemetry log.
///
/// The window spans the telemetry-bearing echoes plus `margin` on each side,
/// inclusive. Samples below the horizon are kept with elevation floored at
/// zero. Returns `None` when fewer than two samples fall in the window.
pub fn extract_track(pass: &Pass, telemetry: &[TelemetrySample], margin: Duration) -> Option<Track> {
    let mut valid: Vec<_> = pass
        .echoes()
        .iter()
        .filter_map(|c| c.sample().map(|s| (c.echo.timestamp, s)))
        .collect();
    valid.sort_by_key(|(ts, _)| *ts);

    let (start, first) = *valid.first()?;
    let (end, _) = *valid.last()?;
    let satellite = first.satellite.clone();

    let window_start = start - margin;
    let window_end = end + margin;

    let points: Vec<TrackPoint> = telemetry
        .iter()
        .filter(|s| {
            s.satellite == satellite && window_start <= s.timestamp && s.timestamp <= window_end
        })
        .map(|s| TrackPoint {
            azimuth_deg: s.azimuth_deg,
            elevation_deg: s.elevation_deg.max(0.0),
            range_km: s.range_km,
            main_hz: i64::from(s.main_hz),
            sub_hz: i64::from(s.sub_hz),
            doppler_up_hz: i64::from(s.doppler_up_hz),
            doppler_down_hz: i64::from(s.doppler_down_hz),
        })
        .collect();

    if points.len() < 2 {
        log::debug!(
            "Only {} track point(s) for {} between {} and {}",
            points.len(),
            satellite,
            window_start,
            window_end
        );
        return None;
    }

    Some(Track {
        satellite,
        start,
        end,
        window_start,
        window_end,
        points,
    })
}
