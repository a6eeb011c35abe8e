use chrono::Duration;

use crate::echo::{CombinedEcho, Echo, TelemetryMatch};
use crate::logs::TelemetrySample;

/// Find the telemetry sample closest in time to `echo`.
///
/// Ties go to the sample met first. The match is dropped unless it lies
/// strictly within `max_diff`.
pub fn nearest_telemetry(
    echo: &Echo,
    telemetry: &[TelemetrySample],
    max_diff: Duration,
) -> Option<TelemetryMatch> {
    let mut best: Option<(&TelemetrySample, Duration)> = None;
    for sample in telemetry {
        let diff = (sample.timestamp - echo.timestamp).abs();
        match best {
            Some((_, best_diff)) if diff >= best_diff => {}
            _ => best = Some((sample, diff)),
        }
    }

    let (sample, diff) = best?;
    if diff >= max_diff {
        return None;
    }

    Some(TelemetryMatch {
        sample: sample.clone(),
        time_diff_s: diff.num_milliseconds() as f64 / 1000.0,
    })
}

/// Attach telemetry to every echo, keeping echo order.
pub fn combine(
    echoes: Vec<Echo>,
    telemetry: &[TelemetrySample],
    max_diff: Duration,
) -> Vec<CombinedEcho> {
    echoes
        .into_iter()
        .map(|echo| {
            let telemetry = nearest_telemetry(&echo, telemetry, max_diff);
            if telemetry.is_none() {
                log::debug!(
                    "No telemetry within {}s of {}",
                    max_diff.num_seconds(),
                    echo.timestamp
                );
            }
            CombinedEcho { echo, telemetry }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{at, echo, sample};

    fn max() -> Duration {
        Duration::seconds(5)
    }

    #[test]
    fn picks_nearest_regardless_of_position() {
        let e = echo(at(12, 0, 0));
        let samples = vec![
            sample(at(12, 10, 0), "A"),
            sample(at(11, 50, 0), "B"),
            sample(at(12, 0, 2), "C"),
            sample(at(13, 0, 0), "D"),
        ];

        let found = nearest_telemetry(&e, &samples, max()).unwrap();
        assert_eq!(found.sample.satellite, "C");
        assert_eq!(found.time_diff_s, 2.0);
    }

    #[test]
    fn threshold_is_strict() {
        let e = echo(at(12, 0, 0));
        assert!(nearest_telemetry(&e, &[sample(at(12, 0, 5), "A")], max()).is_none());
        assert!(nearest_telemetry(&e, &[sample(at(11, 59, 55), "A")], max()).is_none());
        assert!(nearest_telemetry(&e, &[sample(at(12, 0, 4), "A")], max()).is_some());
    }

    #[test]
    fn ties_go_to_first_encountered() {
        let e = echo(at(12, 0, 0));
        let samples = vec![sample(at(12, 0, 3), "LATE"), sample(at(11, 59, 57), "EARLY")];
        let found = nearest_telemetry(&e, &samples, max()).unwrap();
        assert_eq!(found.sample.satellite, "LATE");
    }

    #[test]
    fn empty_telemetry_has_no_match() {
        assert!(nearest_telemetry(&echo(at(12, 0, 0)), &[], max()).is_none());
    }

    #[test]
    fn combine_keeps_unmatched_echoes() {
        let echoes = vec![echo(at(12, 0, 0)), echo(at(12, 5, 0))];
        let samples = vec![sample(at(12, 0, 1), "A")];

        let combined = combine(echoes, &samples, max());
        assert_eq!(combined.len(), 2);
        assert!(combined[0].telemetry.is_some());
        assert!(combined[1].telemetry.is_none());
        assert_eq!(combined[0].raw_drift_hz(), Some(580_000_000 + 1490 - 1500));
        assert_eq!(combined[1].raw_drift_hz(), None);
    }
}
