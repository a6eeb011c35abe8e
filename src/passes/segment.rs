use chrono::Duration;

use crate::echo::CombinedEcho;
use crate::passes::Pass;

/// Split a time-sorted echo stream into passes.
///
/// A new pass starts when the gap to the previous echo exceeds `max_gap`, or
/// when both neighbours carry telemetry for different satellites. Without
/// telemetry on both sides only the gap is checked.
pub fn group_into_passes(echoes: Vec<CombinedEcho>, max_gap: Duration) -> Vec<Pass> {
    let mut passes = Vec::new();
    let mut current: Option<Pass> = None;

    for curr in echoes {
        let Some(mut pass) = current.take() else {
            current = Some(Pass::new(curr));
            continue;
        };

        if continues(pass.last(), &curr, max_gap) {
            pass.push(curr);
            current = Some(pass);
        } else {
            passes.push(pass);
            current = Some(Pass::new(curr));
        }
    }

    passes.extend(current);
    passes
}

fn continues(prev: &CombinedEcho, curr: &CombinedEcho, max_gap: Duration) -> bool {
    let time_gap_ok = curr.echo.timestamp - prev.echo.timestamp <= max_gap;

    match (prev.sample(), curr.sample()) {
        (Some(p), Some(c)) => time_gap_ok && p.satellite == c.satellite,
        _ => time_gap_ok,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{at, bare, combined};

    fn gap() -> Duration {
        Duration::minutes(30)
    }

    fn sizes(passes: &[Pass]) -> Vec<usize> {
        passes.iter().map(Pass::len).collect()
    }

    #[test]
    fn empty_input_has_no_passes() {
        assert!(group_into_passes(Vec::new(), gap()).is_empty());
    }

    #[test]
    fn single_echo_is_one_pass() {
        let passes = group_into_passes(vec![bare(at(12, 0, 0))], gap());
        assert_eq!(sizes(&passes), vec![1]);
    }

    #[test]
    fn same_satellite_within_gap_merges() {
        let echoes = vec![
            combined(at(12, 0, 0), "IO-117"),
            combined(at(12, 30, 0), "IO-117"),
        ];
        assert_eq!(sizes(&group_into_passes(echoes, gap())), vec![2]);
    }

    #[test]
    fn gap_over_limit_splits() {
        let echoes = vec![
            combined(at(12, 0, 0), "IO-117"),
            combined(at(12, 30, 1), "IO-117"),
        ];
        assert_eq!(sizes(&group_into_passes(echoes, gap())), vec![1, 1]);
    }

    #[test]
    fn satellite_change_splits_even_without_gap() {
        let echoes = vec![
            combined(at(12, 0, 0), "IO-117"),
            combined(at(12, 0, 0), "SO-50"),
            combined(at(12, 0, 15), "SO-50"),
        ];
        let passes = group_into_passes(echoes, gap());
        assert_eq!(sizes(&passes), vec![1, 2]);
        assert_eq!(passes[1].satellite(), "SO-50");
    }

    #[test]
    fn missing_telemetry_only_checks_gap() {
        let echoes = vec![
            combined(at(12, 0, 0), "IO-117"),
            bare(at(12, 5, 0)),
            combined(at(12, 10, 0), "SO-50"),
            bare(at(13, 0, 0)),
        ];
        let passes = group_into_passes(echoes, gap());
        assert_eq!(sizes(&passes), vec![3, 1]);
        assert_eq!(passes[0].satellite(), "IO-117");
        assert_eq!(passes[1].satellite(), "Unknown");
    }
}
