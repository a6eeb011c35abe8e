use std::collections::HashMap;

use chrono::Duration;

use crate::echo::Echo;
use crate::logs::LogRecord;

/// Pair each transmission with the first reception that is the same signal
/// heard back.
///
/// Receptions are indexed by (mode, message) with their log order kept, so
/// the first qualifying candidate is the same one a full scan would pick.
/// Each transmission yields at most one echo; the result is sorted by time.
pub fn find_echoes(
    transmissions: &[LogRecord],
    receptions: &[LogRecord],
    callsign: &str,
    tolerance: Duration,
) -> Vec<Echo> {
    let mut by_content: HashMap<(&str, &str), Vec<&LogRecord>> = HashMap::new();
    for rx in receptions {
        by_content
            .entry((rx.mode.as_str(), rx.message.as_str()))
            .or_default()
            .push(rx);
    }

    let mut echoes: Vec<Echo> = transmissions
        .iter()
        .filter_map(|tx| {
            let candidates = by_content.get(&(tx.mode.as_str(), tx.message.as_str()))?;
            let rx = candidates.iter().find(|rx| {
                (rx.timestamp - tx.timestamp).abs() <= tolerance
                    && rx.frequency != tx.frequency
                    && rx.message.contains(callsign)
            })?;
            Some(Echo {
                timestamp: tx.timestamp,
                timestamp_text: tx.timestamp_text.clone(),
                tx_frequency: tx.frequency,
                tx_offset_hz: tx.offset_hz,
                rx_frequency: rx.frequency,
                rx_offset_hz: rx.offset_hz,
                snr_db: rx.snr_db,
                dt_s: rx.dt_s,
                message: tx.message.clone(),
            })
        })
        .collect();

    echoes.sort_by_key(|e| e.timestamp);
    log::debug!(
        "Matched {} echoes from {} transmissions and {} receptions",
        echoes.len(),
        transmissions.len(),
        receptions.len()
    );
    echoes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logs::wsjt;

    fn record(line: &str) -> LogRecord {
        wsjt::parse_line(line).unwrap()
    }

    fn match_all(tx: &[LogRecord], rx: &[LogRecord]) -> Vec<Echo> {
        find_echoes(tx, rx, "M0SNZ", Duration::seconds(1))
    }

    #[test]
    fn matches_echo_and_takes_rx_measurements() {
        let tx = vec![record("240501_123015 14.074 Tx FT8 0 0.0 1500 CQ M0SNZ IO91")];
        let rx = vec![record("240501_123016 14.075 Rx FT8 -12 0.4 1488 CQ M0SNZ IO91")];

        let echoes = match_all(&tx, &rx);
        assert_eq!(echoes.len(), 1);
        let echo = &echoes[0];
        assert_eq!(echo.timestamp_text, "240501_123015");
        assert_eq!(echo.tx_offset_hz, 1500);
        assert_eq!(echo.rx_offset_hz, 1488);
        assert_eq!(echo.offset_delta_hz(), 12);
        assert_eq!(echo.snr_db, -12);
        assert_eq!(echo.dt_s, 0.4);
        assert_eq!(echo.rx_frequency, 14.075);
    }

    #[test]
    fn same_frequency_is_not_an_echo() {
        let tx = vec![record("240501_123015 14.074 Tx FT8 0 0.0 1500 CQ M0SNZ IO91")];
        let rx = vec![record("240501_123015 14.074 Rx FT8 -12 0.4 1488 CQ M0SNZ IO91")];
        assert!(match_all(&tx, &rx).is_empty());
    }

    #[test]
    fn requires_callsign_marker() {
        let tx = vec![record("240501_123015 14.074 Tx FT8 0 0.0 1500 CQ G4ABC IO91")];
        let rx = vec![record("240501_123015 14.075 Rx FT8 -12 0.4 1488 CQ G4ABC IO91")];
        assert!(match_all(&tx, &rx).is_empty());
        assert_eq!(
            find_echoes(&tx, &rx, "G4ABC", Duration::seconds(1)).len(),
            1
        );
    }

    #[test]
    fn mode_and_message_must_agree() {
        let tx = vec![record("240501_123015 14.074 Tx FT8 0 0.0 1500 CQ M0SNZ IO91")];
        let rx = vec![
            record("240501_123015 14.075 Rx FT4 -12 0.4 1488 CQ M0SNZ IO91"),
            record("240501_123015 14.075 Rx FT8 -12 0.4 1488 CQ M0SNZ IO92"),
        ];
        assert!(match_all(&tx, &rx).is_empty());
    }

    #[test]
    fn tolerance_is_inclusive() {
        let tx = vec![record("240501_123015 14.074 Tx FT8 0 0.0 1500 CQ M0SNZ IO91")];
        let at_edge = vec![record("240501_123014 14.075 Rx FT8 -1 0.4 1488 CQ M0SNZ IO91")];
        let beyond = vec![record("240501_123017 14.075 Rx FT8 -1 0.4 1488 CQ M0SNZ IO91")];

        assert_eq!(match_all(&tx, &at_edge).len(), 1);
        assert!(match_all(&tx, &beyond).is_empty());
    }

    #[test]
    fn first_qualifying_reception_wins() {
        let tx = vec![record("240501_123015 14.074 Tx FT8 0 0.0 1500 CQ M0SNZ IO91")];
        let rx = vec![
            record("240501_123015 14.074 Rx FT8 -1 0.1 1500 CQ M0SNZ IO91"),
            record("240501_123016 14.075 Rx FT8 -7 0.2 1490 CQ M0SNZ IO91"),
            record("240501_123015 14.076 Rx FT8 -3 0.3 1495 CQ M0SNZ IO91"),
        ];

        let echoes = match_all(&tx, &rx);
        assert_eq!(echoes.len(), 1);
        assert_eq!(echoes[0].snr_db, -7);
    }

    #[test]
    fn order_of_receptions_irrelevant_with_single_candidate() {
        let tx = vec![record("240501_123015 14.074 Tx FT8 0 0.0 1500 CQ M0SNZ IO91")];
        let good = record("240501_123015 14.075 Rx FT8 -9 0.2 1490 CQ M0SNZ IO91");
        let noise = record("240501_123015 14.075 Rx FT8 -2 0.2 1490 M0SNZ G4ABC -01");
        let far = record("240501_124015 14.075 Rx FT8 -2 0.2 1490 CQ M0SNZ IO91");

        let forward = match_all(&tx, &[good.clone(), noise.clone(), far.clone()]);
        let backward = match_all(&tx, &[far, noise, good]);
        assert_eq!(forward, backward);
        assert_eq!(forward[0].snr_db, -9);
    }

    #[test]
    fn output_sorted_and_one_echo_per_transmission() {
        let tx = vec![
            record("240501_123045 14.074 Tx FT8 0 0.0 1500 M0SNZ G4ABC -05"),
            record("240501_123015 14.074 Tx FT8 0 0.0 1500 CQ M0SNZ IO91"),
        ];
        let rx = vec![
            record("240501_123015 14.075 Rx FT8 -1 0.1 1490 CQ M0SNZ IO91"),
            record("240501_123016 14.075 Rx FT8 -2 0.1 1490 CQ M0SNZ IO91"),
            record("240501_123045 14.075 Rx FT8 -3 0.1 1490 M0SNZ G4ABC -05"),
        ];

        let echoes = match_all(&tx, &rx);
        assert_eq!(echoes.len(), 2);
        assert_eq!(echoes[0].timestamp_text, "240501_123015");
        assert_eq!(echoes[1].timestamp_text, "240501_123045");
    }
}
