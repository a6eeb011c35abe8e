use serde::{Deserialize, Serialize};

use crate::passes::Track;

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// JSON document read by the polar-plot visualizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryDocument {
    pub sat: String,
    pub start_time: String,
    pub end_time: String,
    pub points: Vec<TrajectoryPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub az: f64,
    pub el: f64,
    pub range_km: f64,
    /// Sub-band frequency.
    pub uplink: i64,
    /// Main-band frequency.
    pub downlink: i64,
    pub dop_up: i64,
    pub dop_down: i64,
}

impl From<&Track> for TrajectoryDocument {
    fn from(track: &Track) -> Self {
        Self {
            sat: track.satellite.clone(),
            start_time: track.start.format(ISO_FORMAT).to_string(),
            end_time: track.end.format(ISO_FORMAT).to_string(),
            points: track
                .points
                .iter()
                .map(|p| TrajectoryPoint {
                    az: p.azimuth_deg,
                    el: p.elevation_deg,
                    range_km: p.range_km,
                    uplink: p.sub_hz,
                    downlink: p.main_hz,
                    dop_up: p.doppler_up_hz,
                    dop_down: p.doppler_down_hz,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passes::TrackPoint;
    use crate::testing::at;

    #[test]
    fn document_maps_bands_and_times() {
        let point = TrackPoint {
            azimuth_deg: 210.5,
            elevation_deg: 0.0,
            range_km: 2500.0,
            main_hz: 435_300_000,
            sub_hz: 145_900_000,
            doppler_up_hz: 3100,
            doppler_down_hz: -9200,
        };
        let track = Track {
            satellite: "IO-117".into(),
            start: at(12, 0, 0),
            end: at(12, 7, 30),
            window_start: at(11, 50, 0),
            window_end: at(12, 17, 30),
            points: vec![point.clone(), point],
        };

        let doc = TrajectoryDocument::from(&track);
        assert_eq!(doc.start_time, "2024-05-01T12:00:00");
        assert_eq!(doc.end_time, "2024-05-01T12:07:30");
        assert_eq!(doc.points[0].uplink, 145_900_000);
        assert_eq!(doc.points[0].downlink, 435_300_000);

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["sat"], "IO-117");
        assert_eq!(json["points"][1]["dop_down"], -9200);
        assert_eq!(json["points"][1]["az"], 210.5);
    }
}
