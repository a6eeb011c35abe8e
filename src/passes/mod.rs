mod segment;
mod stats;
mod track;
mod types;

pub use segment::group_into_passes;
pub use stats::{pass_statistics, row_metrics, round_to, RowMetrics};
pub use track::extract_track;
pub use types::{Pass, PassStatistics, SatelliteStatistics, Track, TrackPoint, UNKNOWN_SATELLITE};
