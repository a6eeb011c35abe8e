mod correlate;
mod matcher;
mod types;

pub use correlate::{combine, nearest_telemetry};
pub use matcher::find_echoes;
pub use types::{CombinedEcho, Echo, TelemetryMatch};
