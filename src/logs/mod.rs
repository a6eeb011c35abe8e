mod loader;
pub mod telemetry;
mod types;
pub mod wsjt;

pub use loader::{load_log_records, load_telemetry};
pub use types::{Direction, LogRecord, TelemetrySample};
