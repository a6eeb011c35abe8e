mod error;
mod exporter;
mod naming;
mod table;
mod trajectory;

pub use error::ExportError;
pub use exporter::{ExportOutcome, FileOutcome, PassExporter};
pub use naming::base_name;
pub use table::{pass_rows, read_pass_csv, PassRow, CSV_HEADER};
pub use trajectory::{TrajectoryDocument, TrajectoryPoint};
