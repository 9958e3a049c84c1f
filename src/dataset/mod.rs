// Review datasets — the record model and CSV input/output.
//
// Everything structural (missing columns, blank or duplicate identifiers) is
// rejected here, so the analysis itself can assume well-formed rows.

pub mod models;
pub mod table;

pub use models::ReviewRecord;
pub use table::{results_path, ReviewTable, FLAG_COLUMN, REQUIRED_COLUMNS};
