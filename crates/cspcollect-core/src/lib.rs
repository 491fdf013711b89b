// Public fallible APIs in this crate share one concrete error contract (`CollectError`).
// Repeating per-function `# Errors` boilerplate obscures behavior more than it clarifies.
#![allow(
    clippy::missing_errors_doc,
    reason = "crate-wide fallible API uses one explicit error type; per-item boilerplate would duplicate contract"
)]

pub mod collector;
pub mod error;
pub mod metadata;
pub mod policy;
pub mod record;
pub mod report;
pub mod store;

pub use collector::{Collector, Submission};
pub use error::{CollectError, Result};
pub use metadata::CollectionMetadata;
pub use policy::PolicyVariant;
pub use record::LogRecord;
pub use report::{MARKER_KEY, ParsedReport, Report};
pub use store::{RecordStore, load_record};
