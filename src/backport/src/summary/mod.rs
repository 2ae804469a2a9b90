//! Backport outcomes and run summary.

mod result;
mod run_summary;

pub use result::TargetOutcome;
pub use run_summary::{BackportResult, BackportSummary};
