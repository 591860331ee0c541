//! Console report output.
//!
//! The report is written to any `io::Write` so it can be printed to stdout
//! or captured in tests.

pub mod report;

// Re-export main functions
pub use report::{format_seconds, write_report, write_summary, write_top_ops};
