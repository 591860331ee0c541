//! CLI command implementations.
//!
//! Commands orchestrate the library components to perform user tasks.

pub mod analyze;

// Re-export main command functions
pub use analyze::{
    analyze_to_writer, display_config, execute_analyze, run_analysis, validate_args, Analysis,
    AnalyzeArgs,
};
