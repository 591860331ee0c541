//! Ops dump loading and schema definitions.
//!
//! This module handles:
//! - Reading `dump_historic_ops` JSON files
//! - Validating op records against the schema
//! - Parsing event timestamps

pub mod ops_dump;
pub mod schema;

// Re-export main types
pub use ops_dump::{load_dump, load_dumps, parse_dump, parse_timestamp, seconds_between};
pub use schema::{LifecycleEvent, OpRecord, TypeData};
