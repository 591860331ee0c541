//! Ceph Ops Analyzer
//!
//! Finds the slowest operations and event transitions in
//! `dump_historic_ops` output from Ceph OSDs.
//!
//! Each op's lifecycle timestamps are turned into elapsed intervals,
//! ops that were not slow locally are filtered out, and the rest are
//! ranked by duration and summarized per interval. This separates ops
//! that were slow before commit from ops that waited on replicas.
//!
//! ## Getting Started
//!
//! ```bash
//! ceph daemon osd.0 dump_historic_ops > osd.0.json
//! ops-analyzer osd.0.json
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
