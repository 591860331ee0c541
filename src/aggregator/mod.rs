//! Aggregation of op records into ranked intervals and totals.
//!
//! This module transforms loaded op records into:
//! - Per-op event intervals (consecutive steps and named pairs)
//! - A duration-ranked list of interesting ops
//! - Cross-op interval totals

pub mod filter;
pub mod intervals;
pub mod ranking;
pub mod summary;

// Re-export main types and functions
pub use filter::{classify, is_interesting, Verdict};
pub use intervals::{extract_intervals, Interval, IntervalSet};
pub use ranking::{
    collect_ranked_ops, percentage_of, rank_by_duration, summarize_op, AnalysisCounts,
    Deduplicator, OpSummary,
};
pub use summary::{IntervalTotal, IntervalTotals};
