//! Heuristic filter for "locally slow" ops.
//!
//! An op that reaches op_commit quickly was not slow locally, and an op that
//! waited on rw locks is slow for a reason the intervals will not explain.
//! Both are left out of the ranking.

use super::intervals::IntervalSet;
use crate::utils::config::FilterConfig;

/// Outcome of the filter for one op
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Op is ranked
    Keep,
    /// Commit interval below `min_commit_secs`
    FastCommit,
    /// Op reports the lock-wait interval
    LockWait,
}

impl Verdict {
    pub fn is_keep(self) -> bool {
        self == Verdict::Keep
    }
}

/// Decide whether an op's intervals make it worth ranking
pub fn classify(intervals: &IntervalSet, config: &FilterConfig) -> Verdict {
    if let Some(commit) = intervals.get(&config.commit_interval) {
        if commit < config.min_commit_secs {
            return Verdict::FastCommit;
        }
    }

    if intervals.contains(&config.lock_wait_interval) {
        return Verdict::LockWait;
    }

    Verdict::Keep
}

/// Shorthand for `classify(..).is_keep()`
pub fn is_interesting(intervals: &IntervalSet, config: &FilterConfig) -> bool {
    classify(intervals, config).is_keep()
}
