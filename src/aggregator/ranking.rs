//! Dedup, filter and rank ops by total duration.

use super::filter::{classify, Verdict};
use super::intervals::{extract_intervals, Interval, IntervalSet};
use crate::parser::OpRecord;
use crate::utils::config::AnalyzerConfig;
use crate::utils::error::ParseError;
use log::debug;
use std::collections::HashSet;

/// A ranked op with its longest intervals
#[derive(Debug, Clone, PartialEq)]
pub struct OpSummary {
    pub age: f64,
    pub description: String,

    /// Total op duration in seconds
    pub duration: f64,

    /// Longest intervals, longest first
    pub top_intervals: Vec<Interval>,
}

impl OpSummary {
    /// Share of the op's duration spent in `interval`, in percent
    pub fn percentage(&self, interval: &Interval) -> Option<f64> {
        percentage_of(interval.seconds, self.duration)
    }
}

/// `seconds` as a percentage of `duration`
///
/// Returns `None` for a zero duration instead of an infinite or NaN result.
pub fn percentage_of(seconds: f64, duration: f64) -> Option<f64> {
    if duration == 0.0 {
        return None;
    }
    let pct = seconds / duration * 100.0;
    pct.is_finite().then_some(pct)
}

/// Tracks op descriptions already seen
///
/// Retried or repeated ops (scrub sub-steps, mostly) share a description;
/// only the first record with a given description is analyzed.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<String>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true the first time `description` is offered
    pub fn first_seen(&mut self, description: &str) -> bool {
        if self.seen.contains(description) {
            return false;
        }
        self.seen.insert(description.to_string());
        true
    }
}

/// Per-run counters, for logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisCounts {
    pub loaded: usize,
    pub duplicates: usize,
    pub no_events: usize,
    pub fast_commit: usize,
    pub lock_wait: usize,
    pub kept: usize,
}

/// Build the ranked summary of one op
pub fn summarize_op(op: &OpRecord, intervals: &IntervalSet, top_n: usize) -> OpSummary {
    OpSummary {
        age: op.age,
        description: op.description.clone(),
        duration: op.duration,
        top_intervals: intervals.longest(top_n),
    }
}

/// Sort by duration, longest first; equal durations keep their order
pub fn rank_by_duration(summaries: &mut [OpSummary]) {
    summaries.sort_by(|a, b| b.duration.total_cmp(&a.duration));
}

/// Dedup, extract, filter and rank every op
///
/// **Public** - main entry point for ranking
///
/// # Returns
/// Summaries of qualifying ops sorted by duration (longest first), plus counters.
///
/// # Errors
/// * `ParseError::InvalidTimestamp` - An analyzed op has an unparseable time
pub fn collect_ranked_ops(
    ops: &[OpRecord],
    config: &AnalyzerConfig,
) -> Result<(Vec<OpSummary>, AnalysisCounts), ParseError> {
    let mut dedup = Deduplicator::new();
    let mut counts = AnalysisCounts {
        loaded: ops.len(),
        ..Default::default()
    };
    let mut summaries = Vec::new();

    for op in ops {
        if !dedup.first_seen(&op.description) {
            counts.duplicates += 1;
            continue;
        }

        let Some(intervals) = extract_intervals(op, &config.measure_between)? else {
            counts.no_events += 1;
            continue;
        };

        match classify(&intervals, &config.filter) {
            Verdict::Keep => {}
            Verdict::FastCommit => {
                counts.fast_commit += 1;
                continue;
            }
            Verdict::LockWait => {
                counts.lock_wait += 1;
                continue;
            }
        }

        summaries.push(summarize_op(op, &intervals, config.top_intervals));
    }

    counts.kept = summaries.len();
    debug!(
        "{} ops: {} duplicate, {} without events, {} fast commit, {} lock wait, {} kept",
        counts.loaded,
        counts.duplicates,
        counts.no_events,
        counts.fast_commit,
        counts.lock_wait,
        counts.kept
    );

    rank_by_duration(&mut summaries);
    Ok((summaries, counts))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(description: &str, duration: f64) -> OpSummary {
        OpSummary {
            age: 1.0,
            description: description.to_string(),
            duration,
            top_intervals: Vec::new(),
        }
    }

    #[test]
    fn test_percentage_of_zero_duration() {
        assert_eq!(percentage_of(1.0, 0.0), None);
        assert_eq!(percentage_of(0.0, 0.0), None);
        assert_eq!(percentage_of(2.5, 10.0), Some(25.0));
    }

    #[test]
    fn test_deduplicator() {
        let mut dedup = Deduplicator::new();
        assert!(dedup.first_seen("osd_op(client.1 ...)"));
        assert!(!dedup.first_seen("osd_op(client.1 ...)"));
        assert!(dedup.first_seen("osd_op(client.2 ...)"));
    }

    #[test]
    fn test_rank_by_duration_is_stable() {
        let mut ops = vec![
            summary("a", 1.0),
            summary("b", 5.0),
            summary("c", 1.0),
            summary("d", 5.0),
        ];
        rank_by_duration(&mut ops);

        let order: Vec<&str> = ops.iter().map(|o| o.description.as_str()).collect();
        assert_eq!(order, vec!["b", "d", "a", "c"]);
    }
}
