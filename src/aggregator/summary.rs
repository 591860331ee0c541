//! Aggregate interval time across all qualifying ops.
//!
//! For each interval key this keeps the total seconds and the summed
//! percentage of op duration, over every op that reported the key among its
//! longest intervals.

use super::ranking::OpSummary;
use std::collections::HashMap;

/// Accumulated totals for one interval key
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalTotal {
    pub key: String,

    /// Sum of seconds across ops
    pub seconds: f64,

    /// Sum of per-op percentages; ops with zero duration add nothing
    pub percent_sum: f64,
}

/// Running totals across ops, in first-seen key order
#[derive(Debug, Clone, Default)]
pub struct IntervalTotals {
    totals: Vec<IntervalTotal>,
    index: HashMap<String, usize>,
    total_ops: usize,
}

impl IntervalTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate every op in `ops`
    pub fn from_ops(ops: &[OpSummary]) -> Self {
        let mut totals = Self::new();
        for op in ops {
            totals.add_op(op);
        }
        totals
    }

    /// Accumulate the reported intervals of one op
    pub fn add_op(&mut self, op: &OpSummary) {
        self.total_ops += 1;

        for interval in &op.top_intervals {
            let pct = op.percentage(interval).unwrap_or(0.0);

            let slot = match self.index.get(&interval.key) {
                Some(&slot) => slot,
                None => {
                    self.index.insert(interval.key.clone(), self.totals.len());
                    self.totals.push(IntervalTotal {
                        key: interval.key.clone(),
                        seconds: 0.0,
                        percent_sum: 0.0,
                    });
                    self.totals.len() - 1
                }
            };

            let total = &mut self.totals[slot];
            total.seconds += interval.seconds;
            total.percent_sum += pct;
        }
    }

    /// Number of ops accumulated
    pub fn total_ops(&self) -> usize {
        self.total_ops
    }

    pub fn get(&self, key: &str) -> Option<&IntervalTotal> {
        self.index.get(key).map(|&slot| &self.totals[slot])
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// `(key, total seconds)`, largest first
    pub fn by_total_seconds(&self) -> Vec<(&str, f64)> {
        let mut rows: Vec<(&str, f64)> = self
            .totals
            .iter()
            .map(|t| (t.key.as_str(), t.seconds))
            .collect();
        rows.sort_by(|a, b| b.1.total_cmp(&a.1));
        rows
    }

    /// `(key, average percentage of op duration)`, largest first
    ///
    /// The average is taken over all accumulated ops, not only the ones
    /// that reported the key.
    pub fn by_average_percent(&self) -> Vec<(&str, f64)> {
        let ops = self.total_ops.max(1) as f64;
        let mut rows: Vec<(&str, f64)> = self
            .totals
            .iter()
            .map(|t| (t.key.as_str(), t.percent_sum / ops))
            .collect();
        rows.sort_by(|a, b| b.1.total_cmp(&a.1));
        rows
    }
}
