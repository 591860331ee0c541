//! Compute elapsed time between lifecycle events of an op.
//!
//! Two kinds of interval are recorded per op:
//! - consecutive steps, keyed "<prev>-<cur>", starting from a synthetic
//!   `start` event at `initiated_at`
//! - named intervals from `measure_between`, keyed "<start>-<end>"
//!
//! Example: events `queued_for_pg`, `reached_pg` produce
//! "start-queued_for_pg", "queued_for_pg-reached_pg".

use crate::parser::{parse_timestamp, seconds_between, OpRecord};
use crate::utils::config::{MeasureBetween, START_EVENT};
use crate::utils::error::ParseError;
use chrono::{DateTime, Utc};
use log::trace;
use std::collections::HashMap;

/// Elapsed time between two events
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    /// "<from>-<to>"
    pub key: String,

    /// Signed elapsed seconds
    pub seconds: f64,
}

impl Interval {
    pub fn new(key: impl Into<String>, seconds: f64) -> Self {
        Self {
            key: key.into(),
            seconds,
        }
    }
}

/// Intervals of one op, in insertion order
///
/// Insertion order is the tie-break for ranking, so this is a list rather
/// than a hash map. Ops carry a few dozen events at most.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntervalSet {
    entries: Vec<Interval>,
}

impl IntervalSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|interval| interval.key == key)
            .map(|interval| interval.seconds)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Record `key` unless it is already present
    pub fn insert_first(&mut self, key: String, seconds: f64) {
        if !self.contains(&key) {
            self.entries.push(Interval { key, seconds });
        }
    }

    /// Record `key`, overwriting in place if it is already present
    pub fn set(&mut self, key: String, seconds: f64) {
        match self.entries.iter_mut().find(|interval| interval.key == key) {
            Some(existing) => existing.seconds = seconds,
            None => self.entries.push(Interval { key, seconds }),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Interval> {
        self.entries.iter()
    }

    /// The `n` longest intervals, longest first
    ///
    /// Equal durations keep insertion order.
    pub fn longest(&self, n: usize) -> Vec<Interval> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.seconds.total_cmp(&a.seconds));
        sorted.truncate(n);
        sorted
    }
}

/// Compute all intervals for an op
///
/// **Public** - main entry point for delta extraction
///
/// # Returns
/// `Ok(None)` when the op has no event timeline.
///
/// # Errors
/// * `ParseError::InvalidTimestamp` - `initiated_at` or an event time is unparseable
pub fn extract_intervals(
    op: &OpRecord,
    measure_between: &[MeasureBetween],
) -> Result<Option<IntervalSet>, ParseError> {
    let Some(events) = op.events() else {
        return Ok(None);
    };

    let initiated = parse_timestamp(&op.initiated_at)?;

    let mut intervals = IntervalSet::new();
    let mut step_to_time: HashMap<&str, DateTime<Utc>> = HashMap::with_capacity(events.len());

    let mut last_event = START_EVENT;
    let mut last_time = initiated;

    for step in events {
        let step_time = parse_timestamp(&step.time)?;

        // Repeated event names keep their first timestamp
        step_to_time.entry(step.event.as_str()).or_insert(step_time);

        intervals.insert_first(
            format!("{}-{}", last_event, step.event),
            seconds_between(last_time, step_time),
        );

        last_event = step.event.as_str();
        last_time = step_time;
    }

    for measure in measure_between {
        let Some(&start_time) = step_to_time.get(measure.start.as_str()) else {
            continue;
        };

        for end in &measure.ends {
            if let Some(&end_time) = step_to_time.get(end.as_str()) {
                intervals.set(
                    format!("{}-{}", measure.start, end),
                    seconds_between(start_time, end_time),
                );
            }
        }
    }

    trace!(
        "{}: {} intervals from {} events",
        op.description,
        intervals.len(),
        events.len()
    );

    Ok(Some(intervals))
}
