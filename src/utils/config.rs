//! Configuration and constants for the analyzer.
//!
//! The defaults reproduce the classic investigation setup. Operators tune
//! `measure_between` and the filter thresholds through a TOML file.

use super::error::ConfigError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Number of ops shown in the Top-N section
pub const DEFAULT_PRINT_TOP: usize = 20;

/// Number of intervals kept per op
pub const DEFAULT_TOP_INTERVALS: usize = 3;

/// Name of the synthetic first event, timestamped at `initiated_at`
pub const START_EVENT: &str = "start";

// Local-commit heuristic: ops that reach op_commit this fast are not interesting
pub const COMMIT_INTERVAL: &str = "initiated-op_commit";
pub const MIN_COMMIT_SECS: f64 = 0.3;

// Any time spent here means the op was stuck on rw locks, not slow locally
pub const LOCK_WAIT_INTERVAL: &str = "waiting for rw locks-reached_pg";

// Different Ceph releases capitalise the top-level key differently
pub const OPS_FIELD_NAMES: &[&str] = &["ops", "Ops"];

const DEFAULT_MEASURE_BETWEEN: &[(&str, &[&str])] = &[
    ("reached_pg", &["started"]),
    ("initiated", &["queued_for_pg"]),
    ("queued_for_pg", &["reached_pg"]),
    ("journal_completion_queued", &["sub_op_comitted"]),
    ("sub_op_comitted", &["sub_op_applied"]),
    ("sub_op_applied", &["commit_sent"]),
    ("commit_sent", &["done"]),
];

/// Complete analyzer configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// How many of the longest ops to print
    pub print_top: usize,

    /// How many of each op's longest intervals to report and summarize
    pub top_intervals: usize,

    /// Thresholds deciding which ops are worth ranking
    pub filter: FilterConfig,

    /// Named intervals measured explicitly, in insertion order
    pub measure_between: Vec<MeasureBetween>,
}

/// Heuristic thresholds for the interesting-op filter
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Interval compared against `min_commit_secs`
    pub commit_interval: String,

    /// Ops whose commit interval is strictly below this are skipped
    pub min_commit_secs: f64,

    /// Ops that report this interval at all are skipped
    pub lock_wait_interval: String,
}

/// One start event and the end events measured from it
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MeasureBetween {
    pub start: String,
    pub ends: Vec<String>,
}

impl MeasureBetween {
    pub fn new(start: &str, ends: &[&str]) -> Self {
        Self {
            start: start.to_string(),
            ends: ends.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            commit_interval: COMMIT_INTERVAL.to_string(),
            min_commit_secs: MIN_COMMIT_SECS,
            lock_wait_interval: LOCK_WAIT_INTERVAL.to_string(),
        }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            print_top: DEFAULT_PRINT_TOP,
            top_intervals: DEFAULT_TOP_INTERVALS,
            filter: FilterConfig::default(),
            measure_between: DEFAULT_MEASURE_BETWEEN
                .iter()
                .map(|(start, ends)| MeasureBetween::new(start, ends))
                .collect(),
        }
    }
}

impl AnalyzerConfig {
    /// Check the configuration for values the analysis cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.print_top == 0 {
            return Err(ConfigError::Invalid("print_top must be greater than 0".into()));
        }

        if self.top_intervals == 0 {
            return Err(ConfigError::Invalid(
                "top_intervals must be greater than 0".into(),
            ));
        }

        let min = self.filter.min_commit_secs;
        if !min.is_finite() || min < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "filter.min_commit_secs must be a non-negative number, got {}",
                min
            )));
        }

        for measure in &self.measure_between {
            if measure.start.is_empty() {
                return Err(ConfigError::Invalid(
                    "measure_between entry has an empty start event".into(),
                ));
            }
            if measure.ends.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "measure_between entry for {:?} has no end events",
                    measure.start
                )));
            }
        }

        Ok(())
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Load analyzer configuration from a TOML file
///
/// Fields missing from the file keep their defaults.
///
/// # Errors
/// * `ConfigError::Io` - If file cannot be read
/// * `ConfigError::Toml` - If TOML is invalid
/// * `ConfigError::Invalid` - If a value is out of range
pub fn load_config(path: impl AsRef<Path>) -> Result<AnalyzerConfig, ConfigError> {
    let path = path.as_ref();
    debug!("Loading config from: {}", path.display());

    let contents = fs::read_to_string(path)?;
    let config: AnalyzerConfig = toml::from_str(&contents)?;
    config.validate()?;

    Ok(config)
}
