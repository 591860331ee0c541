//! Loader for `dump_historic_ops` JSON files.
//!
//! Each dump is an object holding an array of op records under `ops`
//! (or `Ops` in some releases). Multiple dumps are concatenated in the
//! order given, without merging or dedup.

use super::schema::OpRecord;
use crate::utils::config::OPS_FIELD_NAMES;
use crate::utils::error::ParseError;
use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::Path;

// Tried in order after RFC 3339
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Load every dump in `paths` and concatenate their op arrays
///
/// **Public** - main entry point for loading
///
/// # Errors
/// The first file that cannot be read or parsed aborts the load.
pub fn load_dumps<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<OpRecord>, ParseError> {
    let mut ops = Vec::new();

    for path in paths {
        let mut loaded = load_dump(path)?;
        ops.append(&mut loaded);
    }

    debug!("Loaded {} op records from {} file(s)", ops.len(), paths.len());
    Ok(ops)
}

/// Load the op array from a single dump file
///
/// # Errors
/// * `ParseError::Io` - File cannot be read
/// * `ParseError::Json` - File is not valid JSON
/// * `ParseError::MissingOps` - No `ops`/`Ops` array
/// * `ParseError::InvalidRecord` - A record does not match the schema
pub fn load_dump(path: impl AsRef<Path>) -> Result<Vec<OpRecord>, ParseError> {
    let path = path.as_ref();
    info!("Loading ops dump: {}", path.display());

    let text = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_dump(path, &text)
}

/// Parse dump text; `path` is only used in error messages
pub fn parse_dump(path: impl AsRef<Path>, text: &str) -> Result<Vec<OpRecord>, ParseError> {
    let path = path.as_ref();

    let document: serde_json::Value =
        serde_json::from_str(text).map_err(|source| ParseError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    let records = OPS_FIELD_NAMES
        .iter()
        .find_map(|field| document.get(*field).and_then(|v| v.as_array()))
        .ok_or_else(|| ParseError::MissingOps(path.to_path_buf()))?;

    let ops = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            OpRecord::deserialize(record).map_err(|source| ParseError::InvalidRecord {
                path: path.to_path_buf(),
                index,
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!("{}: {} op records", path.display(), ops.len());
    Ok(ops)
}

/// Parse an event timestamp
///
/// Accepts RFC 3339 and the `YYYY-MM-DD HH:MM:SS.ffffff` forms Ceph emits,
/// with or without a numeric offset. Timestamps without an offset are UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, ParseError> {
    let value = value.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(ts) = DateTime::parse_from_str(value, format) {
            return Ok(ts.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(ts.and_utc());
        }
    }

    Err(ParseError::InvalidTimestamp(value.to_string()))
}

/// Signed elapsed seconds from `start` to `end`
pub fn seconds_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    delta_to_secs(end - start)
}

fn delta_to_secs(delta: TimeDelta) -> f64 {
    delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) / 1e9
}
