//! Input schema for `dump_historic_ops` records.
//!
//! Only the fields the analysis reads are modelled. Unknown fields are ignored
//! so dumps from different Ceph releases load the same way.

use serde::Deserialize;

/// One traced OSD operation
#[derive(Debug, Clone, Deserialize)]
pub struct OpRecord {
    /// Human-readable op description, also the dedup key
    pub description: String,

    /// Time the op entered the OSD
    pub initiated_at: String,

    /// Age of the op when the dump was taken, in seconds
    pub age: f64,

    /// Total op duration, in seconds
    pub duration: f64,

    /// Type-specific payload holding the event timeline
    #[serde(default)]
    pub type_data: Option<TypeData>,
}

/// Nested `type_data` object
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TypeData {
    /// Lifecycle events in emission order; `None` when absent or null
    #[serde(default)]
    pub events: Option<Vec<LifecycleEvent>>,

    /// Client details, carried through untouched
    #[serde(default)]
    pub client_info: Option<serde_json::Value>,
}

/// A named checkpoint in an op's lifecycle
#[derive(Debug, Clone, Deserialize)]
pub struct LifecycleEvent {
    pub event: String,
    pub time: String,
}

impl OpRecord {
    /// Lifecycle events, if the record carries a timeline
    pub fn events(&self) -> Option<&[LifecycleEvent]> {
        self.type_data.as_ref()?.events.as_deref()
    }
}
