//! The unit being iterated over and its marker-attachment interface.
//!
//! The driver never touches a unit's payload; it communicates with the
//! sub-pipeline exclusively through out-of-band **markers** attached to the
//! unit. A marker is a named, typed value ([`MarkerValue`]) that lives next
//! to the payload, never inside it.

use std::collections::BTreeMap;

use serde_json::Value;

/// Marker names used by the driver protocol.
pub mod markers {
    /// Presence rejects nested fixed-point runs on the same unit.
    pub const GUARD: &str = "fixpoint.guard";
    /// 0-based iteration number, refreshed each iteration. Diagnostic only.
    pub const ITERATION: &str = "fixpoint.iteration";
    /// Convergence signal: set by any step that mutates the unit, cleared by
    /// the driver before each iteration. Absent at iteration end means
    /// the pipeline reached a fixed point.
    pub const MODIFIED: &str = "fixpoint.modified";
}

/// Value carried by a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerValue {
    /// Presence-only marker; carries no payload.
    Flag,
    /// An iteration index.
    Index(usize),
}

/// A mutable entity that a pipeline transforms in place.
///
/// Implementors own their payload however they like; the driver only needs
/// the marker table and a location string for diagnostics.
pub trait Unit {
    /// Attach a marker, overwriting any existing value under the same name.
    fn set_marker(&mut self, name: &str, value: MarkerValue);

    /// Read a marker, if present.
    fn marker(&self, name: &str) -> Option<&MarkerValue>;

    /// Remove a marker. Removing an absent marker is a no-op, not an error.
    fn remove_marker(&mut self, name: &str);

    /// Source location or identity of this unit, used in diagnostics.
    fn location(&self) -> &str;

    /// Whether a marker is present.
    fn has_marker(&self, name: &str) -> bool {
        self.marker(name).is_some()
    }

    /// Report that this unit was mutated during the current iteration.
    ///
    /// Steps call this to keep the fixed-point loop going; the driver clears
    /// the flag before every iteration.
    fn mark_modified(&mut self) {
        self.set_marker(markers::MODIFIED, MarkerValue::Flag);
    }
}

/// Stock [`Unit`] over a JSON document.
///
/// The payload is a plain [`serde_json::Value`]; markers live in a separate
/// table and never leak into the document.
#[derive(Debug, Clone)]
pub struct JsonUnit {
    payload: Value,
    location: String,
    markers: BTreeMap<String, MarkerValue>,
}

impl JsonUnit {
    /// Wrap a JSON document. `location` identifies the unit in diagnostics
    /// (a file path, a JSON Pointer, or any other caller-meaningful name).
    pub fn new(payload: Value, location: impl Into<String>) -> Self {
        Self {
            payload,
            location: location.into(),
            markers: BTreeMap::new(),
        }
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut Value {
        &mut self.payload
    }

    /// Consume the unit, discarding any markers still attached.
    pub fn into_payload(self) -> Value {
        self.payload
    }
}

impl Unit for JsonUnit {
    fn set_marker(&mut self, name: &str, value: MarkerValue) {
        self.markers.insert(name.to_string(), value);
    }

    fn marker(&self, name: &str) -> Option<&MarkerValue> {
        self.markers.get(name)
    }

    fn remove_marker(&mut self, name: &str) {
        self.markers.remove(name);
    }

    fn location(&self) -> &str {
        &self.location
    }
}
