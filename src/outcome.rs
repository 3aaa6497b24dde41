//! The result object reported by an invocation.
//!
//! Serialized shape:
//!
//! ```json
//! {
//!   "changed": true,
//!   "diff": {"before": {...}, "after": {...}},
//!   "pingping_monitor": {...}
//! }
//! ```
//!
//! The resource key depends on the operation (`pingping_monitor` or
//! `pingping_check`) and holds `null` when there is no resource to report.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

/// Result key of the monitor operation.
pub const MONITOR_NAMESPACE: &str = "pingping_monitor";

/// Result key of the check operation.
pub const CHECK_NAMESPACE: &str = "pingping_check";

/// Field name to value.
pub type Fields = Map<String, Value>;

/// Before/after snapshots of the reconciled fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diff {
    pub before: Fields,
    pub after: Fields,
}

/// Outcome of one reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    /// Whether a change was made, or would be made in dry-run mode.
    pub changed: bool,
    pub diff: Diff,
    /// The fetched or updated resource.
    pub resource: Option<T>,
    namespace: &'static str,
}

impl<T> Outcome<T> {
    /// An unchanged outcome reported under `namespace`.
    pub fn new(namespace: &'static str) -> Self {
        Self {
            changed: false,
            diff: Diff::default(),
            resource: None,
            namespace,
        }
    }
}

impl<T: Serialize> Outcome<T> {
    /// Render the result object.
    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

impl<T: Serialize> Serialize for Outcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("changed", &self.changed)?;
        map.serialize_entry("diff", &self.diff)?;
        map.serialize_entry(self.namespace, &self.resource)?;
        map.end()
    }
}

/// Serialize a value into its top-level fields.
///
/// Anything that does not serialize to a JSON object yields no fields.
pub fn fields_of<T: Serialize>(value: &T) -> Fields {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map,
        _ => Fields::new(),
    }
}

/// The failure object reported when an invocation aborts.
pub fn failure(msg: impl std::fmt::Display) -> Value {
    json!({
        "failed": true,
        "msg": msg.to_string(),
    })
}
