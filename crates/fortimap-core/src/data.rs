//! Local resource data: desired configuration plus last-known state.
//!
//! Values are addressed by dotted paths such as `entries.0.ip4_subnet`,
//! where numeric segments index into lists.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use fortimap_api::Object;

/// Persisted state of one managed object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub attributes: Object,
    /// The configuration last sent to the device.
    #[serde(default, skip_serializing_if = "Object::is_empty")]
    pub applied: Object,
}

/// The local view of one object handed to the mapper and the CRUD handlers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceData {
    id: String,
    config: Object,
    state: Object,
    applied: Object,
}

impl ResourceData {
    /// Data for a new object with only a desired configuration.
    pub fn new(config: Object) -> Self {
        Self {
            id: String::new(),
            config,
            state: Object::new(),
            applied: Object::new(),
        }
    }

    /// Data for an object already tracked in `snapshot`.
    pub fn from_snapshot(snapshot: Snapshot, config: Object) -> Self {
        Self {
            id: snapshot.id,
            config,
            state: snapshot.attributes,
            applied: snapshot.applied,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            id: self.id.clone(),
            attributes: self.state.clone(),
            applied: self.applied.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Forget the object; it no longer exists remotely.
    pub fn clear_id(&mut self) {
        self.id.clear();
        self.state.clear();
        self.applied.clear();
    }

    /// Record the current configuration as sent to the device.
    pub fn mark_applied(&mut self) {
        self.applied.clone_from(&self.config);
    }

    pub fn config(&self) -> &Object {
        &self.config
    }

    pub fn state(&self) -> &Object {
        &self.state
    }

    /// Configured value at `path`, if it holds a value.
    pub fn get_ok(&self, path: &str) -> Option<&Value> {
        lookup(&self.config, path).filter(|v| has_value(v))
    }

    /// Current value at `path`: state first, then configuration.
    pub fn get(&self, path: &str) -> Option<&Value> {
        lookup(&self.state, path)
            .filter(|v| !v.is_null())
            .or_else(|| lookup(&self.config, path).filter(|v| !v.is_null()))
    }

    /// Value at `path` in the last-known state only.
    pub fn state_value(&self, path: &str) -> Option<&Value> {
        lookup(&self.state, path).filter(|v| has_value(v))
    }

    /// Whether the desired value at `path` differs from the configuration
    /// last sent to the device.
    ///
    /// Refreshed state is not consulted: device defaults never count as
    /// configured. Missing, null, and empty values are all considered equal.
    pub fn has_change(&self, path: &str) -> bool {
        let desired = lookup(&self.config, path).filter(|v| has_value(v));
        let applied = lookup(&self.applied, path).filter(|v| has_value(v));
        desired != applied
    }

    /// Set a top-level state attribute; `Null` removes it.
    pub fn set(&mut self, key: &str, value: Value) {
        if value.is_null() {
            self.state.remove(key);
        } else {
            self.state.insert(key.to_owned(), value);
        }
    }
}

/// Resolve a dotted path in `root`.
pub fn lookup<'a>(root: &'a Object, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = root.get(segments.next()?)?;
    for segment in segments {
        current = match current {
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            Value::Object(map) => map.get(segment)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Whether a value counts as configured.
///
/// Null, the empty string, and empty lists or objects do not; zero and
/// `false` do.
pub fn has_value(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}
