//! Shared helpers for command handlers: configuration and state files.

use std::path::Path;

use serde_json::Value;

use fortimap_core::{Object, Snapshot, catalog};

use crate::error::CliError;

/// Resolve an object type name, accepting `-` for `_`.
pub fn resolve_schema(name: &str) -> Result<&'static fortimap_core::Schema, CliError> {
    let normalized = name.replace('-', "_");
    catalog::require(&normalized).map_err(CliError::from)
}

/// Read a desired configuration: a JSON object keyed by local field names.
pub fn read_object(path: &Path) -> Result<Object, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|source| io_error(path, source))?;
    match serde_json::from_str(&raw).map_err(|source| json_error(path, source))? {
        Value::Object(obj) => Ok(obj),
        other => Err(CliError::Validation {
            field: path.display().to_string(),
            reason: format!("expected a JSON object, found {}", kind_of(&other)),
        }),
    }
}

/// Read a state file. A missing file is an untracked object.
pub fn read_snapshot(path: &Path) -> Result<Snapshot, CliError> {
    match std::fs::read_to_string(path) {
        Ok(raw) => serde_json::from_str(&raw).map_err(|source| json_error(path, source)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Snapshot::default()),
        Err(source) => Err(io_error(path, source)),
    }
}

/// Persist `snapshot`, or remove the file once the object is gone.
pub fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<(), CliError> {
    if snapshot.id.is_empty() {
        return match std::fs::remove_file(path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(io_error(path, e)),
            _ => Ok(()),
        };
    }
    let body = serde_json::to_string_pretty(snapshot).map_err(|source| json_error(path, source))?;
    std::fs::write(path, body + "\n").map_err(|source| io_error(path, source))
}

fn io_error(path: &Path, source: std::io::Error) -> CliError {
    CliError::Io {
        path: path.display().to_string(),
        source,
    }
}

fn json_error(path: &Path, source: serde_json::Error) -> CliError {
    CliError::Json {
        path: path.display().to_string(),
        source,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_state_is_untracked() {
        let dir = tempfile::tempdir().unwrap();
        let snap = read_snapshot(&dir.path().join("absent.json")).unwrap();
        assert_eq!(snap, Snapshot::default());
    }

    #[test]
    fn state_round_trips_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let Value::Object(attributes) = json!({ "name": "hq" }) else {
            unreachable!()
        };
        let snap = Snapshot {
            id: "hq".into(),
            attributes: attributes.clone(),
            applied: attributes,
        };
        write_snapshot(&path, &snap).unwrap();
        assert_eq!(read_snapshot(&path).unwrap(), snap);

        write_snapshot(&path, &Snapshot::default()).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn configuration_must_be_an_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(&path, "[1, 2]").unwrap();
        let err = read_object(&path).unwrap_err();
        assert!(err.to_string().contains("expected a JSON object, found an array"));
    }

    #[test]
    fn dashed_names_resolve() {
        assert_eq!(resolve_schema("router-rip").unwrap().name, "router_rip");
        assert!(resolve_schema("router_ospf").is_err());
    }
}
