// FortiOS REST envelope types
//
// Every CMDB and monitor response carries the same outer fields. Success
// payloads put data under `results` (an array for tables, an object for
// singletons); failures set `status: "error"` and usually `error` plus
// `cli_error`.

use serde::Deserialize;
use serde_json::Value;

/// The status fields shared by every response body.
#[derive(Debug, Default, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub http_status: Option<u16>,
    #[serde(default)]
    pub error: Option<i64>,
    #[serde(default)]
    pub cli_error: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub vdom: Option<String>,
}

impl Envelope {
    pub fn is_error(&self) -> bool {
        self.status.as_deref() == Some("error")
    }

    /// Best human-readable description of a failure.
    pub fn message(&self) -> String {
        self.cli_error
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map_or_else(
                || format!("status={}", self.status.as_deref().unwrap_or("unknown")),
                ToOwned::to_owned,
            )
    }
}

/// Results payload of a GET: tables return an array, singletons an object.
pub fn first_result(results: Option<&Value>) -> Option<&serde_json::Map<String, Value>> {
    match results? {
        Value::Array(items) => items.first().and_then(Value::as_object),
        Value::Object(obj) => Some(obj),
        _ => None,
    }
}

/// Normalize a reported firmware version (`"v7.4.1"`) to its dotted form.
pub fn normalize_version(raw: &str) -> String {
    raw.trim().trim_start_matches(['v', 'V']).to_owned()
}
