// The client seam between the mapping layer and the device.
//
// Every configuration object type goes through the same five CMDB verbs,
// addressed by its table path (e.g. `firewall/proxy-address`). Payloads and
// responses stay untyped JSON maps with hyphenated wire keys; the mapping
// layer owns the translation to and from local keys.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::Error;

/// A JSON object as sent to or received from the device.
pub type Object = Map<String, Value>;

/// Operations the mapping layer needs from a FortiOS client.
///
/// `vdom` is the administrative partition to target; an empty string means
/// "whatever the device treats as the default".
#[async_trait]
pub trait FortiClient: Send + Sync {
    /// The negotiated firmware version (e.g. `"7.4.1"`), probing the device
    /// on first use.
    async fn firmware_version(&self) -> Result<String, Error>;

    /// Scope used when a resource does not name one.
    fn default_vdom(&self) -> &str;

    /// Attempts per request for transient failures.
    fn set_retries(&mut self, retries: u32);

    /// Create an object. The response may carry the assigned `mkey`.
    async fn create(&self, path: &str, obj: &Object, vdom: &str) -> Result<Object, Error>;

    /// Read one object. `Ok(None)` means the device reports it absent.
    ///
    /// An empty `mkey` addresses a singleton object.
    async fn read(&self, path: &str, mkey: &str, vdom: &str) -> Result<Option<Object>, Error>;

    /// Update an object in place. An empty `mkey` addresses a singleton object.
    async fn update(
        &self,
        path: &str,
        obj: &Object,
        mkey: &str,
        vdom: &str,
    ) -> Result<Object, Error>;

    /// Delete an object. Absence is reported as [`Error::NotFound`].
    async fn delete(&self, path: &str, mkey: &str, vdom: &str) -> Result<(), Error>;

    /// List every object in a table, optionally filtered with a CMDB
    /// filter expression (`name=@corp`).
    async fn list(&self, path: &str, filter: Option<&str>, vdom: &str)
    -> Result<Vec<Object>, Error>;
}

/// Extract the `mkey` a write response reports, as a string.
///
/// FortiOS returns the key as a string for named tables and as a number for
/// tables keyed by a server-assigned integer `id`.
pub fn response_mkey(response: &Object) -> Option<String> {
    match response.get("mkey")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn obj(v: Value) -> Object {
        match v {
            Value::Object(m) => m,
            _ => Object::new(),
        }
    }

    #[test]
    fn mkey_string_and_number() {
        assert_eq!(
            response_mkey(&obj(json!({"mkey": "addr1"}))).as_deref(),
            Some("addr1")
        );
        assert_eq!(response_mkey(&obj(json!({"mkey": 17}))).as_deref(), Some("17"));
    }

    #[test]
    fn mkey_missing_or_empty() {
        assert_eq!(response_mkey(&obj(json!({"status": "success"}))), None);
        assert_eq!(response_mkey(&obj(json!({"mkey": ""}))), None);
        assert_eq!(response_mkey(&obj(json!({"mkey": null}))), None);
    }
}
