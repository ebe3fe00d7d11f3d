// ── CRUD handlers ──
//
// Drives one configuration object through create, read, update, and
// delete against a `FortiClient`. Handlers resolve the vdom, negotiate the
// firmware version, run the mapper, and keep the local identifier in step
// with what exists on the device.

use serde_json::Value;
use tracing::{debug, info, warn};

use fortimap_api::{FortiClient, Object, RestClient, response_mkey};

use crate::config::ConnectionConfig;
use crate::data::{ResourceData, has_value};
use crate::error::{Action, CoreError};
use crate::helpers::{Helpers, StandardHelpers};
use crate::mapper::{Context, assemble, refresh};
use crate::schema::{GET_ALL_TABLES, ObjectKind, Schema, VDOM_PARAM};

/// Local attribute holding the names returned by a list lookup.
pub const NAMELIST: &str = "namelist";

// ── Provider ─────────────────────────────────────────────────────

/// Handler set bound to one device client.
pub struct Provider<C> {
    client: C,
    helpers: StandardHelpers,
}

impl Provider<RestClient> {
    /// Build a REST client from `config` and wrap it.
    pub fn connect(config: &ConnectionConfig) -> Result<Self, CoreError> {
        let mut client = RestClient::new(
            config.url.clone(),
            &config.token,
            config.vdom.clone(),
            &config.transport(),
        )?;
        if let Some(version) = &config.firmware_version {
            client = client.with_firmware_version(version);
        }
        client.set_retries(config.retries);
        debug!(url = %config.url, vdom = %config.vdom, "provider configured");
        Ok(Self::new(client, StandardHelpers::new(config.import_all_tables)))
    }
}

impl<C: FortiClient> Provider<C> {
    pub fn new(client: C, helpers: StandardHelpers) -> Self {
        Self { client, helpers }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn helpers(&self) -> &StandardHelpers {
        &self.helpers
    }

    /// Firmware version the assembler gates against.
    pub async fn firmware_version(&self, action: Action, schema: &Schema) -> Result<String, CoreError> {
        self.client
            .firmware_version()
            .await
            .map_err(|e| CoreError::remote(action, schema.label, e))
    }

    /// Assemble the request body `create`/`update` would send, without
    /// sending it.
    pub fn payload(&self, schema: &Schema, data: &ResourceData, version: &str) -> Result<Object, CoreError> {
        assemble(schema, data, &Context::new(&self.helpers, version))
    }

    // ── Handlers ─────────────────────────────────────────────────

    /// Create the object, then read it back into state.
    ///
    /// For singletons this is an update.
    pub async fn create(&mut self, schema: &'static Schema, data: &mut ResourceData) -> Result<(), CoreError> {
        if schema.is_singleton() {
            return self.update(schema, data).await;
        }

        let vdom = self.resolve_vdom(data);
        let version = self.firmware_version(Action::Creating, schema).await?;
        let obj = self.payload(schema, data, &version)?;

        self.client.set_retries(1);
        let resp = self
            .client
            .create(schema.path, &obj, &vdom)
            .await
            .map_err(|e| CoreError::remote(Action::Creating, schema.label, e))?;
        data.mark_applied();

        let id = response_mkey(&resp).unwrap_or_else(|| schema.label.to_owned());
        info!(resource = schema.name, %id, "created");
        data.set_id(id);

        self.read(schema, data).await
    }

    /// Refresh local state from the device.
    ///
    /// An object that no longer exists clears the identifier rather than
    /// failing.
    pub async fn read(&self, schema: &'static Schema, data: &mut ResourceData) -> Result<(), CoreError> {
        let vdom = self.resolve_vdom(data);
        let mkey = match schema.kind {
            ObjectKind::Table { .. } => data.id().to_owned(),
            ObjectKind::Singleton => String::new(),
        };
        if mkey.is_empty() && !schema.is_singleton() {
            // Nothing tracked; reading the bare table path would list it.
            data.clear_id();
            return Ok(());
        }

        let resp = self
            .client
            .read(schema.path, &mkey, &vdom)
            .await
            .map_err(|e| CoreError::remote(Action::Reading, schema.label, e))?;

        let Some(obj) = resp else {
            warn!(resource = schema.name, id = %data.id(), "not found, removing from state");
            data.clear_id();
            return Ok(());
        };

        let import_all = self.import_all(data);
        refresh(schema, data, &obj, &Context::new(&self.helpers, ""), import_all).map_err(|e| {
            CoreError::Refresh {
                resource: schema.label,
                source: Box::new(e),
            }
        })?;
        if !vdom.is_empty() {
            data.set(VDOM_PARAM, Value::String(vdom));
        }
        Ok(())
    }

    /// Push the desired configuration, then read it back.
    pub async fn update(&mut self, schema: &'static Schema, data: &mut ResourceData) -> Result<(), CoreError> {
        require_id(Action::Updating, schema, data)?;
        let vdom = self.resolve_vdom(data);
        let version = self.firmware_version(Action::Updating, schema).await?;
        let obj = self.payload(schema, data, &version)?;
        let mkey = match schema.kind {
            ObjectKind::Table { .. } => data.id().to_owned(),
            ObjectKind::Singleton => String::new(),
        };

        self.client.set_retries(1);
        let resp = self
            .client
            .update(schema.path, &obj, &mkey, &vdom)
            .await
            .map_err(|e| CoreError::remote(Action::Updating, schema.label, e))?;
        data.mark_applied();

        match (schema.kind, response_mkey(&resp)) {
            (ObjectKind::Singleton, _) => data.set_id(schema.label),
            (ObjectKind::Table { .. }, Some(id)) => data.set_id(id),
            (ObjectKind::Table { .. }, None) => {}
        }
        info!(resource = schema.name, id = %data.id(), "updated");

        self.read(schema, data).await
    }

    /// Remove the object. Singletons are reset instead: every sub-table is
    /// emptied.
    ///
    /// The local identifier is cleared even when the request fails; an
    /// object already gone counts as deleted.
    pub async fn delete(&mut self, schema: &'static Schema, data: &mut ResourceData) -> Result<(), CoreError> {
        require_id(Action::Deleting, schema, data)?;
        let vdom = self.resolve_vdom(data);
        let mkey = data.id().to_owned();
        self.client.set_retries(1);

        let result = match schema.kind {
            ObjectKind::Table { .. } => match self.client.delete(schema.path, &mkey, &vdom).await {
                Err(e) if e.is_not_found() => {
                    debug!(resource = schema.name, %mkey, "already absent");
                    Ok(())
                }
                other => other.map_err(|e| CoreError::remote(Action::Deleting, schema.label, e)),
            },
            ObjectKind::Singleton => {
                let reset = reset_object(schema);
                if reset.is_empty() {
                    Ok(())
                } else {
                    self.client
                        .update(schema.path, &reset, "", &vdom)
                        .await
                        .map(|_| ())
                        .map_err(|e| CoreError::remote(Action::Clearing, schema.label, e))
                }
            }
        };

        data.clear_id();
        if result.is_ok() {
            info!(resource = schema.name, %mkey, "deleted");
        }
        result
    }

    // ── Lookups ──────────────────────────────────────────────────

    /// Read one object by the key configured in `data`, importing every
    /// sub-table.
    pub async fn read_data_source(&self, schema: &'static Schema, data: &mut ResourceData) -> Result<(), CoreError> {
        let mkey = match schema.kind {
            ObjectKind::Table { mkey } => data
                .get_ok(mkey)
                .and_then(key_text)
                .ok_or(CoreError::MissingKey {
                    resource: schema.label,
                    key: mkey,
                })?,
            ObjectKind::Singleton => String::new(),
        };
        let vdom = self.resolve_vdom(data);

        let resp = self
            .client
            .read(schema.path, &mkey, &vdom)
            .await
            .map_err(|e| CoreError::remote(Action::Describing, schema.label, e))?;

        let Some(obj) = resp else {
            data.clear_id();
            return Ok(());
        };

        refresh(schema, data, &obj, &Context::new(&self.helpers, ""), true).map_err(|e| {
            CoreError::Refresh {
                resource: schema.label,
                source: Box::new(e),
            }
        })?;
        data.set_id(if mkey.is_empty() { schema.label.to_owned() } else { mkey });
        Ok(())
    }

    /// Names of every object in a table, optionally filtered with a FortiOS
    /// filter expression (`name=@hq`). Stored under `namelist` as well.
    pub async fn list_data_source(
        &self,
        schema: &'static Schema,
        data: &mut ResourceData,
        filter: Option<&str>,
    ) -> Result<Vec<String>, CoreError> {
        let ObjectKind::Table { mkey } = schema.kind else {
            return Err(CoreError::Config {
                message: format!("{} is a singleton and cannot be listed", schema.name),
            });
        };
        let wire_key = schema.field(mkey).map_or(mkey, |f| f.wire);
        let vdom = self.resolve_vdom(data);

        let items = self
            .client
            .list(schema.path, filter, &vdom)
            .await
            .map_err(|e| CoreError::remote(Action::Describing, schema.label, e))?;

        let names: Vec<String> = items
            .iter()
            .filter_map(|item| item.get(wire_key).and_then(key_text))
            .collect();
        data.set(NAMELIST, names.iter().cloned().map(Value::String).collect());
        data.set_id(schema.label);
        Ok(names)
    }

    // ── Internals ────────────────────────────────────────────────

    /// The vdom for this object: the configured one, else the client's.
    fn resolve_vdom(&self, data: &ResourceData) -> String {
        data.get_ok(VDOM_PARAM)
            .or_else(|| data.state_value(VDOM_PARAM))
            .and_then(Value::as_str)
            .unwrap_or_else(|| self.client.default_vdom())
            .to_owned()
    }

    fn import_all(&self, data: &ResourceData) -> bool {
        self.helpers.import_table()
            || data
                .get(GET_ALL_TABLES)
                .and_then(Value::as_str)
                .is_some_and(|v| v == "true")
    }
}

/// Table objects need a tracked identifier; an empty one would address the
/// whole table.
fn require_id(action: Action, schema: &Schema, data: &ResourceData) -> Result<(), CoreError> {
    if matches!(schema.kind, ObjectKind::Table { .. }) && data.id().is_empty() {
        return Err(CoreError::MissingId {
            action,
            resource: schema.label,
        });
    }
    Ok(())
}

/// Body that resets every sub-table of a singleton.
fn reset_object(schema: &Schema) -> Object {
    schema
        .fields
        .iter()
        .filter(|f| f.is_collection() && !f.sensitive)
        .map(|f| (f.wire.to_owned(), Value::Array(Vec::new())))
        .collect()
}

fn key_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if has_value(value) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
