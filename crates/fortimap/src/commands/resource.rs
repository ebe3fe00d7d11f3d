//! Device-bound object commands: `read`, `list`, `apply`, `destroy`.
//!
//! State files hold the identifier and last-read attributes of one object,
//! so repeated `apply` runs update in place and `destroy` knows what to
//! remove.

use std::path::Path;

use serde_json::Value;
use tabled::Tabled;

use fortimap_core::schema::{FieldKind, GET_ALL_TABLES};
use fortimap_core::{Object, ResourceData, Schema};

use crate::cli::{ApplyArgs, DestroyArgs, GlobalOpts, ListArgs, ReadArgs};
use crate::commands::{Device, util};
use crate::error::CliError;
use crate::output;

// ── Read ─────────────────────────────────────────────────────────────

pub async fn read(device: &Device, args: &ReadArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let schema = util::resolve_schema(&args.resource)?;
    let mut config = Object::new();
    if args.all_tables {
        config.insert(GET_ALL_TABLES.into(), Value::String("true".into()));
    }

    if let Some(path) = &args.state {
        let snapshot = util::read_snapshot(path)?;
        if snapshot.id.is_empty() {
            return Err(not_tracked(path));
        }
        let mut data = ResourceData::from_snapshot(snapshot, config);
        device
            .provider
            .read(schema, &mut data)
            .await
            .map_err(|e| device.error(e))?;
        util::write_snapshot(path, &data.snapshot())?;
        if data.id().is_empty() {
            output::status(global, "removed", &format!("{} (no longer on the device)", path.display()));
            return Ok(());
        }
        return show(&data, global);
    }

    if let Some(mkey) = schema.mkey() {
        let key = args.key.as_deref().ok_or_else(|| CliError::Validation {
            field: "key".into(),
            reason: format!("{} is a table; pass the {mkey} to look up", schema.name),
        })?;
        config.insert(mkey.into(), key_value(schema, mkey, key));
    }

    let mut data = ResourceData::new(config);
    device
        .provider
        .read_data_source(schema, &mut data)
        .await
        .map_err(|e| device.error(e))?;
    if data.id().is_empty() {
        return Err(CliError::NotFound {
            resource: schema.name.into(),
            identifier: args.key.clone().unwrap_or_default(),
        });
    }
    show(&data, global)
}

/// Table keys are typed; integer keys are sent as numbers.
fn key_value(schema: &Schema, mkey: &str, key: &str) -> Value {
    match schema.field(mkey).map(|f| f.kind) {
        Some(FieldKind::Integer) => key
            .parse::<i64>()
            .map_or_else(|_| Value::String(key.to_owned()), Value::from),
        _ => Value::String(key.to_owned()),
    }
}

fn show(data: &ResourceData, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_object(&global.output, data.state(), data.id())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── List ─────────────────────────────────────────────────────────────

#[derive(Tabled)]
struct NameRow {
    #[tabled(rename = "Key")]
    name: String,
}

pub async fn list(device: &Device, args: &ListArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let schema = util::resolve_schema(&args.resource)?;
    let mut data = ResourceData::new(Object::new());
    let names = device
        .provider
        .list_data_source(schema, &mut data, args.filter.as_deref())
        .await
        .map_err(|e| device.error(e))?;

    let out = output::render_list(
        &global.output,
        &names,
        |n| NameRow { name: n.clone() },
        String::clone,
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Apply ────────────────────────────────────────────────────────────

pub async fn apply(device: &mut Device, args: &ApplyArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let schema = util::resolve_schema(&args.resource)?;
    let config = util::read_object(&args.file)?;
    let snapshot = util::read_snapshot(&args.state)?;
    let creating = snapshot.id.is_empty();
    let mut data = ResourceData::from_snapshot(snapshot, config);

    let result = if creating {
        device.provider.create(schema, &mut data).await
    } else {
        device.provider.update(schema, &mut data).await
    };

    // Whatever the outcome, the state file follows the identifier.
    util::write_snapshot(&args.state, &data.snapshot())?;
    result.map_err(|e| device.error(e))?;

    let verb = if creating { "created" } else { "updated" };
    output::status(global, verb, &format!("{} {}", schema.label, data.id()));
    show(&data, global)
}

// ── Destroy ──────────────────────────────────────────────────────────

pub async fn destroy(device: &mut Device, args: &DestroyArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let schema = util::resolve_schema(&args.resource)?;
    let snapshot = util::read_snapshot(&args.state)?;
    if snapshot.id.is_empty() {
        return Err(not_tracked(&args.state));
    }
    let id = snapshot.id.clone();
    let mut data = ResourceData::from_snapshot(snapshot, Object::new());

    let result = device.provider.delete(schema, &mut data).await;
    util::write_snapshot(&args.state, &data.snapshot())?;
    result.map_err(|e| device.error(e))?;

    let verb = if schema.is_singleton() { "reset" } else { "deleted" };
    output::status(global, verb, &format!("{} {id}", schema.label));
    Ok(())
}

fn not_tracked(path: &Path) -> CliError {
    CliError::NotTracked {
        path: path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use fortimap_core::catalog::{EMAILFILTER_BLOCKALLOWLIST, FIREWALL_PROXYADDRESS};
    use serde_json::json;

    use super::*;

    #[test]
    fn integer_keys_are_numbers() {
        assert_eq!(key_value(&EMAILFILTER_BLOCKALLOWLIST, "id", "7"), json!(7));
        assert_eq!(key_value(&FIREWALL_PROXYADDRESS, "name", "7"), json!("7"));
    }
}
