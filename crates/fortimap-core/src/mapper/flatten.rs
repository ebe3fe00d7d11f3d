// Disassembler: wire object -> local state.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use fortimap_api::Object;

use super::Context;
use crate::data::ResourceData;
use crate::error::CoreError;
use crate::schema::{Field, FieldKind, Schema, Transform};

/// Write a device response for `schema` into the local state of `data`.
///
/// Sub-tables marked as import-gated are only reconciled when `import_all`
/// is set or the table already has local entries. Secrets are never taken
/// from the wire while a local value exists. Fields absent from the
/// response are removed from state.
pub fn refresh(
    schema: &Schema,
    data: &mut ResourceData,
    wire: &Object,
    ctx: &Context<'_>,
    import_all: bool,
) -> Result<(), CoreError> {
    for field in schema.fields {
        if field.table && !import_all && local(data, field.name).is_none() {
            continue;
        }

        let raw = wire.get(field.wire).filter(|v| !v.is_null());
        if field.alternate.is_some() {
            if let Some(raw) = raw {
                if !field.accepts_shape(raw) {
                    // The device answered in the other representation.
                    data.set(field.name, Value::Null);
                    continue;
                }
            }
        }

        let mut value = flatten_value(field, field.name, raw, data, ctx);
        if field.sensitive {
            if let Some(retained) = local(data, field.name) {
                value = retained.clone();
            }
        }

        match field.coerce(field.name, value) {
            Ok(value) => data.set(field.name, value),
            Err(reason) => match raw {
                Some(raw) if ctx.helpers.api_patch(raw) => {
                    warn!(field = field.name, %reason, "ignoring firmware type variance");
                }
                _ => {
                    return Err(CoreError::Disassembly {
                        field: field.name.to_owned(),
                        reason,
                    });
                }
            },
        }
    }
    debug!(resource = schema.name, "state refreshed");
    Ok(())
}

fn flatten_value(field: &Field, path: &str, raw: Option<&Value>, data: &ResourceData, ctx: &Context<'_>) -> Value {
    let Some(raw) = raw else {
        return Value::Null;
    };

    match field.kind {
        FieldKind::Integer => ctx.helpers.intf_to_i(raw),
        FieldKind::String => match field.transform {
            Transform::Identity => raw.clone(),
            Transform::Subnet => match (raw, local(data, path)) {
                (Value::String(new), Some(Value::String(old))) => {
                    Value::String(ctx.helpers.ipmask_to_cidr(new, old))
                }
                _ => raw.clone(),
            },
            Transform::Split { separator, key, .. } => ctx.helpers.map_to_str(raw, key, separator),
        },
        FieldKind::List(fields) | FieldKind::Set(fields) => {
            let mut value = flatten_entries(fields, path, raw, data, ctx);
            if let (Some(sort), Value::Array(items)) = (field.sort, &mut value) {
                ctx.helpers.sort_subtable(items, sort.key, sort.natural);
            }
            value
        }
    }
}

fn flatten_entries(fields: &[Field], path: &str, raw: &Value, data: &ResourceData, ctx: &Context<'_>) -> Value {
    let Value::Array(items) = raw else {
        // Legacy scalar shape; left for coercion to judge.
        return raw.clone();
    };
    if items.is_empty() {
        return Value::Null;
    }

    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let Value::Object(entry) = item else {
            warn!(path, index = i, value = %item, "skipping sub-table entry that is not an object");
            continue;
        };
        let mut flat = Map::new();
        for sub in fields {
            let sub_path = format!("{path}.{i}.{}", sub.name);
            let raw = entry.get(sub.wire).filter(|v| !v.is_null());
            if sub.alternate.is_some() && raw.is_some_and(|v| !sub.accepts_shape(v)) {
                continue;
            }

            let mut value = flatten_value(sub, &sub_path, raw, data, ctx);
            if sub.sensitive {
                if let Some(retained) = local(data, &sub_path) {
                    value = retained.clone();
                }
            }
            if !value.is_null() {
                flat.insert(sub.name.to_owned(), value);
            }
        }
        out.push(Value::Object(flat));
    }
    Value::Array(out)
}

/// The local value at `path`: configured first, then last-known state.
fn local<'a>(data: &'a ResourceData, path: &str) -> Option<&'a Value> {
    data.get_ok(path).or_else(|| data.state_value(path))
}
