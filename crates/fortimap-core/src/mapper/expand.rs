// Assembler: local configuration -> wire object.

use serde_json::{Map, Value};
use tracing::trace;

use fortimap_api::Object;

use super::{Context, sibling};
use crate::data::ResourceData;
use crate::error::CoreError;
use crate::helpers::str_to_map;
use crate::schema::{Field, FieldKind, META_ATTRIBUTES, Schema, Transform};

/// Build the request body for `schema` from the configured values in `data`.
///
/// Only fields with a configured value are sent. A field that was part of
/// the configuration last applied but is no longer configured is sent as an
/// explicit `null`, unless the device computes it. Values the device reports
/// on its own are never cleared.
pub fn assemble(schema: &Schema, data: &ResourceData, ctx: &Context<'_>) -> Result<Object, CoreError> {
    reject_unknown(schema.fields, data.config(), "")?;

    let mut obj = Object::new();
    for field in schema.fields {
        let value = data.get_ok(field.name).or_else(|| {
            field
                .computed
                .then(|| data.state_value(field.name))
                .flatten()
        });

        match value {
            Some(value) => {
                if !applicable(field, field.name, data, ctx)? {
                    continue;
                }
                let wire = expand_value(field, field.name, value, data, ctx)?;
                obj.insert(field.wire.to_owned(), wire);
            }
            None if !field.computed && data.has_change(field.name) => {
                trace!(field = field.name, "clearing");
                // An alternate representation may already own the wire key.
                obj.entry(field.wire).or_insert(Value::Null);
            }
            None => {}
        }
    }
    Ok(obj)
}

/// Version gate for one configured field.
///
/// Returns `Ok(false)` when the field does not apply but its alternate is
/// configured instead; the alternate then supplies the wire key.
fn applicable(field: &Field, path: &str, data: &ResourceData, ctx: &Context<'_>) -> Result<bool, CoreError> {
    let Some(range) = field.versions else {
        return Ok(true);
    };
    if ctx.version.is_empty() || ctx.helpers.version_match(ctx.version, &range)? {
        return Ok(true);
    }
    if let Some(alternate) = field.alternate {
        if data.get_ok(&sibling(path, alternate)).is_some() {
            return Ok(false);
        }
    }
    Err(CoreError::VersionMismatch {
        argument: path.to_owned(),
        version: ctx.version.to_owned(),
        range: range.to_string(),
    })
}

fn expand_value(
    field: &Field,
    path: &str,
    value: &Value,
    data: &ResourceData,
    ctx: &Context<'_>,
) -> Result<Value, CoreError> {
    field.validate(path, value)?;

    match field.kind {
        FieldKind::List(fields) | FieldKind::Set(fields) => expand_entries(fields, path, value, data, ctx),
        FieldKind::String | FieldKind::Integer => match field.transform {
            Transform::Identity | Transform::Subnet => Ok(value.clone()),
            Transform::Split { separator, key, since } => {
                let split = !ctx.version.is_empty() && ctx.helpers.version_match(ctx.version, &since)?;
                match value.as_str() {
                    Some(s) if split => Ok(str_to_map(s, key, separator)),
                    _ => Ok(value.clone()),
                }
            }
        },
    }
}

fn expand_entries(
    fields: &[Field],
    path: &str,
    value: &Value,
    data: &ResourceData,
    ctx: &Context<'_>,
) -> Result<Value, CoreError> {
    let Value::Array(items) = value else {
        return Ok(Value::Null);
    };

    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let entry_path = format!("{path}.{i}");
        let Value::Object(entry) = item else {
            return Err(CoreError::Validation {
                field: entry_path,
                reason: format!("expected an object, got {item}"),
            });
        };
        reject_unknown(fields, entry, &format!("{entry_path}."))?;

        let mut wire = Map::new();
        for sub in fields {
            let sub_path = format!("{entry_path}.{}", sub.name);
            let Some(v) = data.get_ok(&sub_path) else {
                continue;
            };
            if !applicable(sub, &sub_path, data, ctx)? {
                continue;
            }
            wire.insert(sub.wire.to_owned(), expand_value(sub, &sub_path, v, data, ctx)?);
        }
        out.push(Value::Object(wire));
    }
    Ok(Value::Array(out))
}

fn reject_unknown(fields: &[Field], values: &Object, prefix: &str) -> Result<(), CoreError> {
    let top_level = prefix.is_empty();
    for key in values.keys() {
        let known = fields.iter().any(|f| f.name == key)
            || (top_level && META_ATTRIBUTES.contains(&key.as_str()));
        if !known {
            return Err(CoreError::Validation {
                field: format!("{prefix}{key}"),
                reason: "unsupported argument".into(),
            });
        }
    }
    Ok(())
}
