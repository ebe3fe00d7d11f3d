//! `resources` and `schema`: browse the object catalog offline.

use serde::Serialize;
use tabled::Tabled;

use fortimap_core::schema::{Constraint, Field, Transform};
use fortimap_core::{ObjectKind, Schema, catalog};

use crate::cli::{GlobalOpts, SchemaArgs};
use crate::commands::util;
use crate::error::CliError;
use crate::output;

// ── Resources ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ResourceInfo {
    name: &'static str,
    path: &'static str,
    kind: &'static str,
    mkey: Option<&'static str>,
    description: &'static str,
}

#[derive(Tabled)]
struct ResourceRow {
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Path")]
    path: &'static str,
    #[tabled(rename = "Key")]
    mkey: &'static str,
    #[tabled(rename = "Description")]
    description: &'static str,
}

fn resource_info(schema: &Schema) -> ResourceInfo {
    let (kind, mkey) = match schema.kind {
        ObjectKind::Table { mkey } => ("table", Some(mkey)),
        ObjectKind::Singleton => ("singleton", None),
    };
    ResourceInfo {
        name: schema.name,
        path: schema.path,
        kind,
        mkey,
        description: schema.description,
    }
}

pub fn resources(global: &GlobalOpts) -> Result<(), CliError> {
    let infos: Vec<ResourceInfo> = catalog::all().iter().map(|s| resource_info(s)).collect();
    let out = output::render_list(
        &global.output,
        &infos,
        |r| ResourceRow {
            name: r.name,
            path: r.path,
            mkey: r.mkey.unwrap_or("(singleton)"),
            description: r.description,
        },
        |r| r.name.to_owned(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Schema ───────────────────────────────────────────────────────────

#[derive(Serialize)]
struct FieldInfo {
    path: String,
    wire: &'static str,
    kind: &'static str,
    constraint: Option<String>,
    versions: Option<String>,
    flags: Vec<String>,
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    path: String,
    #[tabled(rename = "Wire")]
    wire: &'static str,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Accepts")]
    constraint: String,
    #[tabled(rename = "Firmware")]
    versions: String,
    #[tabled(rename = "Notes")]
    flags: String,
}

fn constraint_text(constraint: Constraint) -> String {
    match constraint {
        Constraint::Length { min, max } => format!("length {min}..={max}"),
        Constraint::Range { min, max } => format!("{min}..={max}"),
        Constraint::OneOf(values) => values.join("|"),
    }
}

fn flags(field: &Field) -> Vec<String> {
    let mut flags = Vec::new();
    if field.sensitive {
        flags.push("sensitive".to_owned());
    }
    if field.computed {
        flags.push("computed".to_owned());
    }
    if field.table {
        flags.push("sub-table".to_owned());
    }
    match field.transform {
        Transform::Identity => {}
        Transform::Subnet => flags.push("subnet".to_owned()),
        Transform::Split { separator, since, .. } => {
            flags.push(format!("'{separator}'-separated, list on {since}"));
        }
    }
    if let Some(sort) = field.sort {
        flags.push(format!("sorted by {}", sort.key));
    }
    if let Some(alt) = field.alternate {
        flags.push(format!("alternate of {alt}"));
    }
    flags
}

/// Flatten nested descriptors into dotted paths, parents first.
fn collect(fields: &[Field], prefix: &str, out: &mut Vec<FieldInfo>) {
    for field in fields {
        let path = if prefix.is_empty() {
            field.name.to_owned()
        } else {
            format!("{prefix}.{}", field.name)
        };
        out.push(FieldInfo {
            path: path.clone(),
            wire: field.wire,
            kind: field.kind_name(),
            constraint: field.constraint.map(constraint_text),
            versions: field.versions.map(|v| v.to_string()),
            flags: flags(field),
        });
        if let Some(nested) = field.nested() {
            collect(nested, &path, out);
        }
    }
}

pub fn schema(args: &SchemaArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let schema = util::resolve_schema(&args.resource)?;
    let mut infos = Vec::new();
    collect(schema.fields, "", &mut infos);

    let out = output::render_list(
        &global.output,
        &infos,
        |f| FieldRow {
            path: f.path.clone(),
            wire: f.wire,
            kind: f.kind,
            constraint: f.constraint.clone().unwrap_or_default(),
            versions: f.versions.clone().unwrap_or_default(),
            flags: f.flags.join(", "),
        },
        |f| f.path.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
