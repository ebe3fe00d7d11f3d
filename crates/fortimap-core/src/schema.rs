//! Field descriptors and object schemas.
//!
//! Every configuration object is described by a static table of [`Field`]s.
//! A field names its local (underscored) key and its wire (hyphenated) key,
//! its value kind, an optional validation constraint, and the transform the
//! mapper applies on the way in and out. Nested tables point at their own
//! field tables, so arbitrarily deep objects are plain data.

use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::version::VersionRange;

/// Local attribute naming the vdom a resource is scoped to.
pub const VDOM_PARAM: &str = "vdomparam";
/// Local attribute forcing import-all-tables mode for one resource.
pub const GET_ALL_TABLES: &str = "get_all_tables";
/// Attributes every resource accepts besides its schema fields.
pub const META_ATTRIBUTES: &[&str] = &[VDOM_PARAM, GET_ALL_TABLES];

/// Value kind of a field.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    String,
    Integer,
    /// Ordered list of nested entries.
    List(&'static [Field]),
    /// Unordered collection of nested entries.
    Set(&'static [Field]),
}

/// Validation applied to configured values before assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// String length in characters, inclusive.
    Length { min: usize, max: usize },
    /// Integer range, inclusive.
    Range { min: i64, max: i64 },
    /// One of an enumerated set of strings.
    OneOf(&'static [&'static str]),
}

/// How a scalar value changes shape between local and wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Identity,
    /// Address + mask on the wire, CIDR locally when the local value is CIDR.
    Subnet,
    /// A `separator`-joined string locally. When the negotiated firmware
    /// matches `since`, the wire form is a list of `{key: segment}` objects.
    Split {
        separator: char,
        key: &'static str,
        since: VersionRange,
    },
}

/// Post-flatten ordering of a nested table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortBy {
    /// Local key of the entry field to order by.
    pub key: &'static str,
    /// Numeric-aware comparison (`port2` < `port10`).
    pub natural: bool,
}

/// One field of a configuration object or nested entry.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub wire: &'static str,
    pub kind: FieldKind,
    pub constraint: Option<Constraint>,
    pub transform: Transform,
    /// Write-only secret; the local value is kept across reads.
    pub sensitive: bool,
    /// Assigned by the device when not configured.
    pub computed: bool,
    /// Firmware versions this representation applies to.
    pub versions: Option<VersionRange>,
    /// Local key of the other representation sharing this wire key.
    pub alternate: Option<&'static str>,
    pub sort: Option<SortBy>,
    /// A sub-table that is only reconciled in import-all-tables mode or when
    /// already present locally.
    pub table: bool,
}

impl Field {
    const fn base(name: &'static str, wire: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            wire,
            kind,
            constraint: None,
            transform: Transform::Identity,
            sensitive: false,
            computed: false,
            versions: None,
            alternate: None,
            sort: None,
            table: false,
        }
    }

    pub const fn string(name: &'static str, wire: &'static str) -> Self {
        Self::base(name, wire, FieldKind::String)
    }

    pub const fn integer(name: &'static str, wire: &'static str) -> Self {
        Self::base(name, wire, FieldKind::Integer)
    }

    pub const fn list(name: &'static str, wire: &'static str, fields: &'static [Field]) -> Self {
        Self::base(name, wire, FieldKind::List(fields))
    }

    pub const fn set(name: &'static str, wire: &'static str, fields: &'static [Field]) -> Self {
        Self::base(name, wire, FieldKind::Set(fields))
    }

    pub const fn length(self, min: usize, max: usize) -> Self {
        Self {
            constraint: Some(Constraint::Length { min, max }),
            ..self
        }
    }

    pub const fn range(self, min: i64, max: i64) -> Self {
        Self {
            constraint: Some(Constraint::Range { min, max }),
            ..self
        }
    }

    pub const fn one_of(self, values: &'static [&'static str]) -> Self {
        Self {
            constraint: Some(Constraint::OneOf(values)),
            ..self
        }
    }

    pub const fn sensitive(self) -> Self {
        Self {
            sensitive: true,
            ..self
        }
    }

    pub const fn computed(self) -> Self {
        Self {
            computed: true,
            ..self
        }
    }

    pub const fn subnet(self) -> Self {
        Self {
            transform: Transform::Subnet,
            ..self
        }
    }

    pub const fn split(self, separator: char, key: &'static str, since: VersionRange) -> Self {
        Self {
            transform: Transform::Split {
                separator,
                key,
                since,
            },
            ..self
        }
    }

    pub const fn versions(self, range: VersionRange) -> Self {
        Self {
            versions: Some(range),
            ..self
        }
    }

    pub const fn alternate(self, name: &'static str) -> Self {
        Self {
            alternate: Some(name),
            ..self
        }
    }

    pub const fn sorted(self, key: &'static str) -> Self {
        Self {
            sort: Some(SortBy {
                key,
                natural: false,
            }),
            ..self
        }
    }

    pub const fn natural_sort(self, key: &'static str) -> Self {
        Self {
            sort: Some(SortBy { key, natural: true }),
            ..self
        }
    }

    pub const fn table(self) -> Self {
        Self {
            table: true,
            ..self
        }
    }

    /// Entry fields of a list/set field.
    pub fn nested(&self) -> Option<&'static [Field]> {
        match self.kind {
            FieldKind::List(fields) | FieldKind::Set(fields) => Some(fields),
            FieldKind::String | FieldKind::Integer => None,
        }
    }

    pub fn is_collection(&self) -> bool {
        self.nested().is_some()
    }

    /// Short kind label for listings.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::List(_) => "list",
            FieldKind::Set(_) => "set",
        }
    }

    /// Whether a wire value has the JSON shape this representation reads.
    ///
    /// Used to pick between alternate representations of one wire key.
    pub fn accepts_shape(&self, value: &Value) -> bool {
        match self.kind {
            FieldKind::String => value.is_string(),
            FieldKind::Integer => value.is_number(),
            FieldKind::List(_) | FieldKind::Set(_) => value.is_array(),
        }
    }

    /// Check a configured scalar against the field's kind and constraint.
    pub fn validate(&self, path: &str, value: &Value) -> Result<(), CoreError> {
        let fail = |reason: String| CoreError::Validation {
            field: path.to_owned(),
            reason,
        };

        match self.kind {
            FieldKind::String => {
                let Some(s) = value.as_str() else {
                    return Err(fail(format!("expected a string, got {value}")));
                };
                match self.constraint {
                    Some(Constraint::Length { min, max }) => {
                        let len = s.chars().count();
                        if len < min || len > max {
                            return Err(fail(format!(
                                "length {len} outside {min}..={max}"
                            )));
                        }
                    }
                    Some(Constraint::OneOf(allowed)) if !allowed.contains(&s) => {
                        return Err(fail(format!(
                            "'{s}' is not one of: {}",
                            allowed.join(", ")
                        )));
                    }
                    _ => {}
                }
            }
            FieldKind::Integer => {
                let Some(n) = value.as_i64() else {
                    return Err(fail(format!("expected an integer, got {value}")));
                };
                if let Some(Constraint::Range { min, max }) = self.constraint {
                    if n < min || n > max {
                        return Err(fail(format!("{n} outside {min}..={max}")));
                    }
                }
            }
            FieldKind::List(_) | FieldKind::Set(_) => {
                if !value.is_array() {
                    return Err(fail(format!("expected a list, got {value}")));
                }
            }
        }
        Ok(())
    }

    /// Coerce a flattened value into the local type of this field.
    ///
    /// Numbers are accepted for string fields and numeric strings for
    /// integer fields; anything else of the wrong shape is a mismatch.
    /// `Null` always passes and means "unset".
    pub fn coerce(&self, path: &str, value: Value) -> Result<Value, String> {
        match (self.kind, value) {
            (_, Value::Null) => Ok(Value::Null),
            (FieldKind::String, Value::String(s)) => Ok(Value::String(s)),
            (FieldKind::String, Value::Number(n)) => Ok(Value::String(n.to_string())),
            (FieldKind::Integer, Value::Number(n)) => Ok(Value::Number(n)),
            (FieldKind::Integer, Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| format!("{path}: expected an integer, got \"{s}\"")),
            (FieldKind::List(fields) | FieldKind::Set(fields), Value::Array(items)) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| coerce_entry(fields, &format!("{path}.{i}"), item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            (_, other) => Err(format!(
                "{path}: expected {}, got {}",
                self.kind_name(),
                json_type(&other)
            )),
        }
    }
}

fn coerce_entry(fields: &[Field], path: &str, item: Value) -> Result<Value, String> {
    let Value::Object(entry) = item else {
        return Err(format!("{path}: expected an object, got {}", json_type(&item)));
    };
    let mut out = Map::new();
    for (key, value) in entry {
        let coerced = match fields.iter().find(|f| f.name == key) {
            Some(field) => field.coerce(&format!("{path}.{key}"), value)?,
            None => value,
        };
        out.insert(key, coerced);
    }
    Ok(Value::Object(out))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

/// Whether an object is one of many entries in a table or the only one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// Keyed by the local field named `mkey`.
    Table { mkey: &'static str },
    /// Exactly one instance per vdom; create is an update.
    Singleton,
}

/// A FortiOS configuration object type.
#[derive(Debug)]
pub struct Schema {
    /// Resource type name (`firewall_proxyaddress`).
    pub name: &'static str,
    /// Type label used in error messages and as the fallback identifier.
    pub label: &'static str,
    /// CMDB table path (`firewall/proxy-address`).
    pub path: &'static str,
    pub kind: ObjectKind,
    pub description: &'static str,
    pub fields: &'static [Field],
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&'static Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn is_singleton(&self) -> bool {
        matches!(self.kind, ObjectKind::Singleton)
    }

    /// Local key of the identifying field, for tables.
    pub fn mkey(&self) -> Option<&'static str> {
        match self.kind {
            ObjectKind::Table { mkey } => Some(mkey),
            ObjectKind::Singleton => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    const ENTRY: &[Field] = &[
        Field::integer("id", "id").range(0, 4_294_967_295),
        Field::string("status", "status").one_of(&["enable", "disable"]),
    ];

    #[test]
    fn builders_compose() {
        let f = Field::list("entries", "entries", ENTRY).sorted("id").table();
        assert!(f.table);
        assert_eq!(f.sort.unwrap().key, "id");
        assert!(!f.sort.unwrap().natural);
        assert_eq!(f.nested().unwrap().len(), 2);
        assert_eq!(f.kind_name(), "list");
    }

    #[test]
    fn validate_constraints() {
        let name = Field::string("name", "name").length(1, 5);
        assert!(name.validate("name", &json!("abc")).is_ok());
        assert!(name.validate("name", &json!("abcdef")).is_err());
        assert!(name.validate("name", &json!(3)).is_err());

        let status = ENTRY[1];
        assert!(status.validate("status", &json!("enable")).is_ok());
        let err = status.validate("entries.0.status", &json!("on")).unwrap_err();
        assert!(err.to_string().contains("entries.0.status"));

        let metric = Field::integer("metric", "metric").range(1, 16);
        assert!(metric.validate("metric", &json!(16)).is_ok());
        assert!(metric.validate("metric", &json!(17)).is_err());
    }

    #[test]
    fn coerce_numbers_and_strings() {
        let s = Field::string("default", "default");
        assert_eq!(s.coerce("default", json!(3600)).unwrap(), json!("3600"));

        let i = Field::integer("metric", "metric");
        assert_eq!(i.coerce("metric", json!("5")).unwrap(), json!(5));
        assert!(i.coerce("metric", json!("five")).is_err());
        assert!(i.coerce("metric", json!({"a": 1})).is_err());
    }

    #[test]
    fn coerce_nested_entries() {
        let list = Field::list("entries", "entries", ENTRY);
        let out = list
            .coerce("entries", json!([{ "id": "3", "status": "enable" }]))
            .unwrap();
        assert_eq!(out, json!([{ "id": 3, "status": "enable" }]));

        let err = list.coerce("entries", json!(["x"])).unwrap_err();
        assert!(err.starts_with("entries.0"));
        assert!(list.coerce("entries", json!("legacy")).is_err());
    }

    #[test]
    fn accepts_shape_by_kind() {
        assert!(Field::integer("codec", "codec").accepts_shape(&json!(1)));
        assert!(!Field::integer("codec", "codec").accepts_shape(&json!("g711")));
        assert!(Field::string("codec_name", "codec").accepts_shape(&json!("g711")));
    }
}
