//! Shared conversion utilities used by the mapper.
//!
//! The [`Helpers`] trait is the seam between the mapper and provider-level
//! settings: the only stateful decision is whether sub-tables are imported
//! wholesale, everything else has a standard implementation.

use std::cmp::Ordering;
use std::net::Ipv4Addr;

use ipnet::{Ipv4Net, ipv4_mask_to_prefix};
use serde_json::Value;

use crate::error::CoreError;
use crate::version::VersionRange;

pub trait Helpers: Send + Sync {
    /// Whether every sub-table is reconciled on read, not only those present
    /// locally.
    fn import_table(&self) -> bool;

    /// Whether a wire/local type mismatch on `value` is a known firmware
    /// variance to tolerate instead of an error.
    fn api_patch(&self, value: &Value) -> bool {
        matches!(
            value,
            Value::String(_) | Value::Number(_) | Value::Array(_)
        )
    }

    fn ipmask_to_cidr(&self, new: &str, old: &str) -> String {
        ipmask_to_cidr(new, old)
    }

    fn version_match(&self, target: &str, range: &VersionRange) -> Result<bool, CoreError> {
        range.matches(target)
    }

    fn sort_subtable(&self, items: &mut [Value], key: &str, natural: bool) {
        sort_subtable(items, key, natural);
    }

    fn intf_to_i(&self, value: &Value) -> Value {
        intf_to_i(value)
    }

    fn map_to_str(&self, value: &Value, key: &str, separator: char) -> Value {
        map_to_str(value, key, separator)
    }
}

/// Helpers with provider-wide settings applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardHelpers {
    pub import_all_tables: bool,
}

impl StandardHelpers {
    pub fn new(import_all_tables: bool) -> Self {
        Self { import_all_tables }
    }
}

impl Helpers for StandardHelpers {
    fn import_table(&self) -> bool {
        self.import_all_tables
    }
}

/// Rewrite an `address mask` pair as CIDR when `old` is already in CIDR form.
///
/// The device always answers with a dotted mask. Keeping the user's CIDR
/// notation avoids a permanent diff; any other combination returns `new`
/// unchanged.
pub fn ipmask_to_cidr(new: &str, old: &str) -> String {
    if new == old || old.trim().parse::<Ipv4Net>().is_err() {
        return new.to_owned();
    }
    let Some((addr, mask)) = new.trim().split_once([' ', '/']) else {
        return new.to_owned();
    };
    let (Ok(addr), Ok(mask)) = (
        addr.trim().parse::<Ipv4Addr>(),
        mask.trim().parse::<Ipv4Addr>(),
    ) else {
        return new.to_owned();
    };
    match ipv4_mask_to_prefix(mask) {
        Ok(prefix) => format!("{addr}/{prefix}"),
        Err(_) => new.to_owned(),
    }
}

/// Convert a numeric string to an integer; other values pass through.
pub fn intf_to_i(value: &Value) -> Value {
    match value {
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_or_else(|_| value.clone(), Value::from),
        Value::Number(n) if n.is_f64() => {
            #[allow(clippy::cast_possible_truncation)]
            let truncated = n.as_f64().map(|f| f as i64);
            truncated.map_or_else(|| value.clone(), Value::from)
        }
        _ => value.clone(),
    }
}

/// Join a list of `{key: segment}` objects back into one string.
pub fn map_to_str(value: &Value, key: &str, separator: char) -> Value {
    let Value::Array(items) = value else {
        return value.clone();
    };
    let joined = items
        .iter()
        .filter_map(|item| item.get(key).and_then(scalar_text))
        .collect::<Vec<_>>()
        .join(&separator.to_string());
    Value::String(joined)
}

/// Split a `separator`-joined string into `{key: segment}` objects.
pub fn str_to_map(value: &str, key: &str, separator: char) -> Value {
    value
        .split(separator)
        .map(str::trim)
        .filter(|seg| !seg.is_empty())
        .map(|seg| {
            let mut entry = serde_json::Map::new();
            entry.insert(key.to_owned(), Value::String(seg.to_owned()));
            Value::Object(entry)
        })
        .collect()
}

/// Stable sort of table entries by `key`.
pub fn sort_subtable(items: &mut [Value], key: &str, natural: bool) {
    items.sort_by(|a, b| {
        let (a, b) = (a.get(key), b.get(key));
        match (a, b) {
            (Some(Value::Number(x)), Some(Value::Number(y))) => {
                let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            }
            _ => {
                let a = a.and_then(scalar_text).unwrap_or_default();
                let b = b.and_then(scalar_text).unwrap_or_default();
                if natural {
                    natural_cmp(&a, &b)
                } else {
                    a.cmp(&b)
                }
            }
        }
    });
}

/// Compare strings treating digit runs as numbers.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (ca, cb) = (chunks(a), chunks(b));
    for (x, y) in ca.iter().zip(cb.iter()) {
        let ord = match (is_digits(x), is_digits(y)) {
            (true, true) => {
                let (xt, yt) = (x.trim_start_matches('0'), y.trim_start_matches('0'));
                xt.len()
                    .cmp(&yt.len())
                    .then_with(|| xt.cmp(yt))
                    .then_with(|| x.len().cmp(&y.len()))
            }
            _ => x.cmp(y),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    ca.len().cmp(&cb.len())
}

fn chunks(s: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut prev: Option<bool> = None;
    for (i, c) in s.char_indices() {
        let digit = c.is_ascii_digit();
        if prev.is_some_and(|p| p != digit) {
            out.push(&s[start..i]);
            start = i;
        }
        prev = Some(digit);
    }
    if start < s.len() {
        out.push(&s[start..]);
    }
    out
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
