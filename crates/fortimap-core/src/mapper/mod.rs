//! Bidirectional mapping between local resource data and wire objects.
//!
//! [`assemble`] builds the request body for a create/update from the
//! configured values; [`refresh`] writes a device response back into the
//! local state. Both walk the schema's field tables recursively.

mod expand;
mod flatten;

pub use expand::assemble;
pub use flatten::refresh;

use crate::helpers::Helpers;

/// Inputs shared by every step of one mapping pass.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub helpers: &'a dyn Helpers,
    /// Negotiated firmware version; empty when unknown.
    pub version: &'a str,
}

impl<'a> Context<'a> {
    pub fn new(helpers: &'a dyn Helpers, version: &'a str) -> Self {
        Self { helpers, version }
    }
}

/// Path of `name` next to the last segment of `path`.
fn sibling(path: &str, name: &str) -> String {
    match path.rsplit_once('.') {
        Some((parent, _)) => format!("{parent}.{name}"),
        None => name.to_owned(),
    }
}
