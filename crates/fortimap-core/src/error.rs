// ── Core error types ──
//
// Errors raised while mapping a configuration object or while driving one
// of its CRUD handlers. Remote failures keep the transport error as their
// source and carry the "Error <verb> <Type> resource" context the handlers
// attach; everything else is a local configuration or mapping problem.

use strum::Display;
use thiserror::Error;

/// Which handler step failed against the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Action {
    Creating,
    Reading,
    Updating,
    Deleting,
    /// Resetting a singleton object on delete.
    Clearing,
    Describing,
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Remote errors ────────────────────────────────────────────────
    #[error("Error {action} {resource} resource: {source}")]
    Remote {
        action: Action,
        resource: &'static str,
        #[source]
        source: fortimap_api::Error,
    },

    #[error("Error reading {resource} resource from API: {source}")]
    Refresh {
        resource: &'static str,
        #[source]
        source: Box<CoreError>,
    },

    // ── Assembly errors ──────────────────────────────────────────────
    #[error("argument '{argument}' is not applicable to FortiOS {version} (requires {range})")]
    VersionMismatch {
        argument: String,
        version: String,
        range: String,
    },

    #[error("invalid firmware version '{version}'")]
    InvalidVersion { version: String },

    #[error("invalid value for {field}: {reason}")]
    Validation { field: String, reason: String },

    // ── Disassembly errors ───────────────────────────────────────────
    #[error("cannot set {field}: {reason}")]
    Disassembly { field: String, reason: String },

    // ── Lookup errors ────────────────────────────────────────────────
    #[error("Error describing {resource}: no value configured for key '{key}'")]
    MissingKey { resource: &'static str, key: &'static str },

    #[error("Error {action} {resource} resource: no object identifier is tracked")]
    MissingId { action: Action, resource: &'static str },

    #[error("unknown resource type '{name}'")]
    UnknownResource { name: String },

    // ── Wrapped transport errors outside a handler ───────────────────
    #[error("API error: {0}")]
    Api(#[from] fortimap_api::Error),

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Attach handler context to a transport error.
    pub fn remote(action: Action, resource: &'static str, source: fortimap_api::Error) -> Self {
        Self::Remote {
            action,
            resource,
            source,
        }
    }

    /// Returns `true` if the error was raised before any request was sent.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::VersionMismatch { .. }
                | Self::InvalidVersion { .. }
                | Self::Validation { .. }
                | Self::MissingKey { .. }
                | Self::MissingId { .. }
                | Self::UnknownResource { .. }
                | Self::Config { .. }
        )
    }

    /// The underlying transport error, if any.
    pub fn api_error(&self) -> Option<&fortimap_api::Error> {
        match self {
            Self::Remote { source, .. } | Self::Api(source) => Some(source),
            Self::Refresh { source, .. } => source.api_error(),
            _ => None,
        }
    }
}
