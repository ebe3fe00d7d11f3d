// fortimap-core: field mapping and CRUD handlers for FortiOS configuration objects.

pub mod catalog;
pub mod config;
pub mod data;
pub mod error;
pub mod helpers;
pub mod mapper;
pub mod provider;
pub mod schema;
pub mod version;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ConnectionConfig, TlsVerification};
pub use data::{ResourceData, Snapshot};
pub use error::{Action, CoreError};
pub use helpers::{Helpers, StandardHelpers};
pub use mapper::{Context, assemble, refresh};
pub use provider::Provider;
pub use schema::{Field, FieldKind, ObjectKind, Schema};
pub use version::{VersionOp, VersionRange};

// Re-export the client seam so consumers need only this crate.
pub use fortimap_api::{FortiClient, Object};
