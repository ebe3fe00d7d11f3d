//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use fortimap_config::ConfigError;
use fortimap_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

/// FortiOS error number for a duplicate table entry.
const DUPLICATE_ENTRY: i64 = -5;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to FortiGate at {url}")]
    #[diagnostic(
        code(fortimap::connection_failed),
        help(
            "Check that the device is reachable and the REST API is enabled.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("TLS certificate verification failed for {url}")]
    #[diagnostic(
        code(fortimap::tls_error),
        help(
            "The device is using a self-signed certificate.\n\
             Use --insecure (-k) to accept it, or configure ca_cert in your profile."
        )
    )]
    TlsError { url: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(fortimap::timeout),
        help("Increase the timeout with --timeout or check the device load.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed")]
    #[diagnostic(
        code(fortimap::auth_failed),
        help(
            "Verify the REST API token and its trusted hosts on the device.\n\
             Store a new one with: fortimap config set-token --profile {profile}"
        )
    )]
    AuthFailed { profile: String },

    #[error("No API token configured for profile '{profile}'")]
    #[diagnostic(
        code(fortimap::no_credentials),
        help(
            "Store one with: fortimap config set-token --profile {profile}\n\
             Or set the FORTIMAP_TOKEN environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("Unknown object type '{name}'")]
    #[diagnostic(
        code(fortimap::unknown_resource),
        help("Run: fortimap resources to see the supported object types")
    )]
    UnknownResource { name: String },

    #[error("{resource} '{identifier}' not found")]
    #[diagnostic(code(fortimap::not_found))]
    NotFound {
        resource: String,
        identifier: String,
    },

    #[error("State file {path} does not track an object")]
    #[diagnostic(
        code(fortimap::not_tracked),
        help("Run `fortimap apply` first, or check the --state path.")
    )]
    NotTracked { path: String },

    #[error("{message}")]
    #[diagnostic(code(fortimap::conflict))]
    Conflict { message: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(fortimap::api_error))]
    ApiError { code: Option<i64>, message: String },

    // ── Mapping ──────────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(fortimap::validation))]
    Validation { field: String, reason: String },

    #[error("{message}")]
    #[diagnostic(
        code(fortimap::version_mismatch),
        help("Remove the argument, or use the representation supported by this firmware.")
    )]
    VersionMismatch { message: String },

    #[error("{message}")]
    #[diagnostic(code(fortimap::mapping))]
    Mapping { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(fortimap::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No device configured")]
    #[diagnostic(
        code(fortimap::no_config),
        help(
            "Pass --host and --token, or add a profile to the config file.\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(fortimap::config))]
    Config(Box<ConfigError>),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error("{path}: {source}")]
    #[diagnostic(code(fortimap::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    #[diagnostic(code(fortimap::json), help("Check the JSON file contents and try again."))]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(fortimap::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::UnknownResource { .. } | Self::NotTracked { .. } => {
                exit_code::NOT_FOUND
            }
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::Validation { .. }
            | Self::VersionMismatch { .. }
            | Self::ProfileNotFound { .. }
            | Self::NoConfig { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Map a handler error, naming the device and profile in transport
    /// diagnostics.
    pub fn from_core(err: CoreError, url: &str, profile: &str) -> Self {
        let message = err.to_string();
        match err.api_error() {
            Some(fortimap_api::Error::Transport(e)) if e.is_timeout() => return Self::Timeout,
            Some(fortimap_api::Error::Transport(_)) => {
                return Self::ConnectionFailed {
                    url: url.into(),
                    source: message.into(),
                };
            }
            Some(fortimap_api::Error::Tls(_)) => return Self::TlsError { url: url.into() },
            Some(fortimap_api::Error::Authentication { .. }) => {
                return Self::AuthFailed {
                    profile: profile.into(),
                };
            }
            _ => {}
        }
        Self::from(err)
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::UnknownResource { name } => Self::UnknownResource { name },
            CoreError::Validation { field, reason } => Self::Validation { field, reason },
            CoreError::VersionMismatch { .. } | CoreError::InvalidVersion { .. } => {
                Self::VersionMismatch { message }
            }
            CoreError::Disassembly { .. }
            | CoreError::Refresh { .. }
            | CoreError::MissingKey { .. }
            | CoreError::MissingId { .. } => Self::Mapping { message },
            CoreError::Config { message } => Self::Mapping { message },
            CoreError::Remote { ref source, .. } | CoreError::Api(ref source) => match source {
                fortimap_api::Error::NotFound { path, mkey } => Self::NotFound {
                    resource: path.clone(),
                    identifier: mkey.clone(),
                },
                fortimap_api::Error::Api { code, .. } if *code == DUPLICATE_ENTRY => {
                    Self::Conflict { message }
                }
                other => Self::ApiError {
                    code: other.api_error_code(),
                    message,
                },
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_errors_are_usage_errors() {
        let err = CliError::from(CoreError::VersionMismatch {
            argument: "codec".into(),
            version: "7.4.1".into(),
            range: "< 7.4.0".into(),
        });
        assert_eq!(err.exit_code(), exit_code::USAGE);

        let err = CliError::from(CoreError::UnknownResource {
            name: "firewall_nope".into(),
        });
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
    }

    #[test]
    fn duplicate_entry_is_a_conflict() {
        let err = CliError::from(CoreError::remote(
            fortimap_core::Action::Creating,
            "FirewallProxyAddress",
            fortimap_api::Error::Api {
                status: 500,
                code: -5,
                message: "entry already exists".into(),
            },
        ));
        assert_eq!(err.exit_code(), exit_code::CONFLICT);
        assert!(err.to_string().contains("Error creating FirewallProxyAddress resource"));
    }

    #[test]
    fn auth_failures_name_the_profile() {
        let err = CliError::from_core(
            CoreError::remote(
                fortimap_core::Action::Reading,
                "RouterRip",
                fortimap_api::Error::Authentication {
                    message: "401".into(),
                },
            ),
            "https://fgt/",
            "lab",
        );
        assert!(matches!(err, CliError::AuthFailed { ref profile } if profile == "lab"));
        assert_eq!(err.exit_code(), exit_code::AUTH);
    }
}
