use thiserror::Error;

/// Top-level error type for the `fortimap-api` crate.
///
/// Covers every failure mode of the CMDB REST surface: transport, TLS,
/// authentication, and the `{status, http_status, error, cli_error}`
/// envelope FortiOS wraps around failed requests.
/// `fortimap-core` wraps these into per-resource diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Token rejected (HTTP 401/403).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── CMDB ────────────────────────────────────────────────────────
    /// The object addressed by `path`/`mkey` does not exist.
    #[error("Object not found: {path}/{mkey}")]
    NotFound { path: String, mkey: String },

    /// Structured error from the CMDB envelope.
    ///
    /// `code` is the negative FortiOS error number (e.g. `-5` for a
    /// duplicate entry), `message` the `cli_error` text when present.
    #[error("FortiOS API error (HTTP {status}, code {code}): {message}")]
    Api {
        status: u16,
        code: i64,
        message: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => *status == 429 || *status == 503,
            _ => false,
        }
    }

    /// Returns `true` if the remote object does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Api { status: 404, .. } => true,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }

    /// The FortiOS error number, if the device returned one.
    pub fn api_error_code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
