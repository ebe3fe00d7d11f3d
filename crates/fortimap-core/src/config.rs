// ── Runtime connection configuration ──
//
// These types describe *how* to reach a FortiGate. They carry the API
// token and connection tuning, but never touch disk. The CLI builds a
// `ConnectionConfig` from its profile and hands it to `Provider::connect`.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use fortimap_api::{TlsMode, TransportConfig};

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification. Factory certificates are self-signed.
    #[default]
    DangerAcceptInvalid,
}

/// Everything needed to talk to one device.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Device URL (e.g., `https://192.168.1.99`).
    pub url: Url,
    /// REST API administrator token.
    pub token: SecretString,
    /// Default vdom; empty leaves scoping to the device.
    pub vdom: String,
    pub tls: TlsVerification,
    pub timeout: Duration,
    /// Attempts per request for transient failures.
    pub retries: u32,
    /// Reconcile every sub-table on read.
    pub import_all_tables: bool,
    /// Skip the firmware probe and assume this version.
    pub firmware_version: Option<String>,
}

impl ConnectionConfig {
    pub fn new(url: Url, token: SecretString) -> Self {
        Self {
            url,
            token,
            vdom: String::new(),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            retries: 1,
            import_all_tables: false,
            firmware_version: None,
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_accept_self_signed() {
        let cfg = ConnectionConfig::new(
            "https://192.168.1.99".parse().unwrap(),
            SecretString::from("token".to_string()),
        );
        assert_eq!(cfg.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(cfg.retries, 1);
        assert!(matches!(cfg.transport().tls, TlsMode::DangerAcceptInvalid));
        assert_eq!(cfg.transport().timeout, Duration::from_secs(30));
    }
}
