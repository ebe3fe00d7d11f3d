//! Configuration for the fortimap CLI.
//!
//! TOML device profiles, API token resolution (env + keyring + plaintext),
//! and translation to `fortimap_core::ConnectionConfig`. The CLI layers its
//! global flags on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use fortimap_core::{ConnectionConfig, TlsVerification};

/// Keyring service name; entries are keyed `{profile}/token`.
pub const KEYRING_SERVICE: &str = "fortimap";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no API token configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{name}' not found in config")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named device profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Name and body of the selected profile.
    pub fn profile(&self, name: Option<&str>) -> Result<(String, &Profile), ConfigError> {
        let name = name
            .or(self.default_profile.as_deref())
            .unwrap_or("default")
            .to_owned();
        match self.profiles.get(&name) {
            Some(profile) => Ok((name, profile)),
            None => Err(ConfigError::UnknownProfile { name }),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Accept self-signed device certificates.
    #[serde(default = "default_insecure")]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_retries")]
    pub retries: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: default_insecure(),
            timeout: default_timeout(),
            retries: default_retries(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_insecure() -> bool {
    true
}
fn default_timeout() -> u64 {
    30
}
fn default_retries() -> u32 {
    1
}

/// A named FortiGate profile.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Device address, with or without scheme (`192.168.1.99`, `https://fgt:8443`).
    pub hostname: String,

    /// API token (plaintext; prefer keyring or env var).
    pub token: Option<String>,

    /// Environment variable holding the API token.
    pub token_env: Option<String>,

    /// Default vdom for objects that do not name one.
    #[serde(default)]
    pub vdom: String,

    /// Path to a CA certificate that signed the device certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Override request attempts for transient failures.
    pub retries: Option<u32>,

    /// Reconcile every sub-table on read.
    #[serde(default)]
    pub import_all_tables: bool,

    /// Assume this firmware version instead of probing the device.
    pub firmware_version: Option<String>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "fortimap", "fortimap").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("fortimap");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path` + `FORTIMAP_` environment variables.
///
/// Nested keys use a double underscore: `FORTIMAP_DEFAULTS__TIMEOUT=60`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("FORTIMAP_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file is missing or invalid.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Serialize config to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the API token: `token_env` variable, then the system keyring,
/// then plaintext in the profile.
pub fn resolve_token(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    if let Some(ref env_name) = profile.token_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/token")) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    if let Some(ref token) = profile.token {
        return Ok(SecretString::from(token.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Parse a profile hostname into a device URL, defaulting to HTTPS.
pub fn device_url(hostname: &str) -> Result<Url, ConfigError> {
    let raw = hostname.trim();
    let with_scheme = if raw.contains("://") {
        raw.to_owned()
    } else {
        format!("https://{raw}")
    };
    let url: Url = with_scheme.parse().map_err(|_| ConfigError::Validation {
        field: "hostname".into(),
        reason: format!("invalid device address: {hostname}"),
    })?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(ConfigError::Validation {
            field: "hostname".into(),
            reason: format!("no host in: {hostname}"),
        });
    }
    Ok(url)
}

/// TLS strategy: an explicit `insecure` wins, then a CA file, then the
/// global default.
pub fn tls_for(profile: &Profile, defaults: &Defaults) -> TlsVerification {
    match (profile.insecure, &profile.ca_cert) {
        (Some(true), _) => TlsVerification::DangerAcceptInvalid,
        (_, Some(ca)) => TlsVerification::CustomCa(ca.clone()),
        (Some(false), None) => TlsVerification::SystemDefaults,
        (None, None) if defaults.insecure => TlsVerification::DangerAcceptInvalid,
        (None, None) => TlsVerification::SystemDefaults,
    }
}

/// Build a `ConnectionConfig` from a profile, without CLI overrides.
pub fn profile_to_connection_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<ConnectionConfig, ConfigError> {
    let url = device_url(&profile.hostname)?;
    let token = resolve_token(profile, profile_name)?;

    let mut cfg = ConnectionConfig::new(url, token);
    cfg.vdom.clone_from(&profile.vdom);
    cfg.tls = tls_for(profile, defaults);
    cfg.timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));
    cfg.retries = profile.retries.unwrap_or(defaults.retries).max(1);
    cfg.import_all_tables = profile.import_all_tables;
    cfg.firmware_version.clone_from(&profile.firmware_version);
    Ok(cfg)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SAMPLE: &str = r#"
default_profile = "lab"

[defaults]
timeout = 15

[profiles.lab]
hostname = "192.168.1.99"
token = "plain-token"
vdom = "root"
import_all_tables = true
firmware_version = "7.4.1"

[profiles.prod]
hostname = "https://fgt.example.com:8443"
ca_cert = "/etc/ssl/fgt-ca.pem"
retries = 3
"#;

    #[test]
    fn loads_profiles_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.defaults.timeout, 15);
        assert_eq!(cfg.defaults.output, "table");

        let (name, lab) = cfg.profile(None).unwrap();
        assert_eq!(name, "lab");
        assert_eq!(lab.vdom, "root");
        assert!(cfg.profile(Some("prod")).is_ok());
        assert!(matches!(
            cfg.profile(Some("staging")),
            Err(ConfigError::UnknownProfile { .. })
        ));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                hostname: "10.0.0.1".into(),
                ..Profile::default()
            },
        );
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.profiles["default"].hostname, "10.0.0.1");
    }

    #[test]
    fn device_url_defaults_to_https() {
        assert_eq!(device_url("192.168.1.99").unwrap().as_str(), "https://192.168.1.99/");
        assert_eq!(
            device_url("http://fgt:8080").unwrap().as_str(),
            "http://fgt:8080/"
        );
        assert!(device_url("").is_err());
    }

    #[test]
    fn tls_precedence() {
        let defaults = Defaults::default();
        let mut profile = Profile::default();
        assert_eq!(tls_for(&profile, &defaults), TlsVerification::DangerAcceptInvalid);

        profile.ca_cert = Some("/ca.pem".into());
        assert_eq!(tls_for(&profile, &defaults), TlsVerification::CustomCa("/ca.pem".into()));

        profile.insecure = Some(true);
        assert_eq!(tls_for(&profile, &defaults), TlsVerification::DangerAcceptInvalid);

        profile.ca_cert = None;
        profile.insecure = Some(false);
        assert_eq!(tls_for(&profile, &defaults), TlsVerification::SystemDefaults);
    }

    #[test]
    fn profile_translates_to_connection() {
        let cfg: Config = toml::from_str(SAMPLE).unwrap();
        let (name, lab) = cfg.profile(Some("lab")).unwrap();
        let conn = profile_to_connection_config(lab, &name, &cfg.defaults).unwrap();

        assert_eq!(conn.url.as_str(), "https://192.168.1.99/");
        assert_eq!(conn.vdom, "root");
        assert_eq!(conn.timeout, Duration::from_secs(15));
        assert_eq!(conn.retries, 1);
        assert!(conn.import_all_tables);
        assert_eq!(conn.firmware_version.as_deref(), Some("7.4.1"));
    }

    #[test]
    fn missing_token_is_reported() {
        let profile = Profile {
            hostname: "10.0.0.1".into(),
            ..Profile::default()
        };
        let err = resolve_token(&profile, "fortimap-test-no-such-profile").unwrap_err();
        assert!(matches!(err, ConfigError::NoCredentials { .. }));
    }
}
