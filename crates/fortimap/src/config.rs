//! Connection settings for device-bound commands: the selected profile
//! with global flags layered on top.

use std::time::Duration;

use secrecy::SecretString;

use fortimap_config::{self as config, Config, Profile};
use fortimap_core::{ConnectionConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Profile name selected by `--profile`, the config default, or `default`.
pub fn active_profile_name(global: &GlobalOpts, cfg: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `ConnectionConfig` from the config file, profile, and CLI
/// overrides. Returns the profile name alongside for diagnostics.
pub fn build_connection_config(global: &GlobalOpts) -> Result<(ConnectionConfig, String), CliError> {
    let cfg = config::load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        let conn = resolve_profile(profile, &profile_name, &cfg, global)?;
        return Ok((conn, profile_name));
    }

    // An explicitly requested profile must exist.
    if global.profile.is_some() {
        let mut available: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
        available.sort_unstable();
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: if available.is_empty() {
                "(none)".into()
            } else {
                available.join(", ")
            },
        });
    }

    // No profile: build from flags / env vars alone.
    let host = global.host.as_deref().ok_or_else(|| CliError::NoConfig {
        path: config::config_path().display().to_string(),
    })?;
    let token = global
        .token
        .clone()
        .map(SecretString::from)
        .ok_or_else(|| CliError::NoCredentials {
            profile: profile_name.clone(),
        })?;

    let mut conn = ConnectionConfig::new(config::device_url(host)?, token);
    conn.vdom = global.vdom.clone().unwrap_or_default();
    conn.tls = if global.insecure || cfg.defaults.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        TlsVerification::SystemDefaults
    };
    conn.timeout = Duration::from_secs(global.timeout.unwrap_or(cfg.defaults.timeout));
    conn.retries = cfg.defaults.retries.max(1);
    Ok((conn, profile_name))
}

fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<ConnectionConfig, CliError> {
    // Device address (flag > env > profile)
    let host = global.host.as_deref().unwrap_or(&profile.hostname);
    let url = config::device_url(host)?;

    // A token on the command line skips the keyring lookup.
    let token = match &global.token {
        Some(token) => SecretString::from(token.clone()),
        None => config::resolve_token(profile, profile_name)?,
    };

    let mut conn = ConnectionConfig::new(url, token);
    conn.vdom = global.vdom.clone().unwrap_or_else(|| profile.vdom.clone());
    conn.tls = if global.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        config::tls_for(profile, &cfg.defaults)
    };
    conn.timeout = Duration::from_secs(
        global
            .timeout
            .or(profile.timeout)
            .unwrap_or(cfg.defaults.timeout),
    );
    conn.retries = profile.retries.unwrap_or(cfg.defaults.retries).max(1);
    conn.import_all_tables = profile.import_all_tables;
    conn.firmware_version.clone_from(&profile.firmware_version);
    Ok(conn)
}
