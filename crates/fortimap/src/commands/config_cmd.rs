//! Config subcommand handlers.

use std::io::Read;

use serde::Serialize;
use tabled::Tabled;

use fortimap_config::{self as config, KEYRING_SERVICE, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::active_profile_name;
use crate::error::CliError;
use crate::output;

const REDACTED: &str = "********";

#[derive(Serialize)]
struct ProfileView<'a> {
    name: &'a str,
    default: bool,
    hostname: &'a str,
    vdom: &'a str,
    token: &'static str,
    insecure: Option<bool>,
    timeout: Option<u64>,
    retries: Option<u32>,
    import_all_tables: bool,
    firmware_version: Option<&'a str>,
}

#[derive(Tabled)]
struct ProfileRow {
    #[tabled(rename = "Profile")]
    name: String,
    #[tabled(rename = "Host")]
    hostname: String,
    #[tabled(rename = "Vdom")]
    vdom: String,
    #[tabled(rename = "Token")]
    token: String,
}

/// Where the token for a profile comes from, without reading it.
fn token_source(profile: &Profile) -> &'static str {
    match (&profile.token_env, &profile.token) {
        (Some(_), _) => "env",
        (None, Some(_)) => REDACTED,
        (None, None) => "keyring",
    }
}

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), false);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let active = active_profile_name(global, &cfg);

            let mut names: Vec<&String> = cfg.profiles.keys().collect();
            names.sort_unstable();
            let views: Vec<ProfileView<'_>> = names
                .into_iter()
                .map(|name| {
                    let p = &cfg.profiles[name];
                    ProfileView {
                        name,
                        default: *name == active,
                        hostname: &p.hostname,
                        vdom: &p.vdom,
                        token: token_source(p),
                        insecure: p.insecure,
                        timeout: p.timeout,
                        retries: p.retries,
                        import_all_tables: p.import_all_tables,
                        firmware_version: p.firmware_version.as_deref(),
                    }
                })
                .collect();

            let out = output::render_list(
                &global.output,
                &views,
                |v| ProfileRow {
                    name: if v.default {
                        format!("{} *", v.name)
                    } else {
                        v.name.to_owned()
                    },
                    hostname: v.hostname.to_owned(),
                    vdom: v.vdom.to_owned(),
                    token: v.token.to_owned(),
                },
                |v| v.name.to_owned(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::SetToken => {
            let cfg = config::load_config_or_default();
            let profile = active_profile_name(global, &cfg);

            let mut token = String::new();
            std::io::stdin()
                .read_to_string(&mut token)
                .map_err(|source| CliError::Io {
                    path: "<stdin>".into(),
                    source,
                })?;
            let token = token.trim();
            if token.is_empty() {
                return Err(CliError::Validation {
                    field: "token".into(),
                    reason: "no token on standard input".into(),
                });
            }

            let entry = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile}/token")).map_err(|e| {
                CliError::Validation {
                    field: "keyring".into(),
                    reason: format!("failed to access keyring: {e}"),
                }
            })?;
            entry.set_password(token).map_err(|e| CliError::Validation {
                field: "keyring".into(),
                reason: format!("failed to store token in keyring: {e}"),
            })?;
            output::status(global, "stored", &format!("API token for profile '{profile}'"));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_sources_never_reveal_secrets() {
        let mut profile = Profile {
            token: Some("plain".into()),
            ..Profile::default()
        };
        assert_eq!(token_source(&profile), REDACTED);
        profile.token_env = Some("FGT_TOKEN".into());
        assert_eq!(token_source(&profile), "env");
        profile = Profile::default();
        assert_eq!(token_source(&profile), "keyring");
    }
}
