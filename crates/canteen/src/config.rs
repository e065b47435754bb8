//! CLI configuration: a thin wrapper around `canteen_config`.
//!
//! Adds resolution that respects `GlobalOpts` overrides (--host, --lang,
//! --insecure, --timeout, --state-file).

use std::time::Duration;

use canteen_core::{ClientConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use canteen_config::{
    Config, DEFAULT_PROFILE, Profile, RoutingMode, config_path, load_config_or_default,
    profile_to_client_config, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| DEFAULT_PROFILE.into())
}

/// Build the core `ClientConfig` for this invocation.
///
/// An unknown profile is only an error when `--host` doesn't stand in
/// for it. CLI flag overrides take priority over profile values.
pub fn resolve_client_config(global: &GlobalOpts) -> Result<(String, ClientConfig), CliError> {
    let cfg = load_config_or_default();
    let name = active_profile_name(global, &cfg);

    let mut profile = match (cfg.profiles.get(&name), &global.host) {
        (Some(profile), _) => profile.clone(),
        (None, Some(_)) => Profile::default(),
        (None, None) => {
            return Err(CliError::ProfileNotFound {
                name,
                available: cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", "),
            });
        }
    };
    if let Some(ref host) = global.host {
        profile.host.clone_from(host);
    }

    let mut client = profile_to_client_config(&profile, &name, &cfg.defaults)?;

    if global.insecure {
        client.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        client.timeout = Duration::from_secs(secs);
    }
    if let Some(lang) = global.lang {
        client.locale = lang.into();
    }
    if let Some(ref path) = global.state_file {
        client.state_file = Some(path.clone());
    }

    Ok((name, client))
}
