//! Shared configuration for the canteen CLI.
//!
//! TOML profiles layered with `CANTEEN_*` environment variables, and
//! translation to `canteen_core::ClientConfig`. Each profile names one
//! deployment (host plus backend routing) and gets its own state file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use canteen_core::{ClientConfig, Locale, RoutePrefixes, RouteTable, TlsVerification};
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

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
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named deployments.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some(DEFAULT_PROFILE.into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::from([(DEFAULT_PROFILE.to_owned(), Profile::default())]),
        }
    }
}

pub const DEFAULT_PROFILE: &str = "default";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default)]
    pub locale: Locale,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
            locale: Locale::default(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_host() -> String {
    "http://localhost:8000".into()
}

/// How the four backends are laid out on the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingMode {
    /// Every backend is the host itself.
    Single,
    /// Each backend is `<host><prefix>`.
    #[default]
    Multi,
}

/// A named deployment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Server base URL (e.g., "https://canteen.example.kz").
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default)]
    pub mode: RoutingMode,

    /// Login name offered by `canteen login`.
    pub username: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Override UI language.
    pub locale: Option<Locale>,

    /// Override the session/UI state file.
    pub state_file: Option<PathBuf>,

    /// Path prefixes for multi-backend mode. Kept last so it serializes
    /// as a trailing `[profiles.<name>.prefixes]` table.
    #[serde(default)]
    pub prefixes: RoutePrefixes,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            host: default_host(),
            mode: RoutingMode::default(),
            username: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
            locale: None,
            state_file: None,
            prefixes: RoutePrefixes::default(),
        }
    }
}

impl Profile {
    pub fn route_table(&self) -> Result<RouteTable, ConfigError> {
        let host: url::Url = self.host.parse().map_err(|_| ConfigError::Validation {
            field: "host".into(),
            reason: format!("invalid URL: {}", self.host),
        })?;
        match self.mode {
            RoutingMode::Single => Ok(RouteTable::single(host)),
            RoutingMode::Multi => {
                RouteTable::multi(&host, &self.prefixes).map_err(|e| ConfigError::Validation {
                    field: "prefixes".into(),
                    reason: e.to_string(),
                })
            }
        }
    }
}

impl Config {
    /// Pick a profile: the explicit name, else `default_profile`, else "default".
    pub fn profile(&self, name: Option<&str>) -> Result<(String, &Profile), ConfigError> {
        let name = name
            .or(self.default_profile.as_deref())
            .unwrap_or(DEFAULT_PROFILE);
        self.profiles
            .get(name)
            .map(|p| (name.to_owned(), p))
            .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() })
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("kz", "canteen", "canteen")
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("canteen");
    p
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Where a profile's session and UI state live between runs.
pub fn state_path(profile_name: &str) -> PathBuf {
    let file = format!("state-{profile_name}.json");
    project_dirs().map_or_else(
        || dirs_fallback().join(&file),
        |dirs| dirs.data_dir().join(&file),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from a specific file + environment.
///
/// Environment keys are `CANTEEN_` prefixed and nest on `__`, e.g.
/// `CANTEEN_PROFILES__DEFAULT__HOST`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("CANTEEN_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation to core config ──────────────────────────────────────

/// Build a `ClientConfig` from a profile and the global defaults.
pub fn profile_to_client_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<ClientConfig, ConfigError> {
    let routes = profile.route_table()?;

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    Ok(ClientConfig {
        routes,
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        locale: profile.locale.unwrap_or(defaults.locale),
        state_file: Some(
            profile
                .state_file
                .clone()
                .unwrap_or_else(|| state_path(profile_name)),
        ),
    })
}
