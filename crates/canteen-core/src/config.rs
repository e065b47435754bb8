// ── Runtime client configuration ──
//
// Describes where the backends live and how to talk to them. Core never
// reads config files; the CLI builds a `ClientConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use canteen_api::{RouteTable, TlsMode, TransportConfig};

use crate::i18n::Locale;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed development servers).
    DangerAcceptInvalid,
}

impl From<&TlsVerification> for TlsMode {
    fn from(tls: &TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        }
    }
}

/// Everything `AppContext` needs to start.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub routes: RouteTable,
    pub tls: TlsVerification,
    pub timeout: Duration,
    /// UI language for notifications and `Accept-Language`.
    pub locale: Locale,
    /// Where session and UI state are persisted. `None` keeps state in memory.
    pub state_file: Option<PathBuf>,
}

impl ClientConfig {
    pub fn new(routes: RouteTable) -> Self {
        Self {
            routes,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            locale: Locale::default(),
            state_file: None,
        }
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: TlsMode::from(&self.tls),
            timeout: self.timeout,
            accept_language: None,
        }
        .with_accept_language(self.locale.language_tag())
    }
}
