// ── Core error types ──
//
// User-facing errors from canteen-core. Consumers never see raw HTTP
// status handling or JSON parse failures. `From<canteen_api::Error>`
// translates transport-layer errors into these variants.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Authentication ───────────────────────────────────────────────
    #[error("Session expired: {message}")]
    AuthExpired { message: String },

    #[error("Authentication failed: {message}")]
    AuthInvalid { message: String },

    // ── Connectivity ─────────────────────────────────────────────────
    #[error("Cannot reach server at {url}: {reason}")]
    Network { url: String, reason: String },

    // ── Server responses ─────────────────────────────────────────────
    #[error("Not found: {detail}")]
    NotFound { detail: String },

    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        /// Raw response body, usually DRF field errors.
        body: String,
    },

    #[error("Unexpected response: {message}")]
    Decode { message: String },

    // ── Local failures ───────────────────────────────────────────────
    #[error("Validation failed for `{field}`: {reason}")]
    Validation { field: String, reason: String },

    #[error("Cannot persist state at {}: {reason}", path.display())]
    Persistence { path: PathBuf, reason: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Auth-related: the caller should send the user back to the login form.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::AuthExpired { .. } | Self::AuthInvalid { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<canteen_api::Error> for CoreError {
    fn from(err: canteen_api::Error) -> Self {
        use canteen_api::Error as Api;

        match err {
            Api::Unauthorized { message, .. } => CoreError::AuthExpired { message },
            Api::InvalidCredentials { message } => CoreError::AuthInvalid { message },
            Api::Transport(ref e) => CoreError::Network {
                url: e
                    .url()
                    .map(|u| u.to_string())
                    .unwrap_or_else(|| "<unknown>".into()),
                reason: e.to_string(),
            },
            Api::Http {
                status: 404,
                message,
                ..
            } => CoreError::NotFound { detail: message },
            Api::Http {
                status,
                message,
                body,
            } => CoreError::Api {
                status,
                message,
                body,
            },
            Api::Deserialization { message, .. } => CoreError::Decode { message },
            Api::Serialization(e) => CoreError::Decode {
                message: e.to_string(),
            },
            Api::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid URL: {e}"),
            },
            Api::Tls(message) | Api::ClientSetup(message) => CoreError::Config { message },
            Api::UnknownBackend(name) => CoreError::Config {
                message: format!("unknown backend: {name}"),
            },
        }
    }
}
