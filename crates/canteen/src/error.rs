//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with help text.

use miette::Diagnostic;
use thiserror::Error;

use canteen_config::ConfigError;
use canteen_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the server at {url}")]
    #[diagnostic(
        code(canteen::connection_failed),
        help(
            "Check that the backend is running and the profile host is right.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Not signed in")]
    #[diagnostic(code(canteen::not_signed_in), help("Run: canteen login"))]
    NotSignedIn,

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(canteen::auth_failed),
        help("Check the login and password, then run: canteen login")
    )]
    AuthFailed { message: String },

    #[error("Session expired")]
    #[diagnostic(
        code(canteen::session_expired),
        help("The refresh token was rejected. Run: canteen login")
    )]
    SessionExpired,

    // ── Store actions ────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(canteen::action_failed), help("Re-run with -v for request details."))]
    ActionFailed { message: String },

    #[error("API error ({status}): {message}")]
    #[diagnostic(code(canteen::api_error))]
    ApiError { status: u16, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(canteen::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(canteen::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: canteen config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(canteen::config))]
    Config { message: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(canteen::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(canteen::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NotSignedIn | Self::AuthFailed { .. } | Self::SessionExpired => exit_code::AUTH,
            Self::ApiError { status: 404, .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } | Self::Json(_) => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AuthExpired { .. } => CliError::SessionExpired,
            CoreError::AuthInvalid { message } => CliError::AuthFailed { message },
            CoreError::Network { url, reason } => CliError::ConnectionFailed { url, reason },
            CoreError::NotFound { detail } => CliError::ApiError {
                status: 404,
                message: detail,
            },
            CoreError::Api {
                status, message, ..
            } => CliError::ApiError { status, message },
            CoreError::Validation { field, reason } => CliError::Validation { field, reason },
            other @ (CoreError::Decode { .. }
            | CoreError::Persistence { .. }
            | CoreError::Config { .. }) => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::UnknownProfile { name } => CliError::ProfileNotFound {
                name,
                available: String::new(),
            },
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_exit_codes() {
        let cases = [
            (
                CliError::from(CoreError::AuthExpired {
                    message: "expired".into(),
                }),
                exit_code::AUTH,
            ),
            (
                CliError::from(CoreError::validation("date_from", "after date_to")),
                exit_code::USAGE,
            ),
            (
                CliError::from(CoreError::Network {
                    url: "http://localhost:8000".into(),
                    reason: "refused".into(),
                }),
                exit_code::CONNECTION,
            ),
            (
                CliError::from(CoreError::Api {
                    status: 500,
                    message: "boom".into(),
                    body: String::new(),
                }),
                exit_code::GENERAL,
            ),
        ];
        for (err, code) in cases {
            assert_eq!(err.exit_code(), code, "{err}");
        }
    }

    #[test]
    fn unknown_profile_keeps_its_name() {
        let err = CliError::from(ConfigError::UnknownProfile {
            name: "school9".into(),
        });
        assert!(matches!(err, CliError::ProfileNotFound { ref name, .. } if name == "school9"));
    }
}
