use thiserror::Error;

/// Top-level error type for the `canteen-api` crate.
///
/// Covers every failure mode of the transport layer: authentication,
/// HTTP status failures, transport, and response decoding.
/// `canteen-core` maps these into the user-facing taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The server rejected the bearer token (HTTP 401 or 403).
    #[error("Unauthorized (HTTP {status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// Token issuance rejected the supplied username/password.
    #[error("Invalid credentials: {message}")]
    InvalidCredentials { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate setup error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),

    // ── API ─────────────────────────────────────────────────────────
    /// Non-auth HTTP failure. `message` is the DRF `detail` when present.
    #[error("API error (HTTP {status}): {message}")]
    Http {
        status: u16,
        message: String,
        body: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// Request payload could not be encoded as JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // ── Routing ─────────────────────────────────────────────────────
    /// A backend key that the route table does not know.
    #[error("Unknown backend '{0}'")]
    UnknownBackend(String),
}

impl Error {
    /// Returns `true` for the 401/403 class that a token refresh may fix.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Returns `true` if the session cannot be recovered without a new login.
    pub fn is_auth_invalid(&self) -> bool {
        matches!(self, Self::InvalidCredentials { .. })
    }

    /// Returns `true` if this is a transient error worth retrying by hand.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Http { status: 404, .. } => true,
            _ => false,
        }
    }

    /// The HTTP status behind this error, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status, .. } | Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_is_auth_expired_only() {
        let err = Error::Unauthorized {
            status: 401,
            message: "token_not_valid".into(),
        };
        assert!(err.is_auth_expired());
        assert!(!err.is_auth_invalid());
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn http_classifiers() {
        let missing = Error::Http {
            status: 404,
            message: "Invalid page.".into(),
            body: String::new(),
        };
        assert!(missing.is_not_found());
        assert!(!missing.is_transient());

        let server = Error::Http {
            status: 502,
            message: "Bad Gateway".into(),
            body: String::new(),
        };
        assert!(server.is_transient());
        assert!(!server.is_auth_expired());
    }

    #[test]
    fn rejected_credentials_are_terminal() {
        let err = Error::InvalidCredentials {
            message: "No active account found with the given credentials".into(),
        };
        assert!(err.is_auth_invalid());
        assert!(!err.is_auth_expired());
        assert_eq!(err.status(), None);
    }
}
