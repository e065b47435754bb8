// Wire types shared by every endpoint.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Standard paginated list envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total number of records across all pages.
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}

/// `POST /token/` response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    pub access: SecretString,
    pub refresh: SecretString,
}

/// `POST /token/refresh/` response.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshedToken {
    pub access: SecretString,
}

/// Authenticated user as returned by `GET /user-data/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: u64,
    pub profile_id: u64,
    /// Not sent by the server; stamped with the login name after sign-in.
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub user_phone: String,
    pub school_id: u64,
    pub school_bin: u64,
    #[serde(default)]
    pub school_name_kz: String,
    #[serde(default)]
    pub school_name_ru: String,
    pub warehouse_id: u64,
    #[serde(default)]
    pub warehouse_name: String,
}

/// DRF-style error body: `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}
