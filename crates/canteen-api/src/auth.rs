// Token endpoints
//
// `POST /token/` issues an access/refresh pair; `POST /token/refresh/`
// trades the refresh token for a new access token. Both go to the common
// backend without an Authorization header.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::client::{ApiClient, handle_response, parse_error};
use crate::error::Error;
use crate::models::{RefreshedToken, TokenPair, UserProfile};
use crate::routes::Backend;

const TOKEN_PATH: &str = "/token/";
const REFRESH_PATH: &str = "/token/refresh/";
const PROFILE_PATH: &str = "/user-data/";

/// Login form input.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub login: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(login: impl Into<String>, password: SecretString) -> Self {
        Self {
            login: login.into(),
            password,
        }
    }
}

impl ApiClient {
    /// Exchange a username/password for a token pair.
    ///
    /// Does not touch the session. Any non-success status becomes
    /// [`Error::InvalidCredentials`], carrying the server's `detail`.
    pub async fn obtain_tokens(&self, credentials: &Credentials) -> Result<TokenPair, Error> {
        let url = self.routes().url(Backend::Common, TOKEN_PATH)?;
        debug!("requesting tokens at {}", url);

        let body = json!({
            "username": credentials.login,
            "password": credentials.password.expose_secret(),
        });

        let resp = self.http().post(url).json(&body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = match parse_error(status, resp).await {
                Error::Unauthorized { message, .. } | Error::Http { message, .. } => message,
                other => other.to_string(),
            };
            return Err(Error::InvalidCredentials { message });
        }

        handle_response(resp).await
    }

    /// Trade the held refresh token for a new access token.
    ///
    /// Without a refresh token this returns `false` immediately and makes no
    /// request. On success only the access token is replaced. On any failure
    /// the session is cleared and `false` is returned.
    pub async fn refresh_access_token(&self) -> bool {
        let Some(refresh) = self.session().refresh_token() else {
            return false;
        };

        match self.request_refresh(&refresh).await {
            Ok(token) => {
                self.session().set_access_token(token.access);
                info!("access token refreshed");
                true
            }
            Err(e) => {
                warn!(error = %e, "token refresh rejected, logging out");
                self.session().clear();
                false
            }
        }
    }

    async fn request_refresh(&self, refresh: &SecretString) -> Result<RefreshedToken, Error> {
        let url = self.routes().url(Backend::Common, REFRESH_PATH)?;
        debug!("refreshing token at {}", url);

        let body = json!({ "refresh": refresh.expose_secret() });
        let resp = self.http().post(url).json(&body).send().await?;
        handle_response(resp).await
    }

    /// Fetch the authenticated user's profile through the fetch wrapper.
    pub async fn user_profile(&self) -> Result<UserProfile, Error> {
        self.get(Backend::Common, PROFILE_PATH).await
    }
}
