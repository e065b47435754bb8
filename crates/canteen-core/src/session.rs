// ── Session store ──
//
// Login, profile loading and logout on top of the shared `Session`
// handle. Token refresh itself lives in the API client so the fetch
// wrapper can call it; this store only exposes it.

use std::sync::Arc;

use canteen_api::{ApiClient, Credentials, Session, SessionEvent, UserProfile};
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::error::CoreError;
use crate::i18n::Locale;
use crate::model::ProfileExt;
use crate::model::profile::DEFAULT_USER_LABEL;

pub struct SessionStore {
    api: Arc<ApiClient>,
}

impl SessionStore {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub fn session(&self) -> &Arc<Session> {
        self.api.session()
    }

    pub fn events(&self) -> broadcast::Receiver<SessionEvent> {
        self.session().events()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.session().profile()
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Sign in and load the profile.
    ///
    /// A rejected token request leaves the current session untouched. A
    /// profile failure after tokens were issued logs out again.
    pub async fn login(&self, credentials: &Credentials) -> Result<UserProfile, CoreError> {
        let tokens = self.api.obtain_tokens(credentials).await.map_err(|e| {
            warn!(login = %credentials.login, error = %e, "login rejected");
            CoreError::from(e)
        })?;
        self.session().set_tokens(tokens.access, tokens.refresh);

        let profile = self.fetch_profile(&credentials.login).await?;
        info!(login = %credentials.login, school_id = profile.school_id, "logged in");
        Ok(profile)
    }

    /// Load `/user-data/` and stamp `login` onto it.
    pub async fn fetch_profile(&self, login: &str) -> Result<UserProfile, CoreError> {
        match self.api.user_profile().await {
            Ok(mut profile) => {
                profile.login = login.to_owned();
                self.session().set_profile(profile.clone());
                Ok(profile)
            }
            Err(e) => {
                warn!(error = %e, "profile fetch failed, logging out");
                self.logout();
                Err(e.into())
            }
        }
    }

    /// See [`ApiClient::refresh_access_token`].
    pub async fn refresh_access_token(&self) -> bool {
        self.api.refresh_access_token().await
    }

    pub fn logout(&self) {
        self.session().clear();
        info!("logged out");
    }

    // ── Display helpers ──────────────────────────────────────────────

    pub fn display_name(&self) -> String {
        self.profile().map_or_else(
            || DEFAULT_USER_LABEL.to_owned(),
            |p| p.display_name().to_owned(),
        )
    }

    pub fn school_name(&self, locale: Locale) -> Option<String> {
        self.profile().map(|p| p.school_name(locale).to_owned())
    }
}
