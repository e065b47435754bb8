// Shared session handle.
//
// Holds the access token, refresh token and user profile. Every clone of
// the `Arc<Session>` sees the same state; changes are pushed to `watch`
// subscribers and lifecycle transitions to a `broadcast` channel.

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::{broadcast, watch};
use tracing::debug;

use crate::models::UserProfile;

/// Point-in-time copy of the session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub access_token: Option<SecretString>,
    pub refresh_token: Option<SecretString>,
    pub profile: Option<UserProfile>,
}

impl SessionState {
    /// Derived: both an access token and a profile are present.
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some() && self.profile.is_some()
    }
}

/// Lifecycle transitions, for routers and persistence hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn,
    TokenRefreshed,
    LoggedOut,
}

/// Session owned jointly by the fetch wrapper and the session store.
pub struct Session {
    state: watch::Sender<SessionState>,
    events: broadcast::Sender<SessionEvent>,
}

impl Session {
    pub fn new() -> Self {
        Self::restore(SessionState::default())
    }

    /// Start from a previously persisted state.
    pub fn restore(state: SessionState) -> Self {
        let (state, _) = watch::channel(state);
        let (events, _) = broadcast::channel(16);
        Self { state, events }
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn access_token(&self) -> Option<SecretString> {
        self.state.borrow().access_token.clone()
    }

    pub fn refresh_token(&self) -> Option<SecretString> {
        self.state.borrow().refresh_token.clone()
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.state.borrow().profile.clone()
    }

    /// `true` if the current access token differs from `seen`.
    ///
    /// Used by the fetch wrapper to detect that another task already
    /// refreshed while this one waited for the refresh lock.
    pub fn access_token_changed_since(&self, seen: Option<&SecretString>) -> bool {
        let state = self.state.borrow();
        match (state.access_token.as_ref(), seen) {
            (Some(current), Some(seen)) => current.expose_secret() != seen.expose_secret(),
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    pub fn set_tokens(&self, access: SecretString, refresh: SecretString) {
        self.state.send_modify(|s| {
            s.access_token = Some(access);
            s.refresh_token = Some(refresh);
        });
    }

    pub fn set_access_token(&self, access: SecretString) {
        self.state.send_modify(|s| s.access_token = Some(access));
        let _ = self.events.send(SessionEvent::TokenRefreshed);
    }

    pub fn set_profile(&self, profile: UserProfile) {
        self.state.send_modify(|s| s.profile = Some(profile));
        let _ = self.events.send(SessionEvent::LoggedIn);
    }

    /// Drop every credential. Always ends unauthenticated.
    pub fn clear(&self) {
        debug!("clearing session");
        self.state.send_modify(|s| *s = SessionState::default());
        let _ = self.events.send(SessionEvent::LoggedOut);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
