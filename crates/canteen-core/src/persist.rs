// ── Persisted client state ──
//
// A JSON document keyed by store name:
//
//   { "auth": { "access_token", "refresh_token", "user_profile" },
//     "ui":   { "is_sidebar_open" } }
//
// Restored at start-up, rewritten after every session transition and
// sidebar toggle.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use canteen_api::{Session, SessionState, UserProfile};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::ui::UiStore;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedAuth {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user_profile: Option<UserProfile>,
}

impl PersistedAuth {
    pub fn from_session(state: &SessionState) -> Self {
        Self {
            access_token: state
                .access_token
                .as_ref()
                .map(|t| t.expose_secret().to_owned()),
            refresh_token: state
                .refresh_token
                .as_ref()
                .map(|t| t.expose_secret().to_owned()),
            user_profile: state.profile.clone(),
        }
    }

    pub fn into_session(self) -> SessionState {
        SessionState {
            access_token: self.access_token.map(SecretString::from),
            refresh_token: self.refresh_token.map(SecretString::from),
            profile: self.user_profile,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedUi {
    #[serde(default = "sidebar_default")]
    pub is_sidebar_open: bool,
}

fn sidebar_default() -> bool {
    true
}

impl Default for PersistedUi {
    fn default() -> Self {
        Self {
            is_sidebar_open: sidebar_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub auth: PersistedAuth,
    #[serde(default)]
    pub ui: PersistedUi,
}

impl PersistedState {
    pub fn capture(session: &Session, ui: &UiStore) -> Self {
        Self {
            auth: PersistedAuth::from_session(&session.snapshot()),
            ui: PersistedUi {
                is_sidebar_open: ui.is_sidebar_open(),
            },
        }
    }
}

/// The state file on disk.
#[derive(Debug, Clone)]
pub struct StateStorage {
    path: PathBuf,
}

impl StateStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the state file. A missing file is an empty state; an
    /// unreadable one is logged and treated the same.
    pub fn load(&self) -> Result<PersistedState, CoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(PersistedState::default()),
            Err(e) => return Err(self.error(&e)),
        };
        match serde_json::from_str(&raw) {
            Ok(state) => Ok(state),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring corrupt state file");
                Ok(PersistedState::default())
            }
        }
    }

    /// Write atomically: temp file in the same directory, then rename.
    pub fn save(&self, state: &PersistedState) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.error(&e))?;
        }
        let body = serde_json::to_string_pretty(state).map_err(|e| self.error(&e))?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, body).map_err(|e| self.error(&e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.error(&e))?;
        debug!(path = %self.path.display(), "state saved");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), CoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.error(&e)),
        }
    }

    fn error(&self, e: &dyn std::fmt::Display) -> CoreError {
        CoreError::Persistence {
            path: self.path.clone(),
            reason: e.to_string(),
        }
    }
}

/// Rewrite the state file whenever the session or sidebar flag changes.
///
/// Holds only receivers, so the task ends once the session and UI stores
/// are dropped.
pub fn spawn_autosave(
    storage: StateStorage,
    mut session: watch::Receiver<SessionState>,
    mut sidebar: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let changed = tokio::select! {
                changed = session.changed() => changed,
                changed = sidebar.changed() => changed,
            };
            if changed.is_err() {
                break;
            }
            let state = PersistedState {
                auth: PersistedAuth::from_session(&session.borrow_and_update()),
                ui: PersistedUi {
                    is_sidebar_open: *sidebar.borrow_and_update(),
                },
            };
            if let Err(e) = storage.save(&state) {
                warn!(error = %e, "autosave failed");
            }
        }
        debug!("autosave stopped");
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn profile() -> UserProfile {
        serde_json::from_value(serde_json::json!({
            "user_id": 1, "profile_id": 2, "school_id": 3, "school_bin": 4,
            "warehouse_id": 5, "login": "cook"
        }))
        .unwrap()
    }

    #[test]
    fn round_trip_restores_authentication() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StateStorage::new(dir.path().join("nested/state.json"));

        let session = Session::new();
        session.set_tokens(
            SecretString::from("a1".to_owned()),
            SecretString::from("r1".to_owned()),
        );
        session.set_profile(profile());
        let ui = UiStore::new(false);

        storage.save(&PersistedState::capture(&session, &ui)).unwrap();
        let loaded = storage.load().unwrap();
        assert!(!loaded.ui.is_sidebar_open);

        let restored = Session::restore(loaded.auth.into_session());
        assert!(restored.is_authenticated());
        assert_eq!(restored.profile().map(|p| p.login), Some("cook".into()));
    }

    #[test]
    fn missing_or_corrupt_file_is_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StateStorage::new(dir.path().join("state.json"));
        assert_eq!(storage.load().unwrap(), PersistedState::default());

        std::fs::write(storage.path(), "{ not json").unwrap();
        assert_eq!(storage.load().unwrap(), PersistedState::default());

        storage.clear().unwrap();
        storage.clear().unwrap();
    }

    #[tokio::test]
    async fn autosave_follows_sidebar_and_logout() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StateStorage::new(dir.path().join("state.json"));
        let session = Session::new();
        let ui = UiStore::new(true);
        let task = spawn_autosave(storage.clone(), session.subscribe(), ui.subscribe_sidebar());

        ui.toggle_sidebar();
        let saved = wait_for(&storage, |s| !s.ui.is_sidebar_open).await;
        assert!(saved.auth.access_token.is_none());

        session.set_tokens(
            SecretString::from("a1".to_owned()),
            SecretString::from("r1".to_owned()),
        );
        wait_for(&storage, |s| s.auth.access_token.as_deref() == Some("a1")).await;

        session.clear();
        wait_for(&storage, |s| s.auth.refresh_token.is_none()).await;

        drop(session);
        tokio::time::timeout(Duration::from_secs(2), task)
            .await
            .unwrap()
            .unwrap();
    }

    async fn wait_for(
        storage: &StateStorage,
        done: impl Fn(&PersistedState) -> bool,
    ) -> PersistedState {
        for _ in 0..200 {
            let state = storage.load().unwrap();
            if done(&state) {
                return state;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("state file never reached the expected shape");
    }
}
