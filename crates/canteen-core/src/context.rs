// ── Application context ──
//
// Owns the shared session, API client, UI state and message catalog, and
// hands out stores wired to them. Nothing here is global: build one
// context per process (or per test) and pass it down.

use std::sync::Arc;

use canteen_api::{ApiClient, Session};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::i18n::{Catalog, Translate};
use crate::persist::{self, PersistedState, StateStorage};
use crate::session::SessionStore;
use crate::store::{CatalogResource, CatalogStore, DocumentStore, Resource, StoreDeps};
use crate::ui::UiStore;

pub struct AppContext {
    config: ClientConfig,
    deps: StoreDeps,
    session: SessionStore,
    storage: Option<StateStorage>,
}

impl AppContext {
    /// Restore persisted state (when a state file is configured) and build
    /// the API client.
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        let storage = config.state_file.clone().map(StateStorage::new);
        let persisted = match &storage {
            Some(storage) => storage.load()?,
            None => PersistedState::default(),
        };
        debug!(
            restored_session = persisted.auth.access_token.is_some(),
            "building application context"
        );

        let session = Arc::new(Session::restore(persisted.auth.into_session()));
        let api = Arc::new(ApiClient::new(
            config.routes.clone(),
            session,
            &config.transport(),
        )?);
        let ui = Arc::new(UiStore::new(persisted.ui.is_sidebar_open));
        let messages: Arc<dyn Translate> = Arc::new(Catalog::new(config.locale));

        Ok(Self::from_parts(
            config,
            StoreDeps::new(api, ui, messages),
            storage,
        ))
    }

    /// Assemble from pre-built parts (custom HTTP client, test catalog).
    pub fn from_parts(config: ClientConfig, deps: StoreDeps, storage: Option<StateStorage>) -> Self {
        let session = SessionStore::new(Arc::clone(&deps.api));
        Self {
            config,
            deps,
            session,
            storage,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn deps(&self) -> &StoreDeps {
        &self.deps
    }

    pub fn api(&self) -> &Arc<ApiClient> {
        &self.deps.api
    }

    pub fn ui(&self) -> &Arc<UiStore> {
        &self.deps.ui
    }

    pub fn messages(&self) -> &Arc<dyn Translate> {
        &self.deps.messages
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn storage(&self) -> Option<&StateStorage> {
        self.storage.as_ref()
    }

    // ── Stores ───────────────────────────────────────────────────────

    pub fn documents<R: Resource>(&self) -> DocumentStore<R> {
        DocumentStore::new(self.deps.clone())
    }

    pub fn catalog<R: CatalogResource>(&self) -> CatalogStore<R> {
        CatalogStore::new(self.deps.clone())
    }

    // ── Persistence ──────────────────────────────────────────────────

    /// Write the current session and UI state now. No-op without a state file.
    pub fn persist(&self) -> Result<(), CoreError> {
        match &self.storage {
            Some(storage) => storage.save(&PersistedState::capture(
                self.session.session(),
                &self.deps.ui,
            )),
            None => Ok(()),
        }
    }

    /// Keep the state file in sync from a background task.
    pub fn spawn_autosave(&self) -> Option<JoinHandle<()>> {
        let storage = self.storage.clone()?;
        Some(persist::spawn_autosave(
            storage,
            self.session.session().subscribe(),
            self.deps.ui.subscribe_sidebar(),
        ))
    }
}
