// ── Entity stores ──
//
// One generic paginated store and one generic cached catalog store,
// instantiated per resource. State lives in `watch` channels so any number
// of views can subscribe to snapshots.

mod catalog;
mod document;
mod guard;
mod query;
mod resource;
mod write;

use std::sync::Arc;

use canteen_api::ApiClient;

use crate::i18n::Translate;
use crate::notify::Severity;
use crate::ui::UiStore;

pub use catalog::{CatalogState, CatalogStore};
pub use document::{DocumentStore, ListState, total_pages};
pub use query::{SearchFilter, list_query};
pub use resource::{
    CatalogConfig, CatalogResource, DeletePolicy, PaginationPolicy, Resource, StoreConfig,
    UpdateMethod,
};

/// What every store needs: the API, the UI side channel and messages.
#[derive(Clone)]
pub struct StoreDeps {
    pub api: Arc<ApiClient>,
    pub ui: Arc<UiStore>,
    pub messages: Arc<dyn Translate>,
}

impl StoreDeps {
    pub fn new(api: Arc<ApiClient>, ui: Arc<UiStore>, messages: Arc<dyn Translate>) -> Self {
        Self { api, ui, messages }
    }

    pub(crate) fn notify(&self, severity: Severity, template_key: &str, item_key: &str) {
        let message = self.messages.t_item(template_key, item_key);
        self.ui.notify(message, severity);
    }
}
