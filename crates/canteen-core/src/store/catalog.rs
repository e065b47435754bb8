// ── Cached catalog store ──
//
// Small reference lists (warehouses, units, reasons, ...) are fetched
// whole and reused until the TTL runs out. Creates and updates invalidate
// the cache. Deletes either force an immediate reload or drop the row
// locally, per the resource's delete policy.

use std::marker::PhantomData;

use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, error};

use super::StoreDeps;
use super::guard::FlagGuard;
use super::resource::{CatalogConfig, CatalogResource, DeletePolicy};
use crate::error::CoreError;
use crate::model::{Identified, RecordId};
use crate::notify::Severity;

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogState<T> {
    pub records: Vec<T>,
    pub single: Option<T>,
    pub last_fetched: Option<Instant>,
    pub is_loading: bool,
    pub is_submitting: bool,
}

impl<T> Default for CatalogState<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            single: None,
            last_fetched: None,
            is_loading: false,
            is_submitting: false,
        }
    }
}

pub struct CatalogStore<R: CatalogResource> {
    deps: StoreDeps,
    state: watch::Sender<CatalogState<R::Record>>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: CatalogResource> CatalogStore<R> {
    pub fn new(deps: StoreDeps) -> Self {
        let (state, _) = watch::channel(CatalogState::default());
        Self {
            deps,
            state,
            _resource: PhantomData,
        }
    }

    pub fn config(&self) -> CatalogConfig {
        R::CONFIG
    }

    pub fn snapshot(&self) -> CatalogState<R::Record> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CatalogState<R::Record>> {
        self.state.subscribe()
    }

    pub fn records(&self) -> Vec<R::Record> {
        self.state.borrow().records.clone()
    }

    pub fn get_by_id(&self, id: RecordId) -> Option<R::Record> {
        self.state.borrow().records.iter().find(|r| r.id() == id).cloned()
    }

    /// `true` when never fetched or the last fetch is older than the TTL.
    pub fn should_fetch(&self) -> bool {
        self.state
            .borrow()
            .last_fetched
            .is_none_or(|at| at.elapsed() > R::CONFIG.ttl)
    }

    /// Forget the fetch time so the next `fetch_all(false)` hits the server.
    pub fn invalidate(&self) {
        self.state.send_modify(|s| s.last_fetched = None);
    }

    pub fn reset(&self) {
        self.state.send_replace(CatalogState::default());
    }

    /// Load the whole list unless a fresh copy is cached.
    pub async fn fetch_all(&self, force: bool) {
        let cfg = R::CONFIG;
        if !force && !self.should_fetch() {
            debug!(store = cfg.store_id, "serving catalog from cache");
            return;
        }
        let _loading = self.loading();

        if let Err(e) = self.load_all().await {
            error!(store = cfg.store_id, error = %e, "catalog fetch failed");
            self.deps
                .notify(Severity::Error, "messages.fetchListError", cfg.item_list_key);
        }
    }

    pub async fn fetch_record(&self, id: RecordId) {
        let cfg = R::CONFIG;
        self.state.send_modify(|s| s.single = None);
        let _loading = self.loading();

        match self
            .deps
            .api
            .get::<R::Record>(cfg.backend, &cfg.record_path(id))
            .await
        {
            Ok(record) => self.state.send_modify(|s| s.single = Some(record)),
            Err(e) => {
                error!(store = cfg.store_id, id, error = %e, "record fetch failed");
                self.deps
                    .notify(Severity::Error, "messages.fetchItemError", cfg.item_key);
            }
        }
    }

    pub async fn create_record(&self, payload: &R::Payload) -> Option<R::Record> {
        let _submitting = self.submitting();
        let created = self.deps.create(R::CONFIG.target(), payload).await;
        if created.is_some() {
            self.invalidate();
        }
        created
    }

    pub async fn update_record(&self, id: RecordId, payload: &R::Payload) -> Option<R::Record> {
        let _submitting = self.submitting();
        let updated = self.deps.update(R::CONFIG.target(), id, payload).await;
        if updated.is_some() {
            self.invalidate();
        }
        updated
    }

    /// `true` once the server has deleted the record. A failed reload
    /// afterwards is reported as a warning.
    pub async fn delete_record(&self, id: RecordId) -> bool {
        let cfg = R::CONFIG;
        let _submitting = self.submitting();
        let _overlay = self.deps.deleting();

        if !self.deps.delete(cfg.target(), id).await {
            return false;
        }

        let reconciled = match cfg.delete_policy {
            DeletePolicy::Refetch => {
                self.invalidate();
                let _loading = self.loading();
                self.load_all().await
            }
            DeletePolicy::FilterLocal => {
                self.state
                    .send_modify(|s| s.records.retain(|row| row.id() != id));
                Ok(())
            }
        };
        self.deps.report_deleted(cfg.target(), id, reconciled);
        true
    }

    async fn load_all(&self) -> Result<(), CoreError> {
        let cfg = R::CONFIG;
        let records = self
            .deps
            .api
            .get::<Vec<R::Record>>(cfg.backend, cfg.endpoint)
            .await?;
        self.state.send_modify(|s| {
            s.records = records;
            s.last_fetched = Some(Instant::now());
        });
        Ok(())
    }

    fn loading(&self) -> FlagGuard<'_, CatalogState<R::Record>> {
        FlagGuard::raise(&self.state, |s| s.is_loading = true, |s| s.is_loading = false)
    }

    fn submitting(&self) -> FlagGuard<'_, CatalogState<R::Record>> {
        FlagGuard::raise(
            &self.state,
            |s| s.is_submitting = true,
            |s| s.is_submitting = false,
        )
    }
}
