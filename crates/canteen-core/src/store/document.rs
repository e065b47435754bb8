// ── Paginated document store ──
//
// Five operations with uniform loading, error and notification rules.
// Failures never escape: each is logged, reported to the notifier once,
// and turned into an unchanged state (reads) or a `None`/`false` result
// (writes).

use std::marker::PhantomData;

use canteen_api::Page;
use tokio::sync::watch;
use tracing::{error, warn};

use super::StoreDeps;
use super::guard::FlagGuard;
use super::query::{SearchFilter, list_query};
use super::resource::{DeletePolicy, Resource, StoreConfig};
use crate::error::CoreError;
use crate::model::{Identified, RecordId};
use crate::notify::Severity;

/// `max(1, ceil(total / page_size))`.
pub fn total_pages(total_records: u64, page_size: u32) -> u64 {
    total_records.div_ceil(u64::from(page_size.max(1))).max(1)
}

/// Observable state of one paginated store.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<L, D, F> {
    pub list: Vec<L>,
    pub single: Option<D>,
    pub total_records: u64,
    pub page_size: u32,
    pub current_page: u32,
    pub filter: F,
    pub is_loading: bool,
    pub is_submitting: bool,
}

impl<L, D, F: Default> ListState<L, D, F> {
    fn initial(page_size: u32) -> Self {
        Self {
            list: Vec::new(),
            single: None,
            total_records: 0,
            page_size,
            current_page: 1,
            filter: F::default(),
            is_loading: false,
            is_submitting: false,
        }
    }
}

impl<L, D, F> ListState<L, D, F> {
    pub fn total_pages(&self) -> u64 {
        total_pages(self.total_records, self.page_size)
    }
}

type StateOf<R> =
    ListState<<R as Resource>::ListItem, <R as Resource>::Detail, <R as Resource>::Filter>;

/// Store for one paginated resource.
pub struct DocumentStore<R: Resource> {
    deps: StoreDeps,
    state: watch::Sender<StateOf<R>>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> DocumentStore<R> {
    pub fn new(deps: StoreDeps) -> Self {
        let (state, _) = watch::channel(ListState::initial(R::CONFIG.page_size));
        Self {
            deps,
            state,
            _resource: PhantomData,
        }
    }

    pub fn config(&self) -> StoreConfig {
        R::CONFIG
    }

    // ── Observation ──────────────────────────────────────────────────

    pub fn snapshot(&self) -> StateOf<R> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<StateOf<R>> {
        self.state.subscribe()
    }

    pub fn total_pages(&self) -> u64 {
        self.state.borrow().total_pages()
    }

    pub fn get_by_id(&self, id: RecordId) -> Option<R::ListItem> {
        self.state.borrow().list.iter().find(|r| r.id() == id).cloned()
    }

    // ── Local mutations ──────────────────────────────────────────────

    /// Replace the active filter. Takes effect on the next fetch.
    pub fn set_filter(&self, filter: R::Filter) -> Result<(), CoreError> {
        filter.validate()?;
        self.state.send_modify(|s| s.filter = filter);
        Ok(())
    }

    pub fn set_page_size(&self, page_size: u32) {
        self.state.send_modify(|s| s.page_size = page_size.max(1));
    }

    /// Back to the freshly constructed state.
    pub fn reset(&self) {
        self.state
            .send_replace(ListState::initial(R::CONFIG.page_size));
    }

    // ── Remote operations ────────────────────────────────────────────

    /// Load `page` with the active filter. Failures leave state unchanged.
    pub async fn fetch_records(&self, page: u32) {
        let cfg = R::CONFIG;
        let page = page.max(1);
        let _loading = self.loading();

        match self.load_page(page).await {
            Ok(data) => self.apply_page(page, data),
            Err(e) => {
                error!(store = cfg.store_id, page, error = %e, "list fetch failed");
                self.deps
                    .notify(Severity::Error, "messages.fetchListError", cfg.item_list_key);
            }
        }
    }

    /// Load one record into `single`. The slot is cleared first.
    pub async fn fetch_record(&self, id: RecordId) {
        let cfg = R::CONFIG;
        self.state.send_modify(|s| s.single = None);
        let _loading = self.loading();

        match self
            .deps
            .api
            .get::<R::Detail>(cfg.backend, &cfg.record_path(id))
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

    /// POST a new record. `None` means it was not created.
    pub async fn create_record(&self, payload: &R::Payload) -> Option<R::Detail> {
        let _submitting = self.submitting();
        self.deps.create(R::CONFIG.target(), payload).await
    }

    /// PUT or PATCH an existing record. `None` means it was not saved.
    pub async fn update_record(&self, id: RecordId, payload: &R::Payload) -> Option<R::Detail> {
        let _submitting = self.submitting();
        self.deps.update(R::CONFIG.target(), id, payload).await
    }

    /// DELETE a record and reconcile the list per the resource's policy.
    ///
    /// `true` once the server has deleted it, even if the follow-up reload
    /// failed; that case is reported as a warning.
    pub async fn delete_record(&self, id: RecordId) -> bool {
        let cfg = R::CONFIG;
        let _submitting = self.submitting();
        let _overlay = self.deps.deleting();

        if !self.deps.delete(cfg.target(), id).await {
            return false;
        }

        let reconciled = match cfg.delete_policy {
            DeletePolicy::Refetch => self.resync_after_delete().await,
            DeletePolicy::FilterLocal => {
                self.state.send_modify(|s| {
                    let before = s.list.len();
                    s.list.retain(|row| row.id() != id);
                    if s.list.len() < before {
                        s.total_records = s.total_records.saturating_sub(1);
                    }
                });
                Ok(())
            }
        };
        self.deps.report_deleted(cfg.target(), id, reconciled);
        true
    }

    // ── Internals ────────────────────────────────────────────────────

    fn loading(&self) -> FlagGuard<'_, StateOf<R>> {
        FlagGuard::raise(&self.state, |s| s.is_loading = true, |s| s.is_loading = false)
    }

    fn submitting(&self) -> FlagGuard<'_, StateOf<R>> {
        FlagGuard::raise(
            &self.state,
            |s| s.is_submitting = true,
            |s| s.is_submitting = false,
        )
    }

    async fn load_page(&self, page: u32) -> Result<Page<R::ListItem>, CoreError> {
        let cfg = R::CONFIG;
        let params = {
            let s = self.state.borrow();
            list_query(&cfg, page, s.page_size, &s.filter)
        };
        Ok(self
            .deps
            .api
            .get_with_params(cfg.backend, cfg.endpoint, &params)
            .await?)
    }

    fn apply_page(&self, page: u32, data: Page<R::ListItem>) {
        self.state.send_modify(|s| {
            s.list = data.results;
            s.total_records = data.count;
            s.current_page = page;
        });
    }

    /// Reload the current page; step back one page if it no longer exists.
    async fn resync_after_delete(&self) -> Result<(), CoreError> {
        let cfg = R::CONFIG;
        let _loading = self.loading();
        let page = self.state.borrow().current_page;

        let (page, data) = match self.load_page(page).await {
            Err(e) if e.is_not_found() && page > 1 => {
                warn!(store = cfg.store_id, page, "page vanished after delete, stepping back");
                (page - 1, self.load_page(page - 1).await?)
            }
            other => (page, other?),
        };
        self.apply_page(page, data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_formula() {
        assert_eq!(total_pages(0, 20), 1);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(45, 20), 3);
        assert_eq!(total_pages(44, 20), 3);
        assert_eq!(total_pages(40, 20), 2);
        assert_eq!(total_pages(7, 0), 7);
    }

    #[test]
    fn total_pages_matches_ceiling_for_all_small_inputs() {
        for page_size in 1..=35_u32 {
            for total in 0..=200_u64 {
                let expected = if total == 0 {
                    1
                } else {
                    (total + u64::from(page_size) - 1) / u64::from(page_size)
                };
                assert_eq!(total_pages(total, page_size), expected, "{total}/{page_size}");
            }
        }
    }
}
