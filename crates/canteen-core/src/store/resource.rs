// Static per-entity store configuration.

use std::fmt::Debug;
use std::time::Duration;

use canteen_api::Backend;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::query::SearchFilter;
use super::write::WriteTarget;
use crate::model::{Attachment, Identified, RecordId, Validate};

/// How a store reconciles its list after a successful delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Reload from the server: the current page (previous page if it
    /// vanished), or the whole catalog.
    Refetch,
    /// Drop the row locally. The list shrinks by one until the next fetch.
    FilterLocal,
}

/// Whether `page`/`page_size` are sent alongside filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationPolicy {
    Always,
    /// Any active filter drops pagination; the server applies its default.
    OmitWhenFiltered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMethod {
    Put,
    Patch,
}

/// Fixed configuration of a paginated store.
#[derive(Debug, Clone, Copy)]
pub struct StoreConfig {
    pub store_id: &'static str,
    pub backend: Backend,
    /// Collection path with trailing slash, e.g. `/dishes/`.
    pub endpoint: &'static str,
    pub item_key: &'static str,
    pub item_list_key: &'static str,
    pub page_size: u32,
    pub pagination: PaginationPolicy,
    pub delete_policy: DeletePolicy,
    pub update_method: UpdateMethod,
}

impl StoreConfig {
    pub fn record_path(&self, id: RecordId) -> String {
        format!("{}{id}/", self.endpoint)
    }

    pub(crate) fn target(&self) -> WriteTarget {
        WriteTarget {
            store_id: self.store_id,
            backend: self.backend,
            endpoint: self.endpoint,
            item_key: self.item_key,
            update_method: self.update_method,
        }
    }
}

/// A paginated REST collection.
pub trait Resource: Send + Sync + 'static {
    type ListItem: DeserializeOwned + Identified + Clone + Debug + Send + Sync;
    type Detail: DeserializeOwned + Clone + Debug + Send + Sync;
    type Payload: Serialize + Validate + Attachment + Debug + Send + Sync;
    type Filter: SearchFilter;

    const CONFIG: StoreConfig;
}

/// Fixed configuration of a cached, unpaginated catalog.
#[derive(Debug, Clone, Copy)]
pub struct CatalogConfig {
    pub store_id: &'static str,
    pub backend: Backend,
    pub endpoint: &'static str,
    pub item_key: &'static str,
    pub item_list_key: &'static str,
    pub ttl: Duration,
    pub update_method: UpdateMethod,
    pub delete_policy: DeletePolicy,
}

impl CatalogConfig {
    pub fn record_path(&self, id: RecordId) -> String {
        format!("{}{id}/", self.endpoint)
    }

    pub(crate) fn target(&self) -> WriteTarget {
        WriteTarget {
            store_id: self.store_id,
            backend: self.backend,
            endpoint: self.endpoint,
            item_key: self.item_key,
            update_method: self.update_method,
        }
    }
}

/// An unpaginated reference list served whole.
pub trait CatalogResource: Send + Sync + 'static {
    type Record: DeserializeOwned + Identified + Clone + Debug + Send + Sync;
    type Payload: Serialize + Validate + Attachment + Debug + Send + Sync;

    const CONFIG: CatalogConfig;
}
