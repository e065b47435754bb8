// canteen-core: session, stores and notifications between canteen-api and front-ends.

pub mod config;
pub mod context;
pub mod error;
pub mod i18n;
pub mod model;
pub mod notify;
pub mod persist;
pub mod resources;
pub mod session;
pub mod store;
pub mod ui;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ClientConfig, TlsVerification};
pub use context::AppContext;
pub use error::CoreError;
pub use i18n::{Catalog, Locale, Translate};
pub use notify::{Notification, Notifier, Severity};
pub use persist::{PersistedState, StateStorage};
pub use session::SessionStore;
pub use store::{
    CatalogResource, CatalogStore, DeletePolicy, DocumentStore, ListState, PaginationPolicy,
    Resource, SearchFilter, StoreConfig, StoreDeps,
};
pub use ui::UiStore;

// Re-export the transport types front-ends need alongside the stores.
pub use canteen_api::{
    Backend, Credentials, RoutePrefixes, RouteTable, SessionEvent, SessionState, UserProfile,
};
