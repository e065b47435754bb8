// canteen-api: async client for the canteen warehouse REST API

pub mod auth;
pub mod client;
pub mod error;
pub mod form;
pub mod models;
pub mod routes;
pub mod session;
pub mod transport;

pub use auth::Credentials;
pub use client::ApiClient;
pub use error::Error;
pub use form::FormBody;
pub use models::{Page, RefreshedToken, TokenPair, UserProfile};
pub use routes::{Backend, RoutePrefixes, RouteTable};
pub use session::{Session, SessionEvent, SessionState};
pub use transport::{TlsMode, TransportConfig};
