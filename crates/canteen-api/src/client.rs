// Authenticated HTTP client
//
// Wraps `reqwest::Client` with backend routing, bearer-token injection,
// and a single silent refresh-and-retry on 401/403. Token endpoints live
// in `auth.rs` as inherent methods to keep this module focused on
// transport mechanics.

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::form::FormBody;
use crate::models::ErrorBody;
use crate::routes::{Backend, RouteTable};
use crate::session::Session;
use crate::transport::TransportConfig;

/// One outbound request, kept whole so it can be re-issued after a refresh.
struct RequestSpec {
    method: Method,
    url: Url,
    query: Vec<(String, String)>,
    body: Option<Body>,
}

enum Body {
    Json(serde_json::Value),
    Form(FormBody),
}

/// Async client for the canteen API.
///
/// Every request carries `Authorization: Bearer <access>` while a token is
/// held. A 401 or 403 triggers at most one token refresh and at most one
/// retry per call; the retry's outcome is final.
pub struct ApiClient {
    http: reqwest::Client,
    routes: RouteTable,
    session: Arc<Session>,
    /// Serializes refresh attempts so concurrent 401s share one refresh.
    refresh_lock: Mutex<()>,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a route table, a shared session and transport settings.
    pub fn new(
        routes: RouteTable,
        session: Arc<Session>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, routes, session))
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, routes: RouteTable, session: Arc<Session>) -> Self {
        Self {
            http,
            routes,
            session,
            refresh_lock: Mutex::new(()),
        }
    }

    /// The shared session handle.
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// The underlying HTTP client (for token endpoints that skip auth).
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub async fn get<T: DeserializeOwned>(&self, backend: Backend, path: &str) -> Result<T, Error> {
        self.get_with_params(backend, path, &[]).await
    }

    pub async fn get_with_params<T: DeserializeOwned>(
        &self,
        backend: Backend,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T, Error> {
        let spec = self.spec(Method::GET, backend, path, params.to_vec(), None)?;
        let resp = self.execute(&spec).await?;
        handle_response(resp).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        backend: Backend,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let body = Body::Json(serde_json::to_value(body)?);
        let spec = self.spec(Method::POST, backend, path, Vec::new(), Some(body))?;
        let resp = self.execute(&spec).await?;
        handle_response(resp).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        backend: Backend,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let body = Body::Json(serde_json::to_value(body)?);
        let spec = self.spec(Method::PUT, backend, path, Vec::new(), Some(body))?;
        let resp = self.execute(&spec).await?;
        handle_response(resp).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        backend: Backend,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let body = Body::Json(serde_json::to_value(body)?);
        let spec = self.spec(Method::PATCH, backend, path, Vec::new(), Some(body))?;
        let resp = self.execute(&spec).await?;
        handle_response(resp).await
    }

    // ── Multipart verbs (file uploads) ───────────────────────────────

    pub async fn post_form<T: DeserializeOwned>(
        &self,
        backend: Backend,
        path: &str,
        form: FormBody,
    ) -> Result<T, Error> {
        self.send_form(Method::POST, backend, path, form).await
    }

    pub async fn put_form<T: DeserializeOwned>(
        &self,
        backend: Backend,
        path: &str,
        form: FormBody,
    ) -> Result<T, Error> {
        self.send_form(Method::PUT, backend, path, form).await
    }

    pub async fn patch_form<T: DeserializeOwned>(
        &self,
        backend: Backend,
        path: &str,
        form: FormBody,
    ) -> Result<T, Error> {
        self.send_form(Method::PATCH, backend, path, form).await
    }

    async fn send_form<T: DeserializeOwned>(
        &self,
        method: Method,
        backend: Backend,
        path: &str,
        form: FormBody,
    ) -> Result<T, Error> {
        let spec = self.spec(method, backend, path, Vec::new(), Some(Body::Form(form)))?;
        let resp = self.execute(&spec).await?;
        handle_response(resp).await
    }

    pub async fn delete(&self, backend: Backend, path: &str) -> Result<(), Error> {
        let spec = self.spec(Method::DELETE, backend, path, Vec::new(), None)?;
        let resp = self.execute(&spec).await?;
        handle_empty(resp).await
    }

    // ── Refresh-and-retry core ───────────────────────────────────────

    fn spec(
        &self,
        method: Method,
        backend: Backend,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<Body>,
    ) -> Result<RequestSpec, Error> {
        Ok(RequestSpec {
            method,
            url: self.routes.url(backend, path)?,
            query,
            body,
        })
    }

    /// Send once; on 401/403 refresh and re-send exactly once.
    ///
    /// Returns the raw response of the last attempt. A 401/403 on the retry
    /// is returned to the caller as-is and turned into an error there.
    async fn execute(&self, spec: &RequestSpec) -> Result<reqwest::Response, Error> {
        let sent_token = self.session.access_token();
        let resp = self.dispatch(spec, sent_token.as_ref()).await?;

        if !is_auth_failure(resp.status()) || self.session.refresh_token().is_none() {
            return Ok(resp);
        }

        let status = resp.status();
        debug!(%status, url = %spec.url, "auth failure, attempting token refresh");
        let original = parse_error(status, resp).await;

        if !self.recover(sent_token.as_ref()).await {
            warn!(url = %spec.url, "token refresh failed, giving up");
            return Err(original);
        }

        let retry_token = self.session.access_token();
        debug!(method = %spec.method, url = %spec.url, "retrying with refreshed token");
        self.dispatch(spec, retry_token.as_ref()).await
    }

    /// Make sure a usable access token is in the session.
    ///
    /// Waits for any in-flight refresh. If the token changed while waiting,
    /// that refresh is reused; otherwise this task performs the refresh.
    async fn recover(&self, sent_token: Option<&SecretString>) -> bool {
        let _guard = self.refresh_lock.lock().await;
        if self.session.access_token_changed_since(sent_token) {
            debug!("token already refreshed by a concurrent request");
            return true;
        }
        self.refresh_access_token().await
    }

    async fn dispatch(
        &self,
        spec: &RequestSpec,
        token: Option<&SecretString>,
    ) -> Result<reqwest::Response, Error> {
        debug!("{} {}", spec.method, spec.url);

        let mut builder = self.http.request(spec.method.clone(), spec.url.clone());
        if !spec.query.is_empty() {
            builder = builder.query(&spec.query);
        }
        match spec.body {
            Some(Body::Json(ref body)) => builder = builder.json(body),
            Some(Body::Form(ref form)) => builder = builder.multipart(form.to_form()),
            None => {}
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token.expose_secret());
        }

        Ok(builder.send().await?)
    }
}

// ── Response handling ────────────────────────────────────────────────

fn is_auth_failure(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
}

pub(crate) async fn handle_response<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, Error> {
    let status = resp.status();
    if status.is_success() {
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    } else {
        Err(parse_error(status, resp).await)
    }
}

pub(crate) async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(parse_error(status, resp).await)
    }
}

pub(crate) async fn parse_error(status: StatusCode, resp: reqwest::Response) -> Error {
    let raw = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&raw)
        .ok()
        .and_then(|b| b.detail)
        .unwrap_or_else(|| status.to_string());

    if is_auth_failure(status) {
        Error::Unauthorized {
            status: status.as_u16(),
            message,
        }
    } else {
        Error::Http {
            status: status.as_u16(),
            message,
            body: raw,
        }
    }
}
