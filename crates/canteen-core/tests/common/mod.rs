// Shared harness for canteen-core integration tests.
#![allow(clippy::unwrap_used, dead_code)]

use std::sync::{Arc, Mutex};

use canteen_api::{ApiClient, RouteTable, Session};
use canteen_core::{AppContext, Catalog, ClientConfig, Locale, StoreDeps, Translate, UiStore};
use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;
use wiremock::MockServer;

/// English catalog that remembers every notification template it rendered.
#[derive(Default)]
pub struct RecordingCatalog {
    inner: Catalog,
    rendered: Mutex<Vec<String>>,
}

impl RecordingCatalog {
    pub fn english() -> Self {
        Self {
            inner: Catalog::new(Locale::En),
            rendered: Mutex::new(Vec::new()),
        }
    }

    /// Template keys of every notification raised so far.
    pub fn notifications(&self) -> Vec<String> {
        self.rendered.lock().unwrap().clone()
    }
}

impl Translate for RecordingCatalog {
    fn t(&self, key: &str) -> String {
        self.inner.t(key)
    }

    fn t_item(&self, template_key: &str, item_key: &str) -> String {
        self.rendered.lock().unwrap().push(template_key.to_owned());
        self.inner.t_item(template_key, item_key)
    }
}

pub struct Harness {
    pub server: MockServer,
    pub ctx: AppContext,
    pub messages: Arc<RecordingCatalog>,
}

pub fn secret(s: &str) -> SecretString {
    SecretString::from(s.to_owned())
}

/// Mock server plus a context whose every backend routes to it.
pub async fn harness(logged_in: bool) -> Harness {
    let server = MockServer::start().await;
    let routes = RouteTable::single(Url::parse(&server.uri()).unwrap());

    let session = Arc::new(Session::new());
    if logged_in {
        session.set_tokens(secret("a1"), secret("r1"));
    }
    let api = Arc::new(ApiClient::with_client(
        reqwest::Client::new(),
        routes.clone(),
        session,
    ));
    let messages = Arc::new(RecordingCatalog::english());
    let deps = StoreDeps::new(api, Arc::new(UiStore::default()), messages.clone());
    let ctx = AppContext::from_parts(ClientConfig::new(routes), deps, None);

    Harness {
        server,
        ctx,
        messages,
    }
}

/// A document list row as the docs backend returns it.
pub fn document_row(id: u64) -> Value {
    json!({
        "id": id,
        "date": "2024-09-02",
        "accepted": false,
        "warehouse": { "id": 1, "name": "Кухня" },
        "supplier": { "id": 5, "name": "ТОО Азық" },
        "commentary": "",
        "amount": 1000.0,
        "shipping_cost": 0.0,
        "paid_amount": 0.0,
        "author": "cook"
    })
}

pub fn dish_row(id: u64) -> Value {
    json!({
        "id": id,
        "name_kz": format!("Тағам {id}"),
        "name_ru": format!("Блюдо {id}"),
        "name_en": "",
        "category": 1,
        "logo": null,
        "barcode": "",
        "measurement_unit": 2
    })
}

/// `{count, next, previous, results}` envelope.
pub fn page(count: u64, results: Vec<Value>) -> Value {
    json!({ "count": count, "next": null, "previous": null, "results": results })
}

pub fn profile_json() -> Value {
    json!({
        "user_id": 7, "profile_id": 8, "user_name": "Айгерім", "user_phone": "",
        "school_id": 1, "school_bin": 123_456_789_012_u64,
        "school_name_kz": "№1 мектеп", "school_name_ru": "Школа №1",
        "warehouse_id": 3, "warehouse_name": "Кухня"
    })
}
