#![allow(clippy::unwrap_used)]
// Integration tests for `DocumentStore` against a wiremock backend.

mod common;

use std::time::Duration;

use canteen_core::model::{DishFilter, DishPayload, DocumentFilter, IncomingInvoicePayload};
use canteen_core::resources::{Dishes, IncomingInvoices, WriteOffs};
use canteen_core::{DocumentStore, Severity};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, Request, ResponseTemplate};

use common::{Harness, document_row, dish_row, harness, page};

fn rows(ids: std::ops::RangeInclusive<u64>) -> Vec<serde_json::Value> {
    ids.map(document_row).collect()
}

fn expected_pages(total: u64, page_size: u32) -> u64 {
    total.div_ceil(u64::from(page_size)).max(1)
}

/// Load page 3 of a 45-record invoice list (5 rows).
async fn invoices_on_page_three(h: &Harness) -> DocumentStore<IncomingInvoices> {
    Mock::given(method("GET"))
        .and(path("/incoming-invoices/"))
        .and(query_param("page", "3"))
        .and(query_param("page_size", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(45, rows(41..=45))))
        .up_to_n_times(1)
        .mount(&h.server)
        .await;

    let store = h.ctx.documents::<IncomingInvoices>();
    store.fetch_records(3).await;
    let snap = store.snapshot();
    assert_eq!(snap.current_page, 3);
    assert_eq!(snap.total_records, 45);
    assert_eq!(snap.total_pages(), 3);
    store
}

// ── fetch_records ───────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_records_replaces_list_and_page() {
    let h = harness(true).await;
    Mock::given(method("GET"))
        .and(path("/write-off-from-warehouses/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(21, rows(21..=21))))
        .expect(1)
        .mount(&h.server)
        .await;

    let store = h.ctx.documents::<WriteOffs>();
    store.fetch_records(2).await;

    let snap = store.snapshot();
    assert_eq!(snap.list.len(), 1);
    assert_eq!(snap.list[0].id, 21);
    assert_eq!(snap.total_records, 21);
    assert_eq!(snap.current_page, 2);
    assert_eq!(snap.total_pages(), expected_pages(21, 20));
    assert!(!snap.is_loading);
    assert!(h.messages.notifications().is_empty());
}

#[tokio::test]
async fn test_fetch_failure_keeps_previous_state_and_notifies_once() {
    let h = harness(true).await;
    let store = invoices_on_page_three(&h).await;

    Mock::given(method("GET"))
        .and(path("/incoming-invoices/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&h.server)
        .await;

    let before = store.snapshot();
    store.fetch_records(1).await;
    let after = store.snapshot();

    assert_eq!(after.list, before.list);
    assert_eq!(after.total_records, 45);
    assert_eq!(after.current_page, 3);
    assert!(!after.is_loading);
    assert_eq!(h.messages.notifications(), vec!["messages.fetchListError"]);

    let shown = h.ctx.ui().notification().unwrap();
    assert_eq!(shown.severity, Severity::Error);
    assert_eq!(shown.message, "Failed to load: incoming invoices");
}

#[tokio::test]
async fn test_filters_are_sent_with_pagination_for_documents() {
    let h = harness(true).await;
    Mock::given(method("GET"))
        .and(path("/incoming-invoices/"))
        .and(query_param("page", "1"))
        .and(query_param("supplier", "5"))
        .and(query_param("accepted", "true"))
        .and(|req: &Request| !req.url.query_pairs().any(|(k, _)| k == "warehouse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(1, rows(1..=1))))
        .expect(1)
        .mount(&h.server)
        .await;

    let store = h.ctx.documents::<IncomingInvoices>();
    store
        .set_filter(DocumentFilter {
            supplier: Some(5),
            accepted: Some(true),
            ..DocumentFilter::default()
        })
        .unwrap();
    store.fetch_records(1).await;
    assert_eq!(store.snapshot().list.len(), 1);
}

#[tokio::test]
async fn test_active_filter_drops_pagination_for_dishes() {
    let h = harness(true).await;
    Mock::given(method("GET"))
        .and(path("/dishes/"))
        .and(query_param("name_ru", "Плов"))
        .and(|req: &Request| {
            !req.url
                .query_pairs()
                .any(|(k, _)| k == "page" || k == "page_size" || k == "barcode")
        })
        .respond_with(ResponseTemplate::new(200).set_body_json(page(1, vec![dish_row(4)])))
        .expect(1)
        .mount(&h.server)
        .await;

    let store = h.ctx.documents::<Dishes>();
    store
        .set_filter(DishFilter {
            name_ru: Some("Плов".into()),
            barcode: Some(String::new()),
            ..DishFilter::default()
        })
        .unwrap();
    store.fetch_records(2).await;

    let snap = store.snapshot();
    assert_eq!(snap.list.len(), 1);
    assert_eq!(snap.page_size, 30);
}

#[tokio::test]
async fn test_invalid_filter_is_rejected_locally() {
    let h = harness(true).await;
    let store = h.ctx.documents::<IncomingInvoices>();

    let inverted = DocumentFilter {
        date_from: chrono::NaiveDate::from_ymd_opt(2024, 10, 5),
        date_to: chrono::NaiveDate::from_ymd_opt(2024, 10, 1),
        ..DocumentFilter::default()
    };
    assert!(store.set_filter(inverted).is_err());
    assert_eq!(store.snapshot().filter, DocumentFilter::default());
}

#[tokio::test]
async fn test_cancelled_fetch_clears_loading_flag() {
    let h = harness(true).await;
    Mock::given(method("GET"))
        .and(path("/incoming-invoices/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page(0, Vec::new()))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&h.server)
        .await;

    let store = h.ctx.documents::<IncomingInvoices>();
    let mut watcher = store.subscribe();
    let fetch = store.fetch_records(1);
    let outcome = tokio::time::timeout(Duration::from_millis(100), fetch).await;

    assert!(outcome.is_err());
    assert!(watcher.has_changed().unwrap());
    assert!(!watcher.borrow_and_update().is_loading);
}

// ── fetch_record ────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_record_failure_leaves_slot_empty() {
    let h = harness(true).await;
    Mock::given(method("GET"))
        .and(path("/incoming-invoices/9/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9, "date": "2024-09-02", "accepted": true, "warehouse": 1,
            "supplier": 5, "invoice_dish_items": []
        })))
        .up_to_n_times(1)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/incoming-invoices/9/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&h.server)
        .await;

    let store = h.ctx.documents::<IncomingInvoices>();
    store.fetch_record(9).await;
    assert_eq!(store.snapshot().single.map(|d| d.id), Some(9));

    store.fetch_record(9).await;
    assert!(store.snapshot().single.is_none());
    assert_eq!(h.messages.notifications(), vec!["messages.fetchItemError"]);
}

// ── create / update ─────────────────────────────────────────────────

fn invoice_payload() -> IncomingInvoicePayload {
    serde_json::from_value(json!({
        "date": "2024-09-02", "warehouse": 1, "supplier": 5,
        "invoice_dish_items": [
            { "dish": 40, "measurement_unit": 2, "quantity": 10.0, "cost_price": 150.0 }
        ]
    }))
    .unwrap()
}

#[tokio::test]
async fn test_create_rejected_by_server_returns_none() {
    let h = harness(true).await;
    let store = invoices_on_page_three(&h).await;
    let before = store.snapshot();

    Mock::given(method("POST"))
        .and(path("/incoming-invoices/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "date": ["Invalid date."] })),
        )
        .expect(1)
        .mount(&h.server)
        .await;

    let created = store.create_record(&invoice_payload()).await;

    assert!(created.is_none());
    let after = store.snapshot();
    assert_eq!(after.list, before.list);
    assert_eq!(after.total_records, before.total_records);
    assert!(!after.is_submitting);
    assert_eq!(h.messages.notifications(), vec!["messages.createError"]);
    assert_eq!(h.ctx.ui().notification().unwrap().severity, Severity::Error);
}

#[tokio::test]
async fn test_create_success_returns_confirmed_record() {
    let h = harness(true).await;
    Mock::given(method("POST"))
        .and(path("/incoming-invoices/"))
        .and(|req: &Request| {
            let body: serde_json::Value = serde_json::from_slice(&req.body).unwrap();
            body["invoice_dish_items"][0]["dish"] == json!(40) && body.get("items").is_none()
        })
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 77, "date": "2024-09-02", "accepted": false, "warehouse": 1,
            "supplier": 5, "author": "cook",
            "invoice_dish_items": [
                { "id": 1, "dish": 40, "measurement_unit": 2, "quantity": 10.0,
                  "cost_price": 150.0, "amount": 1500.0, "sale_price": 0.0 }
            ]
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let store = h.ctx.documents::<IncomingInvoices>();
    let created = store.create_record(&invoice_payload()).await.unwrap();

    assert_eq!(created.id, 77);
    assert_eq!(created.items.len(), 1);
    assert!(store.snapshot().list.is_empty());
    let shown = h.ctx.ui().notification().unwrap();
    assert_eq!(shown.severity, Severity::Success);
    assert_eq!(shown.message, "Created: incoming invoice");
}

#[tokio::test]
async fn test_invalid_payload_never_reaches_server() {
    let h = harness(true).await;
    let store = h.ctx.documents::<Dishes>();

    let created = store.create_record(&DishPayload::default()).await;

    assert!(created.is_none());
    assert!(h.server.received_requests().await.unwrap().is_empty());
    assert_eq!(h.messages.notifications(), vec!["messages.createError"]);
}

#[tokio::test]
async fn test_dish_update_uses_patch() {
    let h = harness(true).await;
    Mock::given(method("PATCH"))
        .and(path("/dishes/3/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dish_row(3)))
        .expect(1)
        .mount(&h.server)
        .await;

    let payload = DishPayload {
        name_kz: "Тағам 3".into(),
        ..DishPayload::default()
    };
    let updated = h.ctx.documents::<Dishes>().update_record(3, &payload).await;
    assert_eq!(updated.map(|d| d.id), Some(3));
    assert_eq!(h.messages.notifications(), vec!["messages.updateSuccess"]);
}

#[tokio::test]
async fn test_dish_with_logo_is_sent_as_multipart() {
    let h = harness(true).await;
    let dir = tempfile::tempdir().unwrap();
    let logo = dir.path().join("palau.png");
    std::fs::write(&logo, b"PNGDATA").unwrap();

    Mock::given(method("POST"))
        .and(path("/dishes/"))
        .and(|req: &Request| {
            let multipart = req
                .headers
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v.starts_with("multipart/form-data"));
            let body = String::from_utf8_lossy(&req.body);
            multipart
                && body.contains(r#"name="logo"; filename="palau.png""#)
                && body.contains("PNGDATA")
                && body.contains(r#"name="name_kz""#)
        })
        .respond_with(ResponseTemplate::new(201).set_body_json(dish_row(8)))
        .expect(1)
        .mount(&h.server)
        .await;

    let payload = DishPayload {
        name_kz: "Палау".into(),
        category: Some(1),
        logo: Some(logo),
        ..DishPayload::default()
    };
    let created = h.ctx.documents::<Dishes>().create_record(&payload).await;

    assert_eq!(created.map(|d| d.id), Some(8));
    assert_eq!(h.messages.notifications(), vec!["messages.createSuccess"]);
}

#[tokio::test]
async fn test_unreadable_logo_fails_before_sending() {
    let h = harness(true).await;
    let dir = tempfile::tempdir().unwrap();

    let payload = DishPayload {
        name_kz: "Палау".into(),
        logo: Some(dir.path().join("missing.png")),
        ..DishPayload::default()
    };
    let updated = h.ctx.documents::<Dishes>().update_record(8, &payload).await;

    assert!(updated.is_none());
    assert!(h.server.received_requests().await.unwrap().is_empty());
    assert_eq!(h.messages.notifications(), vec!["messages.updateError"]);
}

#[tokio::test]
async fn test_document_update_uses_put() {
    let h = harness(true).await;
    Mock::given(method("PUT"))
        .and(path("/incoming-invoices/12/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&h.server)
        .await;

    let store = h.ctx.documents::<IncomingInvoices>();
    assert!(store.update_record(12, &invoice_payload()).await.is_none());
    assert_eq!(h.messages.notifications(), vec!["messages.updateError"]);
}

// ── delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_refetches_current_page() {
    let h = harness(true).await;
    let store = invoices_on_page_three(&h).await;

    Mock::given(method("DELETE"))
        .and(path("/incoming-invoices/45/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/incoming-invoices/"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(44, rows(41..=44))))
        .expect(1)
        .mount(&h.server)
        .await;

    assert!(store.delete_record(45).await);

    let snap = store.snapshot();
    assert_eq!(snap.total_records, 44);
    assert_eq!(snap.total_pages(), 3);
    assert_eq!(snap.current_page, 3);
    assert_eq!(snap.list.len(), 4);
    assert!(!snap.is_submitting);
    assert!(!snap.is_loading);
    assert!(h.ctx.ui().action_overlay().is_none());
    assert_eq!(h.messages.notifications(), vec!["messages.deleteSuccess"]);
}

#[tokio::test]
async fn test_delete_with_failed_reload_warns_instead_of_success() {
    let h = harness(true).await;
    let store = invoices_on_page_three(&h).await;

    Mock::given(method("DELETE"))
        .and(path("/incoming-invoices/45/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/incoming-invoices/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&h.server)
        .await;

    assert!(store.delete_record(45).await);

    let snap = store.snapshot();
    assert_eq!(snap.total_records, 45);
    assert_eq!(snap.current_page, 3);
    assert!(!snap.is_loading);
    assert_eq!(h.messages.notifications(), vec!["messages.deleteReloadError"]);
    let shown = h.ctx.ui().notification().unwrap();
    assert_eq!(shown.severity, Severity::Warning);
    assert_eq!(
        shown.message,
        "Deleted, but the list could not be reloaded: incoming invoice"
    );
}

#[tokio::test]
async fn test_delete_last_row_steps_back_a_page() {
    let h = harness(true).await;
    Mock::given(method("GET"))
        .and(path("/incoming-invoices/"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(41, rows(41..=41))))
        .up_to_n_times(1)
        .mount(&h.server)
        .await;

    let store = h.ctx.documents::<IncomingInvoices>();
    store.fetch_records(3).await;
    assert_eq!(store.snapshot().total_pages(), 3);

    Mock::given(method("DELETE"))
        .and(path("/incoming-invoices/41/"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/incoming-invoices/"))
        .and(query_param("page", "3"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "detail": "Invalid page." })),
        )
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/incoming-invoices/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(40, rows(21..=40))))
        .expect(1)
        .mount(&h.server)
        .await;

    assert!(store.delete_record(41).await);

    let snap = store.snapshot();
    assert_eq!(snap.current_page, 2);
    assert_eq!(snap.total_records, 40);
    assert_eq!(snap.total_pages(), 2);
    assert_eq!(snap.list.len(), 20);
}

#[tokio::test]
async fn test_delete_filters_local_list_for_dishes() {
    let h = harness(true).await;
    Mock::given(method("GET"))
        .and(path("/dishes/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            31,
            vec![dish_row(1), dish_row(2), dish_row(3)],
        )))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/dishes/2/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/dishes/999/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&h.server)
        .await;

    let store = h.ctx.documents::<Dishes>();
    store.fetch_records(1).await;
    assert_eq!(store.total_pages(), 2);

    assert!(store.delete_record(2).await);
    let snap = store.snapshot();
    assert_eq!(snap.list.iter().map(|d| d.id).collect::<Vec<_>>(), vec![1, 3]);
    assert_eq!(snap.total_records, 30);
    assert_eq!(snap.total_pages(), expected_pages(30, 30));

    // Not on this page: list and total stay put.
    assert!(store.delete_record(999).await);
    assert_eq!(store.snapshot().total_records, 30);
}

#[tokio::test]
async fn test_delete_failure_returns_false_and_hides_overlay() {
    let h = harness(true).await;
    let store = invoices_on_page_three(&h).await;
    Mock::given(method("DELETE"))
        .and(path("/incoming-invoices/45/"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "detail": "Accepted documents cannot be deleted."
        })))
        .mount(&h.server)
        .await;

    assert!(!store.delete_record(45).await);
    assert_eq!(store.snapshot().total_records, 45);
    assert!(h.ctx.ui().action_overlay().is_none());
    assert_eq!(h.messages.notifications(), vec!["messages.deleteError"]);
}

// ── reset ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_reset_returns_to_initial_state() {
    let h = harness(true).await;
    let store = invoices_on_page_three(&h).await;
    store
        .set_filter(DocumentFilter {
            warehouse: Some(1),
            ..DocumentFilter::default()
        })
        .unwrap();

    store.reset();

    let snap = store.snapshot();
    assert!(snap.list.is_empty());
    assert_eq!(snap.total_records, 0);
    assert_eq!(snap.current_page, 1);
    assert_eq!(snap.total_pages(), 1);
    assert_eq!(snap.filter, DocumentFilter::default());
}
