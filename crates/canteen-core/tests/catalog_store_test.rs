#![allow(clippy::unwrap_used)]
// Integration tests for the cached `CatalogStore`.

mod common;

use std::time::Duration;

use canteen_core::Severity;
use canteen_core::model::{DishCategoryPayload, MeasurementUnitPayload, WarehousePayload};
use canteen_core::resources::{
    CATALOG_TTL, Contractors, DishCategories, MeasurementUnits, Warehouses,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, Request, ResponseTemplate};

use common::harness;

fn warehouses() -> serde_json::Value {
    json!([
        { "id": 1, "name": "Кухня", "school": 9 },
        { "id": 2, "name": "Қойма", "school": 9 }
    ])
}

#[tokio::test]
async fn test_fetch_all_within_ttl_hits_cache() {
    let h = harness(true).await;
    Mock::given(method("GET"))
        .and(path("/warehouses/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(warehouses()))
        .expect(1)
        .mount(&h.server)
        .await;

    let store = h.ctx.catalog::<Warehouses>();
    assert!(store.should_fetch());
    store.fetch_all(false).await;
    store.fetch_all(false).await;

    assert!(!store.should_fetch());
    assert_eq!(store.records().len(), 2);
    assert_eq!(store.get_by_id(2).map(|w| w.name), Some("Қойма".into()));
    assert!(store.get_by_id(3).is_none());
}

#[tokio::test]
async fn test_force_bypasses_cache() {
    let h = harness(true).await;
    Mock::given(method("GET"))
        .and(path("/warehouses/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(warehouses()))
        .expect(2)
        .mount(&h.server)
        .await;

    let store = h.ctx.catalog::<Warehouses>();
    store.fetch_all(false).await;
    store.fetch_all(true).await;
}

#[tokio::test]
async fn test_cache_goes_stale_after_ttl() {
    let h = harness(true).await;
    Mock::given(method("GET"))
        .and(path("/warehouses/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(warehouses()))
        .expect(2)
        .mount(&h.server)
        .await;

    let store = h.ctx.catalog::<Warehouses>();
    store.fetch_all(false).await;

    tokio::time::pause();
    tokio::time::advance(CATALOG_TTL - Duration::from_secs(1)).await;
    assert!(!store.should_fetch());
    tokio::time::advance(Duration::from_secs(2)).await;
    assert!(store.should_fetch());
    tokio::time::resume();

    store.fetch_all(false).await;
}

#[tokio::test]
async fn test_failed_fetch_keeps_records_and_stays_stale() {
    let h = harness(true).await;
    Mock::given(method("GET"))
        .and(path("/measurement-units/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&h.server)
        .await;

    let store = h.ctx.catalog::<MeasurementUnits>();
    store.fetch_all(false).await;

    assert!(store.records().is_empty());
    assert!(store.should_fetch());
    assert!(!store.snapshot().is_loading);
    assert_eq!(h.messages.notifications(), vec!["messages.fetchListError"]);
}

#[tokio::test]
async fn test_create_invalidates_cache() {
    let h = harness(true).await;
    Mock::given(method("GET"))
        .and(path("/warehouses/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(warehouses()))
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/warehouses/"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "id": 3, "name": "Асхана", "school": 9 })),
        )
        .expect(1)
        .mount(&h.server)
        .await;

    let store = h.ctx.catalog::<Warehouses>();
    store.fetch_all(false).await;
    assert!(!store.should_fetch());

    let payload = WarehousePayload {
        name: "Асхана".into(),
        school: 9,
    };
    let created = store.create_record(&payload).await;

    assert_eq!(created.map(|w| w.id), Some(3));
    assert!(store.should_fetch());
    assert_eq!(h.messages.notifications(), vec!["messages.createSuccess"]);
}

#[tokio::test]
async fn test_update_uses_put_for_units() {
    let h = harness(true).await;
    Mock::given(method("PUT"))
        .and(path("/measurement-units/2/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 2, "name_kz": "кг", "name_ru": "кг", "name_en": "kg"
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let payload = MeasurementUnitPayload {
        name_kz: "кг".into(),
        name_ru: "кг".into(),
        name_en: "kg".into(),
    };
    let updated = h
        .ctx
        .catalog::<MeasurementUnits>()
        .update_record(2, &payload)
        .await;
    assert_eq!(updated.map(|u| u.name_en), Some("kg".into()));
}

#[tokio::test]
async fn test_delete_forces_reload() {
    let h = harness(true).await;
    Mock::given(method("GET"))
        .and(path("/warehouses/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(warehouses()))
        .up_to_n_times(1)
        .mount(&h.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/warehouses/2/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/warehouses/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "id": 1, "name": "Кухня", "school": 9 }])),
        )
        .expect(1)
        .mount(&h.server)
        .await;

    let store = h.ctx.catalog::<Warehouses>();
    store.fetch_all(false).await;
    assert!(store.delete_record(2).await);

    assert_eq!(store.records().len(), 1);
    assert!(!store.should_fetch());
    assert!(h.ctx.ui().action_overlay().is_none());
    assert_eq!(h.messages.notifications(), vec!["messages.deleteSuccess"]);
}

#[tokio::test]
async fn test_delete_with_failed_reload_warns_and_stays_stale() {
    let h = harness(true).await;
    Mock::given(method("GET"))
        .and(path("/warehouses/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(warehouses()))
        .up_to_n_times(1)
        .mount(&h.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/warehouses/2/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/warehouses/"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&h.server)
        .await;

    let store = h.ctx.catalog::<Warehouses>();
    store.fetch_all(false).await;
    assert!(store.delete_record(2).await);

    assert_eq!(store.records().len(), 2);
    assert!(store.should_fetch());
    assert!(!store.snapshot().is_loading);
    assert_eq!(h.messages.notifications(), vec!["messages.deleteReloadError"]);
    assert_eq!(h.ctx.ui().notification().unwrap().severity, Severity::Warning);
}

#[tokio::test]
async fn test_contractor_delete_drops_row_without_reload() {
    let h = harness(true).await;
    Mock::given(method("GET"))
        .and(path("/contractors/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 5, "name": "ТОО Азық" },
            { "id": 6, "name": "ИП Нан" }
        ])))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/contractors/6/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&h.server)
        .await;

    let store = h.ctx.catalog::<Contractors>();
    store.fetch_all(false).await;
    assert!(store.delete_record(6).await);

    let ids: Vec<u64> = store.records().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![5]);
    assert!(!store.should_fetch());
    assert_eq!(h.messages.notifications(), vec!["messages.deleteSuccess"]);
}

#[tokio::test]
async fn test_category_logo_update_is_multipart_patch() {
    let h = harness(true).await;
    let dir = tempfile::tempdir().unwrap();
    let logo = dir.path().join("drinks.svg");
    std::fs::write(&logo, b"<svg/>").unwrap();

    Mock::given(method("PATCH"))
        .and(path("/dishes-categories/4/"))
        .and(|req: &Request| {
            let body = String::from_utf8_lossy(&req.body);
            body.contains(r#"name="logo"; filename="drinks.svg""#)
                && body.contains(r#"name="color""#)
                && !body.contains(r#"name="measurement_unit""#)
        })
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 4, "name_kz": "Сусындар", "name_ru": "Напитки", "color": "#00aaff"
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let payload = DishCategoryPayload {
        name_kz: "Сусындар".into(),
        name_ru: "Напитки".into(),
        color: "#00aaff".into(),
        logo: Some(logo),
        ..DishCategoryPayload::default()
    };
    let store = h.ctx.catalog::<DishCategories>();
    let updated = store.update_record(4, &payload).await;

    assert_eq!(updated.map(|c| c.id), Some(4));
    assert!(store.should_fetch());
    assert_eq!(h.messages.notifications(), vec!["messages.updateSuccess"]);
}
