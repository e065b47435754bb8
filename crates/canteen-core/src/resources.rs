// ── Concrete resources ──
//
// Each marker type binds one REST collection to its wire shapes and
// store policy.

use std::time::Duration;

use canteen_api::Backend;

use crate::model::{
    Contractor, ContractorPayload, Dish, DishCategory, DishCategoryPayload, DishFilter,
    DishPayload, DocumentDetail, DocumentFilter, DocumentPayload, DocumentRow,
    IncomingInvoicePayload, MeasurementUnit, MeasurementUnitPayload, Student, StudentFilter,
    StudentPayload, Warehouse, WarehousePayload, WritingOffReason, WritingOffReasonPayload,
};
use crate::store::{
    CatalogConfig, CatalogResource, DeletePolicy, PaginationPolicy, Resource, StoreConfig,
    UpdateMethod,
};

/// Page size for warehouse documents.
pub const DOCUMENT_PAGE_SIZE: u32 = 20;
/// Page size for dishes and students.
pub const REFERENCE_PAGE_SIZE: u32 = 30;
/// Freshness window for cached catalogs.
pub const CATALOG_TTL: Duration = Duration::from_secs(15 * 60);

const fn document(
    store_id: &'static str,
    endpoint: &'static str,
    item_key: &'static str,
    item_list_key: &'static str,
) -> StoreConfig {
    StoreConfig {
        store_id,
        backend: Backend::Docs,
        endpoint,
        item_key,
        item_list_key,
        page_size: DOCUMENT_PAGE_SIZE,
        pagination: PaginationPolicy::Always,
        delete_policy: DeletePolicy::Refetch,
        update_method: UpdateMethod::Put,
    }
}

const fn catalog(
    store_id: &'static str,
    endpoint: &'static str,
    item_key: &'static str,
    item_list_key: &'static str,
) -> CatalogConfig {
    CatalogConfig {
        store_id,
        backend: Backend::Refs,
        endpoint,
        item_key,
        item_list_key,
        ttl: CATALOG_TTL,
        update_method: UpdateMethod::Put,
        delete_policy: DeletePolicy::Refetch,
    }
}

// ── Documents ────────────────────────────────────────────────────────

pub struct IncomingInvoices;

impl Resource for IncomingInvoices {
    type ListItem = DocumentRow;
    type Detail = DocumentDetail;
    type Payload = IncomingInvoicePayload;
    type Filter = DocumentFilter;

    const CONFIG: StoreConfig = document(
        "incomingInvoices",
        "/incoming-invoices/",
        "incomingInvoice.item",
        "incomingInvoice.itemList",
    );
}

pub struct WriteOffs;

impl Resource for WriteOffs {
    type ListItem = DocumentRow;
    type Detail = DocumentDetail;
    type Payload = DocumentPayload;
    type Filter = DocumentFilter;

    const CONFIG: StoreConfig = document(
        "writeOffs",
        "/write-off-from-warehouses/",
        "writeOff.item",
        "writeOff.itemList",
    );
}

pub struct Movements;

impl Resource for Movements {
    type ListItem = DocumentRow;
    type Detail = DocumentDetail;
    type Payload = DocumentPayload;
    type Filter = DocumentFilter;

    const CONFIG: StoreConfig = document(
        "movementDishes",
        "/movement-dishes/",
        "movementDish.item",
        "movementDish.itemList",
    );
}

pub struct Sales;

impl Resource for Sales {
    type ListItem = DocumentRow;
    type Detail = DocumentDetail;
    type Payload = DocumentPayload;
    type Filter = DocumentFilter;

    const CONFIG: StoreConfig = document(
        "sellingDishes",
        "/selling-dishes/",
        "sellingDish.item",
        "sellingDish.itemList",
    );
}

// ── Paginated references ─────────────────────────────────────────────

pub struct Dishes;

impl Resource for Dishes {
    type ListItem = Dish;
    type Detail = Dish;
    type Payload = DishPayload;
    type Filter = DishFilter;

    const CONFIG: StoreConfig = StoreConfig {
        store_id: "dishes",
        backend: Backend::Refs,
        endpoint: "/dishes/",
        item_key: "dish.item",
        item_list_key: "dish.itemList",
        page_size: REFERENCE_PAGE_SIZE,
        pagination: PaginationPolicy::OmitWhenFiltered,
        delete_policy: DeletePolicy::FilterLocal,
        update_method: UpdateMethod::Patch,
    };
}

pub struct Students;

impl Resource for Students {
    type ListItem = Student;
    type Detail = Student;
    type Payload = StudentPayload;
    type Filter = StudentFilter;

    const CONFIG: StoreConfig = StoreConfig {
        store_id: "students",
        backend: Backend::Refs,
        endpoint: "/students/",
        item_key: "student.item",
        item_list_key: "student.itemList",
        page_size: REFERENCE_PAGE_SIZE,
        pagination: PaginationPolicy::OmitWhenFiltered,
        delete_policy: DeletePolicy::FilterLocal,
        update_method: UpdateMethod::Patch,
    };
}

// ── Catalogs ─────────────────────────────────────────────────────────

pub struct Contractors;

impl CatalogResource for Contractors {
    type Record = Contractor;
    type Payload = ContractorPayload;

    const CONFIG: CatalogConfig = CatalogConfig {
        update_method: UpdateMethod::Patch,
        delete_policy: DeletePolicy::FilterLocal,
        ..catalog("contractors", "/contractors/", "contractor.item", "contractor.itemList")
    };
}

pub struct Warehouses;

impl CatalogResource for Warehouses {
    type Record = Warehouse;
    type Payload = WarehousePayload;

    const CONFIG: CatalogConfig = catalog(
        "warehouses",
        "/warehouses/",
        "warehouse.item",
        "warehouse.itemList",
    );
}

pub struct DishCategories;

impl CatalogResource for DishCategories {
    type Record = DishCategory;
    type Payload = DishCategoryPayload;

    const CONFIG: CatalogConfig = CatalogConfig {
        update_method: UpdateMethod::Patch,
        ..catalog("dishCategories", "/dishes-categories/", "dishCategory.item", "dishCategory.itemList")
    };
}

pub struct MeasurementUnits;

impl CatalogResource for MeasurementUnits {
    type Record = MeasurementUnit;
    type Payload = MeasurementUnitPayload;

    const CONFIG: CatalogConfig = catalog(
        "measurementUnits",
        "/measurement-units/",
        "measurementUnit.item",
        "measurementUnit.itemList",
    );
}

pub struct WritingOffReasons;

impl CatalogResource for WritingOffReasons {
    type Record = WritingOffReason;
    type Payload = WritingOffReasonPayload;

    const CONFIG: CatalogConfig = catalog(
        "writingOffReasons",
        "/writing-off-reasons/",
        "writingOffReason.item",
        "writingOffReason.itemList",
    );
}
