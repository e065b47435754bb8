// ── Domain model ──
//
// Wire shapes for every entity the stores manage, plus the typed search
// filters that replace free-form query maps.

pub mod common;
pub mod document;
pub mod filter;
pub mod profile;
pub mod reference;

pub use common::{Attachment, Identified, Localized, RecordId, Related, Validate};
pub use document::{
    DocumentDetail, DocumentHeader, DocumentItem, DocumentPayload, DocumentRow, DishLite,
    IncomingInvoicePayload, MeasurementUnitLite, PayloadItem, SupplierLite, WarehouseLite,
};
pub use filter::{DishFilter, DocumentFilter, StudentFilter};
pub use profile::ProfileExt;
pub use reference::{
    Contractor, ContractorPayload, Dish, DishCategory, DishCategoryPayload, DishPayload,
    MeasurementUnit, MeasurementUnitPayload, Student, StudentPayload, Warehouse,
    WarehousePayload, WritingOffReason, WritingOffReasonPayload,
};
