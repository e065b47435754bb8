// Warehouse documents: incoming invoices, write-offs, movements, sales.
//
// All four share one shape. List rows embed lite warehouse/supplier
// objects; detail records may carry related objects or bare ids; payloads
// always carry ids.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{
    Attachment, Identified, Localized, RecordId, Related, Validate, require_id,
};
use crate::error::CoreError;

// ── Lite related objects ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseLite {
    pub id: RecordId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierLite {
    pub id: RecordId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishLite {
    pub id: RecordId,
    #[serde(default)]
    pub name_kz: String,
    #[serde(default)]
    pub name_ru: String,
    #[serde(default)]
    pub measurement_unit: Option<RecordId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementUnitLite {
    pub id: RecordId,
    #[serde(default)]
    pub name_kz: String,
    #[serde(default)]
    pub name_ru: String,
}

macro_rules! impl_identified {
    ($($ty:ty),+ $(,)?) => {
        $(impl Identified for $ty {
            fn id(&self) -> RecordId {
                self.id
            }
        })+
    };
}

impl_identified!(WarehouseLite, SupplierLite, DishLite, MeasurementUnitLite, DocumentRow);

impl Localized for DishLite {
    fn name_kz(&self) -> &str {
        &self.name_kz
    }
    fn name_ru(&self) -> &str {
        &self.name_ru
    }
}

impl Localized for MeasurementUnitLite {
    fn name_kz(&self) -> &str {
        &self.name_kz
    }
    fn name_ru(&self) -> &str {
        &self.name_ru
    }
}

// ── List rows ────────────────────────────────────────────────────────

/// One row of a document list page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRow {
    pub id: RecordId,
    pub date: NaiveDate,
    pub accepted: bool,
    pub warehouse: WarehouseLite,
    #[serde(default)]
    pub supplier: Option<SupplierLite>,
    #[serde(default)]
    pub commentary: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub shipping_cost: f64,
    #[serde(default)]
    pub paid_amount: f64,
    #[serde(default)]
    pub author: String,
}

// ── Detail ───────────────────────────────────────────────────────────

/// One line of a document's table part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub dish: Related<DishLite>,
    pub quantity: f64,
    pub measurement_unit: Related<MeasurementUnitLite>,
    #[serde(default)]
    pub cost_price: f64,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub sale_price: f64,
}

/// Full document as returned by `GET <endpoint><id>/`.
///
/// Incoming invoices name their table part `invoice_dish_items`; every
/// other document uses `items`. Both land in `items`. Fields this model
/// doesn't know (a write-off's reason, say) are kept in `extra` and
/// carried back into the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentDetail {
    pub id: RecordId,
    pub date: NaiveDate,
    pub accepted: bool,
    pub warehouse: Related<WarehouseLite>,
    #[serde(default)]
    pub supplier: Option<Related<SupplierLite>>,
    #[serde(default)]
    pub commentary: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub shipping_cost: f64,
    #[serde(default)]
    pub paid_amount: f64,
    #[serde(default)]
    pub author: String,
    #[serde(default, alias = "invoice_dish_items")]
    pub items: Vec<DocumentItem>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl DocumentDetail {
    /// Collapse related objects to ids, ready for PUT.
    pub fn to_payload(&self) -> DocumentPayload {
        DocumentPayload {
            header: DocumentHeader {
                date: self.date,
                accepted: self.accepted,
                warehouse: self.warehouse.id(),
                supplier: self.supplier.as_ref().map(Related::id),
                commentary: self.commentary.clone(),
                amount: self.amount,
                shipping_cost: self.shipping_cost,
                paid_amount: self.paid_amount,
                extra: self.extra.clone(),
            },
            items: self.items.iter().map(PayloadItem::from).collect(),
        }
    }
}

// ── Payloads ─────────────────────────────────────────────────────────

/// Header fields shared by every document payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentHeader {
    pub date: NaiveDate,
    #[serde(default)]
    pub accepted: bool,
    pub warehouse: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<RecordId>,
    #[serde(default)]
    pub commentary: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub shipping_cost: f64,
    #[serde(default)]
    pub paid_amount: f64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub dish: RecordId,
    pub measurement_unit: RecordId,
    pub quantity: f64,
    #[serde(default)]
    pub cost_price: f64,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub sale_price: f64,
}

impl From<&DocumentItem> for PayloadItem {
    fn from(item: &DocumentItem) -> Self {
        Self {
            id: item.id,
            dish: item.dish.id(),
            measurement_unit: item.measurement_unit.id(),
            quantity: item.quantity,
            cost_price: item.cost_price,
            amount: item.amount,
            sale_price: item.sale_price,
        }
    }
}

/// Create/update body for write-offs, movements and sales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentPayload {
    #[serde(flatten)]
    pub header: DocumentHeader,
    #[serde(default)]
    pub items: Vec<PayloadItem>,
}

/// Create/update body for incoming invoices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomingInvoicePayload {
    #[serde(flatten)]
    pub header: DocumentHeader,
    #[serde(default, alias = "items")]
    pub invoice_dish_items: Vec<PayloadItem>,
}

impl From<DocumentPayload> for IncomingInvoicePayload {
    fn from(payload: DocumentPayload) -> Self {
        Self {
            header: payload.header,
            invoice_dish_items: payload.items,
        }
    }
}

fn validate_document(header: &DocumentHeader, items: &[PayloadItem]) -> Result<(), CoreError> {
    require_id("warehouse", header.warehouse)?;
    for (field, value) in [
        ("amount", header.amount),
        ("shipping_cost", header.shipping_cost),
        ("paid_amount", header.paid_amount),
    ] {
        if value < 0.0 {
            return Err(CoreError::validation(field, "must not be negative"));
        }
    }
    for (i, item) in items.iter().enumerate() {
        require_id(&format!("items[{i}].dish"), item.dish)?;
        require_id(&format!("items[{i}].measurement_unit"), item.measurement_unit)?;
        if item.quantity <= 0.0 {
            return Err(CoreError::validation(
                format!("items[{i}].quantity"),
                "must be positive",
            ));
        }
    }
    Ok(())
}

impl Validate for DocumentPayload {
    fn validate(&self) -> Result<(), CoreError> {
        validate_document(&self.header, &self.items)
    }
}

impl Validate for IncomingInvoicePayload {
    fn validate(&self) -> Result<(), CoreError> {
        require_id("supplier", self.header.supplier.unwrap_or_default())?;
        validate_document(&self.header, &self.invoice_dish_items)
    }
}

impl Attachment for DocumentPayload {}
impl Attachment for IncomingInvoicePayload {}
