//! Table rows and detail views for every entity the CLI shows.

use std::fmt::Write as _;

use canteen_core::Locale;
use canteen_core::model::{
    Contractor, Dish, DishCategory, DocumentDetail, DocumentItem, DocumentRow, Localized,
    MeasurementUnit, Related, Student, Warehouse, WritingOffReason,
};
use serde::Serialize;
use tabled::Tabled;

use crate::output;

/// How a list item becomes one table row.
pub trait TableRow {
    type Row: Tabled;

    fn to_row(&self, locale: Locale) -> Self::Row;
}

/// How a single record renders in table mode.
pub trait DetailView: Serialize {
    fn detail(&self, _locale: Locale) -> String {
        output::render_fields(self)
    }
}

fn money(v: f64) -> String {
    format!("{v:.2}")
}

fn yes_no(v: bool) -> String {
    if v { "yes".into() } else { "no".into() }
}

// ── Documents ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct DocumentTableRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Warehouse")]
    warehouse: String,
    #[tabled(rename = "Supplier")]
    supplier: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Accepted")]
    accepted: String,
    #[tabled(rename = "Author")]
    author: String,
}

impl TableRow for DocumentRow {
    type Row = DocumentTableRow;

    fn to_row(&self, _locale: Locale) -> DocumentTableRow {
        DocumentTableRow {
            id: self.id,
            date: self.date.to_string(),
            warehouse: self.warehouse.name.clone(),
            supplier: self
                .supplier
                .as_ref()
                .map(|s| s.name.clone())
                .unwrap_or_default(),
            amount: money(self.amount),
            accepted: yes_no(self.accepted),
            author: self.author.clone(),
        }
    }
}

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "Dish")]
    dish: String,
    #[tabled(rename = "Qty")]
    quantity: String,
    #[tabled(rename = "Unit")]
    unit: String,
    #[tabled(rename = "Cost")]
    cost_price: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl ItemRow {
    fn new(item: &DocumentItem, locale: Locale) -> Self {
        let dish = match &item.dish {
            Related::Object(d) => d.localized_name(locale).to_owned(),
            Related::Id(id) => format!("#{id}"),
        };
        let unit = match &item.measurement_unit {
            Related::Object(u) => u.localized_name(locale).to_owned(),
            Related::Id(id) => format!("#{id}"),
        };
        Self {
            dish,
            quantity: item.quantity.to_string(),
            unit,
            cost_price: money(item.cost_price),
            amount: money(item.amount),
        }
    }
}

impl DetailView for DocumentDetail {
    fn detail(&self, locale: Locale) -> String {
        let warehouse = match &self.warehouse {
            Related::Object(w) => w.name.clone(),
            Related::Id(id) => format!("#{id}"),
        };
        let supplier = match &self.supplier {
            Some(Related::Object(s)) => s.name.clone(),
            Some(Related::Id(id)) => format!("#{id}"),
            None => String::new(),
        };

        let mut out = String::new();
        let _ = writeln!(out, "Document #{}  {}", self.id, self.date);
        let _ = writeln!(out, "  Warehouse:  {warehouse}");
        if !supplier.is_empty() {
            let _ = writeln!(out, "  Supplier:   {supplier}");
        }
        let _ = writeln!(out, "  Accepted:   {}", yes_no(self.accepted));
        let _ = writeln!(
            out,
            "  Amount:     {} (shipping {}, paid {})",
            money(self.amount),
            money(self.shipping_cost),
            money(self.paid_amount)
        );
        if !self.commentary.is_empty() {
            let _ = writeln!(out, "  Comment:    {}", self.commentary);
        }
        for (key, value) in &self.extra {
            let _ = writeln!(out, "  {key}: {}", output::scalar(value));
        }
        if !self.items.is_empty() {
            let rows: Vec<ItemRow> = self.items.iter().map(|i| ItemRow::new(i, locale)).collect();
            let _ = writeln!(out);
            out.push_str(&output::render_table(&rows));
        }
        out.trim_end().to_owned()
    }
}

// ── Dishes & students ───────────────────────────────────────────────

#[derive(Tabled)]
pub struct DishRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Barcode")]
    barcode: String,
    #[tabled(rename = "Category")]
    category: String,
}

impl TableRow for Dish {
    type Row = DishRow;

    fn to_row(&self, locale: Locale) -> DishRow {
        DishRow {
            id: self.id,
            name: self.localized_name(locale).to_owned(),
            barcode: self.barcode.clone(),
            category: self.category.as_ref().map(ToString::to_string).unwrap_or_default(),
        }
    }
}

impl DetailView for Dish {}

#[derive(Tabled)]
pub struct StudentRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "IIN")]
    bin: String,
}

impl TableRow for Student {
    type Row = StudentRow;

    fn to_row(&self, _locale: Locale) -> StudentRow {
        StudentRow {
            id: self.id,
            name: self.name.clone(),
            bin: self.bin.clone().unwrap_or_default(),
        }
    }
}

impl DetailView for Student {}

// ── Catalogs ────────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct NamedRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
}

#[derive(Tabled)]
pub struct ContractorRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Bank")]
    bank: String,
    #[tabled(rename = "Account")]
    account: String,
}

impl TableRow for Contractor {
    type Row = ContractorRow;

    fn to_row(&self, _locale: Locale) -> ContractorRow {
        ContractorRow {
            id: self.id,
            name: self.name.clone(),
            bank: self.bank.clone(),
            account: self.check_account.clone(),
        }
    }
}

#[derive(Tabled)]
pub struct WarehouseRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "School")]
    school: u64,
}

impl TableRow for Warehouse {
    type Row = WarehouseRow;

    fn to_row(&self, _locale: Locale) -> WarehouseRow {
        WarehouseRow {
            id: self.id,
            name: self.name.clone(),
            school: self.school,
        }
    }
}

impl TableRow for DishCategory {
    type Row = NamedRow;

    fn to_row(&self, locale: Locale) -> NamedRow {
        NamedRow {
            id: self.id,
            name: self.localized_name(locale).to_owned(),
        }
    }
}

impl TableRow for MeasurementUnit {
    type Row = NamedRow;

    fn to_row(&self, locale: Locale) -> NamedRow {
        NamedRow {
            id: self.id,
            name: self.localized_name(locale).to_owned(),
        }
    }
}

#[derive(Tabled)]
pub struct ReasonRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Writes off")]
    write_off: String,
    #[tabled(rename = "Needs comment")]
    request_comment: String,
}

impl TableRow for WritingOffReason {
    type Row = ReasonRow;

    fn to_row(&self, locale: Locale) -> ReasonRow {
        ReasonRow {
            id: self.id,
            name: self.localized_name(locale).to_owned(),
            write_off: yes_no(self.write_off),
            request_comment: yes_no(self.request_comment),
        }
    }
}

impl DetailView for Contractor {}
impl DetailView for Warehouse {}
impl DetailView for DishCategory {}
impl DetailView for MeasurementUnit {}
impl DetailView for WritingOffReason {}
