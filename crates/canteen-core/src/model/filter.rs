// Typed search filters.
//
// Each list endpoint accepts its own filter keys. A `None` or blank field
// is not sent; see `store::query` for how filters become query pairs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::RecordId;
use crate::error::CoreError;
use crate::store::SearchFilter;

/// Filters shared by all warehouse documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFilter {
    pub supplier: Option<RecordId>,
    pub warehouse: Option<RecordId>,
    pub accepted: Option<bool>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl SearchFilter for DocumentFilter {
    fn validate(&self) -> Result<(), CoreError> {
        if let (Some(from), Some(to)) = (self.date_from, self.date_to) {
            if from > to {
                return Err(CoreError::validation(
                    "date_from",
                    format!("{from} is after date_to {to}"),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishFilter {
    pub name_kz: Option<String>,
    pub name_ru: Option<String>,
    pub barcode: Option<String>,
    pub category: Option<RecordId>,
    pub id: Option<RecordId>,
}

impl SearchFilter for DishFilter {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentFilter {
    pub name: Option<String>,
    pub bin: Option<String>,
    pub id: Option<RecordId>,
}

impl SearchFilter for StudentFilter {}
