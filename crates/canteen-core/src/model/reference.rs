// Reference data: dishes, students and the cached catalogs.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::common::{
    Attachment, Identified, Localized, RecordId, Validate, require_id, require_text,
};
use crate::error::CoreError;
use crate::i18n::Locale;

// ── Dishes ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    pub id: RecordId,
    #[serde(default)]
    pub name_kz: String,
    #[serde(default)]
    pub name_ru: String,
    #[serde(default)]
    pub name_en: String,
    #[serde(default)]
    pub category: Option<RecordId>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub barcode: String,
    #[serde(default)]
    pub measurement_unit: Option<RecordId>,
}

/// Dish create/update body. With a `logo` path it is sent as a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishPayload {
    #[serde(default)]
    pub name_kz: String,
    #[serde(default)]
    pub name_ru: String,
    #[serde(default)]
    pub name_en: String,
    pub category: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    pub measurement_unit: Option<RecordId>,
    /// Local image to upload; never part of the JSON body.
    #[serde(default, skip_serializing)]
    pub logo: Option<PathBuf>,
}

impl Validate for DishPayload {
    fn validate(&self) -> Result<(), CoreError> {
        if self.localized_name(Locale::Kz).is_empty() {
            return Err(CoreError::validation("name_kz", "at least one name is required"));
        }
        Ok(())
    }
}

// ── Students ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub bin: Option<String>,
    #[serde(default)]
    pub bik: Option<String>,
    #[serde(default)]
    pub bank: Option<String>,
    #[serde(default)]
    pub corr_account: Option<String>,
    #[serde(default)]
    pub check_account: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentPayload {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bik: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corr_account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_account: Option<String>,
}

impl Validate for StudentPayload {
    fn validate(&self) -> Result<(), CoreError> {
        require_text("name", &self.name)?;
        if let Some(bin) = self.bin.as_deref().filter(|b| !b.is_empty()) {
            if bin.len() != 12 || !bin.bytes().all(|b| b.is_ascii_digit()) {
                return Err(CoreError::validation("bin", "must be 12 digits"));
            }
        }
        Ok(())
    }
}

// ── Catalogs ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contractor {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub bik: String,
    #[serde(default)]
    pub bank: String,
    #[serde(default)]
    pub corr_account: String,
    #[serde(default)]
    pub check_account: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractorPayload {
    pub name: String,
    #[serde(default)]
    pub bik: String,
    #[serde(default)]
    pub bank: String,
    #[serde(default)]
    pub corr_account: String,
    #[serde(default)]
    pub check_account: String,
}

impl Validate for ContractorPayload {
    fn validate(&self) -> Result<(), CoreError> {
        require_text("name", &self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: RecordId,
    pub name: String,
    pub school: RecordId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehousePayload {
    pub name: String,
    pub school: RecordId,
}

impl Validate for WarehousePayload {
    fn validate(&self) -> Result<(), CoreError> {
        require_text("name", &self.name)?;
        require_id("school", self.school)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishCategory {
    pub id: RecordId,
    #[serde(default)]
    pub name_kz: String,
    #[serde(default)]
    pub name_ru: String,
    #[serde(default)]
    pub name_en: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub measurement_unit: Option<RecordId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishCategoryPayload {
    #[serde(default)]
    pub name_kz: String,
    #[serde(default)]
    pub name_ru: String,
    #[serde(default)]
    pub name_en: String,
    #[serde(default)]
    pub color: String,
    pub measurement_unit: Option<RecordId>,
    #[serde(default, skip_serializing)]
    pub logo: Option<PathBuf>,
}

impl Validate for DishCategoryPayload {
    fn validate(&self) -> Result<(), CoreError> {
        if self.localized_name(Locale::Kz).is_empty() {
            return Err(CoreError::validation("name_kz", "at least one name is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementUnit {
    pub id: RecordId,
    #[serde(default)]
    pub name_kz: String,
    #[serde(default)]
    pub name_ru: String,
    #[serde(default)]
    pub name_en: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementUnitPayload {
    #[serde(default)]
    pub name_kz: String,
    #[serde(default)]
    pub name_ru: String,
    #[serde(default)]
    pub name_en: String,
}

impl Validate for MeasurementUnitPayload {
    fn validate(&self) -> Result<(), CoreError> {
        require_text("name_kz", &self.name_kz)?;
        require_text("name_ru", &self.name_ru)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WritingOffReason {
    pub id: RecordId,
    #[serde(default)]
    pub name_kz: String,
    #[serde(default)]
    pub name_ru: String,
    #[serde(default)]
    pub name_en: String,
    #[serde(default)]
    pub write_off: bool,
    #[serde(default)]
    pub request_comment: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WritingOffReasonPayload {
    #[serde(default)]
    pub name_kz: String,
    #[serde(default)]
    pub name_ru: String,
    #[serde(default)]
    pub name_en: String,
    #[serde(default)]
    pub write_off: bool,
    #[serde(default)]
    pub request_comment: bool,
}

impl Validate for WritingOffReasonPayload {
    fn validate(&self) -> Result<(), CoreError> {
        require_text("name_kz", &self.name_kz)?;
        require_text("name_ru", &self.name_ru)
    }
}

// ── Trait plumbing ───────────────────────────────────────────────────

impl Attachment for DishPayload {
    fn attachment(&self) -> Option<(&'static str, &Path)> {
        self.logo.as_deref().map(|path| ("logo", path))
    }
}

impl Attachment for DishCategoryPayload {
    fn attachment(&self) -> Option<(&'static str, &Path)> {
        self.logo.as_deref().map(|path| ("logo", path))
    }
}

impl Attachment for StudentPayload {}
impl Attachment for ContractorPayload {}
impl Attachment for WarehousePayload {}
impl Attachment for MeasurementUnitPayload {}
impl Attachment for WritingOffReasonPayload {}

macro_rules! impl_identified {
    ($($ty:ty),+ $(,)?) => {
        $(impl Identified for $ty {
            fn id(&self) -> RecordId {
                self.id
            }
        })+
    };
}

impl_identified!(
    Dish,
    Student,
    Contractor,
    Warehouse,
    DishCategory,
    MeasurementUnit,
    WritingOffReason,
);

macro_rules! impl_localized {
    ($($ty:ty),+ $(,)?) => {
        $(impl Localized for $ty {
            fn name_kz(&self) -> &str {
                &self.name_kz
            }
            fn name_ru(&self) -> &str {
                &self.name_ru
            }
            fn name_en(&self) -> &str {
                &self.name_en
            }
        })+
    };
}

impl_localized!(
    Dish,
    DishPayload,
    DishCategory,
    DishCategoryPayload,
    MeasurementUnit,
    WritingOffReason,
);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn dish_needs_some_name() {
        let mut payload = DishPayload::default();
        assert!(payload.validate().is_err());
        payload.name_ru = "Борщ".into();
        payload.validate().unwrap();
    }

    #[test]
    fn student_bin_format() {
        let mut payload = StudentPayload {
            name: "Айгерім".into(),
            bin: Some("12345".into()),
            ..StudentPayload::default()
        };
        assert!(payload.validate().is_err());
        payload.bin = Some("123456789012".into());
        payload.validate().unwrap();
        payload.bin = Some(String::new());
        payload.validate().unwrap();
    }

    #[test]
    fn logo_path_stays_out_of_json() {
        let payload: DishPayload =
            serde_json::from_str(r#"{"name_kz":"Палау","logo":"img/palau.png"}"#).unwrap();
        assert_eq!(
            payload.attachment().map(|(field, path)| (field, path.to_path_buf())),
            Some(("logo", PathBuf::from("img/palau.png")))
        );
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("logo").is_none());

        assert!(DishCategoryPayload::default().attachment().is_none());
    }

    #[test]
    fn dish_tolerates_sparse_rows() {
        let dish: Dish = serde_json::from_str(r#"{"id":3,"name_kz":"Нан"}"#).unwrap();
        assert_eq!(dish.category, None);
        assert!(dish.barcode.is_empty());
    }
}
