// Shared building blocks for entity models.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::i18n::Locale;

/// Server-assigned primary key.
pub type RecordId = u64;

/// Anything with a server-assigned id.
pub trait Identified {
    fn id(&self) -> RecordId;
}

/// A foreign key the server may send either as a bare id or expanded.
///
/// Detail endpoints expand related objects; forms and payloads carry ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Related<T> {
    Id(RecordId),
    Object(T),
}

impl<T: Identified> Related<T> {
    pub fn id(&self) -> RecordId {
        match self {
            Related::Id(id) => *id,
            Related::Object(obj) => obj.id(),
        }
    }

    pub fn object(&self) -> Option<&T> {
        match self {
            Related::Id(_) => None,
            Related::Object(obj) => Some(obj),
        }
    }
}

/// Payload check run before a create or update leaves the process.
pub trait Validate {
    fn validate(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

/// A local file sent with a payload. Payloads that carry one go out as
/// `multipart/form-data` instead of JSON.
pub trait Attachment {
    /// `(form field, path)` of the file to upload.
    fn attachment(&self) -> Option<(&'static str, &Path)> {
        None
    }
}

/// Entities named in all three UI languages.
pub trait Localized {
    fn name_kz(&self) -> &str;
    fn name_ru(&self) -> &str;
    fn name_en(&self) -> &str {
        ""
    }

    /// Name in `locale`, falling back through kz, ru, en when blank.
    fn localized_name(&self, locale: Locale) -> &str {
        let preferred = match locale {
            Locale::Kz => self.name_kz(),
            Locale::Ru => self.name_ru(),
            Locale::En => self.name_en(),
        };
        [preferred, self.name_kz(), self.name_ru(), self.name_en()]
            .into_iter()
            .find(|name| !name.trim().is_empty())
            .unwrap_or_default()
    }
}

/// Reject a blank required text field.
pub(crate) fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::validation(field, "must not be empty"));
    }
    Ok(())
}

/// Reject a zero foreign key (the form's "nothing selected").
pub(crate) fn require_id(field: &str, value: RecordId) -> Result<(), CoreError> {
    if value == 0 {
        return Err(CoreError::validation(field, "must be selected"));
    }
    Ok(())
}
