// Multipart bodies for endpoints that accept file uploads.
//
// `reqwest::multipart::Form` is consumed on send, so the body is kept as
// plain parts and rebuilt for every attempt (the refresh retry included).

use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value;

use crate::error::Error;

#[derive(Debug, Clone)]
struct FilePart {
    field: String,
    file_name: String,
    bytes: Vec<u8>,
}

/// Text fields plus attached files, sent as `multipart/form-data`.
#[derive(Debug, Clone, Default)]
pub struct FormBody {
    fields: Vec<(String, String)>,
    files: Vec<FilePart>,
}

impl FormBody {
    /// Flatten a JSON-object payload into text fields.
    ///
    /// `null` fields are left out, strings go as-is, numbers and booleans
    /// in their JSON spelling, nested values as JSON text.
    pub fn from_fields<B: Serialize>(body: &B) -> Result<Self, Error> {
        let Value::Object(map) = serde_json::to_value(body)? else {
            return Err(Error::Serialization(serde::ser::Error::custom(
                "multipart body must serialize to a JSON object",
            )));
        };

        let fields = map
            .into_iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    Value::Null => return None,
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                Some((key, text))
            })
            .collect();

        Ok(Self {
            fields,
            files: Vec::new(),
        })
    }

    /// Attach a file under `field`.
    #[must_use]
    pub fn file(
        mut self,
        field: impl Into<String>,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.files.push(FilePart {
            field: field.into(),
            file_name: file_name.into(),
            bytes,
        });
        self
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_file(&self, field: &str) -> bool {
        self.files.iter().any(|f| f.field == field)
    }

    pub(crate) fn to_form(&self) -> Form {
        let form = self
            .fields
            .iter()
            .fold(Form::new(), |form, (key, value)| {
                form.text(key.clone(), value.clone())
            });
        self.files.iter().fold(form, |form, file| {
            form.part(
                file.field.clone(),
                Part::bytes(file.bytes.clone()).file_name(file.file_name.clone()),
            )
        })
    }
}
