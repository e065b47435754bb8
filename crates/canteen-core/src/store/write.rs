// Write path shared by both store kinds.
//
// Validate, send as JSON or multipart, log, and notify exactly once.
// Stores add only their own reconciliation on top.

use std::path::Path;

use canteen_api::{Backend, FormBody};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use super::StoreDeps;
use super::resource::UpdateMethod;
use crate::error::CoreError;
use crate::model::{Attachment, RecordId, Validate};
use crate::notify::Severity;
use crate::ui::OverlayGuard;

/// Where a store's writes go and which labels report them.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WriteTarget {
    pub store_id: &'static str,
    pub backend: Backend,
    pub endpoint: &'static str,
    pub item_key: &'static str,
    pub update_method: UpdateMethod,
}

impl WriteTarget {
    fn record_path(&self, id: RecordId) -> String {
        format!("{}{id}/", self.endpoint)
    }
}

#[derive(Debug, Clone, Copy)]
enum Verb {
    Post,
    Put,
    Patch,
}

impl From<UpdateMethod> for Verb {
    fn from(method: UpdateMethod) -> Self {
        match method {
            UpdateMethod::Put => Verb::Put,
            UpdateMethod::Patch => Verb::Patch,
        }
    }
}

impl StoreDeps {
    /// POST a new record. `None` means it was not created.
    pub(crate) async fn create<T, P>(&self, target: WriteTarget, payload: &P) -> Option<T>
    where
        T: DeserializeOwned,
        P: Serialize + Validate + Attachment + Sync,
    {
        match self.send(Verb::Post, &target, target.endpoint, payload).await {
            Ok(created) => {
                debug!(store = target.store_id, "record created");
                self.notify(Severity::Success, "messages.createSuccess", target.item_key);
                Some(created)
            }
            Err(e) => {
                error!(store = target.store_id, error = %e, "create failed");
                self.notify(Severity::Error, "messages.createError", target.item_key);
                None
            }
        }
    }

    /// PUT or PATCH an existing record. `None` means it was not saved.
    pub(crate) async fn update<T, P>(
        &self,
        target: WriteTarget,
        id: RecordId,
        payload: &P,
    ) -> Option<T>
    where
        T: DeserializeOwned,
        P: Serialize + Validate + Attachment + Sync,
    {
        let verb = Verb::from(target.update_method);
        match self.send(verb, &target, &target.record_path(id), payload).await {
            Ok(updated) => {
                debug!(store = target.store_id, id, "record updated");
                self.notify(Severity::Success, "messages.updateSuccess", target.item_key);
                Some(updated)
            }
            Err(e) => {
                error!(store = target.store_id, id, error = %e, "update failed");
                self.notify(Severity::Error, "messages.updateError", target.item_key);
                None
            }
        }
    }

    /// Show the blocking overlay for the duration of a delete.
    pub(crate) fn deleting(&self) -> OverlayGuard<'_> {
        self.ui.show_action_overlay(self.messages.t("messages.deleting"));
        OverlayGuard(&self.ui)
    }

    /// DELETE one record. A failure is reported here; success is reported
    /// by [`StoreDeps::report_deleted`] once the store has reconciled.
    pub(crate) async fn delete(&self, target: WriteTarget, id: RecordId) -> bool {
        match self.api.delete(target.backend, &target.record_path(id)).await {
            Ok(()) => true,
            Err(e) => {
                error!(store = target.store_id, id, error = %e, "delete failed");
                self.notify(Severity::Error, "messages.deleteError", target.item_key);
                false
            }
        }
    }

    /// Report a delete that reached the server. A failed reconciliation
    /// leaves stale rows behind, so it is a warning, not a success.
    pub(crate) fn report_deleted(
        &self,
        target: WriteTarget,
        id: RecordId,
        reconciled: Result<(), CoreError>,
    ) {
        match reconciled {
            Ok(()) => {
                debug!(store = target.store_id, id, "record deleted");
                self.notify(Severity::Success, "messages.deleteSuccess", target.item_key);
            }
            Err(e) => {
                error!(store = target.store_id, id, error = %e, "reload after delete failed");
                self.notify(Severity::Warning, "messages.deleteReloadError", target.item_key);
            }
        }
    }

    async fn send<T, P>(
        &self,
        verb: Verb,
        target: &WriteTarget,
        path: &str,
        payload: &P,
    ) -> Result<T, CoreError>
    where
        T: DeserializeOwned,
        P: Serialize + Validate + Attachment + Sync,
    {
        payload.validate()?;
        let (api, backend) = (&self.api, target.backend);

        if let Some((field, file)) = payload.attachment() {
            let form = form_with_file(payload, field, file).await?;
            let sent = match verb {
                Verb::Post => api.post_form(backend, path, form).await,
                Verb::Put => api.put_form(backend, path, form).await,
                Verb::Patch => api.patch_form(backend, path, form).await,
            };
            return Ok(sent?);
        }

        let sent = match verb {
            Verb::Post => api.post(backend, path, payload).await,
            Verb::Put => api.put(backend, path, payload).await,
            Verb::Patch => api.patch(backend, path, payload).await,
        };
        Ok(sent?)
    }
}

async fn form_with_file<P: Serialize>(
    payload: &P,
    field: &'static str,
    file: &Path,
) -> Result<FormBody, CoreError> {
    let bytes = tokio::fs::read(file).await.map_err(|e| {
        CoreError::validation(field, format!("cannot read {}: {e}", file.display()))
    })?;
    let file_name = file
        .file_name()
        .map_or_else(|| field.to_owned(), |name| name.to_string_lossy().into_owned());
    Ok(FormBody::from_fields(payload)?.file(field, file_name, bytes))
}
