//! Handlers for paginated collections: documents, dishes and students.

use canteen_core::model::{Identified, RecordId};
use canteen_core::{AppContext, Locale, Resource};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::cli::{GlobalOpts, PageArgs, PayloadArgs};
use crate::error::CliError;
use crate::output;

use super::rows::{DetailView, TableRow};
use super::util;

/// One store operation, independent of which collection it targets.
#[derive(Debug)]
pub enum RecordAction<F> {
    List { page: PageArgs, filter: F },
    Get { id: RecordId },
    Create { payload: PayloadArgs },
    Update { id: RecordId, payload: PayloadArgs },
    Delete { id: RecordId },
}

pub async fn handle<R>(
    ctx: &AppContext,
    action: RecordAction<R::Filter>,
    global: &GlobalOpts,
) -> Result<(), CliError>
where
    R: Resource,
    R::ListItem: Serialize + TableRow,
    R::Detail: DetailView,
    R::Payload: DeserializeOwned,
{
    let store = ctx.documents::<R>();
    let locale = ctx.config().locale;

    match action {
        RecordAction::List { page, filter } => {
            store.set_filter(filter)?;
            if let Some(size) = page.page_size {
                store.set_page_size(size);
            }
            util::run_action(ctx, global, store.fetch_records(page.page)).await?;

            let snap = store.snapshot();
            let out = output::render_list(
                &global.output,
                &snap.list,
                |r| r.to_row(locale),
                |r| r.id().to_string(),
            );
            output::print_output(&out, global.quiet);
            if !global.quiet {
                eprintln!(
                    "page {} of {} ({} records)",
                    snap.current_page,
                    snap.total_pages(),
                    snap.total_records
                );
            }
            Ok(())
        }

        RecordAction::Get { id } => {
            util::run_action(ctx, global, store.fetch_record(id)).await?;
            let Some(record) = store.snapshot().single else {
                return Err(CliError::ActionFailed {
                    message: format!("{} #{id} not loaded", R::CONFIG.store_id),
                });
            };
            print_detail(&record, global, locale);
            Ok(())
        }

        RecordAction::Create { payload } => {
            let body: R::Payload = util::read_payload(&payload.from_file)?;
            let created = util::run_action(ctx, global, store.create_record(&body)).await?;
            print_saved(R::CONFIG.store_id, created, global, locale)
        }

        RecordAction::Update { id, payload } => {
            let body: R::Payload = util::read_payload(&payload.from_file)?;
            let updated = util::run_action(ctx, global, store.update_record(id, &body)).await?;
            print_saved(R::CONFIG.store_id, updated, global, locale)
        }

        RecordAction::Delete { id } => {
            let prompt = format!("Delete {} #{id}?", R::CONFIG.store_id);
            if !util::confirm(&prompt, global)? {
                return Ok(());
            }
            let deleted = util::run_action(ctx, global, store.delete_record(id)).await?;
            if !deleted {
                return Err(CliError::ActionFailed {
                    message: format!("{} #{id} was not deleted", R::CONFIG.store_id),
                });
            }
            Ok(())
        }
    }
}

pub(crate) fn print_detail<T: DetailView>(record: &T, global: &GlobalOpts, locale: Locale) {
    let out = output::render_single(
        &global.output,
        record,
        |r| r.detail(locale),
        output::json_id,
    );
    output::print_output(&out, global.quiet);
}

pub(crate) fn print_saved<T: DetailView>(
    label: &str,
    saved: Option<T>,
    global: &GlobalOpts,
    locale: Locale,
) -> Result<(), CliError> {
    let Some(record) = saved else {
        return Err(CliError::ActionFailed {
            message: format!("{label} was not saved"),
        });
    };
    print_detail(&record, global, locale);
    Ok(())
}
