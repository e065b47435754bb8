//! Handlers for the cached, unpaginated catalogs.
//!
//! Each CLI run starts with a cold cache, so `list` always reaches the
//! server; `get` prefers the list copy and falls back to the detail route.

use canteen_core::model::Identified;
use canteen_core::{AppContext, CatalogResource};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::cli::{CatalogArgs, CatalogCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::records::{print_detail, print_saved};
use super::rows::{DetailView, TableRow};
use super::util;

pub async fn handle<R>(
    ctx: &AppContext,
    args: CatalogArgs,
    global: &GlobalOpts,
) -> Result<(), CliError>
where
    R: CatalogResource,
    R::Record: Serialize + TableRow + DetailView,
    R::Payload: DeserializeOwned,
{
    let store = ctx.catalog::<R>();
    let locale = ctx.config().locale;
    let label = R::CONFIG.store_id;

    match args.command {
        CatalogCommand::List => {
            util::run_action(ctx, global, store.fetch_all(false)).await?;
            let records = store.records();
            let out = output::render_list(
                &global.output,
                &records,
                |r| r.to_row(locale),
                |r| r.id().to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CatalogCommand::Get { id } => {
            let record = match store.get_by_id(id) {
                Some(record) => record,
                None => {
                    util::run_action(ctx, global, store.fetch_record(id)).await?;
                    store.snapshot().single.ok_or_else(|| CliError::ActionFailed {
                        message: format!("{label} #{id} not loaded"),
                    })?
                }
            };
            print_detail(&record, global, locale);
            Ok(())
        }

        CatalogCommand::Create(payload) => {
            let body: R::Payload = util::read_payload(&payload.from_file)?;
            let created = util::run_action(ctx, global, store.create_record(&body)).await?;
            print_saved(label, created, global, locale)
        }

        CatalogCommand::Update { id, payload } => {
            let body: R::Payload = util::read_payload(&payload.from_file)?;
            let updated = util::run_action(ctx, global, store.update_record(id, &body)).await?;
            print_saved(label, updated, global, locale)
        }

        CatalogCommand::Delete { id } => {
            if !util::confirm(&format!("Delete {label} #{id}?"), global)? {
                return Ok(());
            }
            if !util::run_action(ctx, global, store.delete_record(id)).await? {
                return Err(CliError::ActionFailed {
                    message: format!("{label} #{id} was not deleted"),
                });
            }
            Ok(())
        }
    }
}
