//! Persisted interface state.

use canteen_core::AppContext;
use serde::Serialize;

use crate::cli::{GlobalOpts, UiArgs, UiCommand};
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct UiView {
    is_sidebar_open: bool,
}

pub fn handle(ctx: &AppContext, args: &UiArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let ui = ctx.ui();
    if matches!(args.command, UiCommand::ToggleSidebar) {
        ui.toggle_sidebar();
    }
    let view = UiView {
        is_sidebar_open: ui.is_sidebar_open(),
    };
    let out = output::render_single(
        &global.output,
        &view,
        |v| format!("sidebar: {}", if v.is_sidebar_open { "open" } else { "closed" }),
        |v| v.is_sidebar_open.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
