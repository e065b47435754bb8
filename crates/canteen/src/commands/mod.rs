//! Command handlers, one module per command group.

pub mod auth;
pub mod catalogs;
pub mod config_cmd;
pub mod records;
pub mod rows;
pub mod ui_cmd;
pub mod util;

use canteen_core::AppContext;
use canteen_core::model::{DishFilter, DocumentFilter, StudentFilter};
use canteen_core::resources::{
    Contractors, DishCategories, Dishes, IncomingInvoices, MeasurementUnits, Movements, Sales,
    Students, Warehouses, WriteOffs, WritingOffReasons,
};

use crate::cli::{
    Command, DishFilterArgs, DishesCommand, DocumentCommand, DocumentFilterArgs, GlobalOpts,
    StudentFilterArgs, StudentsCommand,
};
use crate::error::CliError;

use self::records::RecordAction;

/// Route a command that needs a server context.
pub async fn dispatch(
    cmd: Command,
    ctx: &AppContext,
    profile: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => auth::login(ctx, profile, &args, global).await,
        Command::Logout => auth::logout(ctx, global),
        Command::Whoami => auth::whoami(ctx, global),
        Command::Ui(args) => ui_cmd::handle(ctx, &args, global),

        // Everything below talks to the API on behalf of a user.
        cmd => {
            util::require_session(ctx)?;
            dispatch_records(cmd, ctx, global).await
        }
    }
}

async fn dispatch_records(
    cmd: Command,
    ctx: &AppContext,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Invoices(args) => {
            records::handle::<IncomingInvoices>(ctx, document_action(args.command), global).await
        }
        Command::WriteOffs(args) => {
            records::handle::<WriteOffs>(ctx, document_action(args.command), global).await
        }
        Command::Movements(args) => {
            records::handle::<Movements>(ctx, document_action(args.command), global).await
        }
        Command::Sales(args) => {
            records::handle::<Sales>(ctx, document_action(args.command), global).await
        }
        Command::Dishes(args) => {
            records::handle::<Dishes>(ctx, dish_action(args.command), global).await
        }
        Command::Students(args) => {
            records::handle::<Students>(ctx, student_action(args.command), global).await
        }

        Command::Contractors(args) => catalogs::handle::<Contractors>(ctx, args, global).await,
        Command::Warehouses(args) => catalogs::handle::<Warehouses>(ctx, args, global).await,
        Command::Categories(args) => catalogs::handle::<DishCategories>(ctx, args, global).await,
        Command::Units(args) => catalogs::handle::<MeasurementUnits>(ctx, args, global).await,
        Command::Reasons(args) => catalogs::handle::<WritingOffReasons>(ctx, args, global).await,

        Command::Login(_)
        | Command::Logout
        | Command::Whoami
        | Command::Ui(_)
        | Command::Config(_)
        | Command::Completions(_) => unreachable!("handled before dispatch"),
    }
}

// ── Argument → store action translation ──────────────────────────────

fn document_action(cmd: DocumentCommand) -> RecordAction<DocumentFilter> {
    match cmd {
        DocumentCommand::List { page, filter } => RecordAction::List {
            page,
            filter: document_filter(filter),
        },
        DocumentCommand::Get { id } => RecordAction::Get { id },
        DocumentCommand::Create(payload) => RecordAction::Create { payload },
        DocumentCommand::Update { id, payload } => RecordAction::Update { id, payload },
        DocumentCommand::Delete { id } => RecordAction::Delete { id },
    }
}

fn dish_action(cmd: DishesCommand) -> RecordAction<DishFilter> {
    match cmd {
        DishesCommand::List { page, filter } => RecordAction::List {
            page,
            filter: dish_filter(filter),
        },
        DishesCommand::Get { id } => RecordAction::Get { id },
        DishesCommand::Create(payload) => RecordAction::Create { payload },
        DishesCommand::Update { id, payload } => RecordAction::Update { id, payload },
        DishesCommand::Delete { id } => RecordAction::Delete { id },
    }
}

fn student_action(cmd: StudentsCommand) -> RecordAction<StudentFilter> {
    match cmd {
        StudentsCommand::List { page, filter } => RecordAction::List {
            page,
            filter: student_filter(filter),
        },
        StudentsCommand::Get { id } => RecordAction::Get { id },
        StudentsCommand::Create(payload) => RecordAction::Create { payload },
        StudentsCommand::Update { id, payload } => RecordAction::Update { id, payload },
        StudentsCommand::Delete { id } => RecordAction::Delete { id },
    }
}

fn document_filter(args: DocumentFilterArgs) -> DocumentFilter {
    DocumentFilter {
        supplier: args.supplier,
        warehouse: args.warehouse,
        accepted: args.accepted,
        date_from: args.date_from,
        date_to: args.date_to,
    }
}

fn dish_filter(args: DishFilterArgs) -> DishFilter {
    DishFilter {
        name_kz: args.name_kz,
        name_ru: args.name_ru,
        barcode: args.barcode,
        category: args.category,
        id: None,
    }
}

fn student_filter(args: StudentFilterArgs) -> StudentFilter {
    StudentFilter {
        name: args.name,
        bin: args.bin,
        id: None,
    }
}
