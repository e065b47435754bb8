//! Clap derive structures for the `canteen` CLI.
//!
//! Defines the command tree, global flags, and shared argument groups.

use std::path::PathBuf;

use canteen_core::Locale;
use canteen_core::model::RecordId;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// canteen -- school canteen warehouse administration
#[derive(Debug, Parser)]
#[command(
    name = "canteen",
    version,
    about = "Manage a school canteen warehouse from the command line",
    long_about = "Administer incoming invoices, write-offs, movements, sales and \n\
        the reference data behind them (dishes, students, contractors, \n\
        warehouses, categories, units and write-off reasons).",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Deployment profile to use
    #[arg(long, short = 'p', env = "CANTEEN_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Server base URL (overrides profile)
    #[arg(long, short = 'H', env = "CANTEEN_HOST", global = true)]
    pub host: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "CANTEEN_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Message language (overrides profile)
    #[arg(long, env = "CANTEEN_LANG", global = true)]
    pub lang: Option<LocaleArg>,

    /// Session state file (overrides profile)
    #[arg(long, env = "CANTEEN_STATE_FILE", global = true, hide_env = true)]
    pub state_file: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "CANTEEN_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "CANTEEN_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LocaleArg {
    /// Kazakh
    Kz,
    /// Russian
    Ru,
    /// English
    En,
}

impl From<LocaleArg> for Locale {
    fn from(arg: LocaleArg) -> Self {
        match arg {
            LocaleArg::Kz => Locale::Kz,
            LocaleArg::Ru => Locale::Ru,
            LocaleArg::En => Locale::En,
        }
    }
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session
    Login(LoginArgs),

    /// Drop the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Incoming invoices
    #[command(alias = "in")]
    Invoices(DocumentArgs),

    /// Write-offs from warehouses
    #[command(alias = "wo")]
    WriteOffs(DocumentArgs),

    /// Dish movements between warehouses
    #[command(alias = "mv")]
    Movements(DocumentArgs),

    /// Dish sales
    Sales(DocumentArgs),

    /// Dishes
    Dishes(DishesArgs),

    /// Students
    Students(StudentsArgs),

    /// Contractors (suppliers)
    Contractors(CatalogArgs),

    /// Warehouses
    Warehouses(CatalogArgs),

    /// Dish categories
    Categories(CatalogArgs),

    /// Measurement units
    Units(CatalogArgs),

    /// Write-off reasons
    Reasons(CatalogArgs),

    /// Persisted interface preferences
    Ui(UiArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Login name (prompted when omitted and the profile has none)
    #[arg(long, short = 'u')]
    pub username: Option<String>,

    /// Read the password from stdin instead of prompting
    #[arg(long)]
    pub password_stdin: bool,
}

// ── Shared record arguments ──────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PageArgs {
    /// Page number (1-based)
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Rows per page (defaults to the collection's page size)
    #[arg(long)]
    pub page_size: Option<u32>,
}

#[derive(Debug, Args)]
pub struct PayloadArgs {
    /// JSON body file, or '-' for stdin
    #[arg(long = "from-file", short = 'F', value_name = "FILE")]
    pub from_file: PathBuf,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DOCUMENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DocumentArgs {
    #[command(subcommand)]
    pub command: DocumentCommand,
}

#[derive(Debug, Subcommand)]
pub enum DocumentCommand {
    /// List one page of documents
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        page: PageArgs,
        #[command(flatten)]
        filter: DocumentFilterArgs,
    },

    /// Show one document with its items
    Get { id: RecordId },

    /// Create a document from JSON
    Create(PayloadArgs),

    /// Replace a document from JSON
    Update {
        id: RecordId,
        #[command(flatten)]
        payload: PayloadArgs,
    },

    /// Delete a document
    #[command(alias = "rm")]
    Delete { id: RecordId },
}

#[derive(Debug, Args)]
pub struct DocumentFilterArgs {
    /// Supplier (contractor) id
    #[arg(long)]
    pub supplier: Option<RecordId>,

    /// Warehouse id
    #[arg(long)]
    pub warehouse: Option<RecordId>,

    /// Accepted state (true/false)
    #[arg(long)]
    pub accepted: Option<bool>,

    /// Earliest document date (YYYY-MM-DD)
    #[arg(long = "from")]
    pub date_from: Option<NaiveDate>,

    /// Latest document date (YYYY-MM-DD)
    #[arg(long = "to")]
    pub date_to: Option<NaiveDate>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DISHES & STUDENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DishesArgs {
    #[command(subcommand)]
    pub command: DishesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DishesCommand {
    /// List dishes (any filter returns all matches unpaginated)
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        page: PageArgs,
        #[command(flatten)]
        filter: DishFilterArgs,
    },

    /// Show one dish
    Get { id: RecordId },

    /// Create a dish from JSON
    Create(PayloadArgs),

    /// Patch a dish from JSON
    Update {
        id: RecordId,
        #[command(flatten)]
        payload: PayloadArgs,
    },

    /// Delete a dish
    #[command(alias = "rm")]
    Delete { id: RecordId },
}

#[derive(Debug, Args)]
pub struct DishFilterArgs {
    /// Kazakh name contains
    #[arg(long)]
    pub name_kz: Option<String>,

    /// Russian name contains
    #[arg(long)]
    pub name_ru: Option<String>,

    /// Barcode
    #[arg(long)]
    pub barcode: Option<String>,

    /// Category id
    #[arg(long)]
    pub category: Option<RecordId>,
}

#[derive(Debug, Args)]
pub struct StudentsArgs {
    #[command(subcommand)]
    pub command: StudentsCommand,
}

#[derive(Debug, Subcommand)]
pub enum StudentsCommand {
    /// List students (any filter returns all matches unpaginated)
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        page: PageArgs,
        #[command(flatten)]
        filter: StudentFilterArgs,
    },

    /// Show one student
    Get { id: RecordId },

    /// Create a student from JSON
    Create(PayloadArgs),

    /// Patch a student from JSON
    Update {
        id: RecordId,
        #[command(flatten)]
        payload: PayloadArgs,
    },

    /// Delete a student
    #[command(alias = "rm")]
    Delete { id: RecordId },
}

#[derive(Debug, Args)]
pub struct StudentFilterArgs {
    /// Name contains
    #[arg(long)]
    pub name: Option<String>,

    /// Individual identification number
    #[arg(long)]
    pub bin: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CATALOGS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

#[derive(Debug, Subcommand)]
pub enum CatalogCommand {
    /// List every record
    #[command(alias = "ls")]
    List,

    /// Show one record
    Get { id: RecordId },

    /// Create a record from JSON
    Create(PayloadArgs),

    /// Update a record from JSON
    Update {
        id: RecordId,
        #[command(flatten)]
        payload: PayloadArgs,
    },

    /// Delete a record
    #[command(alias = "rm")]
    Delete { id: RecordId },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  UI / CONFIG / COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct UiArgs {
    #[command(subcommand)]
    pub command: UiCommand,
}

#[derive(Debug, Subcommand)]
pub enum UiCommand {
    /// Show persisted interface state
    Show,

    /// Flip the sidebar open/closed flag
    ToggleSidebar,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Print the config file location
    Path,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
