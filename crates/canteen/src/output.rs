//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::fmt::Write as _;
use std::io::{self, IsTerminal, Write};

use canteen_core::{Notification, Severity};
use owo_colors::OwoColorize;
use serde_json::Value;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stderr().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Echo a store notification on stderr.
pub fn print_notification(note: &Notification, color: bool, quiet: bool) {
    if quiet && note.severity != Severity::Error {
        return;
    }
    let (tag, line) = match note.severity {
        Severity::Success => ("ok", note.message.green().to_string()),
        Severity::Info => ("info", note.message.cyan().to_string()),
        Severity::Warning => ("warn", note.message.yellow().to_string()),
        Severity::Error => ("error", note.message.red().to_string()),
    };
    if color {
        eprintln!("{line}");
    } else {
        eprintln!("[{tag}] {}", note.message);
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => data.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
    }
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses `detail_fn`, since detail views don't use `Tabled`.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => id_fn(data),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

pub(crate) fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let out = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    out.unwrap_or_else(|e| format!("<unserializable: {e}>"))
}

/// YAML output.
fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).unwrap_or_else(|e| format!("<unserializable: {e}>"))
}

/// `key: value` lines for a record's scalar fields.
///
/// Nested objects show their `name` (or `id`); arrays show their length.
pub fn render_fields<T: serde::Serialize + ?Sized>(data: &T) -> String {
    let Ok(Value::Object(map)) = serde_json::to_value(data) else {
        return render_json(data, false);
    };
    let width = map.keys().map(String::len).max().unwrap_or(0);
    let mut out = String::new();
    for (key, value) in &map {
        let _ = writeln!(out, "{key:<width$}  {}", scalar(value));
    }
    out.trim_end().to_owned()
}

/// One-cell rendering of a JSON value.
pub fn scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(obj) => obj
            .get("name")
            .or_else(|| obj.get("id"))
            .map(scalar)
            .unwrap_or_default(),
        other => other.to_string(),
    }
}

/// The `id` field of any record, for plain output.
pub fn json_id<T: serde::Serialize>(data: &T) -> String {
    serde_json::to_value(data)
        .ok()
        .and_then(|v| v.get("id").map(scalar))
        .unwrap_or_default()
}
