//! Output formatting: table, JSON, YAML, plain.
//!
//! Data goes to stdout in the format selected by `--output`; status
//! lines go to stderr so pipelines stay clean. Table output uses
//! `tabled`, structured formats go through serde, plain emits one
//! identifier per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of items in the chosen format.
///
/// - `table`: builds rows with `to_row` and the `Tabled` derive
/// - `json` / `json-compact` / `yaml`: serializes the items themselves
/// - `plain`: calls `id_fn` on each item, one identifier per line
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

/// Render a single item in the chosen format.
///
/// Detail views are pre-formatted strings rather than one-row tables,
/// so table mode takes a `detail_fn`.
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

/// Print rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Print a status line to stderr, green-ticked when color is on.
pub fn status(message: &str, color: &ColorMode, quiet: bool) {
    if quiet {
        return;
    }
    let colored = match color {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stderr().is_terminal() && std::env::var("NO_COLOR").is_err(),
    };
    if colored {
        eprintln!("{} {message}", "✓".green());
    } else {
        eprintln!("{message}");
    }
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let rendered = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    rendered.expect("serialization should not fail")
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).expect("serialization should not fail")
}
