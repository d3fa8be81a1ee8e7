//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod centre_of_mass;
pub mod check;
pub mod integrate;
pub mod sort;

use std::str::FromStr;

use serde::Serialize;

use crate::CliError;

/// Output format shared by the reporting commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Box-drawn table on stdout
    Table,
    /// Pretty-printed JSON on stdout
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: json, table",
                other
            ))),
        }
    }
}

/// Prints `summary` as JSON, or `rows` as a two-column table.
pub(crate) fn emit<S: Serialize>(
    format: OutputFormat,
    summary: &S,
    rows: &[(&str, String)],
) -> crate::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(summary)?),
        OutputFormat::Table => print!("{}", render_table(rows)),
    }
    Ok(())
}

/// Renders key/value rows inside a box-drawn table.
pub(crate) fn render_table(rows: &[(&str, String)]) -> String {
    let key_width = rows.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, v)| v.chars().count()).max().unwrap_or(0);
    let rule = |left: &str, mid: &str, right: &str| {
        format!(
            "{}{}{}{}{}\n",
            left,
            "─".repeat(key_width + 2),
            mid,
            "─".repeat(value_width + 2),
            right
        )
    };

    let mut out = String::from("\n");
    out.push_str(&rule("┌", "┬", "┐"));
    for (key, value) in rows {
        out.push_str(&format!(
            "│ {:<kw$} │ {:<vw$} │\n",
            key,
            value,
            kw = key_width,
            vw = value_width
        ));
    }
    out.push_str(&rule("└", "┴", "┘"));
    out
}
