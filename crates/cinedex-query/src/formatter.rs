//! Result formatting: JSON, Table, and Markdown output.
//!
//! JSON is the boundary encoding (`{items, total}` for collections, the bare
//! detail object for lookups). Table and Markdown flatten each item into one
//! row: nested entities render as their name or title, arrays as a
//! comma-separated list.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use cinedex_core::error::CatalogError;

use crate::projection::Page;

/// Output format for query results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "table" => Ok(Self::Table),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(format!(
                "unknown format '{other}' (expected json, table, or markdown)"
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Json => "json",
            Self::Table => "table",
            Self::Markdown => "markdown",
        };
        f.write_str(name)
    }
}

/// Format a collection result.
///
/// # Errors
///
/// Returns [`CatalogError::Serialization`] if an item cannot be encoded.
pub fn format_page<T: Serialize>(
    page: &Page<T>,
    format: OutputFormat,
) -> Result<String, CatalogError> {
    match format {
        OutputFormat::Json => to_json(page),
        OutputFormat::Table => Ok(format_table(&rows(&page.items)?)),
        OutputFormat::Markdown => Ok(format_markdown(&rows(&page.items)?)),
    }
}

/// Format a single detail result.
///
/// # Errors
///
/// Returns [`CatalogError::Serialization`] if the item cannot be encoded.
pub fn format_item<T: Serialize>(item: &T, format: OutputFormat) -> Result<String, CatalogError> {
    match format {
        OutputFormat::Json => to_json(item),
        OutputFormat::Table => Ok(format_table(&rows(std::slice::from_ref(item))?)),
        OutputFormat::Markdown => Ok(format_markdown(&rows(std::slice::from_ref(item))?)),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CatalogError> {
    serde_json::to_string_pretty(value).map_err(|e| CatalogError::Serialization(e.to_string()))
}

/// Encode items as JSON objects, one per row.
fn rows<T: Serialize>(items: &[T]) -> Result<Vec<Map<String, Value>>, CatalogError> {
    items
        .iter()
        .map(|item| {
            match serde_json::to_value(item)
                .map_err(|e| CatalogError::Serialization(e.to_string()))?
            {
                Value::Object(fields) => Ok(fields),
                other => {
                    let mut fields = Map::new();
                    fields.insert("value".to_string(), other);
                    Ok(fields)
                }
            }
        })
        .collect()
}

fn columns(rows: &[Map<String, Value>]) -> Vec<String> {
    // serde_json maps iterate in sorted key order
    rows.first()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default()
}

/// Header and body cells shared by the table and markdown renderers.
struct Grid {
    header: Vec<String>,
    body: Vec<Vec<String>>,
}

/// Line decoration for one flavour of grid.
struct GridStyle {
    open: &'static str,
    close: &'static str,
    join: &'static str,
    rule_join: &'static str,
    /// Pad every cell to its column width.
    aligned: bool,
}

const TABLE: GridStyle = GridStyle {
    open: "",
    close: "",
    join: " | ",
    rule_join: "-+-",
    aligned: true,
};

const MARKDOWN: GridStyle = GridStyle {
    open: "| ",
    close: " |",
    join: " | ",
    rule_join: " | ",
    aligned: false,
};

impl Grid {
    fn new(rows: &[Map<String, Value>]) -> Self {
        let header = columns(rows);
        let body = rows
            .iter()
            .map(|row| {
                header
                    .iter()
                    .map(|col| {
                        row.get(col)
                            .map_or_else(|| "null".to_string(), value_to_display)
                    })
                    .collect()
            })
            .collect();
        Self { header, body }
    }

    /// Widest cell per column, counted in characters to match `{:width$}`.
    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.header.iter().map(|c| c.chars().count()).collect();
        for row in &self.body {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }

    fn render(&self, style: &GridStyle) -> String {
        let widths = if style.aligned {
            self.widths()
        } else {
            vec![0; self.header.len()]
        };
        let line = |cells: Vec<String>, join: &str| {
            format!("{}{}{}\n", style.open, cells.join(join), style.close)
        };
        let pad = |cells: &[String]| -> Vec<String> {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:width$}"))
                .collect()
        };
        let rule: Vec<String> = widths
            .iter()
            .map(|&w| "-".repeat(if style.aligned { w } else { 3 }))
            .collect();

        let mut output = line(pad(&self.header), style.join);
        output.push_str(&line(rule, style.rule_join));
        for row in &self.body {
            output.push_str(&line(pad(row), style.join));
        }
        output
    }
}

fn format_table(rows: &[Map<String, Value>]) -> String {
    if rows.is_empty() {
        return "(no results)".to_string();
    }
    Grid::new(rows).render(&TABLE)
}

fn format_markdown(rows: &[Map<String, Value>]) -> String {
    if rows.is_empty() {
        return "*No results*\n".to_string();
    }
    Grid::new(rows).render(&MARKDOWN)
}

fn value_to_display(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Array(items) => items
            .iter()
            .map(value_to_display)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(fields) => fields
            .get("name")
            .or_else(|| fields.get("title"))
            .map_or_else(|| v.to_string(), value_to_display),
        other => other.to_string(),
    }
}
