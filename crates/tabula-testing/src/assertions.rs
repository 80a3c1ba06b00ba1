//! Custom assertions over the CLI's JSON output.
//!
//! Provides high-level assertions that make tests more readable:
//! - Item order of a projected view
//! - Board column contents
//! - Diagnostic kinds reported by `validate`

use anyhow::{Context, Result};
use serde_json::Value;

use crate::fixtures::TITLE;

fn item_title(item: &Value) -> Result<String> {
    let id = item["id"].as_str().unwrap_or("?");
    item["values"][TITLE]
        .as_str()
        .map(String::from)
        .with_context(|| format!("Item {} has no text title", id))
}

/// Titles of all projected items in presentation order.
///
/// Works for `show --format json` output of table, list and board views.
pub fn projection_titles(json: &Value) -> Result<Vec<String>> {
    let projection = &json["projection"];
    let mode = projection["mode"]
        .as_str()
        .context("Expected 'projection.mode' in JSON")?;

    match mode {
        "table" | "list" => projection["items"]
            .as_array()
            .context("Expected 'projection.items' array in JSON")?
            .iter()
            .map(item_title)
            .collect(),
        "board" => {
            let columns = projection["columns"]
                .as_array()
                .context("Expected 'projection.columns' array in JSON")?;
            let mut titles = Vec::new();
            for column in columns {
                let items = column["items"]
                    .as_array()
                    .context("Expected 'items' array in board column")?;
                for item in items {
                    titles.push(item_title(item)?);
                }
            }
            Ok(titles)
        }
        _ => Ok(Vec::new()),
    }
}

/// Assert the projected items have exactly these titles, in this order.
pub fn assert_titles(json: &Value, expected: &[&str]) -> Result<()> {
    let titles = projection_titles(json)?;
    if titles != expected {
        anyhow::bail!("Expected titles {:?}, got {:?}", expected, titles);
    }
    Ok(())
}

/// Assert one board column holds exactly these titles.
pub fn assert_column(json: &Value, label: &str, expected: &[&str]) -> Result<()> {
    let columns = json["projection"]["columns"]
        .as_array()
        .context("Expected 'projection.columns' array in JSON")?;
    let column = columns
        .iter()
        .find(|c| c["label"] == label)
        .with_context(|| format!("Board has no column '{}'", label))?;

    let titles = column["items"]
        .as_array()
        .context("Expected 'items' array in board column")?
        .iter()
        .map(item_title)
        .collect::<Result<Vec<_>>>()?;

    if titles != expected {
        anyhow::bail!(
            "Column '{}': expected {:?}, got {:?}",
            label,
            expected,
            titles
        );
    }
    Ok(())
}

/// Assert `validate --format json` reported every kind in `expected`.
pub fn assert_diagnostic_kinds(json: &Value, expected: &[&str]) -> Result<()> {
    let kinds: Vec<&str> = json["diagnostics"]
        .as_array()
        .context("Expected 'diagnostics' array in JSON")?
        .iter()
        .filter_map(|d| d["kind"].as_str())
        .collect();

    for kind in expected {
        if !kinds.contains(kind) {
            anyhow::bail!("Expected diagnostic '{}' not found in {:?}", kind, kinds);
        }
    }
    Ok(())
}
