mod context;

pub mod move_item;
pub mod property;
pub mod show;
pub mod validate;
pub mod view;

pub use context::HandlerContext;

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tabula_types::{CellValue, Database, Property, PropertyType};

/// Load, apply `change`, save, then report what changed.
///
/// Nothing is written when `change` fails.
pub(crate) fn edit<F>(ctx: &HandlerContext, file: &Path, change: F) -> Result<()>
where
    F: FnOnce(&mut Database) -> Result<String>,
{
    let mut database = ctx.load(file)?;
    let message = change(&mut database)?;
    ctx.save(&database, file)?;

    #[derive(Serialize)]
    struct EditOutput<'a> {
        message: &'a str,
        database: &'a Database,
    }
    let out = EditOutput {
        message: &message,
        database: &database,
    };
    ctx.render(&out, |_| message.clone())
}

/// Parse a command-line value according to the property it targets.
///
/// Without a property (dangling reference) the raw text is kept.
pub(crate) fn parse_cell_value(property: Option<&Property>, raw: &str) -> Result<CellValue> {
    let Some(property) = property else {
        return Ok(CellValue::text(raw));
    };

    let value = match property.kind {
        PropertyType::Number => {
            let n: f64 = raw
                .trim()
                .parse()
                .with_context(|| format!("'{}' is not a number", raw))?;
            CellValue::Number(n)
        }
        PropertyType::Checkbox => {
            let b: bool = raw
                .trim()
                .parse()
                .with_context(|| format!("'{}' is not true or false", raw))?;
            CellValue::Checkbox(b)
        }
        PropertyType::MultiSelect => CellValue::list(
            raw.split(',')
                .map(str::trim)
                .filter(|label| !label.is_empty()),
        ),
        PropertyType::Title
        | PropertyType::Text
        | PropertyType::Select
        | PropertyType::Date
        | PropertyType::Url => CellValue::text(raw),
    };
    Ok(value)
}
