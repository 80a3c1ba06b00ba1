use super::{edit, parse_cell_value, HandlerContext};
use crate::args::ViewCommand;
use crate::types::ViewType;
use anyhow::Result;
use log::warn;
use serde::Serialize;
use std::path::Path;
use tabula_types::{
    CellValue, Database, Error, Filter, FilterCondition, PropertyId, PropertyType, Sort, ViewId,
    ViewKind,
};

#[derive(Serialize)]
struct ViewSummary<'a> {
    id: &'a ViewId,
    name: &'a str,
    #[serde(rename = "type")]
    kind: ViewKind,
    active: bool,
    filters: usize,
    sorts: usize,
    group_by: Option<&'a PropertyId>,
}

pub fn handle(ctx: &HandlerContext, command: ViewCommand) -> Result<()> {
    match command {
        ViewCommand::List { file } => list(ctx, &file),
        ViewCommand::Use { file, view } => {
            edit(ctx, &file, |db| {
                let id = ViewId::new(view);
                if !db.set_active_view(&id) {
                    return Err(Error::ViewNotFound(id).into());
                }
                Ok(format!("Active view is now {}", id))
            })
        }
        ViewCommand::Add {
            file,
            name,
            kind,
            group_by,
        } => edit(ctx, &file, |db| {
            // Only an explicitly active view steers the cycle; otherwise start from table
            let kind = kind.unwrap_or_else(|| {
                let active = db.active_view_id.as_ref().and_then(|id| db.view(id));
                ViewType::after(active.map_or(ViewKind::Table, |v| v.kind))
            });
            let name = name.unwrap_or_else(|| kind.label().to_string());
            let id = db.add_view(name, kind.into());
            if let Some(group_by) = group_by {
                set_group_by(db, &id, PropertyId::new(group_by))?;
            }
            Ok(format!("Added view {}", id))
        }),
        ViewCommand::Delete { file, view } => edit(ctx, &file, |db| {
            let removed = db.delete_view(&ViewId::new(view))?;
            Ok(match db.active_view() {
                Some(active) => format!("Deleted view {}; active view is {}", removed.id, active.id),
                None => format!("Deleted view {}; no views left", removed.id),
            })
        }),
        ViewCommand::Filter {
            file,
            view,
            property,
            condition,
            value,
        } => edit(ctx, &file, |db| {
            let property_id = PropertyId::new(property);
            let condition = FilterCondition::from(condition);
            if !condition.is_known() {
                warn!(
                    "unknown filter condition '{}'; every item will pass it",
                    condition
                );
            }
            if db.property(&property_id).is_none() {
                warn!("property {} does not exist; the filter sees no values", property_id);
            }

            let value = match value {
                Some(raw) if condition == FilterCondition::Contains => {
                    Some(CellValue::text(raw))
                }
                Some(raw) => Some(parse_cell_value(db.property(&property_id), &raw)?),
                None => None,
            };

            let view = db.view_mut(&ViewId::new(view))?;
            view.filters.push(Filter::new(property_id, condition, value));
            Ok(format!("View {} now has {} filter(s)", view.id, view.filters.len()))
        }),
        ViewCommand::Unfilter { file, view, index } => edit(ctx, &file, |db| {
            let view = db.view_mut(&ViewId::new(view))?;
            if index >= view.filters.len() {
                anyhow::bail!(
                    "view {} has {} filter(s); no filter at index {}",
                    view.id,
                    view.filters.len(),
                    index
                );
            }
            let removed = view.filters.remove(index);
            Ok(format!(
                "Removed filter {} {} from view {}",
                removed.property_id, removed.condition, view.id
            ))
        }),
        ViewCommand::Sort {
            file,
            view,
            property,
            direction,
        } => edit(ctx, &file, |db| {
            let property_id = PropertyId::new(property);
            if db.property(&property_id).is_none() {
                warn!("property {} does not exist; the sort key is ignored", property_id);
            }
            let view = db.view_mut(&ViewId::new(view))?;
            view.sorts.push(Sort {
                property_id,
                direction: direction.into(),
            });
            Ok(format!("View {} now has {} sort key(s)", view.id, view.sorts.len()))
        }),
        ViewCommand::Group {
            file,
            view,
            property,
        } => edit(ctx, &file, |db| {
            let id = ViewId::new(view);
            let property_id = PropertyId::new(property);
            set_group_by(db, &id, property_id.clone())?;
            Ok(format!("View {} is grouped by {}", id, property_id))
        }),
    }
}

fn list(ctx: &HandlerContext, file: &Path) -> Result<()> {
    let database = ctx.load(file)?;
    let active = database.active_view().map(|v| &v.id);

    let summaries: Vec<ViewSummary<'_>> = database
        .views
        .iter()
        .map(|view| ViewSummary {
            id: &view.id,
            name: &view.name,
            kind: view.kind,
            active: Some(&view.id) == active,
            filters: view.filters.len(),
            sorts: view.sorts.len(),
            group_by: view.group_by.as_ref(),
        })
        .collect();

    ctx.render(&summaries, |painter| {
        if summaries.is_empty() {
            return painter.dim("No views.");
        }
        summaries
            .iter()
            .map(|s| {
                let marker = if s.active { "*" } else { " " };
                let mut line = format!("{} {}  {} [{}]", marker, s.id, s.name, s.kind);
                if let Some(group_by) = s.group_by {
                    line.push_str(&format!("  group by {}", group_by));
                }
                if s.filters > 0 || s.sorts > 0 {
                    line.push_str(&painter.dim(&format!(
                        "  ({} filter(s), {} sort(s))",
                        s.filters, s.sorts
                    )));
                }
                if s.active {
                    painter.bold(&line)
                } else {
                    line
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    })
}

fn set_group_by(db: &mut Database, view_id: &ViewId, property_id: PropertyId) -> Result<()> {
    match db.property(&property_id) {
        Some(p) if p.kind == PropertyType::Select => {}
        Some(p) => warn!(
            "property {} is {}, not select; the board will show as unconfigured",
            p.id, p.kind
        ),
        None => warn!(
            "property {} does not exist; the board will show as unconfigured",
            property_id
        ),
    }

    let view = db.view_mut(view_id)?;
    if view.kind != ViewKind::Board {
        warn!("view {} is a {} view; grouping only applies to boards", view.id, view.kind);
    }
    view.group_by = Some(property_id);
    Ok(())
}
