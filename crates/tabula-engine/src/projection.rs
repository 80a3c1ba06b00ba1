use log::debug;
use serde::Serialize;
use tabula_types::{Database, Item, Property, Sort, View, ViewKind};

use crate::board::{group_by_option, resolve_group_property, BoardColumn};
use crate::filter::apply_filters;
use crate::sort::apply_sorts;

/// Evaluated output of one view, ready for a renderer.
///
/// Rebuilt from scratch on every call; nothing is cached between calls.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Projection<'a> {
    Table {
        properties: &'a [Property],
        items: Vec<&'a Item>,
    },
    List {
        properties: &'a [Property],
        items: Vec<&'a Item>,
    },
    Board {
        property: &'a Property,
        columns: Vec<BoardColumn<'a>>,
    },
    /// Board view without a usable `select` property to group by
    BoardUnconfigured,
    /// View type this engine cannot present
    Unsupported,
    /// Database has no views at all
    NoView,
}

impl<'a> Projection<'a> {
    /// Items in presentation order (board: column by column).
    pub fn items(&self) -> Vec<&'a Item> {
        match self {
            Projection::Table { items, .. } | Projection::List { items, .. } => items.clone(),
            Projection::Board { columns, .. } => columns
                .iter()
                .flat_map(|c| c.items.iter().copied())
                .collect(),
            Projection::BoardUnconfigured | Projection::Unsupported | Projection::NoView => {
                Vec::new()
            }
        }
    }
}

/// Filter, sort and (for boards) group `items` as `view` describes.
pub fn project<'a>(items: &'a [Item], properties: &'a [Property], view: &View) -> Projection<'a> {
    if view.kind == ViewKind::Unsupported {
        debug!("view {} has an unsupported type", view.id);
        return Projection::Unsupported;
    }

    let sorts = effective_sorts(view, properties);
    let filtered = apply_filters(items, &view.filters, properties);
    let sorted = apply_sorts(filtered, &sorts);

    match view.kind {
        ViewKind::Table => Projection::Table {
            properties,
            items: sorted,
        },
        ViewKind::List => Projection::List {
            properties,
            items: sorted,
        },
        ViewKind::Board => resolve_group_property(view, properties)
            .and_then(|property| {
                group_by_option(sorted, property).map(|grouping| Projection::Board {
                    property,
                    columns: grouping.columns,
                })
            })
            .unwrap_or(Projection::BoardUnconfigured),
        ViewKind::Unsupported => Projection::Unsupported,
    }
}

/// Project the database's active view (falling back to its first view).
pub fn project_database(database: &Database) -> Projection<'_> {
    match database.active_view() {
        Some(view) => project(&database.items, &database.properties, view),
        None => Projection::NoView,
    }
}

/// Sort keys whose property still exists. A dangling key has no ordering
/// effect, so it is dropped rather than compared against stale values.
fn effective_sorts(view: &View, properties: &[Property]) -> Vec<Sort> {
    view.sorts
        .iter()
        .filter(|sort| {
            let exists = properties.iter().any(|p| p.id == sort.property_id);
            if !exists {
                debug!(
                    "view {} sorts by missing property {}; ignoring",
                    view.id, sort.property_id
                );
            }
            exists
        })
        .cloned()
        .collect()
}
