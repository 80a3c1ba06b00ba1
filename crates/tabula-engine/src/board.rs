use log::debug;
use serde::Serialize;
use tabula_types::{
    CellValue, Database, Error, Item, ItemId, Property, PropertyId, PropertyType, Result, View,
};

/// One board column: a select option and the items carrying its label.
#[derive(Debug, Clone, Serialize)]
pub struct BoardColumn<'a> {
    pub label: &'a str,
    pub color: &'a str,
    pub items: Vec<&'a Item>,
}

/// Items bucketed by the options of a `select` property, in option order.
#[derive(Debug, Clone, Serialize)]
pub struct BoardGrouping<'a> {
    pub property_id: &'a PropertyId,
    pub columns: Vec<BoardColumn<'a>>,
}

impl<'a> BoardGrouping<'a> {
    /// Column labels in render order
    pub fn labels(&self) -> Vec<&'a str> {
        self.columns.iter().map(|c| c.label).collect()
    }

    pub fn get(&self, label: &str) -> Option<&[&'a Item]> {
        self.columns
            .iter()
            .find(|c| c.label == label)
            .map(|c| c.items.as_slice())
    }

    /// Total number of items shown across all columns
    pub fn item_count(&self) -> usize {
        self.columns.iter().map(|c| c.items.len()).sum()
    }
}

/// Bucket `items` by `group_property`'s options.
///
/// Returns `None` unless the property is `select`-typed. Items whose value
/// matches no option (stale labels, absent values) land in no column.
pub fn group_by_option<'a, I>(items: I, group_property: &'a Property) -> Option<BoardGrouping<'a>>
where
    I: IntoIterator<Item = &'a Item>,
{
    if group_property.kind != PropertyType::Select {
        debug!(
            "cannot group by property {} of type {}",
            group_property.id, group_property.kind
        );
        return None;
    }

    let items: Vec<&'a Item> = items.into_iter().collect();
    let columns = group_property
        .config
        .options
        .iter()
        .map(|option| BoardColumn {
            label: &option.label,
            color: &option.color,
            items: items
                .iter()
                .copied()
                .filter(|item| {
                    item.value(&group_property.id).and_then(CellValue::as_text)
                        == Some(option.label.as_str())
                })
                .collect(),
        })
        .collect();

    Some(BoardGrouping {
        property_id: &group_property.id,
        columns,
    })
}

/// Pick the property a board view groups by.
///
/// An explicit `group_by` must name an existing `select` property, otherwise
/// the board is unconfigured. Without one, the first `select` property is used.
pub fn resolve_group_property<'a>(view: &View, properties: &'a [Property]) -> Option<&'a Property> {
    match &view.group_by {
        Some(id) => {
            let property = properties.iter().find(|p| &p.id == id);
            match property {
                Some(p) if p.kind == PropertyType::Select => Some(p),
                Some(p) => {
                    debug!("view {} groups by non-select property {}", view.id, p.id);
                    None
                }
                None => {
                    debug!("view {} groups by missing property {}", view.id, id);
                    None
                }
            }
        }
        None => properties.iter().find(|p| p.kind == PropertyType::Select),
    }
}

/// Move an item into the column for `label`.
///
/// Equivalent to setting that one cell; filters, sorts and other items are
/// untouched.
pub fn move_to_column(
    database: &mut Database,
    item_id: &ItemId,
    group_property: &PropertyId,
    label: &str,
) -> Result<()> {
    let property = database
        .property(group_property)
        .ok_or_else(|| Error::PropertyNotFound(group_property.clone()))?;

    if property.kind != PropertyType::Select {
        return Err(Error::NotASelectProperty(group_property.clone()));
    }
    if property.option(label).is_none() {
        return Err(Error::UnknownOption {
            property: group_property.clone(),
            label: label.to_string(),
        });
    }

    database.set_value(item_id, group_property, label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_types::ViewKind;

    fn status() -> Property {
        Property::new("status", "Status", PropertyType::Select).with_options(["Todo", "Doing", "Done"])
    }

    fn tagged(id: &str, label: Option<&str>) -> Item {
        let item = Item::new(id, format!("page-{}", id));
        match label {
            Some(label) => item.with_value("status", label),
            None => item,
        }
    }

    fn ids(items: &[&Item]) -> Vec<String> {
        items.iter().map(|i| i.id.to_string()).collect()
    }

    #[test]
    fn test_buckets_follow_option_order() {
        let prop = status();
        let items = vec![
            tagged("1", Some("Done")),
            tagged("2", Some("Todo")),
            tagged("3", Some("Doing")),
            tagged("4", Some("Todo")),
        ];

        let board = group_by_option(&items, &prop).unwrap();

        assert_eq!(board.labels(), vec!["Todo", "Doing", "Done"]);
        assert_eq!(ids(board.get("Todo").unwrap()), vec!["2", "4"]);
        assert_eq!(ids(board.get("Doing").unwrap()), vec!["3"]);
        assert_eq!(ids(board.get("Done").unwrap()), vec!["1"]);
    }

    #[test]
    fn test_unmatched_labels_are_not_shown() {
        let prop = status();
        let items = vec![
            tagged("1", Some("Todo")),
            tagged("2", Some("Archived")),
            tagged("3", None),
            Item::new("4", "p4").with_value("status", CellValue::list(["Todo"])),
        ];

        let board = group_by_option(&items, &prop).unwrap();

        assert_eq!(board.item_count(), 1);
        assert_eq!(ids(board.get("Todo").unwrap()), vec!["1"]);
        assert!(board.get("Archived").is_none());
    }

    #[test]
    fn test_non_select_property_has_no_grouping() {
        let tags = Property::new("tags", "Tags", PropertyType::MultiSelect).with_options(["A"]);
        let items: Vec<Item> = Vec::new();
        assert!(group_by_option(&items, &tags).is_none());
    }

    #[test]
    fn test_resolve_falls_back_to_first_select() {
        let props = vec![
            Property::new("name", "Name", PropertyType::Title),
            status(),
            Property::new("priority", "Priority", PropertyType::Select),
        ];
        let view = View::new("v1", "Board", ViewKind::Board);

        let resolved = resolve_group_property(&view, &props).unwrap();
        assert_eq!(resolved.id.as_str(), "status");
    }

    #[test]
    fn test_resolve_explicit_group_by() {
        let props = vec![status(), Property::new("priority", "Priority", PropertyType::Select)];
        let view = View::new("v1", "Board", ViewKind::Board).grouped_by("priority");

        let resolved = resolve_group_property(&view, &props).unwrap();
        assert_eq!(resolved.id.as_str(), "priority");
    }

    #[test]
    fn test_resolve_dangling_or_wrong_type_is_unconfigured() {
        let props = vec![Property::new("name", "Name", PropertyType::Title), status()];

        let dangling = View::new("v1", "Board", ViewKind::Board).grouped_by("deleted");
        assert!(resolve_group_property(&dangling, &props).is_none());

        let title = View::new("v2", "Board", ViewKind::Board).grouped_by("name");
        assert!(resolve_group_property(&title, &props).is_none());
    }

    #[test]
    fn test_move_to_column_sets_single_value() {
        let mut db = Database::new("Tasks");
        db.properties.push(status());
        let status_id = PropertyId::new("status");
        let a = db.add_item("A");
        let b = db.add_item("B");
        db.set_value(&b, &status_id, "Todo").unwrap();

        move_to_column(&mut db, &a, &status_id, "Done").unwrap();

        assert_eq!(db.item(&a).unwrap().value(&status_id), Some(&CellValue::text("Done")));
        assert_eq!(db.item(&b).unwrap().value(&status_id), Some(&CellValue::text("Todo")));
    }

    #[test]
    fn test_move_to_unknown_label_rejected() {
        let mut db = Database::new("Tasks");
        db.properties.push(status());
        let status_id = PropertyId::new("status");
        let a = db.add_item("A");

        let err = move_to_column(&mut db, &a, &status_id, "Nope").unwrap_err();
        assert!(matches!(err, Error::UnknownOption { .. }));
        assert_eq!(db.item(&a).unwrap().value(&status_id), None);
    }
}
