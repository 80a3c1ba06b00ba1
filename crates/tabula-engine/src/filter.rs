use log::debug;
use tabula_types::{is_empty_value, CellValue, Filter, FilterCondition, Item, Property};

/// Narrow `items` by every filter in turn (logical AND).
///
/// Each filter sees the survivors of the previous one; relative input order is
/// kept and an empty filter list returns the input unchanged. A filter whose
/// property is not in `properties` evaluates every item as if it had no value.
pub fn apply_filters<'a, I>(items: I, filters: &[Filter], properties: &[Property]) -> Vec<&'a Item>
where
    I: IntoIterator<Item = &'a Item>,
{
    let mut candidates: Vec<&'a Item> = items.into_iter().collect();

    for filter in filters {
        let property_exists = properties.iter().any(|p| p.id == filter.property_id);
        if !property_exists {
            debug!(
                "filter references missing property {}; treating values as absent",
                filter.property_id
            );
        }
        if !filter.condition.is_known() {
            debug!(
                "unknown filter condition '{}' on property {}; letting all items through",
                filter.condition, filter.property_id
            );
        }

        candidates.retain(|item| {
            let value = if property_exists {
                item.value(&filter.property_id)
            } else {
                None
            };
            evaluate(filter, value)
        });
    }

    candidates
}

/// Whether a single (possibly absent) cell value passes `filter`.
pub fn evaluate(filter: &Filter, value: Option<&CellValue>) -> bool {
    match &filter.condition {
        FilterCondition::Is => value == filter.value.as_ref(),
        FilterCondition::Contains => {
            let haystack = search_text(value).to_lowercase();
            let needle = search_text(filter.value.as_ref()).to_lowercase();
            haystack.contains(&needle)
        }
        FilterCondition::IsEmpty => is_empty_value(value),
        FilterCondition::IsNotEmpty => !is_empty_value(value),
        // Fail open: a malformed condition must not hide data
        FilterCondition::Other(_) => true,
    }
}

fn search_text(value: Option<&CellValue>) -> String {
    value.map(CellValue::search_text).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_types::PropertyType;

    fn name_property() -> Property {
        Property::new("name", "Name", PropertyType::Title)
    }

    fn item(id: &str, name: Option<&str>) -> Item {
        let item = Item::new(id, format!("page-{}", id));
        match name {
            Some(name) => item.with_value("name", name),
            None => item,
        }
    }

    fn ids(items: &[&Item]) -> Vec<String> {
        items.iter().map(|i| i.id.to_string()).collect()
    }

    #[test]
    fn test_contains_is_case_insensitive_substring() {
        let items = vec![item("1", Some("Alta"))];
        let props = vec![name_property()];

        let hit = apply_filters(&items, &[Filter::contains("name", "ALT")], &props);
        assert_eq!(ids(&hit), vec!["1"]);

        let miss = apply_filters(&items, &[Filter::contains("name", "zzz")], &props);
        assert!(miss.is_empty());
    }

    #[test]
    fn test_contains_empty_needle_matches_absent_values() {
        let items = vec![item("1", None), item("2", Some("x"))];
        let props = vec![name_property()];

        let all = apply_filters(&items, &[Filter::contains("name", "")], &props);
        assert_eq!(ids(&all), vec!["1", "2"]);

        let only_x = apply_filters(&items, &[Filter::contains("name", "x")], &props);
        assert_eq!(ids(&only_x), vec!["2"]);
    }

    #[test]
    fn test_contains_unicode_lowercase() {
        let items = vec![item("1", Some("DISEÑO"))];
        let props = vec![name_property()];

        let hit = apply_filters(&items, &[Filter::contains("name", "diseño")], &props);
        assert_eq!(ids(&hit), vec!["1"]);
    }

    #[test]
    fn test_is_uses_strict_equality() {
        let done = Item::new("1", "p1").with_value("done", true);
        let text = Item::new("2", "p2").with_value("done", "true");
        let items = vec![done, text];
        let props = vec![Property::new("done", "Done", PropertyType::Checkbox)];

        let hit = apply_filters(&items, &[Filter::is("done", true)], &props);
        assert_eq!(ids(&hit), vec!["1"]);
    }

    #[test]
    fn test_is_number_does_not_match_numeric_string() {
        let items = vec![Item::new("1", "p1").with_value("n", "5")];
        let props = vec![Property::new("n", "N", PropertyType::Number)];

        let hit = apply_filters(&items, &[Filter::is("n", 5.0)], &props);
        assert!(hit.is_empty());
    }

    #[test]
    fn test_empty_and_not_empty() {
        let items = vec![
            item("1", None),
            item("2", Some("")),
            item("3", Some("x")),
            Item::new("4", "p4").with_value("name", CellValue::List(vec![])),
            Item::new("5", "p5").with_value("name", 0.0),
        ];
        let props = vec![name_property()];

        let empty = apply_filters(&items, &[Filter::is_empty("name")], &props);
        assert_eq!(ids(&empty), vec!["1", "2", "4"]);

        let not_empty = apply_filters(&items, &[Filter::is_not_empty("name")], &props);
        assert_eq!(ids(&not_empty), vec!["3", "5"]);
    }

    #[test]
    fn test_unknown_condition_fails_open() {
        let items = vec![item("1", None), item("2", Some("x"))];
        let props = vec![name_property()];
        let filter = Filter::new(
            "name",
            FilterCondition::Other("starts-with".to_string()),
            Some(CellValue::text("zzz")),
        );

        let result = apply_filters(&items, &[filter], &props);
        assert_eq!(ids(&result), vec!["1", "2"]);
    }

    #[test]
    fn test_dangling_property_reads_as_absent() {
        // Stale value left behind for a property that is no longer in the schema
        let items = vec![Item::new("1", "p1").with_value("gone", "x")];
        let props = vec![name_property()];

        let contains = apply_filters(&items, &[Filter::contains("gone", "x")], &props);
        assert!(contains.is_empty());

        let empty = apply_filters(&items, &[Filter::is_empty("gone")], &props);
        assert_eq!(ids(&empty), vec!["1"]);
    }

    #[test]
    fn test_multi_select_contains_label() {
        let items = vec![
            Item::new("1", "p1").with_value("tags", CellValue::list(["Work", "Urgent"])),
            Item::new("2", "p2").with_value("tags", CellValue::list(["Home"])),
        ];
        let props = vec![Property::new("tags", "Tags", PropertyType::MultiSelect)];

        let hit = apply_filters(&items, &[Filter::contains("tags", "urgent")], &props);
        assert_eq!(ids(&hit), vec!["1"]);
    }
}
