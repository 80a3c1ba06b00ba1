use std::cmp::Ordering;
use tabula_types::{CellValue, Item, Sort, SortDirection};

/// Apply each sort key as its own full, stable re-sort.
///
/// Keys do not compose as primary/tie-breaker: every key re-sorts the whole
/// sequence, so the last key decides the primary order and earlier keys only
/// survive among items the last key considers equal.
pub fn apply_sorts<'a, I>(items: I, sorts: &[Sort]) -> Vec<&'a Item>
where
    I: IntoIterator<Item = &'a Item>,
{
    let mut sorted: Vec<&'a Item> = items.into_iter().collect();

    for sort in sorts {
        // slice::sort_by is stable
        sorted.sort_by(|a, b| {
            compare_values(
                a.value(&sort.property_id),
                b.value(&sort.property_id),
                sort.direction,
            )
        });
    }

    sorted
}

/// Compare two cells for one sort key.
///
/// Empty or absent values always sink to the end; `direction` only flips the
/// comparison between two non-empty values.
pub fn compare_values(
    a: Option<&CellValue>,
    b: Option<&CellValue>,
    direction: SortDirection,
) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    let (a, b) = match (non_empty(a), non_empty(b)) {
        (None, None) => return Ordering::Equal,
        (None, Some(_)) => return Ordering::Greater,
        (Some(_), None) => return Ordering::Less,
        (Some(a), Some(b)) => (a, b),
    };

    let ordering = natural_order(a, b);
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

fn non_empty(value: Option<&CellValue>) -> Option<&CellValue> {
    value.filter(|v| !v.is_empty())
}

/// Natural order within a shape. Values of different shapes never coerce;
/// they order by shape so the comparator stays total.
fn natural_order(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Text(x), CellValue::Text(y)) => x.cmp(y),
        (CellValue::Number(x), CellValue::Number(y)) => x.total_cmp(y),
        (CellValue::Checkbox(x), CellValue::Checkbox(y)) => x.cmp(y),
        (CellValue::List(x), CellValue::List(y)) => x.cmp(y),
        _ => a.shape().cmp(&b.shape()),
    }
}
