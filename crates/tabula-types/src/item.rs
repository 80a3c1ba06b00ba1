use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{CellValue, ItemId, PageId, PropertyId};

/// One row of a database.
///
/// `values` keeps JSON `null` as `None`; both `None` and a missing key read
/// as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub page_id: PageId,
    #[serde(default)]
    pub values: BTreeMap<PropertyId, Option<CellValue>>,
}

impl Item {
    pub fn new(id: impl Into<ItemId>, page_id: impl Into<PageId>) -> Self {
        Self {
            id: id.into(),
            page_id: page_id.into(),
            values: BTreeMap::new(),
        }
    }

    /// Builder-style value assignment
    pub fn with_value(mut self, property: impl Into<PropertyId>, value: impl Into<CellValue>) -> Self {
        self.set(property, value);
        self
    }

    pub fn value(&self, property: &PropertyId) -> Option<&CellValue> {
        self.values.get(property).and_then(Option::as_ref)
    }

    pub fn set(&mut self, property: impl Into<PropertyId>, value: impl Into<CellValue>) {
        self.values.insert(property.into(), Some(value.into()));
    }

    pub fn clear(&mut self, property: &PropertyId) {
        self.values.remove(property);
    }
}
