use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{CellValue, PropertyId, ViewId};

/// Presentation mode of a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    Table,
    Board,
    List,
    /// Any type string this build does not know how to present
    #[serde(other)]
    Unsupported,
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewKind::Table => write!(f, "table"),
            ViewKind::Board => write!(f, "board"),
            ViewKind::List => write!(f, "list"),
            ViewKind::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// Filter predicate kind.
///
/// Unrecognized conditions are kept verbatim in `Other` so they survive a
/// load/save round trip; evaluation lets every record through them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterCondition {
    Is,
    Contains,
    IsEmpty,
    IsNotEmpty,
    Other(String),
}

impl FilterCondition {
    pub fn as_str(&self) -> &str {
        match self {
            FilterCondition::Is => "is",
            FilterCondition::Contains => "contains",
            FilterCondition::IsEmpty => "is-empty",
            FilterCondition::IsNotEmpty => "is-not-empty",
            FilterCondition::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, FilterCondition::Other(_))
    }
}

impl From<String> for FilterCondition {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "is" => FilterCondition::Is,
            "contains" => FilterCondition::Contains,
            "is-empty" => FilterCondition::IsEmpty,
            "is-not-empty" => FilterCondition::IsNotEmpty,
            _ => FilterCondition::Other(raw),
        }
    }
}

impl From<FilterCondition> for String {
    fn from(condition: FilterCondition) -> Self {
        condition.as_str().to_string()
    }
}

impl fmt::Display for FilterCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Predicate over a single property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub property_id: PropertyId,
    pub condition: FilterCondition,
    #[serde(default)]
    pub value: Option<CellValue>,
}

impl Filter {
    pub fn new(
        property_id: impl Into<PropertyId>,
        condition: FilterCondition,
        value: Option<CellValue>,
    ) -> Self {
        Self {
            property_id: property_id.into(),
            condition,
            value,
        }
    }

    pub fn is(property_id: impl Into<PropertyId>, value: impl Into<CellValue>) -> Self {
        Self::new(property_id, FilterCondition::Is, Some(value.into()))
    }

    pub fn contains(property_id: impl Into<PropertyId>, needle: impl Into<String>) -> Self {
        Self::new(
            property_id,
            FilterCondition::Contains,
            Some(CellValue::Text(needle.into())),
        )
    }

    pub fn is_empty(property_id: impl Into<PropertyId>) -> Self {
        Self::new(property_id, FilterCondition::IsEmpty, None)
    }

    pub fn is_not_empty(property_id: impl Into<PropertyId>) -> Self {
        Self::new(property_id, FilterCondition::IsNotEmpty, None)
    }
}

/// Sort direction. Anything other than `asc` reads as `desc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    #[serde(other)]
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// Ordering directive over a single property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sort {
    pub property_id: PropertyId,
    #[serde(default)]
    pub direction: SortDirection,
}

impl Sort {
    pub fn asc(property_id: impl Into<PropertyId>) -> Self {
        Self {
            property_id: property_id.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(property_id: impl Into<PropertyId>) -> Self {
        Self {
            property_id: property_id.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// A saved presentation configuration over a database's items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    pub id: ViewId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ViewKind,
    #[serde(default)]
    pub filters: Vec<Filter>,
    #[serde(default)]
    pub sorts: Vec<Sort>,
    /// Board grouping column; expected to name a `select` property
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_by: Option<PropertyId>,
}

impl View {
    pub fn new(id: impl Into<ViewId>, name: impl Into<String>, kind: ViewKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            filters: Vec::new(),
            sorts: Vec::new(),
            group_by: None,
        }
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sorts.push(sort);
        self
    }

    pub fn grouped_by(mut self, property_id: impl Into<PropertyId>) -> Self {
        self.group_by = Some(property_id.into());
        self
    }
}
