use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{CellValue, PropertyId, TypedValue};

/// Column type of a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyType {
    Title,
    Text,
    Number,
    Checkbox,
    Select,
    MultiSelect,
    Date,
    Url,
}

impl PropertyType {
    pub fn has_options(self) -> bool {
        matches!(self, PropertyType::Select | PropertyType::MultiSelect)
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyType::Title => write!(f, "title"),
            PropertyType::Text => write!(f, "text"),
            PropertyType::Number => write!(f, "number"),
            PropertyType::Checkbox => write!(f, "checkbox"),
            PropertyType::Select => write!(f, "select"),
            PropertyType::MultiSelect => write!(f, "multi-select"),
            PropertyType::Date => write!(f, "date"),
            PropertyType::Url => write!(f, "url"),
        }
    }
}

/// One choice of a select / multi-select property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    "gray".to_string()
}

impl SelectOption {
    pub fn new(label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
        }
    }
}

/// Type-specific property configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PropertyConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
}

/// A typed column definition in a database schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    /// Display label; not identifying
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PropertyType,
    /// Presentation only, never consulted by filters or sorts
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Presentation ordering hint
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub config: PropertyConfig,
}

fn default_visible() -> bool {
    true
}

impl Property {
    pub fn new(id: impl Into<PropertyId>, name: impl Into<String>, kind: PropertyType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            visible: true,
            order: 0,
            config: PropertyConfig::default(),
        }
    }

    /// Builder-style option list for select / multi-select properties
    pub fn with_options<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.options = labels
            .into_iter()
            .map(|label| SelectOption::new(label, default_color()))
            .collect();
        self
    }

    pub fn is_title(&self) -> bool {
        self.kind == PropertyType::Title
    }

    pub fn option(&self, label: &str) -> Option<&SelectOption> {
        self.config.options.iter().find(|o| o.label == label)
    }

    pub fn option_labels(&self) -> impl Iterator<Item = &str> {
        self.config.options.iter().map(|o| o.label.as_str())
    }

    /// Interpret a stored value through this property's type. Never coerces:
    /// a shape that does not fit comes back as [`TypedValue::Mismatch`].
    pub fn resolve<'a>(&self, value: &'a CellValue) -> TypedValue<'a> {
        match (self.kind, value) {
            (PropertyType::Title, CellValue::Text(s)) => TypedValue::Title(s),
            (PropertyType::Text, CellValue::Text(s)) => TypedValue::Text(s),
            (PropertyType::Number, CellValue::Number(n)) => TypedValue::Number(*n),
            (PropertyType::Checkbox, CellValue::Checkbox(b)) => TypedValue::Checkbox(*b),
            (PropertyType::Select, CellValue::Text(s)) => TypedValue::Select(s),
            (PropertyType::MultiSelect, CellValue::List(labels)) => {
                TypedValue::MultiSelect(labels)
            }
            (PropertyType::Date, CellValue::Text(s)) => TypedValue::Date(s),
            (PropertyType::Url, CellValue::Text(s)) => TypedValue::Url(s),
            (_, other) => TypedValue::Mismatch(other),
        }
    }

    /// Labels stored in `value` that are not among this property's options.
    ///
    /// Stale labels stay displayable; this only reports them.
    pub fn orphaned_labels<'a>(&self, value: &'a CellValue) -> Vec<&'a str> {
        let labels: Vec<&str> = match self.resolve(value) {
            TypedValue::Select(label) if !label.is_empty() => vec![label],
            TypedValue::MultiSelect(labels) => labels.iter().map(String::as_str).collect(),
            _ => return Vec::new(),
        };
        labels
            .into_iter()
            .filter(|label| self.option(label).is_none())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_type_wire_names() {
        let kinds: Vec<PropertyType> =
            serde_json::from_str(r#"["title", "multi-select", "url"]"#).unwrap();
        assert_eq!(
            kinds,
            vec![
                PropertyType::Title,
                PropertyType::MultiSelect,
                PropertyType::Url
            ]
        );
    }

    #[test]
    fn test_property_defaults() {
        let prop: Property =
            serde_json::from_str(r#"{"id": "p1", "name": "Notes", "type": "text"}"#).unwrap();
        assert!(prop.visible);
        assert_eq!(prop.order, 0);
        assert!(prop.config.options.is_empty());
    }

    #[test]
    fn test_resolve_by_property_type() {
        let status = Property::new("status", "Status", PropertyType::Select)
            .with_options(["Todo", "Done"]);
        let value = CellValue::text("Todo");
        assert_eq!(status.resolve(&value), TypedValue::Select("Todo"));

        let number = CellValue::Number(3.0);
        assert_eq!(status.resolve(&number), TypedValue::Mismatch(&number));
    }

    #[test]
    fn test_orphaned_labels() {
        let tags = Property::new("tags", "Tags", PropertyType::MultiSelect)
            .with_options(["Work", "Home"]);
        let value = CellValue::list(["Work", "Gone"]);
        assert_eq!(tags.orphaned_labels(&value), vec!["Gone"]);

        let status = Property::new("status", "Status", PropertyType::Select)
            .with_options(["Todo"]);
        assert!(status.orphaned_labels(&CellValue::text("")).is_empty());
        assert_eq!(status.orphaned_labels(&CellValue::text("Old")), vec!["Old"]);
    }
}
