use serde::{Deserialize, Serialize};
use std::fmt;

/// A value stored in an item cell.
///
/// The map holding these cannot know its own value types, so the shape is
/// whatever was stored. Interpretation against the schema happens at lookup
/// time through [`crate::Property::resolve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Checkbox(bool),
    Number(f64),
    Text(String),
    /// Ordered set of labels (multi-select)
    List(Vec<String>),
}

/// Stored shape of a [`CellValue`], ranked for cross-shape ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueShape {
    Checkbox,
    Number,
    Text,
    List,
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueShape::Checkbox => write!(f, "checkbox"),
            ValueShape::Number => write!(f, "number"),
            ValueShape::Text => write!(f, "text"),
            ValueShape::List => write!(f, "list"),
        }
    }
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    pub fn list<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CellValue::List(labels.into_iter().map(Into::into).collect())
    }

    pub fn shape(&self) -> ValueShape {
        match self {
            CellValue::Checkbox(_) => ValueShape::Checkbox,
            CellValue::Number(_) => ValueShape::Number,
            CellValue::Text(_) => ValueShape::Text,
            CellValue::List(_) => ValueShape::List,
        }
    }

    /// Empty text and empty lists count as empty; `0` and `false` do not.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Text(s) => s.is_empty(),
            CellValue::List(labels) => labels.is_empty(),
            CellValue::Number(_) | CellValue::Checkbox(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// String form used for substring search and cross-shape comparison.
    pub fn search_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Checkbox(b) => b.to_string(),
            CellValue::List(labels) => labels.join(","),
        }
    }
}

/// Emptiness of a possibly-absent cell.
pub fn is_empty_value(value: Option<&CellValue>) -> bool {
    value.is_none_or(CellValue::is_empty)
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::List(labels) => write!(f, "{}", labels.join(", ")),
            other => write!(f, "{}", other.search_text()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Checkbox(b)
    }
}

impl From<Vec<String>> for CellValue {
    fn from(labels: Vec<String>) -> Self {
        CellValue::List(labels)
    }
}

/// A cell value interpreted through its property's type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypedValue<'a> {
    Title(&'a str),
    Text(&'a str),
    Number(f64),
    Checkbox(bool),
    Select(&'a str),
    MultiSelect(&'a [String]),
    Date(&'a str),
    Url(&'a str),
    /// Stored shape does not fit the property type; kept as entered
    Mismatch(&'a CellValue),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_deserialization() {
        let values: Vec<CellValue> =
            serde_json::from_str(r#"["Doing", 5, true, ["a", "b"], 2.5]"#).unwrap();
        assert_eq!(values[0], CellValue::text("Doing"));
        assert_eq!(values[1], CellValue::Number(5.0));
        assert_eq!(values[2], CellValue::Checkbox(true));
        assert_eq!(values[3], CellValue::list(["a", "b"]));
        assert_eq!(values[4], CellValue::Number(2.5));
    }

    #[test]
    fn test_emptiness() {
        assert!(is_empty_value(None));
        assert!(is_empty_value(Some(&CellValue::text(""))));
        assert!(is_empty_value(Some(&CellValue::List(vec![]))));
        assert!(!is_empty_value(Some(&CellValue::Number(0.0))));
        assert!(!is_empty_value(Some(&CellValue::Checkbox(false))));
        assert!(!is_empty_value(Some(&CellValue::text(" "))));
    }

    #[test]
    fn test_search_text() {
        assert_eq!(CellValue::Number(5.0).search_text(), "5");
        assert_eq!(CellValue::Number(2.5).search_text(), "2.5");
        assert_eq!(CellValue::Checkbox(true).search_text(), "true");
        assert_eq!(CellValue::list(["x", "y"]).search_text(), "x,y");
    }
}
