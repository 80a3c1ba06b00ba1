use chrono::{DateTime, NaiveDate};
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;
use tabula_types::{
    CellValue, Database, ItemId, Property, PropertyId, PropertyType, TypedValue, ValueShape,
    View, ViewId, ViewKind,
};

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:[^\s]+$").unwrap());

/// How serious a finding is.
///
/// `Error` marks broken schema invariants; `Warning` marks things view
/// evaluation tolerates but probably hides or mis-orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Category of schema finding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    MissingTitle,
    MultipleTitles {
        count: usize,
    },
    DuplicatePropertyId {
        property_id: PropertyId,
    },
    DuplicateOptionLabel {
        property_id: PropertyId,
        label: String,
    },
    /// Stored label no longer among the property's options
    OrphanedLabel {
        item_id: ItemId,
        property_id: PropertyId,
        label: String,
    },
    ValueTypeMismatch {
        item_id: ItemId,
        property_id: PropertyId,
        expected: PropertyType,
        found: ValueShape,
    },
    MalformedDate {
        item_id: ItemId,
        property_id: PropertyId,
        value: String,
    },
    MalformedUrl {
        item_id: ItemId,
        property_id: PropertyId,
        value: String,
    },
    DanglingFilter {
        view_id: ViewId,
        property_id: PropertyId,
    },
    DanglingSort {
        view_id: ViewId,
        property_id: PropertyId,
    },
    DanglingGroupBy {
        view_id: ViewId,
        property_id: PropertyId,
    },
    GroupByNotSelect {
        view_id: ViewId,
        property_id: PropertyId,
    },
    /// Fails open: every item passes this filter
    UnknownFilterCondition {
        view_id: ViewId,
        condition: String,
    },
    UnsupportedView {
        view_id: ViewId,
    },
    DanglingActiveView {
        view_id: ViewId,
    },
    NoViews,
}

impl DiagnosticKind {
    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::MissingTitle
            | DiagnosticKind::MultipleTitles { .. }
            | DiagnosticKind::DuplicatePropertyId { .. }
            | DiagnosticKind::DuplicateOptionLabel { .. } => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::MissingTitle => write!(f, "schema has no title property"),
            DiagnosticKind::MultipleTitles { count } => {
                write!(f, "schema has {} title properties (expected 1)", count)
            }
            DiagnosticKind::DuplicatePropertyId { property_id } => {
                write!(f, "property id {} is used more than once", property_id)
            }
            DiagnosticKind::DuplicateOptionLabel { property_id, label } => {
                write!(f, "property {} defines option '{}' twice", property_id, label)
            }
            DiagnosticKind::OrphanedLabel {
                item_id,
                property_id,
                label,
            } => write!(
                f,
                "item {} stores '{}' which is not an option of {}",
                item_id, label, property_id
            ),
            DiagnosticKind::ValueTypeMismatch {
                item_id,
                property_id,
                expected,
                found,
            } => write!(
                f,
                "item {} stores a {} value in {} property {}",
                item_id, found, expected, property_id
            ),
            DiagnosticKind::MalformedDate {
                item_id,
                property_id,
                value,
            } => write!(
                f,
                "item {} has non-ISO date '{}' in {}",
                item_id, value, property_id
            ),
            DiagnosticKind::MalformedUrl {
                item_id,
                property_id,
                value,
            } => write!(
                f,
                "item {} has malformed url '{}' in {}",
                item_id, value, property_id
            ),
            DiagnosticKind::DanglingFilter {
                view_id,
                property_id,
            } => write!(
                f,
                "view {} filters on missing property {}",
                view_id, property_id
            ),
            DiagnosticKind::DanglingSort {
                view_id,
                property_id,
            } => write!(
                f,
                "view {} sorts on missing property {}",
                view_id, property_id
            ),
            DiagnosticKind::DanglingGroupBy {
                view_id,
                property_id,
            } => write!(
                f,
                "view {} groups by missing property {}",
                view_id, property_id
            ),
            DiagnosticKind::GroupByNotSelect {
                view_id,
                property_id,
            } => write!(
                f,
                "view {} groups by {} which is not a select property",
                view_id, property_id
            ),
            DiagnosticKind::UnknownFilterCondition { view_id, condition } => write!(
                f,
                "view {} uses unknown filter condition '{}' (all items pass)",
                view_id, condition
            ),
            DiagnosticKind::UnsupportedView { view_id } => {
                write!(f, "view {} has an unsupported type", view_id)
            }
            DiagnosticKind::DanglingActiveView { view_id } => write!(
                f,
                "active view {} does not exist; first view is used",
                view_id
            ),
            DiagnosticKind::NoViews => write!(f, "database has no views"),
        }
    }
}

/// A single finding with its severity and rendered message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind) -> Self {
        Self {
            severity: kind.severity(),
            message: kind.to_string(),
            kind,
        }
    }
}

/// Result of validating one database snapshot.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    fn push(&mut self, kind: DiagnosticKind) {
        self.diagnostics.push(Diagnostic::new(kind));
    }
}

/// Check a database against the schema invariants and report everything view
/// evaluation would quietly tolerate.
pub fn validate_database(database: &Database) -> ValidationReport {
    let mut report = ValidationReport::default();

    check_properties(&database.properties, &mut report);
    for item in &database.items {
        for property in &database.properties {
            if let Some(value) = item.value(&property.id) {
                check_value(&item.id, property, value, &mut report);
            }
        }
    }
    for view in &database.views {
        check_view(view, &database.properties, &mut report);
    }

    if database.views.is_empty() {
        report.push(DiagnosticKind::NoViews);
    } else if let Some(active) = &database.active_view_id
        && database.view(active).is_none()
    {
        report.push(DiagnosticKind::DanglingActiveView {
            view_id: active.clone(),
        });
    }

    report
}

fn check_properties(properties: &[Property], report: &mut ValidationReport) {
    let title_count = properties.iter().filter(|p| p.is_title()).count();
    match title_count {
        0 => report.push(DiagnosticKind::MissingTitle),
        1 => {}
        count => report.push(DiagnosticKind::MultipleTitles { count }),
    }

    let mut seen_ids = HashSet::new();
    for property in properties {
        if !seen_ids.insert(&property.id) {
            report.push(DiagnosticKind::DuplicatePropertyId {
                property_id: property.id.clone(),
            });
        }

        let mut seen_labels = HashSet::new();
        for label in property.option_labels() {
            if !seen_labels.insert(label) {
                report.push(DiagnosticKind::DuplicateOptionLabel {
                    property_id: property.id.clone(),
                    label: label.to_string(),
                });
            }
        }
    }
}

fn check_value(item_id: &ItemId, property: &Property, value: &CellValue, report: &mut ValidationReport) {
    match property.resolve(value) {
        TypedValue::Mismatch(other) => report.push(DiagnosticKind::ValueTypeMismatch {
            item_id: item_id.clone(),
            property_id: property.id.clone(),
            expected: property.kind,
            found: other.shape(),
        }),
        TypedValue::Date(date) if !date.is_empty() && !is_iso_date(date) => {
            report.push(DiagnosticKind::MalformedDate {
                item_id: item_id.clone(),
                property_id: property.id.clone(),
                value: date.to_string(),
            })
        }
        TypedValue::Url(url) if !url.is_empty() && !URL_REGEX.is_match(url) => {
            report.push(DiagnosticKind::MalformedUrl {
                item_id: item_id.clone(),
                property_id: property.id.clone(),
                value: url.to_string(),
            })
        }
        _ => {}
    }

    for label in property.orphaned_labels(value) {
        report.push(DiagnosticKind::OrphanedLabel {
            item_id: item_id.clone(),
            property_id: property.id.clone(),
            label: label.to_string(),
        });
    }
}

/// Dates sort as strings, so only ISO forms order chronologically.
fn is_iso_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || DateTime::parse_from_rfc3339(value).is_ok()
}

fn check_view(view: &View, properties: &[Property], report: &mut ValidationReport) {
    let find = |id: &PropertyId| properties.iter().find(|p| &p.id == id);

    if view.kind == ViewKind::Unsupported {
        report.push(DiagnosticKind::UnsupportedView {
            view_id: view.id.clone(),
        });
    }

    for filter in &view.filters {
        if find(&filter.property_id).is_none() {
            report.push(DiagnosticKind::DanglingFilter {
                view_id: view.id.clone(),
                property_id: filter.property_id.clone(),
            });
        }
        if !filter.condition.is_known() {
            report.push(DiagnosticKind::UnknownFilterCondition {
                view_id: view.id.clone(),
                condition: filter.condition.to_string(),
            });
        }
    }

    for sort in &view.sorts {
        if find(&sort.property_id).is_none() {
            report.push(DiagnosticKind::DanglingSort {
                view_id: view.id.clone(),
                property_id: sort.property_id.clone(),
            });
        }
    }

    if let Some(group_by) = &view.group_by {
        match find(group_by) {
            None => report.push(DiagnosticKind::DanglingGroupBy {
                view_id: view.id.clone(),
                property_id: group_by.clone(),
            }),
            Some(p) if p.kind != PropertyType::Select => {
                report.push(DiagnosticKind::GroupByNotSelect {
                    view_id: view.id.clone(),
                    property_id: group_by.clone(),
                })
            }
            Some(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_types::{Filter, FilterCondition, Item, Sort};

    fn kinds(report: &ValidationReport) -> Vec<&DiagnosticKind> {
        report.diagnostics.iter().map(|d| &d.kind).collect()
    }

    #[test]
    fn test_fresh_database_is_clean() {
        let db = Database::new("Tasks");
        assert!(validate_database(&db).is_clean());
    }

    #[test]
    fn test_title_count_errors() {
        let mut db = Database::new("Tasks");
        db.properties.clear();
        let report = validate_database(&db);
        assert_eq!(kinds(&report), vec![&DiagnosticKind::MissingTitle]);
        assert!(report.has_errors());

        db.properties.push(Property::new("t1", "A", PropertyType::Title));
        db.properties.push(Property::new("t2", "B", PropertyType::Title));
        let report = validate_database(&db);
        assert_eq!(
            kinds(&report),
            vec![&DiagnosticKind::MultipleTitles { count: 2 }]
        );
    }

    #[test]
    fn test_duplicate_ids_and_labels() {
        let mut db = Database::new("Tasks");
        let status = Property::new("status", "Status", PropertyType::Select)
            .with_options(["Todo", "Todo"]);
        db.properties.push(status.clone());
        db.properties.push(status);

        let report = validate_database(&db);
        assert!(kinds(&report).contains(&&DiagnosticKind::DuplicatePropertyId {
            property_id: PropertyId::new("status"),
        }));
        assert!(kinds(&report).contains(&&DiagnosticKind::DuplicateOptionLabel {
            property_id: PropertyId::new("status"),
            label: "Todo".to_string(),
        }));
    }

    #[test]
    fn test_value_findings_are_warnings() {
        let mut db = Database::new("Tasks");
        db.properties.extend([
            Property::new("status", "Status", PropertyType::Select).with_options(["Todo"]),
            Property::new("due", "Due", PropertyType::Date),
            Property::new("link", "Link", PropertyType::Url),
            Property::new("points", "Points", PropertyType::Number),
        ]);
        db.items.push(
            Item::new("i1", "p1")
                .with_value("status", "Archived")
                .with_value("due", "03/01/2024")
                .with_value("link", "not a url")
                .with_value("points", "five"),
        );
        db.items.push(
            Item::new("i2", "p2")
                .with_value("due", "2024-03-01")
                .with_value("link", "https://example.com/x"),
        );

        let report = validate_database(&db);

        assert!(!report.has_errors());
        assert_eq!(report.warnings().count(), 4);
        assert!(kinds(&report).contains(&&DiagnosticKind::OrphanedLabel {
            item_id: ItemId::new("i1"),
            property_id: PropertyId::new("status"),
            label: "Archived".to_string(),
        }));
        assert!(kinds(&report).contains(&&DiagnosticKind::ValueTypeMismatch {
            item_id: ItemId::new("i1"),
            property_id: PropertyId::new("points"),
            expected: PropertyType::Number,
            found: ValueShape::Text,
        }));
    }

    #[test]
    fn test_view_reference_findings() {
        let mut db = Database::new("Tasks");
        let title_id = db.title_property().unwrap().id.clone();
        let view = View::new("board", "Board", ViewKind::Board)
            .with_filter(Filter::is("deleted", "x"))
            .with_filter(Filter::new(
                title_id.clone(),
                FilterCondition::Other("regex".to_string()),
                None,
            ))
            .with_sort(Sort::asc("deleted"))
            .grouped_by(title_id.clone());
        db.views.push(view);
        db.views.push(View::new("cal", "Calendar", ViewKind::Unsupported));

        let report = validate_database(&db);
        let messages: Vec<&str> = report.diagnostics.iter().map(|d| d.message.as_str()).collect();

        assert_eq!(report.diagnostics.len(), 5);
        assert!(messages.contains(&"view board filters on missing property deleted"));
        assert!(messages.contains(&"view board uses unknown filter condition 'regex' (all items pass)"));
        assert!(messages.contains(&"view board sorts on missing property deleted"));
        assert!(messages.contains(&"view cal has an unsupported type"));
        assert!(kinds(&report).contains(&&DiagnosticKind::GroupByNotSelect {
            view_id: ViewId::new("board"),
            property_id: title_id,
        }));
    }

    #[test]
    fn test_views_and_active_view() {
        let mut db = Database::new("Tasks");
        db.active_view_id = Some(ViewId::new("gone"));
        let report = validate_database(&db);
        assert_eq!(
            kinds(&report),
            vec![&DiagnosticKind::DanglingActiveView {
                view_id: ViewId::new("gone")
            }]
        );

        db.views.clear();
        let report = validate_database(&db);
        assert_eq!(kinds(&report), vec![&DiagnosticKind::NoViews]);
    }

    #[test]
    fn test_diagnostic_json_shape() {
        let diagnostic = Diagnostic::new(DiagnosticKind::NoViews);
        let json = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(json["severity"], "warning");
        assert_eq!(json["kind"], "no_views");
        assert_eq!(json["message"], "database has no views");
    }
}
