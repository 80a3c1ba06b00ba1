//! Fixtures for sample data generation.
//!
//! All ids are fixed strings so assertions and snapshots stay deterministic.

use tabula_types::{
    CellValue, Database, DatabaseId, Item, Property, PropertyId, PropertyType, SelectOption, View,
    ViewId, ViewKind,
};

/// Property id of the title column in the sample database
pub const TITLE: &str = "title";
/// Property id of the `Todo / Doing / Done` select
pub const STATUS: &str = "status";
/// Property id of the `High / Med / Low` select
pub const PRIORITY: &str = "priority";

/// Id of the sample's table view (active)
pub const TABLE_VIEW: &str = "view-table";
/// Id of the sample's board view, grouped by status
pub const BOARD_VIEW: &str = "view-board";

/// Fluent builder for databases with predictable ids.
///
/// # Example
/// ```
/// use tabula_testing::DatabaseBuilder;
/// use tabula_types::ViewKind;
///
/// let db = DatabaseBuilder::new("Reading list")
///     .title_property("title")
///     .select("state", ["Queued", "Read"])
///     .row("b1", [("title", "Dune"), ("state", "Read")])
///     .view("all", ViewKind::Table)
///     .build();
///
/// assert_eq!(db.items.len(), 1);
/// assert_eq!(db.active_view().unwrap().id.as_str(), "all");
/// ```
pub struct DatabaseBuilder {
    database: Database,
}

impl DatabaseBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            database: Database {
                id: DatabaseId::new(format!("db-{}", title.to_lowercase().replace(' ', "-"))),
                title: title.to_string(),
                icon: None,
                properties: Vec::new(),
                items: Vec::new(),
                views: Vec::new(),
                active_view_id: None,
            },
        }
    }

    /// Append a property; its `order` is its position in the schema.
    pub fn property(mut self, mut property: Property) -> Self {
        property.order = self.database.properties.len() as i32;
        self.database.properties.push(property);
        self
    }

    pub fn title_property(self, id: &str) -> Self {
        self.property(Property::new(id, "Name", PropertyType::Title))
    }

    /// Add a `select` property whose display name is its capitalised id.
    pub fn select<const N: usize>(self, id: &str, labels: [&str; N]) -> Self {
        self.property(Property::new(id, display_name(id), PropertyType::Select).with_options(labels))
    }

    pub fn item(mut self, item: Item) -> Self {
        self.database.items.push(item);
        self
    }

    /// Add a row from `(property id, value)` pairs; its page id is `page-<id>`.
    pub fn row<I, V>(self, id: &str, values: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, V)>,
        V: Into<CellValue>,
    {
        let item = values
            .into_iter()
            .fold(Item::new(id, format!("page-{}", id)), |item, (property, value)| {
                item.with_value(property, value)
            });
        self.item(item)
    }

    /// Add a bare view. The first view added becomes active.
    pub fn view(self, id: &str, kind: ViewKind) -> Self {
        let name = display_name(id);
        self.with_view(View::new(id, name, kind))
    }

    /// Add a fully configured view. The first view added becomes active.
    pub fn with_view(mut self, view: View) -> Self {
        if self.database.active_view_id.is_none() {
            self.database.active_view_id = Some(view.id.clone());
        }
        self.database.views.push(view);
        self
    }

    pub fn active(mut self, id: &str) -> Self {
        self.database.active_view_id = Some(ViewId::new(id));
        self
    }

    pub fn build(self) -> Database {
        self.database
    }
}

fn display_name(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Three-task board used across the test suites.
///
/// | title          | status | priority |
/// |----------------|--------|----------|
/// | Diseño         | Doing  | High     |
/// | Implementar BD | Done   | High     |
/// | Pruebas        | Todo   | Med      |
pub fn sample_tasks_database() -> Database {
    let mut status = Property::new(STATUS, "Status", PropertyType::Select);
    status.config.options = vec![
        SelectOption::new("Todo", "gray"),
        SelectOption::new("Doing", "blue"),
        SelectOption::new("Done", "green"),
    ];
    let mut priority = Property::new(PRIORITY, "Priority", PropertyType::Select);
    priority.config.options = vec![
        SelectOption::new("High", "red"),
        SelectOption::new("Med", "yellow"),
        SelectOption::new("Low", "gray"),
    ];

    DatabaseBuilder::new("Tareas")
        .title_property(TITLE)
        .property(status)
        .property(priority)
        .row("task-1", [(TITLE, "Diseño"), (STATUS, "Doing"), (PRIORITY, "High")])
        .row("task-2", [(TITLE, "Implementar BD"), (STATUS, "Done"), (PRIORITY, "High")])
        .row("task-3", [(TITLE, "Pruebas"), (STATUS, "Todo"), (PRIORITY, "Med")])
        .with_view(View::new(TABLE_VIEW, "All tasks", ViewKind::Table))
        .with_view(View::new(BOARD_VIEW, "Board", ViewKind::Board).grouped_by(STATUS))
        .build()
}

/// Titles of `items` in order, read from the [`TITLE`] property.
pub fn titles<'a, I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Item>,
{
    let title = PropertyId::new(TITLE);
    items
        .into_iter()
        .map(|item| item.value(&title).map(ToString::to_string).unwrap_or_default())
        .collect()
}
