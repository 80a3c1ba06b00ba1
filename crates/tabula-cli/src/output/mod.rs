// Plain-text rendering for terminal output
// JSON output is produced straight from the serde types in the handlers

pub mod board;
pub mod diagnostics;
pub mod table;

use owo_colors::{AnsiColors, OwoColorize};
use tabula_engine::Projection;
use tabula_types::{Database, Property, View};

/// Applies ANSI styles only when color output is enabled.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn bold(&self, text: &str) -> String {
        if self.enabled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn dim(&self, text: &str) -> String {
        if self.enabled {
            text.bright_black().to_string()
        } else {
            text.to_string()
        }
    }

    /// Paint `text` in a select option's named color
    pub fn option(&self, text: &str, color: &str) -> String {
        if self.enabled {
            text.color(option_color(color)).bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn error(&self, text: &str) -> String {
        if self.enabled {
            text.red().bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn warning(&self, text: &str) -> String {
        if self.enabled {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn success(&self, text: &str) -> String {
        if self.enabled {
            text.green().bold().to_string()
        } else {
            text.to_string()
        }
    }
}

fn option_color(name: &str) -> AnsiColors {
    match name {
        "red" => AnsiColors::Red,
        "orange" => AnsiColors::BrightRed,
        "yellow" => AnsiColors::Yellow,
        "green" => AnsiColors::Green,
        "blue" => AnsiColors::Blue,
        "purple" | "pink" => AnsiColors::Magenta,
        "brown" => AnsiColors::BrightYellow,
        _ => AnsiColors::BrightBlack,
    }
}

/// Truncate to `max_chars` characters, marking the cut with an ellipsis.
///
/// Respects UTF-8 character boundaries. A limit below 2 disables truncation.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if max_chars < 2 || text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars - 1).collect();
    format!("{}…", kept)
}

/// Visible properties in presentation order
pub fn visible_columns(properties: &[Property]) -> Vec<&Property> {
    let mut columns: Vec<&Property> = properties.iter().filter(|p| p.visible).collect();
    columns.sort_by_key(|p| p.order);
    columns
}

/// Render the result of `show` for a terminal.
pub fn render_projection(
    database: &Database,
    view: Option<&View>,
    projection: &Projection<'_>,
    max_column_width: usize,
    painter: &Painter,
) -> String {
    let mut out = String::new();
    let heading = match view {
        Some(view) => format!("{} / {} [{}]", database.title, view.name, view.kind),
        None => database.title.clone(),
    };
    out.push_str(&painter.bold(&heading));
    out.push_str("\n\n");

    let body = match projection {
        Projection::Table { properties, items } => {
            table::render_table(properties, items, max_column_width, painter)
        }
        Projection::List { properties, items } => table::render_list(properties, items, painter),
        Projection::Board { property, columns } => {
            board::render_board(database, property, columns, painter)
        }
        Projection::BoardUnconfigured => painter.warning(
            "This board has no select property to group by. \
             Add one with `tabula property add --type select` or pick one with `tabula view group`.",
        ),
        Projection::Unsupported => painter.warning("This view type is not supported."),
        Projection::NoView => painter.dim("This database has no views."),
    };
    out.push_str(&body);
    out
}
