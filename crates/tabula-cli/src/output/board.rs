use super::Painter;
use tabula_engine::BoardColumn;
use tabula_types::{Database, Property};

/// Columns stacked vertically: a colored header per option, then its items.
pub fn render_board(
    database: &Database,
    property: &Property,
    columns: &[BoardColumn<'_>],
    painter: &Painter,
) -> String {
    let title_property = database.title_property();
    let mut lines = Vec::new();

    for column in columns {
        lines.push(format!(
            "{} {}",
            painter.option(column.label, column.color),
            painter.dim(&format!("({})", column.items.len()))
        ));

        if column.items.is_empty() {
            lines.push(format!("  {}", painter.dim("(empty)")));
        }
        for item in &column.items {
            let title = title_property
                .and_then(|p| item.value(&p.id))
                .map(ToString::to_string)
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Untitled".to_string());
            lines.push(format!("  • {}", title));
        }
        lines.push(String::new());
    }

    let shown: usize = columns.iter().map(|c| c.items.len()).sum();
    lines.push(painter.dim(&format!("grouped by {} · {} shown", property.name, shown)));
    lines.join("\n")
}
