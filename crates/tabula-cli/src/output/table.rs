use super::{truncate, visible_columns, Painter};
use tabula_types::{Item, Property};

fn cell(item: &Item, property: &Property) -> String {
    item.value(&property.id)
        .map(ToString::to_string)
        .unwrap_or_default()
}

fn count_line(count: usize) -> String {
    match count {
        1 => "1 item".to_string(),
        n => format!("{} items", n),
    }
}

/// Aligned columns of every visible property, one row per item.
pub fn render_table(
    properties: &[Property],
    items: &[&Item],
    max_column_width: usize,
    painter: &Painter,
) -> String {
    let columns = visible_columns(properties);

    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            columns
                .iter()
                .map(|p| truncate(&cell(item, p), max_column_width))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, p)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(truncate(&p.name, max_column_width).chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    // Pad before painting; escape codes would throw off the widths
    let format_row = |cells: Vec<String>, paint: &dyn Fn(&str) -> String| {
        cells
            .iter()
            .zip(&widths)
            .map(|(text, width)| paint(&format!("{:<width$}", text, width = width)))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    let header = columns
        .iter()
        .map(|p| truncate(&p.name, max_column_width))
        .collect();
    lines.push(format_row(header, &|s: &str| painter.bold(s)));
    for row in rows {
        lines.push(format_row(row, &|s: &str| s.to_string()));
    }
    lines.push(String::new());
    lines.push(painter.dim(&count_line(items.len())));

    lines.join("\n")
}

/// One bullet per item: the title, then the other non-empty visible values.
pub fn render_list(properties: &[Property], items: &[&Item], painter: &Painter) -> String {
    let columns = visible_columns(properties);
    let mut lines = Vec::with_capacity(items.len() + 2);

    for item in items {
        let title = columns
            .iter()
            .find(|p| p.is_title())
            .map(|p| cell(item, p))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Untitled".to_string());

        let details: Vec<String> = columns
            .iter()
            .filter(|p| !p.is_title())
            .filter_map(|p| {
                let value = cell(item, p);
                (!value.is_empty()).then(|| format!("{}: {}", p.name, value))
            })
            .collect();

        if details.is_empty() {
            lines.push(format!("• {}", painter.bold(&title)));
        } else {
            lines.push(format!(
                "• {}  {}",
                painter.bold(&title),
                painter.dim(&details.join(" · "))
            ));
        }
    }

    lines.push(String::new());
    lines.push(painter.dim(&count_line(items.len())));
    lines.join("\n")
}
