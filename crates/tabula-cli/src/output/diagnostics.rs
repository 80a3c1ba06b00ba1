use super::Painter;
use tabula_engine::{Severity, ValidationReport};

pub fn render_report(report: &ValidationReport, painter: &Painter) -> String {
    if report.is_clean() {
        return painter.success("No problems found.");
    }

    let mut lines: Vec<String> = report
        .diagnostics
        .iter()
        .map(|d| {
            let tag = match d.severity {
                Severity::Error => painter.error("error"),
                Severity::Warning => painter.warning("warning"),
            };
            format!("{}: {}", tag, d.message)
        })
        .collect();

    let errors = report.errors().count();
    let warnings = report.warnings().count();
    lines.push(String::new());
    lines.push(format!(
        "{} problem{} ({} error{}, {} warning{})",
        errors + warnings,
        plural(errors + warnings),
        errors,
        plural(errors),
        warnings,
        plural(warnings)
    ));
    lines.join("\n")
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
