use super::HandlerContext;
use crate::output::diagnostics::render_report;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use tabula_engine::{validate_database, Diagnostic};

#[derive(Serialize)]
struct ValidateOutput<'a> {
    diagnostics: &'a [Diagnostic],
    errors: usize,
    warnings: usize,
}

pub fn handle(ctx: &HandlerContext, file: &Path, strict: bool) -> Result<()> {
    let database = ctx.load(file)?;
    let report = validate_database(&database);

    let errors = report.errors().count();
    let warnings = report.warnings().count();
    let out = ValidateOutput {
        diagnostics: &report.diagnostics,
        errors,
        warnings,
    };
    ctx.render(&out, |painter| render_report(&report, painter))?;

    let strict = strict || ctx.config.validate.strict;
    if errors > 0 || (strict && warnings > 0) {
        anyhow::bail!(
            "validation failed: {} error(s), {} warning(s)",
            errors,
            warnings
        );
    }

    Ok(())
}
