use crate::config::Config;
use crate::output::Painter;
use crate::types::OutputFormat;
use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use std::path::Path;
use tabula_types::Database;

/// Context for handler execution with consistent load/save and presentation
pub struct HandlerContext {
    pub format: OutputFormat,
    pub config: Config,
}

impl HandlerContext {
    pub fn new(format: OutputFormat, config: Config) -> Self {
        Self { format, config }
    }

    pub fn load(&self, path: &Path) -> Result<Database> {
        let database = Database::load_from(path)
            .with_context(|| format!("failed to load database {}", path.display()))?;
        info!(
            "loaded '{}' from {} ({} properties, {} items, {} views)",
            database.title,
            path.display(),
            database.properties.len(),
            database.items.len(),
            database.views.len()
        );
        Ok(database)
    }

    pub fn save(&self, database: &Database, path: &Path) -> Result<()> {
        database
            .save_to(path)
            .with_context(|| format!("failed to write database {}", path.display()))?;
        info!("saved '{}' to {}", database.title, path.display());
        Ok(())
    }

    pub fn painter(&self) -> Painter {
        Painter::new(self.config.display.color.enabled())
    }

    /// Print `value` as JSON, or the plain rendering `plain` produces.
    pub fn render<T, F>(&self, value: &T, plain: F) -> Result<()>
    where
        T: Serialize,
        F: FnOnce(&Painter) -> String,
    {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
            OutputFormat::Plain => println!("{}", plain(&self.painter())),
        }
        Ok(())
    }
}
