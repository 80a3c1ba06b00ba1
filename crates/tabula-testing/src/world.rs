//! TestWorld pattern for declarative integration test setup.
//!
//! Provides a fluent interface for:
//! - Creating isolated test environments
//! - Writing database snapshots and config files into them
//! - Executing CLI commands with proper context

use anyhow::Result;
use assert_cmd::Command;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tabula_types::Database;
use tempfile::TempDir;

/// Declarative test environment builder.
///
/// The config path is always pinned through `TABULA_CONFIG`, so a developer's
/// own `~/.config/tabula/config.toml` never leaks into a test run.
///
/// # Example
/// ```no_run
/// use tabula_testing::{TestWorld, sample_tasks_database};
///
/// let world = TestWorld::new().with_database("tasks.json", &sample_tasks_database());
///
/// let result = world.run(&["show", "tasks.json"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    config_path: PathBuf,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config").join("tabula.toml");

        Self {
            temp_dir,
            config_path,
            env_vars: HashMap::new(),
        }
    }

    /// Get the temp directory root (also the CLI's working directory).
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the config file path handed to the CLI.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Resolve a file name relative to the temp root.
    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Write a database snapshot under `name`.
    pub fn with_database(self, name: &str, database: &Database) -> Self {
        database
            .save_to(&self.path(name))
            .expect("Failed to write database snapshot");
        self
    }

    /// Write raw file contents under `name` (for malformed snapshots).
    pub fn with_file(self, name: &str, contents: &str) -> Self {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(path, contents).expect("Failed to write file");
        self
    }

    /// Write the TOML config the CLI will pick up.
    pub fn with_config(self, toml: &str) -> Self {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create config dir");
        }
        std::fs::write(&self.config_path, toml).expect("Failed to write config");
        self
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Re-read a snapshot, e.g. after a command wrote it back.
    pub fn load_database(&self, name: &str) -> Result<Database> {
        Ok(Database::load_from(&self.path(name))?)
    }

    /// Configure a CLI command with this test environment's settings.
    ///
    /// The caller must provide the base command (e.g., from `cargo_bin_cmd!("tabula")`).
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.env("TABULA_CONFIG", &self.config_path)
            .env_remove("RUST_LOG")
            .current_dir(self.temp_dir.path());

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Execute a command using the project's binary and return the result.
    ///
    /// # Note
    /// This method uses `Command::cargo_bin()` which requires the binary to be
    /// built, which cargo test does automatically for the `tabula` package.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("tabula")
            .map_err(|e| anyhow::anyhow!("Failed to find tabula binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Check if the command succeeded.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_tasks_database;

    #[test]
    fn test_world_writes_snapshot() {
        let db = sample_tasks_database();
        let world = TestWorld::new().with_database("nested/tasks.json", &db);

        assert!(world.path("nested/tasks.json").exists());
        assert_eq!(world.load_database("nested/tasks.json").unwrap(), db);
    }

    #[test]
    fn test_world_config_is_isolated() {
        let world = TestWorld::new();
        assert!(world.config_path().starts_with(world.root()));
        assert!(!world.config_path().exists());

        let world = world.with_config("[validate]\nstrict = true\n");
        assert!(world.config_path().exists());
    }
}
