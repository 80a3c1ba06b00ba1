//! Testing infrastructure for tabula unit and integration tests.
//!
//! This crate provides utilities for writing robust tests:
//! - `TestWorld`: Fluent interface for declarative CLI test setup
//! - `assertions`: Custom assertions over the CLI's JSON output
//! - `fixtures`: Sample databases and a `DatabaseBuilder`

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use fixtures::{DatabaseBuilder, sample_tasks_database};
pub use world::TestWorld;
