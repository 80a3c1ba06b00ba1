// NOTE: tabula Architecture Rationale
//
// Why snapshot files (not a live store)?
// - The engine is pure: (items, properties, view) in, projection out
// - A JSON snapshot is the whole input tuple, so every command is reproducible
// - Trade-off: concurrent writers are not coordinated; this is a single-user tool
//
// Why degrade instead of failing?
// - Views outlive the properties they reference (deletes leave references dangling)
// - `show` must still render something useful, so bad references fall back quietly
// - `validate` is where those silent fallbacks become visible
//
// Why last-sort-wins?
// - Each sort key is a full stable re-sort, matching how saved views behave today
// - Earlier keys only survive as tie-breakers of later ones

mod args;
mod commands;
pub mod config;
mod handlers;
pub mod logging;
pub mod output;
pub mod types;

pub use args::{Cli, Commands, PropertyCommand, ViewCommand};
pub use commands::run;
