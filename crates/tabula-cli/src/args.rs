use crate::types::{Direction, LogLevel, OutputFormat, PropertyKind, ViewType};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tabula")]
#[command(about = "Inspect, validate and edit Notion-style database snapshots", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output format (defaults to `display.default_format` from the config)
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    /// Config file (overrides TABULA_CONFIG and the platform default)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate a view and print its items
    Show {
        file: PathBuf,

        /// View id (defaults to the active view)
        #[arg(long)]
        view: Option<String>,
    },

    /// Report schema problems and references views cannot resolve
    Validate {
        file: PathBuf,

        /// Fail on warnings as well as errors
        #[arg(long)]
        strict: bool,
    },

    /// Move an item to another board column
    Move {
        file: PathBuf,

        #[arg(long)]
        item: String,

        /// Target option label
        #[arg(long)]
        to: String,

        /// Select property to move along (defaults to the active view's grouping)
        #[arg(long)]
        property: Option<String>,
    },

    /// Manage saved views
    View {
        #[command(subcommand)]
        command: ViewCommand,
    },

    /// Manage schema properties
    Property {
        #[command(subcommand)]
        command: PropertyCommand,
    },
}

#[derive(Subcommand)]
pub enum ViewCommand {
    /// List views, marking the active one
    List { file: PathBuf },

    /// Switch the active view
    Use { file: PathBuf, view: String },

    /// Add a view
    Add {
        file: PathBuf,

        #[arg(long)]
        name: Option<String>,

        /// Defaults to the type after the active view's (table → board → list)
        #[arg(long = "type")]
        kind: Option<ViewType>,

        #[arg(long)]
        group_by: Option<String>,
    },

    /// Delete a view
    Delete { file: PathBuf, view: String },

    /// Append a filter to a view
    Filter {
        file: PathBuf,
        view: String,

        #[arg(long)]
        property: String,

        /// is, contains, is-empty or is-not-empty
        #[arg(long)]
        condition: String,

        /// Parsed according to the property type
        #[arg(long)]
        value: Option<String>,
    },

    /// Remove a filter by its position (0-based)
    Unfilter {
        file: PathBuf,
        view: String,
        index: usize,
    },

    /// Append a sort key to a view
    Sort {
        file: PathBuf,
        view: String,

        #[arg(long)]
        property: String,

        #[arg(long, default_value = "asc")]
        direction: Direction,
    },

    /// Set the property a board view groups by
    Group {
        file: PathBuf,
        view: String,

        #[arg(long)]
        property: String,
    },
}

#[derive(Subcommand)]
pub enum PropertyCommand {
    /// Add a property to the schema
    Add {
        file: PathBuf,

        #[arg(long)]
        name: String,

        #[arg(long = "type")]
        kind: PropertyKind,
    },

    /// Add an option to a select or multi-select property
    AddOption {
        file: PathBuf,
        property: String,
        label: String,

        #[arg(long, default_value = "gray")]
        color: String,
    },

    Rename {
        file: PathBuf,
        property: String,
        name: String,
    },

    /// Hide a property from table and list output
    Hide { file: PathBuf, property: String },

    /// Show a hidden property again
    Reveal { file: PathBuf, property: String },

    /// Delete a property and clear its values (the title cannot be deleted)
    Delete { file: PathBuf, property: String },
}
