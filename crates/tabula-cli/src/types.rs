use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use tabula_types::{PropertyType, SortDirection, ViewKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Plain,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

/// View types a user can create
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ViewType {
    Table,
    Board,
    List,
}

impl ViewType {
    /// Next type in the table → board → list cycle
    pub fn after(kind: ViewKind) -> Self {
        match kind {
            ViewKind::Table => ViewType::Board,
            ViewKind::Board => ViewType::List,
            ViewKind::List | ViewKind::Unsupported => ViewType::Table,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewType::Table => "Table",
            ViewType::Board => "Board",
            ViewType::List => "List",
        }
    }
}

impl From<ViewType> for ViewKind {
    fn from(value: ViewType) -> Self {
        match value {
            ViewType::Table => ViewKind::Table,
            ViewType::Board => ViewKind::Board,
            ViewType::List => ViewKind::List,
        }
    }
}

/// Property types a user can add (the title exists from creation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum PropertyKind {
    Text,
    Number,
    Select,
    MultiSelect,
    Checkbox,
    Date,
    Url,
}

impl From<PropertyKind> for PropertyType {
    fn from(value: PropertyKind) -> Self {
        match value {
            PropertyKind::Text => PropertyType::Text,
            PropertyKind::Number => PropertyType::Number,
            PropertyKind::Select => PropertyType::Select,
            PropertyKind::MultiSelect => PropertyType::MultiSelect,
            PropertyKind::Checkbox => PropertyType::Checkbox,
            PropertyKind::Date => PropertyType::Date,
            PropertyKind::Url => PropertyType::Url,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

impl From<Direction> for SortDirection {
    fn from(value: Direction) -> Self {
        match value {
            Direction::Asc => SortDirection::Asc,
            Direction::Desc => SortDirection::Desc,
        }
    }
}
