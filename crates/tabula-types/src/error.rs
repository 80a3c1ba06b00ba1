use std::fmt;

use crate::{ItemId, PropertyId, ViewId};

/// Result type for tabula-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types raised by schema-mutating operations and snapshot I/O.
///
/// View evaluation never produces these; the engine degrades gracefully instead.
#[derive(Debug)]
pub enum Error {
    /// IO operation failed
    Io(std::io::Error),

    /// Snapshot could not be (de)serialized
    Json(serde_json::Error),

    /// No property with this id exists in the schema
    PropertyNotFound(PropertyId),

    /// No item with this id exists in the database
    ItemNotFound(ItemId),

    /// No view with this id exists in the database
    ViewNotFound(ViewId),

    /// The title property cannot be deleted
    TitleProtected(PropertyId),

    /// A schema already has its single title property
    DuplicateTitle,

    /// Option labels must be unique within a property
    DuplicateOption { property: PropertyId, label: String },

    /// Operation requires a `select` property
    NotASelectProperty(PropertyId),

    /// Label is not one of the property's configured options
    UnknownOption { property: PropertyId, label: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Underlying error is reported through `source()`
            Error::Io(_) => write!(f, "IO error"),
            Error::Json(_) => write!(f, "invalid JSON snapshot"),
            Error::PropertyNotFound(id) => write!(f, "Property not found: {}", id),
            Error::ItemNotFound(id) => write!(f, "Item not found: {}", id),
            Error::ViewNotFound(id) => write!(f, "View not found: {}", id),
            Error::TitleProtected(id) => {
                write!(f, "Property {} is the title property and cannot be deleted", id)
            }
            Error::DuplicateTitle => write!(f, "Schema already has a title property"),
            Error::DuplicateOption { property, label } => {
                write!(f, "Option '{}' already exists on property {}", label, property)
            }
            Error::NotASelectProperty(id) => write!(f, "Property {} is not a select property", id),
            Error::UnknownOption { property, label } => {
                write!(f, "Option '{}' is not defined on property {}", label, property)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
