// Engine module - View evaluation (filter, sort, board grouping, diagnostics)
// This layer sits between the data model (types) and CLI presentation

pub mod board;
pub mod diagnostics;
pub mod filter;
pub mod projection;
pub mod sort;

pub use board::{group_by_option, move_to_column, resolve_group_property, BoardColumn, BoardGrouping};
pub use diagnostics::{validate_database, Diagnostic, DiagnosticKind, Severity, ValidationReport};
pub use filter::apply_filters;
pub use projection::{project, project_database, Projection};
pub use sort::{apply_sorts, compare_values};

