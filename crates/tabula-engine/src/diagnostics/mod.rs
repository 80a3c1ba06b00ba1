// Diagnostics module - Schema validation and health checking
// Pure business logic: reports what view evaluation would silently degrade on

pub mod validator;

pub use validator::{validate_database, Diagnostic, DiagnosticKind, Severity, ValidationReport};
