//! Error types for form configuration.
//!
//! Field validation failures are not errors: they are per-field messages held
//! in form state. The variants here describe programming mistakes that the
//! engine refuses to paper over.

use thiserror::Error;

/// Invalid form configuration or use of an unconfigured field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormConfigError {
    /// The same field name was declared twice.
    #[error("field '{field}' is declared more than once")]
    DuplicateField {
        /// Repeated field name.
        field: String,
    },

    /// An `equals` rule points at a field the form does not declare.
    #[error("field '{field}' must equal unknown field '{target}'")]
    UnknownEqualsTarget {
        /// Field carrying the rule.
        field: String,
        /// Missing comparison target.
        target: String,
    },

    /// A binding was requested for a field the form does not declare.
    #[error("field '{field}' is not part of this form")]
    UnknownField {
        /// Requested field name.
        field: String,
    },
}
