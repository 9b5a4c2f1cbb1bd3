//! Error types for parameter assignment.

use thiserror::Error;

/// Failure raised while applying a `name=value` parameter list.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParameterError {
    /// A segment did not contain exactly one `=`.
    #[error("parameter '{raw}' is not valid, expected name=value (e.g. NT=5,ADATCP=ON,OPTIONS=(A,B))")]
    MalformedParameter {
        /// Offending segment as typed.
        raw: String,
    },
    /// An integer field received text that does not parse as a number.
    #[error("incorrect value '{raw}' for {field}")]
    InvalidValue {
        /// Field name as typed by the operator.
        field: String,
        /// Rejected value.
        raw: String,
    },
    /// Input ended inside an `OPTIONS=(...)` list.
    #[error("OPTIONS list '{partial}' is missing its closing parenthesis")]
    UnterminatedOptions {
        /// Option text collected before the input ended.
        partial: String,
    },
}

/// Convenience alias for parameter assignment results.
pub type ParameterResult<T> = Result<T, ParameterError>;
