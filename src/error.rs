use thiserror::Error;

/// Errors raised by the scheduling core.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolveError {
    #[error("the number of equipment must be greater than 0 (got {equipment_count})")]
    InvalidConfiguration { equipment_count: i64 },

    #[error("malformed instance: {0}")]
    MalformedInstance(String),
}

/// Errors raised while reading the flat text instance format.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("missing header line {expected} (equipment, student and exercise counts are required)")]
    MissingHeader { expected: usize },

    #[error("line {line}: expected `key = value`, found {content:?}")]
    MalformedHeader { line: usize, content: String },

    #[error("line {line}: {reason}")]
    MalformedExercise { line: usize, reason: String },

    #[error(transparent)]
    Instance(#[from] SolveError),
}
