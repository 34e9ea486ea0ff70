//! Domain-level errors

use thiserror::Error;

/// Domain errors represent misuse of the forest by the caller.
/// None of them are transient; retrying the same call fails the same way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ForestError {
    #[error("duplicate value in forest: {0}")]
    DuplicateValue(String),

    #[error("{role} not found in forest: {value}")]
    ValueNotFound { role: &'static str, value: String },

    #[error("depth is undefined for an empty forest")]
    EmptyForestDepth,

    #[error("ambiguous relationship shape: both a parent and a children accessor are declared")]
    AmbiguousShape,

    #[error("no relationship shape found: neither a parent nor a children accessor is declared")]
    NoShapeFound,

    #[error("invalid traversal mode: {0}")]
    InvalidTraversalMode(String),

    #[error("cycle detected in hierarchy: {0}")]
    CycleDetected(String),

    #[error("moving {value} under {new_parent} would create a cycle")]
    WouldCreateCycle { value: String, new_parent: String },
}

impl ForestError {
    pub(crate) fn not_found(role: &'static str, value: &impl std::fmt::Debug) -> Self {
        Self::ValueNotFound {
            role,
            value: format!("{:?}", value),
        }
    }

    pub(crate) fn duplicate(value: &impl std::fmt::Debug) -> Self {
        Self::DuplicateValue(format!("{:?}", value))
    }
}

/// Result type for forest operations.
pub type ForestResult<T> = Result<T, ForestError>;
