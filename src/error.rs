// ⚠️ Error types for the core
// Record store, aggregator and row codecs return these; nothing here panics or exits.

use thiserror::Error;

// ============================================================================
// RECORD ERRORS (constructor-time validation)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("{field} must be a positive integer, got {value}")]
    InvalidId { field: &'static str, value: u32 },

    #[error("name must not be blank")]
    BlankName,

    #[error("value must be a finite non-negative number, got {0}")]
    InvalidValue(f64),

    #[error("column '{column}' holds '{value}', which is not valid")]
    InvalidField { column: String, value: String },

    #[error("expected {expected} columns, found {found}")]
    ColumnCount { expected: usize, found: usize },
}

// ============================================================================
// STORE ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("'{0}' already exists")]
    DuplicateName(String),

    #[error("owner id {id} is used more than once (entry {index})")]
    DuplicateOwnerId { id: u32, index: usize },

    #[error("owner name '{name}' is used more than once (entry {index})")]
    DuplicateOwnerName { name: String, index: usize },

    #[error("measurement id {id} is used more than once (entry {index})")]
    DuplicateMeasurementId { id: u32, index: usize },

    #[error("no identifiers left in {0} collection")]
    IdsExhausted(&'static str),

    #[error(transparent)]
    Record(#[from] RecordError),
}

// ============================================================================
// AGGREGATE ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AggregateError {
    #[error("cannot aggregate an empty set of values")]
    Empty,

    #[error("group '{0}' has no measurements")]
    EmptyGroup(String),

    #[error("owner {0} has no measurements")]
    EmptyOwner(u32),

    #[error("measurement references unknown owner {0}")]
    UnknownOwner(u32),
}
