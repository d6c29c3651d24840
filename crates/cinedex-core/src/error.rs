//! Error types for Cinedex.

use thiserror::Error;

use crate::id::DirectorId;

/// Top-level result type for Cinedex operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Top-level error type for Cinedex.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("integrity error: {0}")]
    Integrity(#[from] IntegrityError),

    #[error("invalid request: {0}")]
    Filter(#[from] FilterError),

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },

    #[error("storage error: {0}")]
    Storage(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Violations of the catalog invariants, raised while the dataset is built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrityError {
    /// A movie references a director that does not exist.
    #[error("movie '{title}' references nonexistent director {director}")]
    MissingDirector { title: String, director: DirectorId },

    #[error("unknown {kind} {id} in association")]
    UnknownEndpoint { kind: &'static str, id: i64 },

    #[error("genre name '{0}' is already taken")]
    DuplicateGenreName(String),

    #[error("{kind} id {id} is already assigned")]
    DuplicateId { kind: &'static str, id: i64 },

    #[error("{kind} id must be a positive integer, got {value}")]
    InvalidId { kind: &'static str, value: i64 },

    #[error("no {kind} identifiers left to assign")]
    IdsExhausted { kind: &'static str },

    #[error("movie '{title}' has non-positive release year {year}")]
    InvalidReleaseYear { title: String, year: i64 },
}

/// Inbound request values that fail validation at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("invalid {param}: expected a positive integer, got {value}")]
    InvalidFilterValue { param: &'static str, value: i64 },
}
