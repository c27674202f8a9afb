//! Error taxonomy for the grading engine.
//!
//! Validation failures reject a request before anything is mutated; storage
//! failures carry the SQLite-level detail. Best-effort paths (audit append,
//! post-write recompute) log these instead of surfacing them; see the
//! pipeline in `aula-grading`.

pub mod storage_error;

pub use storage_error::StorageError;

/// Convenience alias used across the workspace.
pub type AulaResult<T> = Result<T, AulaError>;

/// Top-level error for all engine operations.
#[derive(Debug, thiserror::Error)]
pub enum AulaError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },
}

impl AulaError {
    /// Build a validation error for a named input field.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
