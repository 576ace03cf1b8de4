//! Domain models for clinic visit analytics.

mod criteria;
mod month;
mod visit;

pub use criteria::*;
pub use month::*;
pub use visit::*;

use thiserror::Error;

/// Errors raised when records enter the system.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid month key (expected YYYY-MM): {0}")]
    InvalidMonth(String),

    #[error("Recurrence must be at least 1 for record {0}")]
    InvalidRecurrence(String),

    #[error("Duplicate record id: {0}")]
    DuplicateId(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ModelResult<T> = Result<T, ModelError>;
