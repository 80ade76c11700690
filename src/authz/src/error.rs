//! Error types for the access engine
//!
//! Evaluation itself never fails. These errors only surface at the
//! boundaries: turning upstream identity data into a [`Principal`],
//! loading a descriptor catalog, or recording an audit entry.
//!
//! [`Principal`]: crate::principal::Principal

use thiserror::Error;

/// Access engine errors
#[derive(Debug, Error)]
pub enum AuthzError {
    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Role name outside the compiled role order
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Department tag outside the compiled department set
    #[error("Unknown department: {0}")]
    UnknownDepartment(String),

    /// Module name outside the compiled module set
    #[error("Unknown module: {0}")]
    UnknownModule(String),

    /// Action name outside the compiled action set
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// Invalid descriptor catalog
    #[error("Invalid catalog: {0}")]
    Catalog(String),

    /// No descriptor registered under the given id
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// An audit entry was requested for a decision that did not allow
    #[error("Action not allowed: {0}")]
    NotAllowed(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for access engine operations
pub type Result<T> = std::result::Result<T, AuthzError>;
