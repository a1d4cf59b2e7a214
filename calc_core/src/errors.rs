//! # Error Types
//!
//! Structured error types for calc_core. Errors carry enough context for a
//! UI to show a message and for a script to branch on [`CalcError::error_code`].
//!
//! Only two errors block a user action: an invalid (non-positive) volume and
//! a missing project name on save. Unknown enumeration codes never fail;
//! they resolve to documented defaults at the input boundary instead.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn check_volume(volume_m3: f64) -> CalcResult<()> {
//!     if volume_m3 <= 0.0 {
//!         return Err(CalcError::invalid_volume(volume_m3));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_volume(0.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for estimation and history operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Dimensions produced a zero, negative, or non-finite volume
    #[error("Please enter dimensions greater than zero (volume was {volume_m3} m³)")]
    InvalidVolume { volume_m3: f64 },

    /// Save requested without a project name
    #[error("Enter a project name")]
    MissingProjectName,

    /// Storage backend I/O error
    #[error("Storage error: {operation} on '{key}' - {reason}")]
    StorageError {
        operation: String,
        key: String,
        reason: String,
    },

    /// The on-disk store is locked by another process
    #[error("Store locked: '{path}' is held by another process")]
    StoreLocked { path: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidVolume error
    pub fn invalid_volume(volume_m3: f64) -> Self {
        CalcError::InvalidVolume { volume_m3 }
    }

    /// Create a StorageError
    pub fn storage_error(operation: impl Into<String>, key: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::StorageError {
            operation: operation.into(),
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError from anything displayable
    pub fn serialization(reason: impl std::fmt::Display) -> Self {
        CalcError::SerializationError {
            reason: reason.to_string(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::StoreLocked { .. })
    }

    /// Whether the error should be shown to the user as a blocking message
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidVolume { .. } | CalcError::MissingProjectName | CalcError::InvalidInput { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::InvalidVolume { .. } => "INVALID_VOLUME",
            CalcError::MissingProjectName => "MISSING_PROJECT_NAME",
            CalcError::StorageError { .. } => "STORAGE_ERROR",
            CalcError::StoreLocked { .. } => "STORE_LOCKED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}
