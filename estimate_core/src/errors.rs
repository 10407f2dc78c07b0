//! # Error Types
//!
//! Structured error types for estimate_core. The pricing functions themselves
//! never fail; these errors come from the boundary around them: input
//! validation, catalog lookups and the settings store.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::errors::{EstimateError, EstimateResult};
//!
//! fn validate_quantity(quantity: f64) -> EstimateResult<()> {
//!     if !(quantity > 0.0) {
//!         return Err(EstimateError::invalid_input(
//!             "quantity",
//!             quantity.to_string(),
//!             "Quantity must be greater than 0",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_quantity(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for estimate_core operations
pub type EstimateResult<T> = Result<T, EstimateError>;

/// Structured error type for estimate operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum EstimateError {
    /// An input value is out of range or malformed
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A line item or estimate failed boundary validation
    #[error("Validation failed: {reason}")]
    ValidationFailed { reason: String },

    /// Baseline catalog has no entry with this id
    #[error("Material not found: {material_id}")]
    MaterialNotFound { material_id: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// Settings file is being written by another process
    #[error("File locked: '{path}' is locked by {locked_by}")]
    FileLocked { path: String, locked_by: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Settings file schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl EstimateError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimateError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        EstimateError::MissingField { field: field.into() }
    }

    /// Create a ValidationFailed error
    pub fn validation_failed(reason: impl Into<String>) -> Self {
        EstimateError::ValidationFailed { reason: reason.into() }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_id: impl Into<String>) -> Self {
        EstimateError::MaterialNotFound {
            material_id: material_id.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimateError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>) -> Self {
        EstimateError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
        }
    }

    /// Create a SerializationError from any displayable cause
    pub fn serialization(reason: impl std::fmt::Display) -> Self {
        EstimateError::SerializationError {
            reason: reason.to_string(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EstimateError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            EstimateError::InvalidInput { .. } => "INVALID_INPUT",
            EstimateError::MissingField { .. } => "MISSING_FIELD",
            EstimateError::ValidationFailed { .. } => "VALIDATION_FAILED",
            EstimateError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            EstimateError::FileError { .. } => "FILE_ERROR",
            EstimateError::FileLocked { .. } => "FILE_LOCKED",
            EstimateError::SerializationError { .. } => "SERIALIZATION_ERROR",
            EstimateError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}
