//! Errors raised while managing accounting dimensions and their fields.

use thiserror::Error;

/// Errors that can occur during dimension operations.
#[derive(Debug, Error)]
pub enum DimensionError {
    /// Creating the generated fields failed.
    #[error("Error creating fields for accounting dimension {label}")]
    FieldCreation {
        /// Label of the dimension whose fields could not be created.
        label: String,
    },

    /// Dimension not found.
    #[error("Accounting dimension not found: {0}")]
    NotFound(String),

    /// Another dimension already uses this name or field key.
    #[error("Accounting dimension '{0}' already exists")]
    Duplicate(String),

    /// Field key is not a valid field name.
    #[error("Invalid dimension field name '{0}': use lowercase letters, digits and underscores")]
    InvalidFieldname(String),

    /// Caller lacks permission.
    #[error("Not permitted")]
    NotPermitted,

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}
