//! Error types for the product store.

use crate::schema::ValidationErrors;
use crate::types::ProductId;
use thiserror::Error;

/// Main error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Store file is locked by another process")]
    Locked,
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

impl From<ValidationErrors> for StoreError {
    fn from(e: ValidationErrors) -> Self {
        StoreError::Validation(e)
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
