//! # Estoque
//!
//! A validated, file-backed product record store.
//!
//! ## Core Concepts
//!
//! - **Products**: Typed records with a store-assigned, never-reused id
//! - **Schema**: A static field table every mutation is validated against,
//!   accumulating all failing fields instead of stopping at the first
//! - **Snapshot**: The whole store state, mirrored to one JSON file after
//!   every successful mutation
//! - **API**: A thin axum shell mapping the five operations to HTTP
//!
//! ## Example
//!
//! ```ignore
//! use estoque::ProductStore;
//! use serde_json::json;
//!
//! let store = ProductStore::open_or_create("produtos.json")?;
//!
//! let payload = json!({"nome": "Cadeira", "preco": 50}).as_object().unwrap().clone();
//! let product = store.create(&payload)?;
//!
//! assert_eq!(store.list().len(), 1);
//! store.delete(product.id)?;
//! ```

pub mod api;
pub mod error;
pub mod ids;
pub mod schema;
pub mod snapshot;
pub mod store;
pub mod types;

// Re-exports
pub use error::{Result, StoreError};
pub use ids::IdAllocator;
pub use schema::{
    validate_full, validate_partial, FieldError, Payload, ProductPatch, ValidatedProduct,
    ValidationErrors,
};
pub use snapshot::SnapshotFile;
pub use store::ProductStore;
pub use types::{Product, ProductId, Snapshot};
