//! Core types for the product store.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a product.
///
/// Assigned only by the store's allocator, never taken from a payload, and
/// immutable once assigned.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductId(pub u64);

impl fmt::Debug for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProductId({})", self.0)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single product record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (assigned by store).
    pub id: ProductId,

    /// Product name, never empty.
    pub nome: String,

    /// Price.
    pub preco: f64,

    /// Optional free-text description, omitted from the serialized form
    /// when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
}

/// Complete serialized state of the store at a point in time.
///
/// This is the unit of persistence: the whole snapshot is rewritten on every
/// mutation, and `currentId` travels with the records so identifiers are
/// never reused across restarts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Next identifier to assign; strictly greater than every id ever
    /// assigned.
    #[serde(rename = "currentId")]
    pub current_id: u64,

    /// All products, in insertion order.
    pub produtos: Vec<Product>,
}

impl Snapshot {
    /// Snapshot for a store with no prior file.
    pub fn fresh() -> Self {
        Self {
            current_id: 1,
            produtos: Vec::new(),
        }
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::fresh()
    }
}
