//! The product store: validated mutations over a file-backed snapshot.
//!
//! Every mutating operation follows the same sequence under one write lock:
//! validate, apply to a scratch copy, persist, commit to memory. The commit
//! happens only after the save succeeds, so the in-memory collection and the
//! on-disk snapshot never diverge past a single failed operation.

use crate::error::{Result, StoreError};
use crate::ids::IdAllocator;
use crate::schema::{self, Payload};
use crate::snapshot::SnapshotFile;
use crate::types::{Product, ProductId, Snapshot};
use parking_lot::RwLock;
use std::path::Path;
use tracing::{debug, warn};

/// File-backed collection of products.
///
/// The only component the transport layer talks to. Reads take the lock
/// shared and may run concurrently; mutations hold it exclusively for their
/// whole validate-mutate-persist sequence, which also serializes identifier
/// allocation.
pub struct ProductStore {
    file: SnapshotFile,
    inner: RwLock<Inner>,
}

struct Inner {
    produtos: Vec<Product>,
    alloc: IdAllocator,
}

impl Inner {
    /// Exact typed id equality; ids are never matched by coercion.
    fn position(&self, id: ProductId) -> Option<usize> {
        self.produtos.iter().position(|p| p.id == id)
    }
}

impl ProductStore {
    /// Open the store at `path`, loading the existing snapshot or writing a
    /// fresh one if no file exists yet.
    pub fn open_or_create(path: impl AsRef<Path>) -> Result<Self> {
        let file = SnapshotFile::open(path)?;

        let snapshot = if file.exists() {
            file.load()?
        } else {
            let fresh = Snapshot::fresh();
            file.save(&fresh)?;
            fresh
        };

        debug!(
            path = %file.path().display(),
            products = snapshot.produtos.len(),
            current_id = snapshot.current_id,
            "store opened"
        );

        Ok(Self {
            inner: RwLock::new(Inner {
                alloc: IdAllocator::starting_at(snapshot.current_id),
                produtos: snapshot.produtos,
            }),
            file,
        })
    }

    /// All products, in insertion order.
    pub fn list(&self) -> Vec<Product> {
        self.inner.read().produtos.clone()
    }

    /// Validate, build and append a new product, persisting before returning.
    pub fn create(&self, payload: &Payload) -> Result<Product> {
        let validated = schema::validate_full(payload)?;

        let mut inner = self.inner.write();
        let mut alloc = inner.alloc;
        let product = Product {
            id: alloc.allocate(),
            nome: validated.nome,
            preco: validated.preco,
            descricao: validated.descricao,
        };

        let mut produtos = inner.produtos.clone();
        produtos.push(product.clone());
        self.commit(&mut inner, produtos, alloc)?;

        debug!(id = %product.id, "product created");
        Ok(product)
    }

    /// Replace an existing product's fields with a fully validated payload.
    ///
    /// Full replacement semantics: the payload must satisfy the whole schema,
    /// and an absent `descricao` clears the stored one. The id itself is
    /// never replaced.
    pub fn update(&self, id: ProductId, payload: &Payload) -> Result<Product> {
        let validated = schema::validate_full(payload)?;

        let mut inner = self.inner.write();
        let position = inner.position(id).ok_or(StoreError::ProductNotFound(id))?;

        let product = Product {
            id,
            nome: validated.nome,
            preco: validated.preco,
            descricao: validated.descricao,
        };

        let mut produtos = inner.produtos.clone();
        produtos[position] = product.clone();
        let alloc = inner.alloc;
        self.commit(&mut inner, produtos, alloc)?;

        debug!(id = %id, "product replaced");
        Ok(product)
    }

    /// Merge a partially validated payload into an existing product.
    ///
    /// Only the fields named by the payload are validated and merged; every
    /// other field is left untouched.
    pub fn patch(&self, id: ProductId, payload: &Payload) -> Result<Product> {
        let mut inner = self.inner.write();
        let position = inner.position(id).ok_or(StoreError::ProductNotFound(id))?;

        let patch = schema::validate_partial(payload)?;

        let mut produtos = inner.produtos.clone();
        patch.apply_to(&mut produtos[position]);
        let product = produtos[position].clone();
        let alloc = inner.alloc;
        self.commit(&mut inner, produtos, alloc)?;

        debug!(id = %id, "product patched");
        Ok(product)
    }

    /// Remove a product and persist the shrunk collection.
    pub fn delete(&self, id: ProductId) -> Result<()> {
        let mut inner = self.inner.write();
        let position = inner.position(id).ok_or(StoreError::ProductNotFound(id))?;

        let mut produtos = inner.produtos.clone();
        produtos.remove(position);
        let alloc = inner.alloc;
        self.commit(&mut inner, produtos, alloc)?;

        debug!(id = %id, "product deleted");
        Ok(())
    }

    /// Persist a candidate snapshot, then swap it into memory.
    ///
    /// Called with the write lock held. On a failed save the in-memory state
    /// is left at its pre-mutation value and the error propagates to the
    /// caller as the operation's result.
    fn commit(&self, inner: &mut Inner, produtos: Vec<Product>, alloc: IdAllocator) -> Result<()> {
        let candidate = Snapshot {
            current_id: alloc.peek(),
            produtos,
        };

        if let Err(e) = self.file.save(&candidate) {
            warn!(error = %e, "snapshot save failed, keeping previous state");
            return Err(e);
        }

        inner.produtos = candidate.produtos;
        inner.alloc = alloc;
        Ok(())
    }
}
