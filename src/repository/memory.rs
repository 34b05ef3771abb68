use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use super::{ProductRepository, ValidationError};
use crate::models::{NewProduct, Product};

/// Process-local product store.
///
/// The map and the id counter live behind one lock so that advancing the
/// counter and inserting the record are observed together or not at all.
#[derive(Debug)]
pub struct InMemoryProductRepository {
    inner: RwLock<Inner>,
}

#[derive(Debug)]
struct Inner {
    products: HashMap<u64, Product>,
    next_id: u64,
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                products: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    // Every write completes its mutation before releasing the guard, so a
    // poisoned lock still holds consistent state.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ProductRepository for InMemoryProductRepository {
    fn list(&self) -> Vec<Product> {
        self.read().products.values().cloned().collect()
    }

    fn create(&self, candidate: NewProduct) -> Result<Product, ValidationError> {
        candidate.validate()?;

        let mut inner = self.write();
        let id = inner.next_id;
        inner.next_id += 1;

        let product = Product {
            id: id.to_string(),
            name: candidate.name,
            price_cents: candidate.price_cents,
            created_at: Utc::now(),
        };
        inner.products.insert(id, product.clone());

        tracing::debug!(id = %product.id, "Stored product");
        Ok(product)
    }
}
