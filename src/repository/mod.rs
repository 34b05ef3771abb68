mod memory;

pub use memory::InMemoryProductRepository;

use thiserror::Error;

use crate::models::{NewProduct, Product};

/// Reasons a candidate product is rejected by `ProductRepository::create`.
///
/// Display strings are surfaced verbatim to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name is required")]
    MissingName,

    #[error("price must be non-negative")]
    NegativePrice,
}

impl NewProduct {
    /// Checks the candidate, reporting only the first violated constraint.
    /// Name is checked before price.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.price_cents < 0 {
            return Err(ValidationError::NegativePrice);
        }
        Ok(())
    }
}

/// Storage capability for the product catalog.
///
/// Implementations own their collection and id sequence; callers only ever
/// see copies of stored records.
pub trait ProductRepository: Send + Sync {
    /// Snapshot of every stored product, in no particular order.
    fn list(&self) -> Vec<Product>;

    /// Validates `candidate`, assigns the next id and creation time, stores it
    /// and returns a copy of the stored record.
    fn create(&self, candidate: NewProduct) -> Result<Product, ValidationError>;
}
