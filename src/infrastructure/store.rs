//! Document store abstraction for the `foods` collection

use async_trait::async_trait;

use crate::app::foods::model::{Food, FoodId, FoodPatch, NewFood};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The connection string is present but unusable.
    #[error("MONGODB_URI is not usable: {0}")]
    NotConfigured(String),

    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),

    #[error("store returned a non-ObjectId identifier: {0}")]
    UnexpectedId(String),
}

impl StoreError {
    pub fn is_not_configured(&self) -> bool {
        matches!(self, StoreError::NotConfigured(_))
    }
}

/// Single-document operations over the food collection.
///
/// Every method touches at most one document; concurrent writers race at
/// the store with last-write-wins semantics.
#[async_trait]
pub trait FoodStore: Send + Sync {
    /// All records in store-native order.
    async fn list(&self) -> StoreResult<Vec<Food>>;

    /// Inserts a new document and returns the identity the store assigned.
    async fn insert(&self, food: &NewFood) -> StoreResult<FoodId>;

    /// Sets the fields present in `patch`. Returns the number of matched documents.
    async fn update(&self, id: FoodId, patch: &FoodPatch) -> StoreResult<u64>;

    /// Removes the document if present. Returns the number of deleted documents.
    async fn delete(&self, id: FoodId) -> StoreResult<u64>;
}
