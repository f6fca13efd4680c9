use async_trait::async_trait;

use super::{NewProduct, Product, ProductPatch};
use crate::errors::ServiceError;

/// Trait abstraction for product storage (CRUD over the seeded collection).
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list(&self) -> Vec<Product>;
    async fn get(&self, id: u64) -> Option<Product>;
    async fn create(&self, input: NewProduct) -> Result<Vec<Product>, ServiceError>;
    async fn update(&self, id: u64, patch: ProductPatch) -> Result<Product, ServiceError>;
    async fn delete(&self, id: u64) -> Result<Product, ServiceError>;
}
