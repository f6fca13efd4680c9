use std::{path::PathBuf, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use crate::storage::json_list_store::JsonListStore;

mod store;
mod validate;

pub use store::CatalogStore;

/// Customer rating attached to a product.
/// - rate: 0–5, at most one decimal place
/// - count: number of votes, at least 1
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Rating {
    pub rate: f64,
    pub count: u64,
}

/// Product record as served and stored.
/// The id is unique across the collection and assigned by the store.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

/// Creation payload: no id, it is assigned on append. Unknown keys are
/// rejected at the deserialization layer, like every other payload
/// failure.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NewProduct {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

/// Partial update payload: every field optional, applied as a shallow
/// overlay. A supplied `id` is overlaid verbatim like any other field,
/// which can desynchronize the record's id from the one used to look it
/// up — a documented inconsistency kept for contract compatibility.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

impl NewProduct {
    fn fields(&self) -> validate::FieldsView<'_> {
        validate::FieldsView {
            id: None,
            title: Some(&self.title),
            price: Some(self.price),
            description: Some(&self.description),
            category: Some(&self.category),
            image: Some(&self.image),
            rating: self.rating.as_ref(),
        }
    }
}

impl ProductPatch {
    fn fields(&self) -> validate::FieldsView<'_> {
        validate::FieldsView {
            id: self.id,
            title: self.title.as_deref(),
            price: self.price,
            description: self.description.as_deref(),
            category: self.category.as_deref(),
            image: self.image.as_deref(),
            rating: self.rating.as_ref(),
        }
    }
}

/// In-memory product collection seeded from a JSON dataset at startup.
#[derive(Clone)]
pub struct ProductCatalog {
    store: Arc<JsonListStore<Product>>,
}

impl ProductCatalog {
    /// Load the catalog from the seed dataset. A missing or malformed
    /// dataset is fatal; the service must not come up without it.
    pub async fn load<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonListStore::<Product>::new(path).await?;
        Ok(Arc::new(Self { store }))
    }

    /// Full collection in insertion order.
    pub async fn list(&self) -> Vec<Product> {
        self.store.list().await
    }

    /// Linear scan by id.
    pub async fn get(&self, id: u64) -> Option<Product> {
        self.store.find(|p| p.id == id).await
    }

    /// Validate, assign the next id, append; returns the full updated
    /// collection.
    pub async fn create(&self, input: NewProduct) -> Result<Vec<Product>, ServiceError> {
        validate::check_fields(&input.fields())?;
        let mut collection: Option<Vec<Product>> = None;
        self.store
            .update_list(|items| {
                // max + 1 keeps ids monotonic even after deletes at the
                // tail; an empty collection starts at 1
                let id = items.iter().map(|p| p.id).max().unwrap_or(0) + 1;
                items.push(Product {
                    id,
                    title: input.title,
                    price: input.price,
                    description: input.description,
                    category: input.category,
                    image: input.image,
                    rating: input.rating,
                });
                collection = Some(items.clone());
                Ok(())
            })
            .await?;
        Ok(collection.expect("collection set"))
    }

    /// Overlay the submitted fields onto an existing record. Not-found
    /// wins over validation, matching the request flow order.
    pub async fn update(&self, id: u64, patch: ProductPatch) -> Result<Product, ServiceError> {
        let mut updated: Option<Product> = None;
        self.store
            .update_list(|items| {
                let existing = items
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or_else(|| ServiceError::not_found("product"))?;
                validate::check_fields(&patch.fields())?;
                if let Some(new_id) = patch.id {
                    existing.id = new_id;
                }
                if let Some(title) = patch.title {
                    existing.title = title;
                }
                if let Some(price) = patch.price {
                    existing.price = price;
                }
                if let Some(description) = patch.description {
                    existing.description = description;
                }
                if let Some(category) = patch.category {
                    existing.category = category;
                }
                if let Some(image) = patch.image {
                    existing.image = image;
                }
                if let Some(rating) = patch.rating {
                    existing.rating = Some(rating);
                }
                updated = Some(existing.clone());
                Ok(())
            })
            .await?;
        Ok(updated.expect("updated set"))
    }

    /// Remove a record by id and return it.
    pub async fn delete(&self, id: u64) -> Result<Product, ServiceError> {
        let mut removed: Option<Product> = None;
        self.store
            .update_list(|items| {
                let idx = items
                    .iter()
                    .position(|p| p.id == id)
                    .ok_or_else(|| ServiceError::not_found("product"))?;
                removed = Some(items.remove(idx));
                Ok(())
            })
            .await?;
        Ok(removed.expect("removed set"))
    }
}

#[async_trait::async_trait]
impl CatalogStore for ProductCatalog {
    async fn list(&self) -> Vec<Product> { self.list().await }
    async fn get(&self, id: u64) -> Option<Product> { self.get(id).await }
    async fn create(&self, input: NewProduct) -> Result<Vec<Product>, ServiceError> { self.create(input).await }
    async fn update(&self, id: u64, patch: ProductPatch) -> Result<Product, ServiceError> { self.update(id, patch).await }
    async fn delete(&self, id: u64) -> Result<Product, ServiceError> { self.delete(id).await }
}
