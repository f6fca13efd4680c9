use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use service::catalog::{CatalogStore, NewProduct, Product, ProductPatch};
use service::errors::ServiceError;

use crate::errors::ApiError;

/// Fixed lookup-failure body shared by GET/PUT/DELETE on `/api/products/:id`.
const NOT_FOUND_MSG: &str = "Product not found with the given id";

/// Shared handler state: the product catalog behind its store trait.
#[derive(Clone)]
pub struct ServerState {
    pub catalog: Arc<dyn CatalogStore>,
}

// Path ids are integers; anything non-numeric can match no record and is
// reported as a plain not-found, not a distinct parse error.
fn parse_id(raw: &str) -> Option<u64> {
    raw.parse::<u64>().ok()
}

fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, NOT_FOUND_MSG)
}

// A body that fails to deserialize (missing field, wrong type, unknown
// key) is a validation failure of the payload, so it reports as 400 with
// the serde message rather than axum's default 422.
fn bad_payload(rejection: JsonRejection) -> ApiError {
    ApiError::new(StatusCode::BAD_REQUEST, rejection.body_text())
}

/// List the full collection in insertion order.
pub async fn list(State(state): State<ServerState>) -> Json<Vec<Product>> {
    let items = state.catalog.list().await;
    info!(count = items.len(), "list products");
    Json(items)
}

/// Create a product; responds 201 with the full updated collection.
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<Vec<Product>>), ApiError> {
    let Json(input) = payload.map_err(bad_payload)?;
    match state.catalog.create(input).await {
        Ok(items) => {
            info!(count = items.len(), "created product");
            Ok((StatusCode::CREATED, Json(items)))
        }
        Err(ServiceError::Validation(msg)) => Err(ApiError::new(StatusCode::BAD_REQUEST, msg)),
        Err(e) => Err(ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())),
    }
}

/// Fetch a single product by its path id.
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let Some(id) = parse_id(&id) else {
        return Err(not_found());
    };
    match state.catalog.get(id).await {
        Some(product) => Ok(Json(product)),
        None => Err(not_found()),
    }
}

/// Overlay the submitted fields onto an existing product; responds 201
/// with the updated record.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<ProductPatch>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let Some(id) = parse_id(&id) else {
        return Err(not_found());
    };
    // the lookup failure outranks any payload problem
    if state.catalog.get(id).await.is_none() {
        return Err(not_found());
    }
    let Json(patch) = payload.map_err(bad_payload)?;
    match state.catalog.update(id, patch).await {
        Ok(product) => {
            info!(id, "updated product");
            Ok((StatusCode::CREATED, Json(product)))
        }
        Err(ServiceError::NotFound(_)) => Err(not_found()),
        Err(ServiceError::Validation(msg)) => Err(ApiError::new(StatusCode::BAD_REQUEST, msg)),
        Err(e) => Err(ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())),
    }
}

/// Remove a product; responds with the removed record.
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let Some(id) = parse_id(&id) else {
        return Err(not_found());
    };
    match state.catalog.delete(id).await {
        Ok(product) => {
            info!(id, "deleted product");
            Ok(Json(product))
        }
        Err(ServiceError::NotFound(_)) => Err(not_found()),
        Err(e) => Err(ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())),
    }
}
