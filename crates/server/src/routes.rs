use axum::{routing::get, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub mod products;

use products::ServerState;

/// Plain greeting served at the root path.
pub async fn home() -> &'static str {
    "Home"
}

/// Build the full application router: greeting plus the product CRUD API.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let root = Router::new().route("/", get(home));

    let api = Router::new()
        .route("/api/products", get(products::list).post(products::create))
        .route(
            "/api/products/:id",
            get(products::get_by_id)
                .put(products::update)
                .delete(products::remove),
        );

    root.merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
