use axum::{Json, Router, http::StatusCode, http::Uri, routing::get};

use crate::{
    response::{ApiResponse, Meta},
    state::AppState,
};

pub mod cart;
pub mod doc;
pub mod health;
pub mod params;
pub mod products;
pub mod store_products;
pub mod stores;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/stores", stores::router())
        .nest("/products", products::router())
        .nest("/cart", cart::router())
}

/// Full application router: health, `/api`, docs and the JSON 404 fallback.
pub fn create_app_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .nest("/api", create_api_router())
        .merge(doc::scalar_docs())
        .fallback(not_found)
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
    let body = ApiResponse::success(
        "Not Found",
        serde_json::json!({ "path": uri.path() }),
        Some(Meta::empty()),
    );
    (StatusCode::NOT_FOUND, Json(body))
}
