use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::cart::CartQuoteRequest,
    error::AppResult,
    middleware::validation::ValidatedJson,
    quote::CartQuote,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/quote", post(quote))
}

/// The quote body is returned bare (`{ total, items }`), without the
/// `ApiResponse` envelope used by the catalog endpoints.
#[utoipa::path(
    post,
    path = "/api/cart/quote",
    request_body = CartQuoteRequest,
    responses(
        (status = 200, description = "Priced cart", body = CartQuote),
        (status = 400, description = "Validation error or insufficient stock"),
        (status = 404, description = "Store product not found"),
    ),
    tag = "Cart"
)]
pub async fn quote(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CartQuoteRequest>,
) -> AppResult<Json<CartQuote>> {
    let quote = cart_service::quote(&state, payload).await?;
    Ok(Json(quote))
}
