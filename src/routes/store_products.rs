use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::store_products::{
        CreateStoreProductRequest, StoreProductList, UpdateStoreProductRequest,
    },
    error::AppResult,
    middleware::{auth::AuthUser, validation::ValidatedJson},
    models::StoreProductDetail,
    response::ApiResponse,
    routes::params::StoreProductQuery,
    services::store_product_service,
    state::AppState,
};

/// Mounted under `/stores/{store_id}/products`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_store_products).post(create_store_product))
        .route(
            "/{store_product_id}",
            get(get_store_product)
                .patch(update_store_product)
                .delete(delete_store_product),
        )
}

#[utoipa::path(
    get,
    path = "/api/stores/{store_id}/products",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
        StoreProductQuery
    ),
    responses(
        (status = 200, description = "Active listings of a store", body = ApiResponse<StoreProductList>),
        (status = 404, description = "Store not found"),
    ),
    tag = "Store Products"
)]
pub async fn list_store_products(
    State(state): State<AppState>,
    Path(store_id): Path<Uuid>,
    Query(query): Query<StoreProductQuery>,
) -> AppResult<Json<ApiResponse<StoreProductList>>> {
    let resp = store_product_service::list_store_products(&state, store_id, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/stores/{store_id}/products/{store_product_id}",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
        ("store_product_id" = Uuid, Path, description = "Store product ID")
    ),
    responses(
        (status = 200, description = "Listing with product and store", body = ApiResponse<StoreProductDetail>),
        (status = 404, description = "Store product not found"),
    ),
    tag = "Store Products"
)]
pub async fn get_store_product(
    State(state): State<AppState>,
    Path((store_id, store_product_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<StoreProductDetail>>> {
    let resp = store_product_service::get_store_product(&state, store_id, store_product_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/stores/{store_id}/products",
    params(
        ("store_id" = Uuid, Path, description = "Store ID")
    ),
    request_body = CreateStoreProductRequest,
    responses(
        (status = 201, description = "Product added to store", body = ApiResponse<StoreProductDetail>),
        (status = 400, description = "Validation error or product already listed"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Store or product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Store Products"
)]
pub async fn create_store_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(store_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<CreateStoreProductRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<StoreProductDetail>>)> {
    let resp =
        store_product_service::create_store_product(&state, &user, store_id, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    patch,
    path = "/api/stores/{store_id}/products/{store_product_id}",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
        ("store_product_id" = Uuid, Path, description = "Store product ID")
    ),
    request_body = UpdateStoreProductRequest,
    responses(
        (status = 200, description = "Listing updated", body = ApiResponse<StoreProductDetail>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Store product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Store Products"
)]
pub async fn update_store_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path((store_id, store_product_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(payload): ValidatedJson<UpdateStoreProductRequest>,
) -> AppResult<Json<ApiResponse<StoreProductDetail>>> {
    let resp = store_product_service::update_store_product(
        &state,
        &user,
        store_id,
        store_product_id,
        payload,
    )
    .await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/stores/{store_id}/products/{store_product_id}",
    params(
        ("store_id" = Uuid, Path, description = "Store ID"),
        ("store_product_id" = Uuid, Path, description = "Store product ID")
    ),
    responses(
        (status = 200, description = "Listing deactivated", body = ApiResponse<serde_json::Value>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Store product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Store Products"
)]
pub async fn delete_store_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path((store_id, store_product_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp =
        store_product_service::delete_store_product(&state, &user, store_id, store_product_id)
            .await?;
    Ok(Json(resp))
}
