use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::stores::{CreateStoreRequest, StoreList, UpdateStoreRequest},
    error::AppResult,
    middleware::{auth::AuthUser, validation::ValidatedJson},
    models::{Store, StoreWithListings},
    response::ApiResponse,
    routes::{params::StoreQuery, store_products},
    services::store_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stores).post(create_store))
        .route(
            "/{store_id}",
            get(get_store).patch(update_store).delete(delete_store),
        )
        .nest("/{store_id}/products", store_products::router())
}

#[utoipa::path(
    get,
    path = "/api/stores",
    params(StoreQuery),
    responses(
        (status = 200, description = "List stores", body = ApiResponse<StoreList>)
    ),
    tag = "Stores"
)]
pub async fn list_stores(
    State(state): State<AppState>,
    Query(query): Query<StoreQuery>,
) -> AppResult<Json<ApiResponse<StoreList>>> {
    let resp = store_service::list_stores(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/stores/{store_id}",
    params(
        ("store_id" = Uuid, Path, description = "Store ID")
    ),
    responses(
        (status = 200, description = "Store with its product listings", body = ApiResponse<StoreWithListings>),
        (status = 404, description = "Store not found"),
    ),
    tag = "Stores"
)]
pub async fn get_store(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<StoreWithListings>>> {
    let resp = store_service::get_store(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/stores",
    request_body = CreateStoreRequest,
    responses(
        (status = 201, description = "Store created", body = ApiResponse<Store>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Stores"
)]
pub async fn create_store(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateStoreRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Store>>)> {
    let resp = store_service::create_store(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    patch,
    path = "/api/stores/{store_id}",
    params(
        ("store_id" = Uuid, Path, description = "Store ID")
    ),
    request_body = UpdateStoreRequest,
    responses(
        (status = 200, description = "Store updated", body = ApiResponse<Store>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Store not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Stores"
)]
pub async fn update_store(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateStoreRequest>,
) -> AppResult<Json<ApiResponse<Store>>> {
    let resp = store_service::update_store(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/stores/{store_id}",
    params(
        ("store_id" = Uuid, Path, description = "Store ID")
    ),
    responses(
        (status = 200, description = "Store deactivated", body = ApiResponse<serde_json::Value>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Store not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Stores"
)]
pub async fn delete_store(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = store_service::delete_store(&state, &user, id).await?;
    Ok(Json(resp))
}
