use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::stores::{CreateStoreRequest, StoreList, UpdateStoreRequest},
    entity::{
        store_products::{Column as ListingCol, Entity as StoreProducts},
        stores::{ActiveModel, Column, Entity as Stores, Model as StoreModel},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Store, StoreProduct, StoreWithListings},
    response::{ApiResponse, Meta},
    routes::params::{StoreQuery, search_term},
    state::AppState,
};

pub async fn list_stores(state: &AppState, query: StoreQuery) -> AppResult<ApiResponse<StoreList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();

    if let Some(search) = search_term(query.q.as_ref()) {
        condition = condition.add(Expr::col(Column::Name).ilike(format!("%{search}%")));
    }

    let finder = Stores::find()
        .filter(condition)
        .order_by_desc(Column::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Store::from)
        .collect();

    Ok(ApiResponse::success(
        "Stores",
        StoreList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_store(state: &AppState, id: Uuid) -> AppResult<ApiResponse<StoreWithListings>> {
    let store = find_store(state, id).await?;
    let store_products = StoreProducts::find()
        .filter(ListingCol::StoreId.eq(id))
        .order_by_asc(ListingCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(StoreProduct::from)
        .collect();

    Ok(ApiResponse::success(
        "Store",
        StoreWithListings {
            store: store.into(),
            store_products,
        },
        None,
    ))
}

pub async fn create_store(
    state: &AppState,
    user: &AuthUser,
    payload: CreateStoreRequest,
) -> AppResult<ApiResponse<Store>> {
    let store = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        description: Set(payload.description),
        address: Set(payload.address),
        phone: Set(payload.phone),
        is_active: Set(true),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        user,
        "store_create",
        "stores",
        serde_json::json!({ "store_id": store.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Store created",
        store.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_store(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateStoreRequest,
) -> AppResult<ApiResponse<Store>> {
    let mut active: ActiveModel = find_store(state, id).await?.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(address) = payload.address {
        active.address = Set(address);
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(phone);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    active.updated_at = Set(Utc::now().into());

    let store = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user,
        "store_update",
        "stores",
        serde_json::json!({ "store_id": store.id }),
    )
    .await;

    Ok(ApiResponse::success("Updated", store.into(), Some(Meta::empty())))
}

/// Soft delete: the store stays in place with `is_active = false`.
pub async fn delete_store(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let mut active: ActiveModel = find_store(state, id).await?.into();
    active.is_active = Set(false);
    active.updated_at = Set(Utc::now().into());
    active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user,
        "store_delete",
        "stores",
        serde_json::json!({ "store_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({ "id": id }),
        Some(Meta::empty()),
    ))
}

pub(crate) async fn find_store(state: &AppState, id: Uuid) -> AppResult<StoreModel> {
    Stores::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Store with ID {id} not found")))
}
