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
    dto::store_products::{
        CreateStoreProductRequest, StoreProductList, UpdateStoreProductRequest,
    },
    entity::{
        products::{Column as ProdCol, Entity as Products, Model as ProductModel},
        store_products::{ActiveModel, Column, Entity as StoreProducts, Model as ListingModel},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::StoreProductDetail,
    response::{ApiResponse, Meta},
    routes::params::{StoreProductQuery, search_term},
    services::{product_service::find_product, store_service::find_store},
    state::AppState,
};

pub async fn list_store_products(
    state: &AppState,
    store_id: Uuid,
    query: StoreProductQuery,
) -> AppResult<ApiResponse<StoreProductList>> {
    find_store(state, store_id).await?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all()
        .add(Column::StoreId.eq(store_id))
        .add(Column::IsActive.eq(true));

    if let Some(search) = search_term(query.q.as_ref()) {
        condition = condition.add(Expr::col((Products, ProdCol::Name)).ilike(format!("%{search}%")));
    }

    if query.in_stock == Some(true) {
        condition = condition.add(Column::Stock.gt(0));
    }

    let finder = StoreProducts::find()
        .find_also_related(Products)
        .filter(condition)
        .order_by_asc(ProdCol::Name);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|(listing, product)| detail(listing, product))
        .collect();

    Ok(ApiResponse::success(
        "Store products",
        StoreProductList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_store_product(
    state: &AppState,
    store_id: Uuid,
    id: Uuid,
) -> AppResult<ApiResponse<StoreProductDetail>> {
    let (listing, product) = find_listing(state, store_id, id).await?;
    let store = find_store(state, store_id).await?;

    let mut body = detail(listing, product);
    body.store = Some(store.into());
    Ok(ApiResponse::success("Store product", body, None))
}

pub async fn create_store_product(
    state: &AppState,
    user: &AuthUser,
    store_id: Uuid,
    payload: CreateStoreProductRequest,
) -> AppResult<ApiResponse<StoreProductDetail>> {
    find_store(state, store_id).await?;
    let product = find_product(state, payload.product_id).await?;

    let existing = StoreProducts::find()
        .filter(
            Condition::all()
                .add(Column::StoreId.eq(store_id))
                .add(Column::ProductId.eq(payload.product_id)),
        )
        .one(&state.orm)
        .await?;
    if existing.is_some() {
        return Err(AppError::BadRequest(
            "Product already exists in this store".into(),
        ));
    }

    let listing = ActiveModel {
        id: Set(Uuid::new_v4()),
        store_id: Set(store_id),
        product_id: Set(payload.product_id),
        price: Set(payload.price),
        stock: Set(payload.stock),
        is_active: Set(true),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        user,
        "store_product_create",
        "store_products",
        serde_json::json!({ "store_id": store_id, "store_product_id": listing.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Product added to store",
        detail(listing, Some(product)),
        Some(Meta::empty()),
    ))
}

pub async fn update_store_product(
    state: &AppState,
    user: &AuthUser,
    store_id: Uuid,
    id: Uuid,
    payload: UpdateStoreProductRequest,
) -> AppResult<ApiResponse<StoreProductDetail>> {
    let (listing, product) = find_listing(state, store_id, id).await?;

    let mut active: ActiveModel = listing.into();
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(stock) = payload.stock {
        active.stock = Set(stock);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    active.updated_at = Set(Utc::now().into());

    let listing = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user,
        "store_product_update",
        "store_products",
        serde_json::json!({ "store_id": store_id, "store_product_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        detail(listing, product),
        Some(Meta::empty()),
    ))
}

pub async fn delete_store_product(
    state: &AppState,
    user: &AuthUser,
    store_id: Uuid,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let (listing, _) = find_listing(state, store_id, id).await?;

    let mut active: ActiveModel = listing.into();
    active.is_active = Set(false);
    active.updated_at = Set(Utc::now().into());
    active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user,
        "store_product_delete",
        "store_products",
        serde_json::json!({ "store_id": store_id, "store_product_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Store product removed successfully",
        serde_json::json!({ "id": id }),
        Some(Meta::empty()),
    ))
}

async fn find_listing(
    state: &AppState,
    store_id: Uuid,
    id: Uuid,
) -> AppResult<(ListingModel, Option<ProductModel>)> {
    StoreProducts::find_by_id(id)
        .filter(Column::StoreId.eq(store_id))
        .find_also_related(Products)
        .one(&state.orm)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Store product with ID {id} not found in store {store_id}"
            ))
        })
}

fn detail(listing: ListingModel, product: Option<ProductModel>) -> StoreProductDetail {
    StoreProductDetail {
        store_product: listing.into(),
        product: product.map(Into::into),
        store: None,
    }
}
