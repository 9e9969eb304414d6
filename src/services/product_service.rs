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
    dto::products::{CreateProductRequest, ProductList, UpdateProductRequest},
    entity::{
        products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
        store_products::{Column as ListingCol, Entity as StoreProducts},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Product, ProductWithListings, StoreProduct},
    response::{ApiResponse, Meta},
    routes::params::{ProductQuery, search_term},
    state::AppState,
};

/// Active products only; soft-deleted products drop out of the catalog.
pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all().add(Column::IsActive.eq(true));

    if let Some(search) = search_term(query.q.as_ref()) {
        condition = condition.add(Expr::col(Column::Name).ilike(format!("%{search}%")));
    }

    if let Some(category) = query.category.as_ref().filter(|c| !c.is_empty()) {
        condition = condition.add(Column::Category.eq(category.clone()));
    }

    let finder = Products::find()
        .filter(condition)
        .order_by_desc(Column::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_product(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<ProductWithListings>> {
    let product = find_product(state, id).await?;
    let store_products = StoreProducts::find()
        .filter(ListingCol::ProductId.eq(id))
        .order_by_asc(ListingCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(StoreProduct::from)
        .collect();

    Ok(ApiResponse::success(
        "Product",
        ProductWithListings {
            product: product.into(),
            store_products,
        },
        None,
    ))
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let product = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        description: Set(payload.description),
        base_price: Set(payload.base_price),
        category: Set(payload.category),
        image_url: Set(payload.image_url),
        is_active: Set(true),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        user,
        "product_create",
        "products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Product created",
        product.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let mut active: ActiveModel = find_product(state, id).await?.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(base_price) = payload.base_price {
        active.base_price = Set(Some(base_price));
    }
    if let Some(category) = payload.category {
        active.category = Set(category);
    }
    if let Some(image_url) = payload.image_url {
        active.image_url = Set(image_url);
    }
    active.updated_at = Set(Utc::now().into());

    let product = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user,
        "product_update",
        "products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        product.into(),
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let mut active: ActiveModel = find_product(state, id).await?.into();
    active.is_active = Set(false);
    active.updated_at = Set(Utc::now().into());
    active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user,
        "product_delete",
        "products",
        serde_json::json!({ "product_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({ "id": id }),
        Some(Meta::empty()),
    ))
}

pub(crate) async fn find_product(state: &AppState, id: Uuid) -> AppResult<ProductModel> {
    Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product with ID {id} not found")))
}
