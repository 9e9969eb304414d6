use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{products, store_products, stores};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub base_price: Option<Decimal>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreProduct {
    pub id: Uuid,
    pub store_id: Uuid,
    pub product_id: Uuid,
    pub price: Decimal,
    pub stock: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A store together with its product listings.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreWithListings {
    #[serde(flatten)]
    pub store: Store,
    pub store_products: Vec<StoreProduct>,
}

/// A catalog product together with the stores that list it.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithListings {
    #[serde(flatten)]
    pub product: Product,
    pub store_products: Vec<StoreProduct>,
}

/// A store listing with its catalog product, and the store when requested.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreProductDetail {
    #[serde(flatten)]
    pub store_product: StoreProduct,
    pub product: Option<Product>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<Store>,
}

impl From<stores::Model> for Store {
    fn from(model: stores::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            address: model.address,
            phone: model.phone,
            is_active: model.is_active,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            base_price: model.base_price,
            category: model.category,
            image_url: model.image_url,
            is_active: model.is_active,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<store_products::Model> for StoreProduct {
    fn from(model: store_products::Model) -> Self {
        Self {
            id: model.id,
            store_id: model.store_id,
            product_id: model.product_id,
            price: model.price,
            stock: model.stock,
            is_active: model.is_active,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}
