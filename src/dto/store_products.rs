use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{dto::non_negative, models::StoreProductDetail};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoreProductRequest {
    pub product_id: Uuid,
    #[validate(custom(function = "non_negative", message = "price must not be less than 0"))]
    pub price: Decimal,
    #[validate(range(min = 0, message = "stock must not be less than 0"))]
    pub stock: i32,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStoreProductRequest {
    #[validate(custom(function = "non_negative", message = "price must not be less than 0"))]
    pub price: Option<Decimal>,
    #[validate(range(min = 0, message = "stock must not be less than 0"))]
    pub stock: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct StoreProductList {
    #[schema(value_type = Vec<StoreProductDetail>)]
    pub items: Vec<StoreProductDetail>,
}
