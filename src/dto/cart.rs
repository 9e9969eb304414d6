use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::quote::CartLine;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItemRequest {
    pub store_product_id: Uuid,
    #[validate(range(min = 1, message = "quantity must not be less than 1"))]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CartQuoteRequest {
    #[validate(nested)]
    pub items: Vec<CartItemRequest>,
}

impl CartQuoteRequest {
    pub fn lines(&self) -> Vec<CartLine> {
        self.items
            .iter()
            .map(|item| CartLine {
                store_product_id: item.store_product_id,
                quantity: item.quantity,
            })
            .collect()
    }
}
