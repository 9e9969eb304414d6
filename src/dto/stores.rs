use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{dto::nullable, models::Store};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoreRequest {
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStoreRequest {
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub phone: Option<Option<String>>,
    pub is_active: Option<bool>,
}

#[derive(serde::Serialize, ToSchema)]
#[serde(transparent)]
pub struct StoreList {
    #[schema(value_type = Vec<Store>)]
    pub items: Vec<Store>,
}
