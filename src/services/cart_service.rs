use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::{
    dto::cart::CartQuoteRequest,
    entity::{
        products::Entity as Products,
        store_products::{Column, Entity as StoreProducts},
    },
    error::{AppError, AppResult},
    quote::{CartQuote, StoreProductLookup, StoreProductRecord, calculate_quote},
    state::AppState,
};

/// Reads active store listings joined with their catalog product.
pub struct OrmStoreProductLookup<'a> {
    conn: &'a DatabaseConnection,
}

impl<'a> OrmStoreProductLookup<'a> {
    pub fn new(conn: &'a DatabaseConnection) -> Self {
        Self { conn }
    }
}

impl StoreProductLookup for OrmStoreProductLookup<'_> {
    type Error = AppError;

    async fn find_active(&self, id: Uuid) -> AppResult<Option<StoreProductRecord>> {
        let row = StoreProducts::find_by_id(id)
            .filter(Column::IsActive.eq(true))
            .find_also_related(Products)
            .one(self.conn)
            .await?;

        Ok(row.map(|(listing, product)| StoreProductRecord {
            id: listing.id,
            price: listing.price,
            stock: listing.stock,
            is_active: listing.is_active,
            product_name: product.map(|p| p.name),
        }))
    }
}

pub async fn quote(state: &AppState, payload: CartQuoteRequest) -> AppResult<CartQuote> {
    let lines = payload.lines();
    let lookup = OrmStoreProductLookup::new(&state.orm);

    let quote = calculate_quote(&lookup, &lines).await.inspect_err(|err| {
        tracing::info!(error = %err, lines = lines.len(), "cart quote rejected");
    })?;

    tracing::debug!(lines = lines.len(), total = %quote.total, "cart quoted");
    Ok(quote)
}
