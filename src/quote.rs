//! Cart quoting.
//!
//! Turns a list of requested lines into a priced, itemized quote. Every line
//! is resolved through a [`StoreProductLookup`], checked against the listing's
//! stock and priced at the listing's price. The first invalid line aborts the
//! whole quote.
//!
//! Quoting only reads stock, it never reserves it: two concurrent quotes for
//! the last unit of a listing will both succeed.

use std::future::Future;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// A store listing as seen by the quote calculator.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreProductRecord {
    pub id: Uuid,
    pub price: Decimal,
    pub stock: i32,
    pub is_active: bool,
    /// Name of the linked catalog product, `None` when it cannot be resolved.
    pub product_name: Option<String>,
}

/// One requested line. Quantity is validated as `>= 1` before it gets here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    pub store_product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLine {
    pub store_product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartQuote {
    pub total: Decimal,
    pub items: Vec<QuoteLine>,
}

#[derive(Debug, Error)]
pub enum QuoteError<E> {
    #[error("Store product with ID {0} not found")]
    NotFound(Uuid),

    #[error("Product for store product {0} not found")]
    ProductMissing(Uuid),

    #[error("Insufficient stock for {product_name}. Available: {available}, Requested: {requested}")]
    InsufficientStock {
        product_name: String,
        requested: i32,
        available: i32,
    },

    #[error(transparent)]
    Lookup(E),
}

/// Source of store listings for quoting.
///
/// Implementations should only return active listings; inactive ones that
/// slip through are still treated as missing.
pub trait StoreProductLookup {
    type Error;

    fn find_active(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<StoreProductRecord>, Self::Error>> + Send;
}

/// Round half away from zero to cents.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Price `lines` in order, one lookup per line.
///
/// The total is the rounded sum of the unrounded line subtotals, so it can
/// differ by a cent from the sum of the rounded subtotals shown per line.
pub async fn calculate_quote<L>(
    lookup: &L,
    lines: &[CartLine],
) -> Result<CartQuote, QuoteError<L::Error>>
where
    L: StoreProductLookup + Sync,
{
    let mut running_total = Decimal::ZERO;
    let mut items = Vec::with_capacity(lines.len());

    for line in lines {
        let record = lookup
            .find_active(line.store_product_id)
            .await
            .map_err(QuoteError::Lookup)?
            .filter(|record| record.is_active)
            .ok_or(QuoteError::NotFound(line.store_product_id))?;

        let product_name = record
            .product_name
            .ok_or(QuoteError::ProductMissing(line.store_product_id))?;

        if line.quantity > record.stock {
            return Err(QuoteError::InsufficientStock {
                product_name,
                requested: line.quantity,
                available: record.stock,
            });
        }

        let unit_price = record.price;
        let subtotal = unit_price * Decimal::from(line.quantity);
        running_total += subtotal;

        items.push(QuoteLine {
            store_product_id: line.store_product_id,
            product_name,
            quantity: line.quantity,
            unit_price,
            subtotal: round2(subtotal),
        });
    }

    Ok(CartQuote {
        total: round2(running_total),
        items,
    })
}
