use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use validator::ValidationError;

pub mod cart;
pub mod products;
pub mod store_products;
pub mod stores;

pub(crate) fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("range"));
    }
    Ok(())
}

/// Patch field: absent is `None`, `null` is `Some(None)`, a value is `Some(Some(v))`.
/// Use with `#[serde(default, deserialize_with = "nullable")]`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
