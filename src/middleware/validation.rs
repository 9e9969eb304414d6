use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::error::AppError;

/// JSON body extractor that runs `validator` rules before the handler sees
/// the payload. Malformed JSON and rule violations both become a 400 with a
/// list of messages.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(vec![rejection.body_text()]))?;

        value
            .validate()
            .map_err(|errors| AppError::Validation(validation_messages(&errors)))?;

        Ok(Self(value))
    }
}

/// Flatten nested validation errors into `path: message` strings, sorted so
/// responses are stable.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut out = Vec::new();
    collect(errors, "", &mut out);
    out.sort();
    out
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for err in field_errors {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{field} is invalid ({})", err.code));
                    out.push(format!("{path}: {message}"));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(inner, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::cart::{CartItemRequest, CartQuoteRequest};
    use crate::dto::store_products::CreateStoreProductRequest;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    #[test]
    fn nested_cart_items_report_their_index() {
        let request = CartQuoteRequest {
            items: vec![
                CartItemRequest {
                    store_product_id: Uuid::new_v4(),
                    quantity: 2,
                },
                CartItemRequest {
                    store_product_id: Uuid::new_v4(),
                    quantity: 0,
                },
            ],
        };

        let errors = request.validate().unwrap_err();
        assert_eq!(
            validation_messages(&errors),
            vec!["items[1].quantity: quantity must not be less than 1".to_string()]
        );
    }

    #[test]
    fn valid_cart_passes() {
        let request = CartQuoteRequest {
            items: vec![CartItemRequest {
                store_product_id: Uuid::new_v4(),
                quantity: 1,
            }],
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn negative_price_and_stock_are_rejected() {
        let request = CreateStoreProductRequest {
            product_id: Uuid::new_v4(),
            price: Decimal::new(-1, 2),
            stock: -3,
        };

        let errors = request.validate().unwrap_err();
        assert_eq!(
            validation_messages(&errors),
            vec![
                "price: price must not be less than 0".to_string(),
                "stock: stock must not be less than 0".to_string(),
            ]
        );
    }
}
