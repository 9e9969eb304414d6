use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::{
    quote::QuoteError,
    response::{ApiResponse, Meta},
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Validation failed")]
    Validation(Vec<String>),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Database error")]
    DbError(#[from] sqlx::Error),

    #[error("ORM error")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::DbError(_) | AppError::OrmError(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<QuoteError<AppError>> for AppError {
    fn from(err: QuoteError<AppError>) -> Self {
        match err {
            QuoteError::NotFound(_) | QuoteError::ProductMissing(_) => {
                AppError::NotFound(err.to_string())
            }
            QuoteError::InsufficientStock { .. } => AppError::BadRequest(err.to_string()),
            QuoteError::Lookup(inner) => inner,
        }
    }
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        }

        let message = self.to_string();
        let details = match self {
            AppError::Validation(errors) => errors,
            _ => Vec::new(),
        };
        let error = status
            .canonical_reason()
            .unwrap_or("Error")
            .to_string();

        let body = ApiResponse {
            message,
            data: Some(ErrorData { error, details }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn quote_errors_map_to_http_statuses() {
        let id = Uuid::new_v4();
        let not_found: AppError = QuoteError::<AppError>::NotFound(id).into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            not_found.to_string(),
            format!("Store product with ID {id} not found")
        );

        let short: AppError = QuoteError::<AppError>::InsufficientStock {
            product_name: "Leche Entera".into(),
            requested: 5,
            available: 3,
        }
        .into();
        assert_eq!(short.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            short.to_string(),
            "Insufficient stock for Leche Entera. Available: 3, Requested: 5"
        );
    }

    #[test]
    fn storage_errors_are_opaque_to_clients() {
        let err = AppError::OrmError(sea_orm::DbErr::Custom("connection reset".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "ORM error");
    }
}
