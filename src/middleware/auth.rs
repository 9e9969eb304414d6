use axum::{extract::FromRequestParts, http::header, http::request::Parts};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

/// Claims carried by bearer tokens accepted by the catalog.
#[derive(Debug, Deserialize, Serialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// The authenticated caller of an admin endpoint.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
}

pub fn verify_token(token: &str, secret: &str) -> Result<AuthUser, AppError> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;

    let user_id = Uuid::parse_str(&decoded.claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid user id in token".into()))?;

    Ok(AuthUser { user_id })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid Authorization header".into()))?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .map(str::trim)
            .ok_or_else(|| AppError::Unauthorized("Invalid Authorization scheme".into()))?;

        verify_token(token, &state.jwt_secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn token_for(sub: &str, secret: &str, ttl: Duration) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            exp: (Utc::now() + ttl).timestamp() as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn accepts_token_signed_with_the_configured_secret() {
        let user_id = Uuid::new_v4();
        let token = token_for(&user_id.to_string(), "s3cret", Duration::hours(1));

        let user = verify_token(&token, "s3cret").unwrap();
        assert_eq!(user.user_id, user_id);
    }

    #[test]
    fn rejects_token_signed_with_another_secret() {
        let token = token_for(&Uuid::new_v4().to_string(), "other", Duration::hours(1));
        assert!(matches!(
            verify_token(&token, "s3cret"),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn rejects_expired_token() {
        let token = token_for(&Uuid::new_v4().to_string(), "s3cret", Duration::hours(-2));
        assert!(matches!(
            verify_token(&token, "s3cret"),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn rejects_non_uuid_subject() {
        let token = token_for("admin", "s3cret", Duration::hours(1));
        assert!(matches!(
            verify_token(&token, "s3cret"),
            Err(AppError::Unauthorized(msg)) if msg == "Invalid user id in token"
        ));
    }
}
