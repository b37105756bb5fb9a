use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::auth::token;
use crate::errors::AppError;
use crate::state::AppState;

/// Authenticated admin identity. Adding this extractor to a handler gates
/// the route behind a valid `Authorization: Bearer <token>` header and a
/// still-existing admin row.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub id: i32,
    pub username: String,
    pub email: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("No token provided".to_string()))?;

        let claims = token::verify(token, &state.config.jwt_secret)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

        // The token may outlive the account; confirm the admin still exists.
        let exists: Option<(i32,)> = sqlx::query_as("SELECT id FROM admin_users WHERE id = $1")
            .bind(claims.sub)
            .fetch_optional(&state.db)
            .await?;

        if exists.is_none() {
            return Err(AppError::Unauthorized("User no longer exists".to_string()));
        }

        Ok(AdminUser {
            id: claims.sub,
            username: claims.username,
            email: claims.email,
        })
    }
}
