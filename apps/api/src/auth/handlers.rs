use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::guard::AdminUser;
use crate::auth::token;
use crate::errors::AppError;
use crate::models::admin::AdminUserRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(AppError::Unauthorized(
            "Username and password are required".to_string(),
        ));
    }

    let admin: Option<AdminUserRow> =
        sqlx::query_as("SELECT * FROM admin_users WHERE username = $1 OR email = $1")
            .bind(&req.username)
            .fetch_optional(&state.db)
            .await?;

    let admin = admin.ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    if req.password != admin.password {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = token::issue(
        admin.id,
        &admin.username,
        &admin.email,
        &state.config.jwt_secret,
        state.config.jwt_expiry_hours,
    )
    .map_err(|e| AppError::Internal(e.into()))?;

    Ok(Json(json!({
        "success": true,
        "user": {
            "id": admin.id,
            "username": admin.username,
            "email": admin.email,
        },
        "token": token,
    })))
}

/// POST /api/auth/logout
/// Tokens are stateless; logout is handled client-side by dropping the token.
pub async fn handle_logout() -> Json<Value> {
    Json(json!({ "success": true }))
}

/// GET /api/auth/check
pub async fn handle_check(admin: AdminUser) -> Json<Value> {
    Json(json!({
        "authenticated": true,
        "user": {
            "id": admin.id,
            "username": admin.username,
            "email": admin.email,
        },
    }))
}
