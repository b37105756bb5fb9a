use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::guard::AdminUser;
use crate::email::load_settings;
use crate::errors::AppError;
use crate::models::email_settings::EmailSettingsView;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EmailSettingsInput {
    pub host: Option<String>,
    pub port: Option<i32>,
    pub secure: Option<bool>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from_email: Option<String>,
    pub from_name: Option<String>,
}

/// GET /api/email-settings
pub async fn handle_get_settings(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Value>, AppError> {
    let settings = load_settings(&state.db)
        .await
        .map_err(AppError::Database)?
        .map(EmailSettingsView::from);
    Ok(Json(json!({ "settings": settings })))
}

/// POST /api/email-settings — upsert of the singleton row.
pub async fn handle_update_settings(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(input): Json<EmailSettingsInput>,
) -> Result<Json<Value>, AppError> {
    let required = [
        &input.host,
        &input.username,
        &input.password,
        &input.from_email,
        &input.from_name,
    ];
    if required
        .iter()
        .any(|f| f.as_deref().unwrap_or("").is_empty())
    {
        return Err(AppError::Validation(
            "host, username, password, from_email, and from_name are required".to_string(),
        ));
    }

    sqlx::query(
        r#"
        INSERT INTO email_settings
            (id, host, port, secure, username, password, from_email, from_name)
        VALUES (1, $1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (id) DO UPDATE SET
            host = EXCLUDED.host,
            port = EXCLUDED.port,
            secure = EXCLUDED.secure,
            username = EXCLUDED.username,
            password = EXCLUDED.password,
            from_email = EXCLUDED.from_email,
            from_name = EXCLUDED.from_name,
            updated_at = now()
        "#,
    )
    .bind(&input.host)
    .bind(input.port.unwrap_or(587))
    .bind(input.secure.unwrap_or(false))
    .bind(&input.username)
    .bind(&input.password)
    .bind(&input.from_email)
    .bind(&input.from_name)
    .execute(&state.db)
    .await?;

    Ok(Json(json!({ "success": true })))
}
