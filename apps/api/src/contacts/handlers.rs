use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::auth::guard::AdminUser;
use crate::email;
use crate::errors::AppError;
use crate::models::contact::ContactRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ContactInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: Option<String>,
}

/// GET /api/contacts
pub async fn handle_list(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(params): Query<StatusQuery>,
) -> Result<Json<Value>, AppError> {
    let contacts: Vec<ContactRow> = match params.status.filter(|s| !s.is_empty()) {
        Some(status) => {
            sqlx::query_as("SELECT * FROM contacts WHERE status = $1 ORDER BY created_at DESC")
                .bind(status)
                .fetch_all(&state.db)
                .await?
        }
        None => {
            sqlx::query_as("SELECT * FROM contacts ORDER BY created_at DESC")
                .fetch_all(&state.db)
                .await?
        }
    };

    Ok(Json(json!({ "contacts": contacts })))
}

/// GET /api/contacts/:id
pub async fn handle_get(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    let contact: Option<ContactRow> = sqlx::query_as("SELECT * FROM contacts WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?;
    let contact = contact.ok_or_else(|| AppError::NotFound("Contact not found".to_string()))?;
    Ok(Json(json!({ "contact": contact })))
}

/// POST /api/contacts — public submission endpoint.
pub async fn handle_create(
    State(state): State<AppState>,
    Json(input): Json<ContactInput>,
) -> Result<Json<Value>, AppError> {
    let required = [&input.name, &input.email, &input.subject, &input.message];
    if required
        .iter()
        .any(|f| f.as_deref().unwrap_or("").is_empty())
    {
        return Err(AppError::Validation(
            "Name, email, subject, and message are required".to_string(),
        ));
    }

    let contact: ContactRow = sqlx::query_as(
        "INSERT INTO contacts (name, email, subject, message) VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(&input.name)
    .bind(&input.email)
    .bind(&input.subject)
    .bind(&input.message)
    .fetch_one(&state.db)
    .await?;

    // Notification is best-effort: a mail failure never fails the submission.
    if let Err(e) = email::send_contact_notification(&state.db, &state.config.base_url, &contact).await {
        warn!("Failed to send contact email: {e}");
    }

    Ok(Json(json!({
        "success": true,
        "message": "Contact submitted successfully"
    })))
}

/// PUT /api/contacts/:id
pub async fn handle_update_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _admin: AdminUser,
    Json(body): Json<StatusUpdate>,
) -> Result<Json<Value>, AppError> {
    let status = body
        .status
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("Status is required".to_string()))?;

    sqlx::query("UPDATE contacts SET status = $1, updated_at = now() WHERE id = $2")
        .bind(status)
        .bind(id)
        .execute(&state.db)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Contact updated successfully"
    })))
}

/// DELETE /api/contacts/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _admin: AdminUser,
) -> Result<Json<Value>, AppError> {
    sqlx::query("DELETE FROM contacts WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;
    Ok(Json(json!({ "success": true })))
}
