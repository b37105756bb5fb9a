use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::auth::guard::AdminUser;
use crate::email;
use crate::errors::AppError;
use crate::models::enquiry::EnquiryRow;
use crate::state::AppState;

/// The site's enquiry form submits this placeholder when no tour/destination
/// was picked; it must never reach storage.
const SELECT_PLACEHOLDER: &str = "Select Tour Country";

/// Public enquiry form payload (camelCase, as the site submits it).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryInput {
    pub tour: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub living_country: Option<String>,
    pub nationality: Option<String>,
    pub destination: Option<String>,
    pub arrival_date: Option<String>,
    pub departure_date: Option<String>,
    /// Tolerated as a number or a numeric string.
    pub adults: Option<Value>,
    pub children: Option<Value>,
    pub flight_status: Option<String>,
    pub holiday_reason: Option<String>,
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

/// GET /api/enquiries
pub async fn handle_list(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(params): Query<StatusQuery>,
) -> Result<Json<Value>, AppError> {
    let enquiries: Vec<EnquiryRow> = match params.status.filter(|s| !s.is_empty()) {
        Some(status) => {
            sqlx::query_as("SELECT * FROM enquiries WHERE status = $1 ORDER BY created_at DESC")
                .bind(status)
                .fetch_all(&state.db)
                .await?
        }
        None => {
            sqlx::query_as("SELECT * FROM enquiries ORDER BY created_at DESC")
                .fetch_all(&state.db)
                .await?
        }
    };

    Ok(Json(json!({ "enquiries": enquiries })))
}

/// GET /api/enquiries/:id
pub async fn handle_get(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    let enquiry: Option<EnquiryRow> = sqlx::query_as("SELECT * FROM enquiries WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?;
    let enquiry = enquiry.ok_or_else(|| AppError::NotFound("Enquiry not found".to_string()))?;
    Ok(Json(json!({ "enquiry": enquiry })))
}

/// POST /api/enquiries — public submission endpoint.
pub async fn handle_create(
    State(state): State<AppState>,
    Json(input): Json<EnquiryInput>,
) -> Result<Json<Value>, AppError> {
    let name = input.name.as_deref().unwrap_or("");
    let email_addr = input.email.as_deref().unwrap_or("");
    if name.is_empty() || email_addr.is_empty() {
        return Err(AppError::Validation(
            "Name and email are required".to_string(),
        ));
    }

    let enquiry: EnquiryRow = sqlx::query_as(
        r#"
        INSERT INTO enquiries
            (tour, name, email, mobile, living_country, nationality, destination,
             arrival_date, departure_date, adults, children, flight_status,
             holiday_reason, message)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        RETURNING *
        "#,
    )
    .bind(normalize_choice(input.tour.as_deref()))
    .bind(name)
    .bind(email_addr)
    .bind(&input.mobile)
    .bind(&input.living_country)
    .bind(&input.nationality)
    .bind(normalize_choice(input.destination.as_deref()))
    .bind(parse_date(input.arrival_date.as_deref()))
    .bind(parse_date(input.departure_date.as_deref()))
    .bind(coerce_count(input.adults.as_ref()))
    .bind(coerce_count(input.children.as_ref()))
    .bind(&input.flight_status)
    .bind(&input.holiday_reason)
    .bind(&input.message)
    .fetch_one(&state.db)
    .await?;

    // Notification is best-effort: a mail failure never fails the submission.
    if let Err(e) = email::send_enquiry_notification(&state.db, &state.config.base_url, &enquiry).await {
        warn!("Failed to send enquiry email: {e}");
    }

    Ok(Json(json!({
        "success": true,
        "message": "Enquiry submitted successfully"
    })))
}

/// PUT /api/enquiries/:id
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

    sqlx::query("UPDATE enquiries SET status = $1, updated_at = now() WHERE id = $2")
        .bind(status)
        .bind(id)
        .execute(&state.db)
        .await?;

    Ok(Json(json!({ "success": true })))
}

/// DELETE /api/enquiries/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _admin: AdminUser,
) -> Result<Json<Value>, AppError> {
    sqlx::query("DELETE FROM enquiries WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;
    Ok(Json(json!({ "success": true })))
}

/// Drops empty values and the form's "nothing selected" placeholder.
fn normalize_choice(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.is_empty() && *v != SELECT_PLACEHOLDER)
        .map(|v| v.to_string())
}

/// Accepts a plain `YYYY-MM-DD` or a full RFC 3339 timestamp; anything else
/// stores as NULL rather than rejecting the submission.
fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    NaiveDate::parse_from_str(value.get(..10)?, "%Y-%m-%d").ok()
}

fn coerce_count(value: Option<&Value>) -> Option<i32> {
    match value? {
        Value::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_placeholder_choice_becomes_none() {
        assert_eq!(normalize_choice(Some(SELECT_PLACEHOLDER)), None);
        assert_eq!(normalize_choice(Some("")), None);
        assert_eq!(normalize_choice(None), None);
        assert_eq!(normalize_choice(Some("Iceland")), Some("Iceland".to_string()));
    }

    #[test]
    fn test_parse_date_accepts_plain_and_rfc3339() {
        let expected = NaiveDate::from_ymd_opt(2026, 3, 14);
        assert_eq!(parse_date(Some("2026-03-14")), expected);
        assert_eq!(parse_date(Some("2026-03-14T09:30:00Z")), expected);
        assert_eq!(parse_date(Some("soon")), None);
        assert_eq!(parse_date(Some("")), None);
        assert_eq!(parse_date(None), None);
    }

    #[test]
    fn test_coerce_count_tolerates_numeric_strings() {
        assert_eq!(coerce_count(Some(&json!(2))), Some(2));
        assert_eq!(coerce_count(Some(&json!("3"))), Some(3));
        assert_eq!(coerce_count(Some(&json!(" 4 "))), Some(4));
        assert_eq!(coerce_count(Some(&json!("two"))), None);
        assert_eq!(coerce_count(Some(&json!([1]))), None);
        assert_eq!(coerce_count(None), None);
    }
}
