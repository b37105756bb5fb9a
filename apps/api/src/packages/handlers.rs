use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::guard::AdminUser;
use crate::errors::AppError;
use crate::models::package::{PackageInput, PackageRow};
use crate::packages::normalize::{normalize_for_read, split_for_write};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub slug: Option<String>,
}

/// GET /api/packages — list (newest first) or single lookup via `?slug=`.
pub async fn handle_list(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Value>, AppError> {
    if let Some(slug) = params.slug.filter(|s| !s.is_empty()) {
        let row: Option<PackageRow> = sqlx::query_as("SELECT * FROM packages WHERE slug = $1")
            .bind(&slug)
            .fetch_optional(&state.db)
            .await?;
        let row = row.ok_or_else(|| AppError::NotFound("Package not found".to_string()))?;
        return Ok(Json(json!({
            "package": normalize_for_read(row, &state.config.base_url)
        })));
    }

    let rows: Vec<PackageRow> =
        sqlx::query_as("SELECT * FROM packages ORDER BY created_at DESC")
            .fetch_all(&state.db)
            .await?;

    let packages: Vec<_> = rows
        .into_iter()
        .map(|row| normalize_for_read(row, &state.config.base_url))
        .collect();

    Ok(Json(json!({ "packages": packages })))
}

/// GET /api/packages/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    let row = fetch_row(&state, id).await?;
    Ok(Json(json!({
        "package": normalize_for_read(row, &state.config.base_url)
    })))
}

/// POST /api/packages
pub async fn handle_create(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(input): Json<PackageInput>,
) -> Result<Json<Value>, AppError> {
    validate_required(&input)?;
    let write = split_for_write(&input);

    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO packages
            (name, slug, country, days, image, price, stars, description,
             itinerary, included, excluded, summary, images)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING id
        "#,
    )
    .bind(&write.name)
    .bind(&write.slug)
    .bind(&write.country)
    .bind(write.days)
    .bind(&write.image)
    .bind(write.price)
    .bind(write.stars)
    .bind(&write.description)
    .bind(&write.itinerary)
    .bind(&write.included)
    .bind(&write.excluded)
    .bind(&write.summary)
    .bind(&write.images)
    .fetch_one(&state.db)
    .await?;

    let row = fetch_row(&state, id).await?;
    Ok(Json(json!({
        "success": true,
        "package": normalize_for_read(row, &state.config.base_url)
    })))
}

/// PUT /api/packages/:id
pub async fn handle_update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _admin: AdminUser,
    Json(input): Json<PackageInput>,
) -> Result<Json<Value>, AppError> {
    validate_required(&input)?;
    let write = split_for_write(&input);

    sqlx::query(
        r#"
        UPDATE packages
        SET name = $1, slug = $2, country = $3, days = $4, image = $5,
            price = $6, stars = $7, description = $8, itinerary = $9,
            included = $10, excluded = $11, summary = $12, images = $13,
            updated_at = now()
        WHERE id = $14
        "#,
    )
    .bind(&write.name)
    .bind(&write.slug)
    .bind(&write.country)
    .bind(write.days)
    .bind(&write.image)
    .bind(write.price)
    .bind(write.stars)
    .bind(&write.description)
    .bind(&write.itinerary)
    .bind(&write.included)
    .bind(&write.excluded)
    .bind(&write.summary)
    .bind(&write.images)
    .bind(id)
    .execute(&state.db)
    .await?;

    let row = fetch_row(&state, id).await?;
    Ok(Json(json!({
        "success": true,
        "package": normalize_for_read(row, &state.config.base_url)
    })))
}

/// DELETE /api/packages/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _admin: AdminUser,
) -> Result<Json<Value>, AppError> {
    sqlx::query("DELETE FROM packages WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;
    Ok(Json(json!({ "success": true })))
}

async fn fetch_row(state: &AppState, id: i32) -> Result<PackageRow, AppError> {
    let row: Option<PackageRow> = sqlx::query_as("SELECT * FROM packages WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?;
    row.ok_or_else(|| AppError::NotFound("Package not found".to_string()))
}

fn validate_required(input: &PackageInput) -> Result<(), AppError> {
    let has = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
    let has_name = has(&input.name) || has(&input.title);

    if !has_name || !has(&input.slug) || !has(&input.country) || input.days.is_none() {
        return Err(AppError::Validation(
            "name, slug, country, and days are required".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> PackageInput {
        PackageInput {
            name: Some("Trip".to_string()),
            slug: Some("trip".to_string()),
            country: Some("Italy".to_string()),
            days: Some(3),
            ..PackageInput::default()
        }
    }

    #[test]
    fn test_validate_accepts_complete_input() {
        assert!(validate_required(&valid()).is_ok());
    }

    #[test]
    fn test_validate_accepts_legacy_title_for_name() {
        let mut input = valid();
        input.name = None;
        input.title = Some("Trip".to_string());
        assert!(validate_required(&input).is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        for strip in ["name", "slug", "country", "days"] {
            let mut input = valid();
            match strip {
                "name" => input.name = None,
                "slug" => input.slug = None,
                "country" => input.country = None,
                _ => input.days = None,
            }
            assert!(validate_required(&input).is_err(), "missing {strip}");
        }
    }
}
