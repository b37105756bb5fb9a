use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::guard::AdminUser;
use crate::errors::AppError;
use crate::models::testimonial::{PublicTestimonial, TestimonialRow};
use crate::packages::codec;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TestimonialInput {
    pub quote: Option<String>,
    pub author_name: Option<String>,
    pub author_location: Option<String>,
    pub image: Option<String>,
    pub gallery_images: Option<Vec<String>>,
    pub sort_order: Option<i32>,
}

fn to_public(row: TestimonialRow) -> PublicTestimonial {
    PublicTestimonial {
        id: row.id,
        quote: row.quote,
        author_name: row.author_name,
        author_location: row.author_location,
        image: row.image,
        gallery_images: codec::decode_string_list(row.gallery_images.as_deref()),
        sort_order: row.sort_order,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

/// GET /api/testimonials — public, in display order.
pub async fn handle_list(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let rows: Vec<TestimonialRow> =
        sqlx::query_as("SELECT * FROM testimonials ORDER BY sort_order ASC, id ASC")
            .fetch_all(&state.db)
            .await?;

    let testimonials: Vec<_> = rows.into_iter().map(to_public).collect();
    Ok(Json(json!({ "testimonials": testimonials })))
}

/// GET /api/testimonials/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PublicTestimonial>, AppError> {
    Ok(Json(to_public(fetch_row(&state, id).await?)))
}

/// POST /api/testimonials
pub async fn handle_create(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(input): Json<TestimonialInput>,
) -> Result<Json<Value>, AppError> {
    let quote = input.quote.as_deref().unwrap_or("");
    let author_name = input.author_name.as_deref().unwrap_or("");
    if quote.is_empty() || author_name.is_empty() {
        return Err(AppError::Validation(
            "Quote and author name are required".to_string(),
        ));
    }

    let gallery = input
        .gallery_images
        .as_ref()
        .and_then(|g| codec::encode_as(g));

    sqlx::query(
        r#"
        INSERT INTO testimonials
            (quote, author_name, author_location, image, gallery_images, sort_order)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(quote)
    .bind(author_name)
    .bind(&input.author_location)
    .bind(&input.image)
    .bind(gallery)
    .bind(input.sort_order.unwrap_or(0))
    .execute(&state.db)
    .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Testimonial created successfully"
    })))
}

/// PUT /api/testimonials/:id — partial update from only the supplied fields.
pub async fn handle_update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _admin: AdminUser,
    Json(input): Json<TestimonialInput>,
) -> Result<Json<Value>, AppError> {
    fetch_row(&state, id).await?; // ensure exists

    let nothing_supplied = input.quote.is_none()
        && input.author_name.is_none()
        && input.author_location.is_none()
        && input.image.is_none()
        && input.gallery_images.is_none()
        && input.sort_order.is_none();
    if nothing_supplied {
        return Ok(Json(json!({
            "success": true,
            "message": "Nothing to update"
        })));
    }

    let mut query = sqlx::QueryBuilder::new("UPDATE testimonials SET updated_at = now()");
    if let Some(quote) = &input.quote {
        query.push(", quote = ").push_bind(quote);
    }
    if let Some(author_name) = &input.author_name {
        query.push(", author_name = ").push_bind(author_name);
    }
    if let Some(author_location) = &input.author_location {
        query.push(", author_location = ").push_bind(author_location);
    }
    if let Some(image) = &input.image {
        query.push(", image = ").push_bind(image);
    }
    if let Some(gallery) = &input.gallery_images {
        // Empty gallery clears the column rather than storing a placeholder.
        query
            .push(", gallery_images = ")
            .push_bind(codec::encode_as(gallery));
    }
    if let Some(sort_order) = input.sort_order {
        query.push(", sort_order = ").push_bind(sort_order);
    }
    query.push(" WHERE id = ").push_bind(id);

    query.build().execute(&state.db).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Testimonial updated successfully"
    })))
}

/// DELETE /api/testimonials/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _admin: AdminUser,
) -> Result<Json<Value>, AppError> {
    fetch_row(&state, id).await?;
    sqlx::query("DELETE FROM testimonials WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;
    Ok(Json(json!({ "success": true })))
}

async fn fetch_row(state: &AppState, id: i32) -> Result<TestimonialRow, AppError> {
    let row: Option<TestimonialRow> = sqlx::query_as("SELECT * FROM testimonials WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?;
    row.ok_or_else(|| AppError::NotFound("Testimonial not found".to_string()))
}
