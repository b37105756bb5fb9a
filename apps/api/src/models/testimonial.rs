use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A `testimonials` row as persisted; `gallery_images` is text-encoded.
#[derive(Debug, Clone, FromRow)]
pub struct TestimonialRow {
    pub id: i32,
    pub quote: String,
    pub author_name: String,
    pub author_location: Option<String>,
    pub image: Option<String>,
    pub gallery_images: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The testimonial as exposed to API consumers, with the gallery
/// materialized to a string sequence.
#[derive(Debug, Clone, Serialize)]
pub struct PublicTestimonial {
    pub id: i32,
    pub quote: String,
    pub author_name: String,
    pub author_location: Option<String>,
    pub image: Option<String>,
    pub gallery_images: Vec<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
