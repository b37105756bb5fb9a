use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// A `packages` row as persisted. The structured fields (`itinerary`,
/// `inclusion`, `included`, `excluded`, `summary`, `images`) are still
/// text-encoded here; decoding happens in `packages::normalize`.
#[derive(Debug, Clone, FromRow)]
pub struct PackageRow {
    pub id: i32,
    pub name: Option<String>,
    /// Legacy column; rows written before the rename carry the name here.
    pub title: Option<String>,
    pub slug: String,
    pub country: String,
    pub days: i32,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub stars: Option<i32>,
    pub description: Option<String>,
    pub itinerary: Option<String>,
    /// Combined inclusion object (current shape). NULL on legacy rows.
    pub inclusion: Option<String>,
    /// Legacy split pair, consulted only when `inclusion` is NULL.
    pub included: Option<String>,
    pub excluded: Option<String>,
    pub summary: Option<String>,
    pub images: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Inclusion block of the public package shape. All members are always
/// present; unset ones default to empty rather than being omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inclusion {
    pub included: Vec<String>,
    pub excluded: Vec<String>,
    pub booking_information: String,
    pub cancellation_policy: String,
}

/// Summary block of the public package shape, defaulted like [`Inclusion`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Summary {
    pub description: String,
    pub activities: Vec<String>,
    pub locations: Vec<String>,
}

/// The package as exposed to API consumers: structured fields materialized,
/// all media paths absolute.
#[derive(Debug, Clone, Serialize)]
pub struct PublicPackage {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub country: String,
    pub days: i32,
    pub image: String,
    pub price: Option<f64>,
    pub stars: Option<i32>,
    pub description: Option<String>,
    /// Sequence of image entries: absolute-URL strings or objects whose
    /// `url` member has been made absolute. Other shapes pass through.
    pub images: Value,
    /// Sequence of day objects with `image`/`highlight[].img` made absolute.
    pub itinerary: Value,
    pub inclusion: Inclusion,
    pub summary: Summary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied package payload for create/update. Required-field checks
/// live in the handler; `split_for_write` only maps.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageInput {
    pub name: Option<String>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub country: Option<String>,
    pub days: Option<i32>,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub stars: Option<i32>,
    pub description: Option<String>,
    pub itinerary: Option<Value>,
    pub images: Option<Value>,
    pub summary: Option<Value>,
    pub inclusion: Option<Inclusion>,
}

/// Column values ready for an INSERT/UPDATE against `packages`.
/// `booking_information` and `cancellation_policy` have no column and are
/// intentionally dropped on the way in.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageWrite {
    pub name: String,
    pub slug: String,
    pub country: String,
    pub days: i32,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub stars: Option<i32>,
    pub description: Option<String>,
    pub itinerary: Option<String>,
    pub included: Option<String>,
    pub excluded: Option<String>,
    pub summary: Option<String>,
    pub images: Option<String>,
}
