use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EnquiryRow {
    pub id: i32,
    pub tour: Option<String>,
    pub name: String,
    pub email: String,
    pub mobile: Option<String>,
    pub living_country: Option<String>,
    pub nationality: Option<String>,
    pub destination: Option<String>,
    pub arrival_date: Option<NaiveDate>,
    pub departure_date: Option<NaiveDate>,
    pub adults: Option<i32>,
    pub children: Option<i32>,
    pub flight_status: Option<String>,
    pub holiday_reason: Option<String>,
    pub message: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
