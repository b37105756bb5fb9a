use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// The singleton `email_settings` row (id = 1). SMTP transport configuration
/// lives here rather than in the environment so admins can edit it.
#[derive(Debug, Clone, FromRow)]
pub struct EmailSettingsRow {
    pub id: i32,
    pub host: Option<String>,
    pub port: Option<i32>,
    pub secure: Option<bool>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from_email: Option<String>,
    pub from_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Settings as returned to the admin panel. The password never leaves the
/// server.
#[derive(Debug, Clone, Serialize)]
pub struct EmailSettingsView {
    pub id: i32,
    pub host: Option<String>,
    pub port: Option<i32>,
    pub secure: Option<bool>,
    pub username: Option<String>,
    pub from_email: Option<String>,
    pub from_name: Option<String>,
}

impl From<EmailSettingsRow> for EmailSettingsView {
    fn from(row: EmailSettingsRow) -> Self {
        EmailSettingsView {
            id: row.id,
            host: row.host,
            port: row.port,
            secure: row.secure,
            username: row.username,
            from_email: row.from_email,
            from_name: row.from_name,
        }
    }
}
