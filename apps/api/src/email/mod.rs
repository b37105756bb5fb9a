//! SMTP notification delivery.
//!
//! Transport settings live in the `email_settings` table so admins can edit
//! them from the panel. Missing or incomplete settings make sending a no-op
//! with a warning; submissions must never fail because mail is down.

pub mod handlers;
pub mod templates;

use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::media::resolver;
use crate::models::contact::ContactRow;
use crate::models::email_settings::EmailSettingsRow;
use crate::models::enquiry::EnquiryRow;

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Email build error: {0}")]
    Build(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Fetches the singleton settings row, if configured at all.
pub async fn load_settings(pool: &PgPool) -> Result<Option<EmailSettingsRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM email_settings WHERE id = 1")
        .fetch_optional(pool)
        .await
}

/// Notifies the admin inbox about a new enquiry submission.
pub async fn send_enquiry_notification(
    pool: &PgPool,
    base_url: &str,
    enquiry: &EnquiryRow,
) -> Result<(), EmailError> {
    let subject = format!(
        "New Enquiry: {}",
        enquiry
            .tour
            .as_deref()
            .or(enquiry.destination.as_deref())
            .unwrap_or("Travel Package")
    );
    let html = templates::enquiry_email(enquiry, &logo_url(base_url));
    send_notification(pool, &enquiry.email, &subject, html).await
}

/// Notifies the admin inbox about a new contact form submission.
pub async fn send_contact_notification(
    pool: &PgPool,
    base_url: &str,
    contact: &ContactRow,
) -> Result<(), EmailError> {
    let subject = format!("Contact Form: {}", contact.subject);
    let html = templates::contact_email(contact, &logo_url(base_url));
    send_notification(pool, &contact.email, &subject, html).await
}

fn logo_url(base_url: &str) -> String {
    resolver::resolve("/assets/images/logo.webp", base_url)
}

async fn send_notification(
    pool: &PgPool,
    reply_to: &str,
    subject: &str,
    html: String,
) -> Result<(), EmailError> {
    let Some(settings) = load_settings(pool).await? else {
        warn!("Email settings not configured, skipping notification");
        return Ok(());
    };

    let (Some(host), Some(username), Some(password), Some(from_email)) = (
        settings.host,
        settings.username,
        settings.password,
        settings.from_email,
    ) else {
        warn!("Email settings incomplete, skipping notification");
        return Ok(());
    };

    let port = settings.port.unwrap_or(587) as u16;
    // Port 465 is implicit TLS; everything else goes through STARTTLS.
    let secure = port == 465 || settings.secure.unwrap_or(false);
    let builder = if secure {
        AsyncSmtpTransport::<Tokio1Executor>::relay(&host)?
    } else {
        AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&host)?
    };
    let mailer = builder
        .port(port)
        .credentials(Credentials::new(username, password))
        .build();

    let from_name = settings.from_name.unwrap_or_default();
    let message = Message::builder()
        .from(format!("\"{from_name}\" <{from_email}>").parse()?)
        // Notifications go to the admin's own inbox.
        .to(from_email.parse()?)
        .reply_to(reply_to.parse()?)
        .subject(subject)
        .header(ContentType::TEXT_HTML)
        .body(html)
        .map_err(|e| EmailError::Build(e.to_string()))?;

    mailer.send(message).await?;
    info!(subject, "Notification email sent");
    Ok(())
}
