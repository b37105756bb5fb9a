//! HTML bodies for the notification emails. Only populated fields render a
//! detail row.

use chrono::{Datelike, Utc};

use crate::models::contact::ContactRow;
use crate::models::enquiry::EnquiryRow;

pub fn enquiry_email(enquiry: &EnquiryRow, logo_url: &str) -> String {
    let mut rows = String::new();
    rows.push_str(&detail_row("Name", &enquiry.name));
    rows.push_str(&detail_row("Email", &enquiry.email));
    push_optional(&mut rows, "Mobile", enquiry.mobile.as_deref());
    push_optional(&mut rows, "Tour", enquiry.tour.as_deref());
    push_optional(&mut rows, "Destination", enquiry.destination.as_deref());
    if let Some(date) = enquiry.arrival_date {
        rows.push_str(&detail_row("Arrival Date", &date.to_string()));
    }
    if let Some(date) = enquiry.departure_date {
        rows.push_str(&detail_row("Departure Date", &date.to_string()));
    }
    if let Some(adults) = enquiry.adults {
        rows.push_str(&detail_row("Adults", &adults.to_string()));
    }
    if let Some(children) = enquiry.children {
        rows.push_str(&detail_row("Children", &children.to_string()));
    }
    push_optional(&mut rows, "Living Country", enquiry.living_country.as_deref());
    push_optional(&mut rows, "Nationality", enquiry.nationality.as_deref());
    push_optional(&mut rows, "Flight Status", enquiry.flight_status.as_deref());
    push_optional(&mut rows, "Holiday Reason", enquiry.holiday_reason.as_deref());
    push_optional(&mut rows, "Message", enquiry.message.as_deref());

    layout(
        "New Travel Enquiry",
        logo_url,
        "You have received a new travel enquiry. Please find the details below:",
        &rows,
        "This enquiry was submitted through the Wayline Travel website. \
         Please respond to the customer at your earliest convenience.",
    )
}

pub fn contact_email(contact: &ContactRow, logo_url: &str) -> String {
    let mut rows = String::new();
    rows.push_str(&detail_row("Name", &contact.name));
    rows.push_str(&detail_row("Email", &contact.email));
    rows.push_str(&detail_row("Subject", &contact.subject));
    rows.push_str(&detail_row("Message", &contact.message));

    layout(
        "New Contact Form Submission",
        logo_url,
        "You have received a new message through the contact form. Please find the details below:",
        &rows,
        "This message was submitted through the Wayline Travel website contact form.",
    )
}

fn push_optional(rows: &mut String, label: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        rows.push_str(&detail_row(label, value));
    }
}

fn detail_row(label: &str, value: &str) -> String {
    let value = escape(value).replace('\n', "<br>");
    format!(
        r#"<tr>
  <td style="padding: 8px 0;">
    <strong style="color: #4CAF50; font-size: 14px;">{label}:</strong>
    <span style="color: #333333; font-size: 14px; margin-left: 10px;">{value}</span>
  </td>
</tr>
"#
    )
}

fn layout(title: &str, logo_url: &str, intro: &str, rows: &str, footer_note: &str) -> String {
    let year = Utc::now().year();
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
</head>
<body style="margin: 0; padding: 0; font-family: Arial, sans-serif; background-color: #f5f5f5;">
  <table width="100%" cellpadding="0" cellspacing="0" style="background-color: #f5f5f5; padding: 20px;">
    <tr>
      <td align="center">
        <table width="600" cellpadding="0" cellspacing="0" style="background-color: #ffffff; border-radius: 8px; overflow: hidden;">
          <tr>
            <td style="background: linear-gradient(135deg, #4CAF50 0%, #45a049 100%); padding: 30px; text-align: center;">
              <img src="{logo_url}" alt="Wayline Travel" style="max-width: 200px; height: auto; margin-bottom: 10px;" />
              <h1 style="color: #ffffff; margin: 0; font-size: 24px; font-weight: 600;">{title}</h1>
            </td>
          </tr>
          <tr>
            <td style="padding: 30px;">
              <p style="color: #333333; font-size: 16px; line-height: 1.6; margin: 0 0 20px 0;">{intro}</p>
              <table width="100%" cellpadding="0" cellspacing="0" style="background-color: #f9f9f9; border-radius: 6px; padding: 20px; margin-bottom: 20px;">
{rows}
              </table>
              <p style="color: #666666; font-size: 14px; line-height: 1.6; margin: 20px 0 0 0;">{footer_note}</p>
            </td>
          </tr>
          <tr>
            <td style="background-color: #f9f9f9; padding: 20px; text-align: center; border-top: 1px solid #e0e0e0;">
              <p style="color: #666666; font-size: 12px; margin: 0;">&copy; {year} Wayline Travel. All rights reserved.</p>
            </td>
          </tr>
        </table>
      </td>
    </tr>
  </table>
</body>
</html>
"#
    )
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn enquiry() -> EnquiryRow {
        EnquiryRow {
            id: 1,
            tour: Some("Iceland".to_string()),
            name: "Ada".to_string(),
            email: "ada@example.test".to_string(),
            mobile: None,
            living_country: None,
            nationality: None,
            destination: None,
            arrival_date: NaiveDate::from_ymd_opt(2026, 3, 14),
            departure_date: None,
            adults: Some(2),
            children: None,
            flight_status: None,
            holiday_reason: None,
            message: Some("Hello\nWorld".to_string()),
            status: "pending".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_enquiry_email_renders_only_populated_fields() {
        let html = enquiry_email(&enquiry(), "https://site.test/logo.webp");
        assert!(html.contains("Ada"));
        assert!(html.contains("Iceland"));
        assert!(html.contains("2026-03-14"));
        assert!(!html.contains("Departure Date"));
        assert!(!html.contains("Nationality"));
    }

    #[test]
    fn test_multiline_message_becomes_line_breaks() {
        let html = enquiry_email(&enquiry(), "logo");
        assert!(html.contains("Hello<br>World"));
    }

    #[test]
    fn test_markup_in_submissions_is_escaped() {
        let mut e = enquiry();
        e.name = "<script>alert(1)</script>".to_string();
        let html = enquiry_email(&e, "logo");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_contact_email_contains_all_fields() {
        let contact = ContactRow {
            id: 1,
            name: "Ada".to_string(),
            email: "ada@example.test".to_string(),
            subject: "Booking question".to_string(),
            message: "Is July available?".to_string(),
            status: "pending".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let html = contact_email(&contact, "logo");
        assert!(html.contains("Booking question"));
        assert!(html.contains("Is July available?"));
    }
}
