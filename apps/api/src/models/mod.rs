pub mod admin;
pub mod contact;
pub mod email_settings;
pub mod enquiry;
pub mod package;
pub mod testimonial;
