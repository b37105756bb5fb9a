pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::{auth, contacts, email, enquiries, media, packages, testimonials};

pub fn build_router(state: AppState) -> Router {
    // Multipart bodies carry some framing overhead beyond the file itself.
    let body_limit = state.config.max_upload_bytes as usize + 1024 * 1024;

    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/auth/login", post(auth::handlers::handle_login))
        .route("/api/auth/logout", post(auth::handlers::handle_logout))
        .route("/api/auth/check", get(auth::handlers::handle_check))
        // Packages
        .route(
            "/api/packages",
            get(packages::handlers::handle_list).post(packages::handlers::handle_create),
        )
        .route(
            "/api/packages/:id",
            get(packages::handlers::handle_get)
                .put(packages::handlers::handle_update)
                .delete(packages::handlers::handle_delete),
        )
        // Enquiries
        .route(
            "/api/enquiries",
            get(enquiries::handlers::handle_list).post(enquiries::handlers::handle_create),
        )
        .route(
            "/api/enquiries/:id",
            get(enquiries::handlers::handle_get)
                .put(enquiries::handlers::handle_update_status)
                .delete(enquiries::handlers::handle_delete),
        )
        // Contacts
        .route(
            "/api/contacts",
            get(contacts::handlers::handle_list).post(contacts::handlers::handle_create),
        )
        .route(
            "/api/contacts/:id",
            get(contacts::handlers::handle_get)
                .put(contacts::handlers::handle_update_status)
                .delete(contacts::handlers::handle_delete),
        )
        // Testimonials
        .route(
            "/api/testimonials",
            get(testimonials::handlers::handle_list).post(testimonials::handlers::handle_create),
        )
        .route(
            "/api/testimonials/:id",
            get(testimonials::handlers::handle_get)
                .put(testimonials::handlers::handle_update)
                .delete(testimonials::handlers::handle_delete),
        )
        // Email settings
        .route(
            "/api/email-settings",
            get(email::handlers::handle_get_settings).post(email::handlers::handle_update_settings),
        )
        // Upload
        .route("/api/upload", post(media::handlers::handle_upload))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
