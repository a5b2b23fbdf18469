use axum::{routing::post, Router};

pub mod admin;
pub mod auth;
pub mod college;
pub mod event;
pub mod feed;
pub mod registration;
pub mod user;

pub fn app() -> Router {
    Router::new()
        .nest("/colleges", college::app())
        .nest("/events", event::app())
        .nest("/registrations", registration::app())
        .nest("/feed", feed::app())
        .nest("/admin", admin::app())
        .nest("/users", user::app())
        .route("/college/login", post(auth::college_login))
}

// Shared pieces of the per-entity request validation: collect a message for
// every missing field so the whole payload is reported in one 400.

pub(crate) fn require<T>(value: Option<T>, field: &str, errors: &mut Vec<String>) -> Option<T> {
    if value.is_none() {
        errors.push(format!("{field} is required"));
    }
    value
}

pub(crate) fn require_string(
    value: Option<String>,
    field: &str,
    errors: &mut Vec<String>,
) -> Option<String> {
    match value {
        Some(s) if !s.trim().is_empty() => Some(s),
        _ => {
            errors.push(format!("{field} is required"));
            None
        }
    }
}

pub(crate) fn require_email(
    value: Option<String>,
    field: &str,
    errors: &mut Vec<String>,
) -> Option<String> {
    let email = require_string(value, field, errors)?;
    if email.contains('@') {
        Some(email)
    } else {
        errors.push(format!("{field} must be a valid email address"));
        None
    }
}
