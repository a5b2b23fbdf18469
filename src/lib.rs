use std::{io, sync::Arc};

use axum::{http::StatusCode, routing::get_service, Router};
use tower_http::services::ServeDir;

pub mod api;
pub mod error;
pub mod models;
pub mod store;

pub type SharedStore = Arc<store::Store>;

pub fn app() -> Router {
    let serve = get_service(ServeDir::new("assets")).handle_error(handle_error);
    Router::new()
        .nest("/api", api::app())
        .nest("/assets", serve)
}

async fn handle_error(_: io::Error) -> error::AppError {
    error::AppError::from(StatusCode::INTERNAL_SERVER_ERROR, "failed to fetch asset")
}
