use crate::{models::User, SharedStore};
use axum::{routing::get, Extension, Json, Router};

async fn list(Extension(store): Extension<SharedStore>) -> Json<Vec<User>> {
    Json(store.list_users().await)
}

pub fn app() -> Router {
    Router::new().route("/", get(list))
}
