use super::auth;
use crate::{
    models::{Event, FeedPost},
    SharedStore,
};
use axum::{
    routing::{get, post},
    Extension, Json, Router,
};

/// Every event, inactive ones included.
async fn all_events(Extension(store): Extension<SharedStore>) -> Json<Vec<Event>> {
    Json(store.list_all_events().await)
}

/// The moderation queue: every post, approved or not.
async fn all_feed(Extension(store): Extension<SharedStore>) -> Json<Vec<FeedPost>> {
    Json(store.list_feed_posts().await)
}

pub fn app() -> Router {
    Router::new()
        .route("/login", post(auth::admin_login))
        .route("/events", get(all_events))
        .route("/feed", get(all_feed))
}
