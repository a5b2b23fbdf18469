use super::require_string;
use crate::{
    error::{AppError, AppResult},
    models::{FeedPost, FeedPostUpdate, NewFeedPost},
    SharedStore,
};
use axum::{
    extract::Path,
    http::StatusCode,
    routing::{get, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedPostRequest {
    author: Option<String>,
    college: Option<String>,
    content: Option<String>,
    image_url: Option<String>,
}

impl FeedPostRequest {
    fn validate(self) -> Result<NewFeedPost, Vec<String>> {
        let mut errors = Vec::new();
        let author = require_string(self.author, "author", &mut errors);
        let college = require_string(self.college, "college", &mut errors);
        let content = require_string(self.content, "content", &mut errors);
        match (author, college, content) {
            (Some(author), Some(college), Some(content)) if errors.is_empty() => Ok(NewFeedPost {
                author,
                college,
                content,
                image_url: self.image_url,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Serialize)]
struct DeletedResponse {
    deleted: bool,
}

/// Only posts that passed moderation; `/admin/feed` serves the rest.
async fn list(Extension(store): Extension<SharedStore>) -> Json<Vec<FeedPost>> {
    Json(store.list_approved_feed_posts().await)
}

async fn create(
    Extension(store): Extension<SharedStore>,
    Json(req): Json<FeedPostRequest>,
) -> AppResult<(StatusCode, Json<FeedPost>)> {
    let new = req.validate().map_err(AppError::validation)?;
    Ok((StatusCode::CREATED, Json(store.create_feed_post(new).await)))
}

async fn edit(
    Extension(store): Extension<SharedStore>,
    Path(post_id): Path<i32>,
    Json(req): Json<FeedPostUpdate>,
) -> AppResult<Json<FeedPost>> {
    store
        .update_feed_post(post_id, req)
        .await
        .map(Json)
        .ok_or_else(|| AppError::from(StatusCode::NOT_FOUND, "the post does not exist"))
}

async fn remove(
    Extension(store): Extension<SharedStore>,
    Path(post_id): Path<i32>,
) -> AppResult<Json<DeletedResponse>> {
    if !store.delete_feed_post(post_id).await {
        return Err(AppError::from(
            StatusCode::NOT_FOUND,
            "the post does not exist",
        ));
    }
    Ok(Json(DeletedResponse { deleted: true }))
}

pub fn app() -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:post_id", put(edit).delete(remove))
}
