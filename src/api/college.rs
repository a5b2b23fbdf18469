use super::{require_email, require_string};
use crate::{
    error::{AppError, AppResult},
    models::{College, CollegeUpdate, Event, NewCollege},
    store::EventFilter,
    SharedStore,
};
use axum::{extract::Path, http::StatusCode, routing::get, Extension, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public shape of a college: the stored password stays behind, the
/// college's event list rides along.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CollegeResponse {
    id: i32,
    name: String,
    email: String,
    location: String,
    description: Option<String>,
    is_approved: bool,
    students_count: i32,
    created_at: DateTime<Utc>,
    events: Vec<Event>,
}

impl CollegeResponse {
    pub(crate) fn from_college(college: College, events: Vec<Event>) -> Self {
        Self {
            id: college.id,
            name: college.name,
            email: college.email,
            location: college.location,
            description: college.description,
            is_approved: college.is_approved,
            students_count: college.students_count,
            created_at: college.created_at,
            events,
        }
    }
}

pub(crate) async fn events_for(store: &SharedStore, college_id: i32) -> Vec<Event> {
    store
        .list_events(&EventFilter {
            college_id: Some(college_id),
            ..Default::default()
        })
        .await
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CollegeRequest {
    name: Option<String>,
    email: Option<String>,
    // optional at registration; missing means an empty password
    password: Option<String>,
    location: Option<String>,
    description: Option<String>,
}

impl CollegeRequest {
    fn validate(self) -> Result<NewCollege, Vec<String>> {
        let mut errors = Vec::new();
        let name = require_string(self.name, "name", &mut errors);
        let email = require_email(self.email, "email", &mut errors);
        let location = require_string(self.location, "location", &mut errors);
        match (name, email, location) {
            (Some(name), Some(email), Some(location)) if errors.is_empty() => Ok(NewCollege {
                name,
                email,
                password: self.password.unwrap_or_default(),
                location,
                description: self.description,
            }),
            _ => Err(errors),
        }
    }
}

async fn list(Extension(store): Extension<SharedStore>) -> Json<Vec<CollegeResponse>> {
    let mut colleges = Vec::new();
    for college in store.list_approved_colleges().await {
        let events = events_for(&store, college.id).await;
        colleges.push(CollegeResponse::from_college(college, events));
    }
    Json(colleges)
}

async fn info(
    Extension(store): Extension<SharedStore>,
    Path(college_id): Path<i32>,
) -> AppResult<Json<CollegeResponse>> {
    let college = store
        .get_college(college_id)
        .await
        .ok_or_else(|| AppError::from(StatusCode::NOT_FOUND, "the college does not exist"))?;
    let events = events_for(&store, college_id).await;
    Ok(Json(CollegeResponse::from_college(college, events)))
}

async fn register(
    Extension(store): Extension<SharedStore>,
    Json(req): Json<CollegeRequest>,
) -> AppResult<(StatusCode, Json<CollegeResponse>)> {
    let new = req.validate().map_err(AppError::validation)?;

    let Some(college) = store.create_college(new).await else {
        return Err(AppError::from(
            StatusCode::CONFLICT,
            "a college with this email already exists",
        ));
    };

    Ok((
        StatusCode::CREATED,
        Json(CollegeResponse::from_college(college, Vec::new())),
    ))
}

async fn edit(
    Extension(store): Extension<SharedStore>,
    Path(college_id): Path<i32>,
    Json(req): Json<CollegeUpdate>,
) -> AppResult<Json<CollegeResponse>> {
    let college = store
        .update_college(college_id, req)
        .await
        .ok_or_else(|| AppError::from(StatusCode::NOT_FOUND, "the college does not exist"))?;
    let events = events_for(&store, college_id).await;
    Ok(Json(CollegeResponse::from_college(college, events)))
}

pub fn app() -> Router {
    Router::new()
        .route("/", get(list).post(register))
        .route("/:college_id", get(info).put(edit))
}
