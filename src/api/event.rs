use super::{require, require_string};
use crate::{
    error::{AppError, AppResult},
    models::{Event, EventUpdate, NewEvent, Registration},
    store::{EventFilter, TimeWindow},
    SharedStore,
};
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventRequest {
    name: Option<String>,
    college_id: Option<i32>,
    date: Option<DateTime<Utc>>,
    fee: Option<i32>,
    category: Option<String>,
    location: Option<String>,
    max_participants: Option<i32>,
    #[serde(default)]
    hosts: Vec<String>,
    #[serde(default)]
    contact_numbers: Vec<String>,
}

impl EventRequest {
    fn validate(self) -> Result<NewEvent, Vec<String>> {
        let mut errors = Vec::new();
        let name = require_string(self.name, "name", &mut errors);
        let college_id = require(self.college_id, "collegeId", &mut errors);
        let date = require(self.date, "date", &mut errors);
        let fee = require(self.fee, "fee", &mut errors);
        if matches!(fee, Some(f) if f < 0) {
            errors.push("fee must not be negative".to_string());
        }
        if matches!(self.max_participants, Some(m) if m <= 0) {
            errors.push("maxParticipants must be positive".to_string());
        }
        match (name, college_id, date, fee) {
            (Some(name), Some(college_id), Some(date), Some(fee)) if errors.is_empty() => {
                Ok(NewEvent {
                    name,
                    college_id,
                    date,
                    fee,
                    category: self.category,
                    location: self.location,
                    max_participants: self.max_participants,
                    hosts: self.hosts,
                    contact_numbers: self.contact_numbers,
                })
            }
            _ => Err(errors),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventListQuery {
    college_id: Option<i32>,
    category: Option<String>,
    time: Option<String>,
}

#[derive(Serialize)]
struct DeletedResponse {
    deleted: bool,
}

async fn list(
    Extension(store): Extension<SharedStore>,
    Query(query): Query<EventListQuery>,
) -> AppResult<Json<Vec<Event>>> {
    let time = match query.time.as_deref() {
        None => None,
        Some("upcoming") => Some(TimeWindow::Upcoming),
        Some("past") => Some(TimeWindow::Past),
        Some(_) => {
            return Err(AppError::from(
                StatusCode::BAD_REQUEST,
                "time must be \"upcoming\" or \"past\"",
            ))
        }
    };

    Ok(Json(
        store
            .list_events(&EventFilter {
                college_id: query.college_id,
                category: query.category,
                time,
            })
            .await,
    ))
}

async fn info(
    Extension(store): Extension<SharedStore>,
    Path(event_id): Path<i32>,
) -> AppResult<Json<Event>> {
    store
        .get_event(event_id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::from(StatusCode::NOT_FOUND, "the event does not exist"))
}

async fn create(
    Extension(store): Extension<SharedStore>,
    Json(req): Json<EventRequest>,
) -> AppResult<(StatusCode, Json<Event>)> {
    let new = req.validate().map_err(AppError::validation)?;

    let Some(event) = store.create_event(new).await else {
        return Err(AppError::from(
            StatusCode::NOT_FOUND,
            "the college does not exist",
        ));
    };

    Ok((StatusCode::CREATED, Json(event)))
}

async fn edit(
    Extension(store): Extension<SharedStore>,
    Path(event_id): Path<i32>,
    Json(req): Json<EventUpdate>,
) -> AppResult<Json<Event>> {
    store
        .update_event(event_id, req)
        .await
        .map(Json)
        .ok_or_else(|| AppError::from(StatusCode::NOT_FOUND, "the event does not exist"))
}

async fn remove(
    Extension(store): Extension<SharedStore>,
    Path(event_id): Path<i32>,
) -> AppResult<Json<DeletedResponse>> {
    if !store.delete_event(event_id).await {
        return Err(AppError::from(
            StatusCode::NOT_FOUND,
            "the event does not exist",
        ));
    }
    Ok(Json(DeletedResponse { deleted: true }))
}

async fn registrations(
    Extension(store): Extension<SharedStore>,
    Path(event_id): Path<i32>,
) -> AppResult<Json<Vec<Registration>>> {
    if store.get_event(event_id).await.is_none() {
        return Err(AppError::from(
            StatusCode::NOT_FOUND,
            "the event does not exist",
        ));
    }
    Ok(Json(store.registrations_for_event(event_id).await))
}

pub fn app() -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:event_id", get(info).put(edit).delete(remove))
        .route("/:event_id/registrations", get(registrations))
}
