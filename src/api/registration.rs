use super::{require, require_email, require_string};
use crate::{
    error::{AppError, AppResult},
    models::{NewRegistration, Registration},
    SharedStore,
};
use axum::{http::StatusCode, routing::post, Extension, Json, Router};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistrationRequest {
    event_id: Option<i32>,
    full_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    college: Option<String>,
    course: Option<String>,
    address: Option<String>,
}

impl RegistrationRequest {
    fn validate(self) -> Result<NewRegistration, Vec<String>> {
        let mut errors = Vec::new();
        let event_id = require(self.event_id, "eventId", &mut errors);
        let full_name = require_string(self.full_name, "fullName", &mut errors);
        let email = require_email(self.email, "email", &mut errors);
        let phone = require_string(self.phone, "phone", &mut errors);
        let college = require_string(self.college, "college", &mut errors);
        let course = require_string(self.course, "course", &mut errors);
        match (event_id, full_name, email, phone, college, course) {
            (Some(event_id), Some(full_name), Some(email), Some(phone), Some(college), Some(course))
                if errors.is_empty() =>
            {
                Ok(NewRegistration {
                    event_id,
                    full_name,
                    email,
                    phone,
                    college,
                    course,
                    address: self.address,
                })
            }
            _ => Err(errors),
        }
    }
}

async fn create(
    Extension(store): Extension<SharedStore>,
    Json(req): Json<RegistrationRequest>,
) -> AppResult<(StatusCode, Json<Registration>)> {
    let new = req.validate().map_err(AppError::validation)?;

    let Some(registration) = store.create_registration(new).await else {
        return Err(AppError::from(
            StatusCode::NOT_FOUND,
            "the event does not exist",
        ));
    };

    Ok((StatusCode::CREATED, Json(registration)))
}

pub fn app() -> Router {
    Router::new().route("/", post(create))
}
