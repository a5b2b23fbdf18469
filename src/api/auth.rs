use super::college::{events_for, CollegeResponse};
use crate::{
    error::{AppError, AppResult},
    models::Admin,
    SharedStore,
};
use axum::{http::StatusCode, Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Placeholder session tokens. There is no session or JWT machinery behind
// these; the client only checks for their presence.
const COLLEGE_TOKEN: &str = "college-access-token";
const ADMIN_TOKEN: &str = "admin-access-token";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CollegeLoginRequest {
    email: String,
    password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CollegeAuthorizedResponse {
    token: String,
    college: CollegeResponse,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AdminLoginRequest {
    username: String,
    password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AdminResponse {
    id: i32,
    username: String,
    email: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl AdminResponse {
    fn from_admin(admin: Admin) -> Self {
        Self {
            id: admin.id,
            username: admin.username,
            email: admin.email,
            role: admin.role,
            created_at: admin.created_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AdminAuthorizedResponse {
    token: String,
    admin: AdminResponse,
}

pub(crate) async fn college_login(
    Extension(store): Extension<SharedStore>,
    Json(req): Json<CollegeLoginRequest>,
) -> AppResult<Json<CollegeAuthorizedResponse>> {
    let Some(college) = store.college_by_email(&req.email).await else {
        return Err(AppError::from(
            StatusCode::UNAUTHORIZED,
            "invalid email or password",
        ));
    };

    if college.password != req.password {
        return Err(AppError::from(
            StatusCode::UNAUTHORIZED,
            "invalid email or password",
        ));
    }

    if !college.is_approved {
        return Err(AppError::from(
            StatusCode::FORBIDDEN,
            "college is awaiting approval",
        ));
    }

    let events = events_for(&store, college.id).await;
    Ok(Json(CollegeAuthorizedResponse {
        token: COLLEGE_TOKEN.to_string(),
        college: CollegeResponse::from_college(college, events),
    }))
}

pub(crate) async fn admin_login(
    Extension(store): Extension<SharedStore>,
    Json(req): Json<AdminLoginRequest>,
) -> AppResult<Json<AdminAuthorizedResponse>> {
    let Some(admin) = store.admin_by_username(&req.username).await else {
        return Err(AppError::from(
            StatusCode::UNAUTHORIZED,
            "invalid username or password",
        ));
    };

    if admin.password != req.password {
        return Err(AppError::from(
            StatusCode::UNAUTHORIZED,
            "invalid username or password",
        ));
    }

    Ok(Json(AdminAuthorizedResponse {
        token: ADMIN_TOKEN.to_string(),
        admin: AdminResponse::from_admin(admin),
    }))
}
