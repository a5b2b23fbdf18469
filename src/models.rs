use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered college account. Not `Serialize` on purpose: the stored
/// password must never reach a response body, so the API builds
/// `CollegeResponse` values instead.
#[derive(Debug, Clone)]
pub struct College {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password: String,
    pub location: String,
    pub description: Option<String>,
    pub is_approved: bool,
    pub students_count: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i32,
    pub name: String,
    pub college_id: i32,
    pub date: DateTime<Utc>,
    pub fee: i32,
    pub category: Option<String>,
    pub location: Option<String>,
    pub max_participants: Option<i32>,
    pub current_participants: i32,
    pub hosts: Vec<String>,
    pub contact_numbers: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: i32,
    pub event_id: i32,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub college: String,
    pub course: String,
    pub address: Option<String>,
    pub is_verified: bool,
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPost {
    pub id: i32,
    pub author: String,
    pub college: String,
    pub content: String,
    pub image_url: Option<String>,
    pub likes: i32,
    pub comments: Vec<String>,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

/// Like `College`, kept out of response bodies because of the password.
#[derive(Debug, Clone)]
pub struct Admin {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: String,
    pub college_id: Option<i32>,
}

// Validated create payloads. Route handlers build these from the raw
// request structs; the store fills in ids, defaults and timestamps.

pub struct NewCollege {
    pub name: String,
    pub email: String,
    pub password: String,
    pub location: String,
    pub description: Option<String>,
}

pub struct NewEvent {
    pub name: String,
    pub college_id: i32,
    pub date: DateTime<Utc>,
    pub fee: i32,
    pub category: Option<String>,
    pub location: Option<String>,
    pub max_participants: Option<i32>,
    pub hosts: Vec<String>,
    pub contact_numbers: Vec<String>,
}

pub struct NewRegistration {
    pub event_id: i32,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub college: String,
    pub course: String,
    pub address: Option<String>,
}

pub struct NewFeedPost {
    pub author: String,
    pub college: String,
    pub content: String,
    pub image_url: Option<String>,
}

pub struct NewAdmin {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

pub struct NewUser {
    pub username: String,
    pub email: String,
    pub role: String,
    pub college_id: Option<i32>,
}

// Shallow-merge patches. A present field overwrites the stored value,
// an absent field is left alone; the merged record is not re-validated.

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollegeUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub is_approved: Option<bool>,
    pub students_count: Option<i32>,
}

impl CollegeUpdate {
    pub fn apply(self, college: &mut College) {
        if let Some(name) = self.name {
            college.name = name;
        }
        if let Some(email) = self.email {
            college.email = email;
        }
        if let Some(password) = self.password {
            college.password = password;
        }
        if let Some(location) = self.location {
            college.location = location;
        }
        if let Some(description) = self.description {
            college.description = Some(description);
        }
        if let Some(is_approved) = self.is_approved {
            college.is_approved = is_approved;
        }
        if let Some(students_count) = self.students_count {
            college.students_count = students_count;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventUpdate {
    pub name: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub fee: Option<i32>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub max_participants: Option<i32>,
    pub current_participants: Option<i32>,
    pub hosts: Option<Vec<String>>,
    pub contact_numbers: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

impl EventUpdate {
    pub fn apply(self, event: &mut Event) {
        if let Some(name) = self.name {
            event.name = name;
        }
        if let Some(date) = self.date {
            event.date = date;
        }
        if let Some(fee) = self.fee {
            event.fee = fee;
        }
        if let Some(category) = self.category {
            event.category = Some(category);
        }
        if let Some(location) = self.location {
            event.location = Some(location);
        }
        if let Some(max_participants) = self.max_participants {
            event.max_participants = Some(max_participants);
        }
        if let Some(current_participants) = self.current_participants {
            event.current_participants = current_participants;
        }
        if let Some(hosts) = self.hosts {
            event.hosts = hosts;
        }
        if let Some(contact_numbers) = self.contact_numbers {
            event.contact_numbers = contact_numbers;
        }
        if let Some(is_active) = self.is_active {
            event.is_active = is_active;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub college: Option<String>,
    pub course: Option<String>,
    pub address: Option<String>,
    pub is_verified: Option<bool>,
}

impl RegistrationUpdate {
    pub fn apply(self, registration: &mut Registration) {
        if let Some(full_name) = self.full_name {
            registration.full_name = full_name;
        }
        if let Some(email) = self.email {
            registration.email = email;
        }
        if let Some(phone) = self.phone {
            registration.phone = phone;
        }
        if let Some(college) = self.college {
            registration.college = college;
        }
        if let Some(course) = self.course {
            registration.course = course;
        }
        if let Some(address) = self.address {
            registration.address = Some(address);
        }
        if let Some(is_verified) = self.is_verified {
            registration.is_verified = is_verified;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPostUpdate {
    pub author: Option<String>,
    pub college: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub likes: Option<i32>,
    pub comments: Option<Vec<String>>,
    pub is_approved: Option<bool>,
}

impl FeedPostUpdate {
    pub fn apply(self, post: &mut FeedPost) {
        if let Some(author) = self.author {
            post.author = author;
        }
        if let Some(college) = self.college {
            post.college = college;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(image_url) = self.image_url {
            post.image_url = Some(image_url);
        }
        if let Some(likes) = self.likes {
            post.likes = likes;
        }
        if let Some(comments) = self.comments {
            post.comments = comments;
        }
        if let Some(is_approved) = self.is_approved {
            post.is_approved = is_approved;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

impl AdminUpdate {
    pub fn apply(self, admin: &mut Admin) {
        if let Some(username) = self.username {
            admin.username = username;
        }
        if let Some(email) = self.email {
            admin.email = email;
        }
        if let Some(password) = self.password {
            admin.password = password;
        }
        if let Some(role) = self.role {
            admin.role = role;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub college_id: Option<i32>,
}

impl UserUpdate {
    pub fn apply(self, user: &mut User) {
        if let Some(username) = self.username {
            user.username = username;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(college_id) = self.college_id {
            user.college_id = Some(college_id);
        }
    }
}
