//! Persistence Models
//! Mission: Row types for the five planner tables

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// User account row. The bcrypt hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub occupation: Option<String>,
    pub fcm_token: Option<String>,
    pub location_id: Option<i64>,
}

/// Input for user creation; the id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub occupation: Option<String>,
    pub fcm_token: Option<String>,
    pub location_id: Option<i64>,
}

/// Calendar event. Ownership is optional: anonymous creation leaves
/// `user_id` unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub date: NaiveDate,
    pub location_id: i64,
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub date: NaiveDate,
    pub location_id: i64,
    pub user_id: Option<i64>,
}

/// Checklist entry attached to an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub event_id: i64,
    pub is_checked: bool,
    pub notes: String,
}

#[derive(Debug, Clone)]
pub struct NewItem {
    pub event_id: i64,
    pub is_checked: bool,
    pub notes: String,
}

/// Scheduled reminder owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub schedule_date: NaiveDate,
    pub is_active: bool,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct NewReminder {
    pub user_id: i64,
    pub title: String,
    pub schedule_date: NaiveDate,
    pub is_active: bool,
    pub message: String,
}

/// Place referenced by users and events. Not owned by either.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub name: String,
}
