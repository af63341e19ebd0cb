//! Planner Backend Library
//!
//! Event-planning API: signup/login with bearer tokens, plus CRUD over
//! events, checklist items, reminders and locations backed by SQLite.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod store;
