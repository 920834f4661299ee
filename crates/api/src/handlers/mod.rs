//! REST-Handler

pub mod auth;
pub mod users;
