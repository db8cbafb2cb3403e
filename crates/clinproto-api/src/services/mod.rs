//! One module per server area. Each function issues exactly one request
//! (login issues two) and returns the decoded record.

pub mod admin;
pub mod ai;
pub mod auth;
pub mod chat;
pub mod patients;
pub mod protocols;
pub mod therapist;
