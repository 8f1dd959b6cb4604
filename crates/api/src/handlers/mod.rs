//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod dashboard;
pub mod department;
pub mod history;
pub mod organization;
pub mod project;
pub mod story;
pub mod task;
pub mod team;
pub mod user;
