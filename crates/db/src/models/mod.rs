//! Typed entity models and their Create/Update DTOs.
//!
//! Entities serialize to the JSON documents held by the store; Update DTOs
//! are all-optional and expose only their set fields via
//! [`crate::entities::set_fields`].

pub mod department;
pub mod history;
pub mod organization;
pub mod project;
pub mod story;
pub mod task;
pub mod team_member;
pub mod user;
