//! TaskFlow domain core: error taxonomy, shared types, tenancy scope, and the
//! audit action classifier. No I/O -- everything here is pure and synchronous.

pub mod action;
pub mod error;
pub mod roles;
pub mod scope;
pub mod types;
