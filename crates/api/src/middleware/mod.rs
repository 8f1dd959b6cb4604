//! Request identity extraction and role-based access control.
//!
//! - [`identity`] -- resolves the caller's scope, actor name, and role from a
//!   Bearer token or the identity headers.
//! - [`rbac`] -- extractors that reject requests whose role does not meet a
//!   minimum requirement.

pub mod identity;
pub mod rbac;
