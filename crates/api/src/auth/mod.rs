//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`token`] -- HS256 access-token generation and validation.

pub mod password;
pub mod token;
