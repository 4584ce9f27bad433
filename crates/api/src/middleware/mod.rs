//! Request extractors.
//!
//! - [`auth::AuthUser`] -- The caller identified by a marketplace access token.

pub mod auth;
