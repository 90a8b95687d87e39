//! HTTP middleware and request extractors.

pub mod auth;

pub use auth::{AuthRejection, AuthUser, auth_middleware};
