//! Common types used across the application.

pub mod pagination;

pub use pagination::{DEFAULT_PER_PAGE, MAX_PER_PAGE, PageMeta, PageRequest, PageResponse};
