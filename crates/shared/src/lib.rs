//! Shared types, errors, and configuration for Claimdesk.
//!
//! This crate provides common types used across all other crates:
//! - JWT claims and token handling
//! - Pagination types for list endpoints
//! - Application-wide error types
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use auth::{Claims, UserRole};
pub use config::{AppConfig, JwtConfig};
pub use error::{AppError, AppResult};
pub use jwt::{JwtError, JwtService};
