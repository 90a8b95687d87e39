//! Core business logic for Claimdesk.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `dimension` - Accounting dimensions, generated fields, and filters
//! - `expense` - Expense reports, totals, and journal entry generation
//! - `ledger` - Journal entry types and balance validation

pub mod dimension;
pub mod expense;
pub mod ledger;
