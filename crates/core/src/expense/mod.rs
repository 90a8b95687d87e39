//! Expense reports and the journal entries generated from them.
//!
//! # Modules
//!
//! - `types` - Expense report and line types, report status
//! - `service` - Totals, default propagation, line validation, status transitions
//! - `journal` - Journal entry building for approved reports
//! - `error` - Expense error types

pub mod error;
pub mod journal;
pub mod service;
pub mod types;

#[cfg(test)]
mod journal_props;
#[cfg(test)]
mod service_props;

pub use error::ExpenseError;
pub use journal::{JournalContext, JournalEntryBuilder};
pub use service::{AMOUNT_SCALE, ExpenseService, MAX_AMOUNT};
pub use types::{ExpenseEntry, ExpenseEntryItem, ExpenseStatus};
