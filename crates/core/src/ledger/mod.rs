//! Journal entry ledger logic.
//!
//! - Journal entry and account line types
//! - Debit/credit totals
//! - Posting validation (balance, amounts, accounts)

pub mod error;
pub mod types;
pub mod validation;

pub use error::LedgerError;
pub use types::{
    DocStatus, EntryType, JOURNAL_VOUCHER_TYPE, JournalAccountLine, JournalEntryDraft,
    JournalTotals,
};
pub use validation::validate_journal_entry;
