//! Ledger error types for journal entry validation.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while validating a journal entry.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Journal entry must have at least 2 lines.
    #[error("Journal entry must have at least 2 account lines")]
    InsufficientEntries,

    /// Journal entry is not balanced (debits != credits).
    #[error("Journal entry is not balanced. Debit: {debit}, Credit: {credit}")]
    UnbalancedEntry {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    /// Line amount cannot be negative.
    #[error("Account line amount cannot be negative")]
    NegativeAmount,

    /// Line must specify either debit or credit, not both.
    #[error("Account line must specify either debit or credit, not both")]
    InvalidEntryType,

    /// Line has no account.
    #[error("Account line {0} has no account")]
    MissingAccount(usize),
}
