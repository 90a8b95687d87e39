//! Expense report error types.
//!
//! Journal-entry precondition failures carry a user-facing title in
//! addition to the message (see [`ExpenseError::title`]).

use thiserror::Error;

use super::types::ExpenseStatus;
use crate::ledger::LedgerError;

/// Errors that can occur during expense report operations.
#[derive(Debug, Error)]
pub enum ExpenseError {
    /// Expense report not found.
    #[error("Expense entry not found: {0}")]
    NotFound(String),

    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: ExpenseStatus,
        /// The attempted target status.
        to: ExpenseStatus,
    },

    /// The report can no longer be modified.
    #[error("Cannot modify {0} expense entry")]
    CannotModify(ExpenseStatus),

    /// A line amount is negative.
    #[error("Expense line {line} has a negative amount")]
    NegativeAmount {
        /// 1-based line number.
        line: usize,
    },

    /// A line amount has more than two decimal places.
    #[error("Expense line {line} has more than 2 decimal places")]
    AmountPrecision {
        /// 1-based line number.
        line: usize,
    },

    /// A line amount does not fit the stored amount range.
    #[error("Expense line {line} amount exceeds {max}")]
    AmountOutOfRange {
        /// 1-based line number.
        line: usize,
        /// Largest accepted amount.
        max: rust_decimal::Decimal,
    },

    /// The sum of the lines does not fit the stored amount range.
    #[error("Expense total exceeds {max}")]
    TotalOutOfRange {
        /// Largest accepted total.
        max: rust_decimal::Decimal,
    },

    /// A required dimension is empty on a line and has no default.
    #[error("Set a default {fieldname} or specify it for expense No. {line}")]
    MissingDimension {
        /// 1-based line number.
        line: usize,
        /// Dimension field key.
        fieldname: String,
    },

    /// A journal entry already exists for the report.
    #[error("Journal Entry {0} already exists.")]
    DuplicateJournalEntry(String),

    /// Non-cash payment without reference or clearance date.
    #[error("Payment Reference and Date are Required for all non-cash payments.")]
    PaymentReferenceRequired,

    /// The mode of payment has no account for the company.
    #[error("The selected Mode of Payment has no linked account.")]
    PaymentAccountMissing {
        /// Mode of payment.
        mode_of_payment: String,
        /// Company.
        company: String,
    },

    /// The user is not allowed to perform the action.
    #[error("User is not permitted to {0} expense entries")]
    NotPermitted(&'static str),

    /// Generated journal entry failed validation.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl ExpenseError {
    /// Title shown with the error message.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::PaymentReferenceRequired => "Enter Payment Reference",
            Self::MissingDimension { .. } => "Missing Accounting Dimension",
            Self::NotPermitted(_) => "Not Permitted",
            _ => "Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titles() {
        assert_eq!(ExpenseError::PaymentReferenceRequired.title(), "Enter Payment Reference");
        assert_eq!(ExpenseError::DuplicateJournalEntry("EXP-1".into()).title(), "Error");
        assert_eq!(
            ExpenseError::PaymentAccountMissing {
                mode_of_payment: "Wire".into(),
                company: "Acme".into()
            }
            .title(),
            "Error"
        );
    }

    #[test]
    fn test_amount_messages() {
        assert_eq!(
            ExpenseError::AmountPrecision { line: 2 }.to_string(),
            "Expense line 2 has more than 2 decimal places"
        );
        assert_eq!(
            ExpenseError::TotalOutOfRange {
                max: crate::expense::MAX_AMOUNT
            }
            .to_string(),
            "Expense total exceeds 9999999999999999.99"
        );
    }

    #[test]
    fn test_duplicate_message_names_report() {
        assert_eq!(
            ExpenseError::DuplicateJournalEntry("EXP-00007".into()).to_string(),
            "Journal Entry EXP-00007 already exists."
        );
    }
}
