//! Journal entry domain types.
//!
//! A journal entry is a balanced set of debit and credit lines. Entries
//! generated from expense reports carry the report name in `bill_no`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::dimension::DimensionValues;

/// Voucher type of journal entries generated from expense reports.
pub const JOURNAL_VOUCHER_TYPE: &str = "Journal Entry";

/// Entry type: either Debit or Credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Debit entry.
    Debit,
    /// Credit entry.
    Credit,
}

/// Document status of a journal entry.
///
/// - Draft → Submitted (submit)
/// - Submitted → Cancelled (cancel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocStatus {
    /// Saved but not posted.
    Draft,
    /// Posted to the ledger.
    Submitted,
    /// Posting reversed.
    Cancelled,
}

impl DocStatus {
    /// Returns the numeric document status (0, 1, 2).
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::Draft => 0,
            Self::Submitted => 1,
            Self::Cancelled => 2,
        }
    }

    /// Returns true if the entry is posted and may be cancelled.
    #[must_use]
    pub const fn is_cancellable(self) -> bool {
        matches!(self, Self::Submitted)
    }
}

/// One account line of a journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalAccountLine {
    /// Account to post to.
    pub account: String,
    /// Debit amount (0 if credit).
    pub debit: Decimal,
    /// Credit amount (0 if debit).
    pub credit: Decimal,
    /// Line remark.
    pub user_remark: Option<String>,
    /// Dimension values tagged on the line.
    pub dimensions: DimensionValues,
}

impl JournalAccountLine {
    /// Creates a debit line.
    #[must_use]
    pub fn debit(account: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account: account.into(),
            debit: amount,
            credit: Decimal::ZERO,
            user_remark: None,
            dimensions: DimensionValues::new(),
        }
    }

    /// Creates a credit line.
    #[must_use]
    pub fn credit(account: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account: account.into(),
            debit: Decimal::ZERO,
            credit: amount,
            user_remark: None,
            dimensions: DimensionValues::new(),
        }
    }

    /// Sets the line remark.
    #[must_use]
    pub fn with_remark(mut self, remark: impl Into<String>) -> Self {
        self.user_remark = Some(remark.into());
        self
    }

    /// Sets the dimension values.
    #[must_use]
    pub fn with_dimensions(mut self, dimensions: DimensionValues) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Returns whether this line is a debit or a credit.
    #[must_use]
    pub fn entry_type(&self) -> EntryType {
        if self.debit > Decimal::ZERO {
            EntryType::Debit
        } else {
            EntryType::Credit
        }
    }
}

/// A journal entry ready to be inserted and submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntryDraft {
    /// Entry title (the expense report name).
    pub title: String,
    /// Voucher type.
    pub voucher_type: String,
    /// Posting date.
    pub posting_date: NaiveDate,
    /// Company.
    pub company: String,
    /// Account lines.
    pub accounts: Vec<JournalAccountLine>,
    /// Entry remark.
    pub user_remark: Option<String>,
    /// Mode of payment.
    pub mode_of_payment: String,
    /// Cheque or transfer reference.
    pub cheque_no: Option<String>,
    /// Cheque date.
    pub cheque_date: Option<NaiveDate>,
    /// Reference date.
    pub reference_date: Option<NaiveDate>,
    /// Payee.
    pub pay_to_recd_from: Option<String>,
    /// Source document name, unique per journal entry.
    pub bill_no: String,
}

impl JournalEntryDraft {
    /// Calculates debit and credit totals.
    #[must_use]
    pub fn totals(&self) -> JournalTotals {
        let debit: Decimal = self.accounts.iter().map(|line| line.debit).sum();
        let credit: Decimal = self.accounts.iter().map(|line| line.credit).sum();
        JournalTotals::new(debit, credit)
    }
}

/// Journal entry totals for validation and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JournalTotals {
    /// Total debit amount.
    pub debit: Decimal,
    /// Total credit amount.
    pub credit: Decimal,
    /// Whether the entry is balanced (debits == credits).
    pub is_balanced: bool,
}

impl JournalTotals {
    /// Creates new totals from debit and credit sums.
    #[must_use]
    pub fn new(debit: Decimal, credit: Decimal) -> Self {
        Self {
            debit,
            credit,
            is_balanced: debit == credit,
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.debit - self.credit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_doc_status_numbers() {
        assert_eq!(DocStatus::Draft.as_i16(), 0);
        assert_eq!(DocStatus::Submitted.as_i16(), 1);
        assert_eq!(DocStatus::Cancelled.as_i16(), 2);
    }

    #[test]
    fn test_only_submitted_is_cancellable() {
        assert!(!DocStatus::Draft.is_cancellable());
        assert!(DocStatus::Submitted.is_cancellable());
        assert!(!DocStatus::Cancelled.is_cancellable());
    }

    #[test]
    fn test_line_entry_type() {
        assert_eq!(JournalAccountLine::debit("Travel", dec!(10)).entry_type(), EntryType::Debit);
        assert_eq!(JournalAccountLine::credit("Cash", dec!(10)).entry_type(), EntryType::Credit);
    }

    #[test]
    fn test_totals_balanced() {
        let totals = JournalTotals::new(dec!(100.00), dec!(100.00));
        assert!(totals.is_balanced);
        assert_eq!(totals.difference(), Decimal::ZERO);
    }

    #[test]
    fn test_totals_unbalanced() {
        let totals = JournalTotals::new(dec!(100.00), dec!(50.00));
        assert!(!totals.is_balanced);
        assert_eq!(totals.difference(), dec!(50.00));
    }
}
