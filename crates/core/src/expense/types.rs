//! Expense report domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dimension::DimensionValues;

/// Expense report status.
///
/// The valid transitions are:
/// - Draft → Submitted (submit)
/// - Submitted → Approved (approve)
/// - Submitted | Approved → Cancelled (cancel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseStatus {
    /// Being prepared by the claimant.
    Draft,
    /// Waiting for approval.
    Submitted,
    /// Approved; a journal entry is generated.
    Approved,
    /// Cancelled; the generated journal entry is removed.
    Cancelled,
}

impl ExpenseStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Submitted => "Submitted",
            Self::Approved => "Approved",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Parses a status from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "submitted" => Some(Self::Submitted),
            "approved" => Some(Self::Approved),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Returns true if the report can still be saved.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One expense line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseEntryItem {
    /// Amount claimed.
    pub amount: Decimal,
    /// What the expense was for.
    pub description: String,
    /// Expense account to debit.
    pub expense_account: String,
    /// Dimension values, keyed by dimension field key.
    #[serde(default)]
    pub dimensions: DimensionValues,
}

/// An expense report with its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    /// Report name (e.g. `EXP-00001`).
    pub name: String,
    /// Workflow status.
    pub status: ExpenseStatus,
    /// Company the expenses are booked in.
    pub company: String,
    /// Posting date of the generated journal entry.
    pub posting_date: NaiveDate,
    /// Sum of line amounts.
    pub total: Decimal,
    /// Number of lines.
    pub quantity: i32,
    /// Default dimension values, keyed by dimension field key
    /// (shown as `default_<key>` fields on the form).
    #[serde(default)]
    pub default_dimensions: DimensionValues,
    /// Mode of payment (e.g. "Cash", "Bank Transfer").
    pub mode_of_payment: String,
    /// Payment reference for non-cash payments.
    pub payment_reference: Option<String>,
    /// Clearance date for non-cash payments.
    pub clearance_date: Option<NaiveDate>,
    /// Payee.
    pub payment_to: Option<String>,
    /// Free-text remarks.
    pub remarks: Option<String>,
    /// Display name of the approver.
    pub approved_by: Option<String>,
    /// Expense lines.
    pub expenses: Vec<ExpenseEntryItem>,
}
