//! Business rule validation for journal entries.

use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{JournalEntryDraft, JournalTotals};

/// Validates that a journal entry can be posted.
///
/// Rules:
/// - at least two account lines
/// - every line names an account
/// - no negative amounts, and no line with both a debit and a credit
/// - total debits equal total credits
///
/// # Errors
///
/// Returns the first rule the entry violates.
pub fn validate_journal_entry(entry: &JournalEntryDraft) -> Result<JournalTotals, LedgerError> {
    if entry.accounts.len() < 2 {
        return Err(LedgerError::InsufficientEntries);
    }

    for (idx, line) in entry.accounts.iter().enumerate() {
        if line.account.trim().is_empty() {
            return Err(LedgerError::MissingAccount(idx + 1));
        }
        if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount);
        }
        if line.debit > Decimal::ZERO && line.credit > Decimal::ZERO {
            return Err(LedgerError::InvalidEntryType);
        }
    }

    let totals = entry.totals();
    if !totals.is_balanced {
        return Err(LedgerError::UnbalancedEntry {
            debit: totals.debit,
            credit: totals.credit,
        });
    }

    Ok(totals)
}
