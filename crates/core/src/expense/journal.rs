//! Journal entry generation for approved expense reports.

use super::error::ExpenseError;
use super::types::{ExpenseEntry, ExpenseStatus};
use crate::ledger::{JOURNAL_VOUCHER_TYPE, JournalAccountLine, JournalEntryDraft, validate_journal_entry};

/// Facts about the outside world the builder needs.
#[derive(Debug, Clone, Copy)]
pub struct JournalContext<'a> {
    /// Whether a journal entry with `bill_no` == report name already exists.
    pub existing_entry: bool,
    /// Default account of the report's mode of payment for its company.
    pub payment_account: Option<&'a str>,
    /// Name of the mode of payment that counts as cash.
    pub cash_mode_of_payment: &'a str,
}

/// Builds journal entries from expense reports.
pub struct JournalEntryBuilder;

impl JournalEntryBuilder {
    /// Builds the journal entry for an approved report.
    ///
    /// Returns `Ok(None)` when the report is not approved. For cash payments
    /// the payment reference and clearance date are cleared on `entry`.
    /// Only the values of `dimension_keys` (built-ins plus active
    /// dimensions) are copied onto the account lines.
    ///
    /// # Errors
    ///
    /// Checked in order: an existing entry, a missing payment reference on a
    /// non-cash payment, an unresolved payment account. The generated entry
    /// must also balance.
    pub fn build(
        entry: &mut ExpenseEntry,
        ctx: &JournalContext<'_>,
        dimension_keys: &[String],
    ) -> Result<Option<JournalEntryDraft>, ExpenseError> {
        if entry.status != ExpenseStatus::Approved {
            return Ok(None);
        }

        if ctx.existing_entry {
            return Err(ExpenseError::DuplicateJournalEntry(entry.name.clone()));
        }

        if Self::is_cash(entry, ctx) {
            entry.payment_reference = None;
            entry.clearance_date = None;
        } else if entry
            .payment_reference
            .as_deref()
            .is_none_or(|reference| reference.trim().is_empty())
            || entry.clearance_date.is_none()
        {
            return Err(ExpenseError::PaymentReferenceRequired);
        }

        let payment_account = ctx
            .payment_account
            .filter(|account| !account.trim().is_empty())
            .ok_or_else(|| ExpenseError::PaymentAccountMissing {
                mode_of_payment: entry.mode_of_payment.clone(),
                company: entry.company.clone(),
            })?;

        let mut accounts: Vec<JournalAccountLine> = entry
            .expenses
            .iter()
            .map(|item| {
                JournalAccountLine::debit(&item.expense_account, item.amount)
                    .with_remark(&item.description)
                    .with_dimensions(item.dimensions.select(dimension_keys))
            })
            .collect();

        let credit_remark = entry
            .remarks
            .clone()
            .filter(|remark| !remark.trim().is_empty())
            .unwrap_or_else(|| entry.name.clone());
        accounts.push(
            JournalAccountLine::credit(payment_account, entry.total)
                .with_remark(credit_remark)
                .with_dimensions(entry.default_dimensions.select(dimension_keys)),
        );

        let draft = JournalEntryDraft {
            title: entry.name.clone(),
            voucher_type: JOURNAL_VOUCHER_TYPE.to_string(),
            posting_date: entry.posting_date,
            company: entry.company.clone(),
            accounts,
            user_remark: entry.remarks.clone(),
            mode_of_payment: entry.mode_of_payment.clone(),
            cheque_no: entry.payment_reference.clone(),
            cheque_date: entry.clearance_date,
            reference_date: entry.clearance_date,
            pay_to_recd_from: entry.payment_to.clone(),
            bill_no: entry.name.clone(),
        };

        validate_journal_entry(&draft)?;
        Ok(Some(draft))
    }

    fn is_cash(entry: &ExpenseEntry, ctx: &JournalContext<'_>) -> bool {
        entry.mode_of_payment.eq_ignore_ascii_case(ctx.cash_mode_of_payment)
    }
}
