//! Expense report save and workflow logic.

use rust_decimal::Decimal;

use super::error::ExpenseError;
use super::types::{ExpenseEntry, ExpenseEntryItem, ExpenseStatus};
use crate::dimension::{AccountingDimension, COST_CENTER, dimension_keys};
use crate::ledger::DocStatus;

/// Decimal places kept for amounts and totals.
pub const AMOUNT_SCALE: u32 = 2;

/// Largest amount or total that fits a `NUMERIC(18, 2)` column.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_808_348_671, 232_830_643, 0, false, AMOUNT_SCALE);

/// Stateless service for expense report rules.
pub struct ExpenseService;

impl ExpenseService {
    /// Checks every line amount is a non-negative cent value within the
    /// stored range.
    ///
    /// # Errors
    ///
    /// Returns the first offending line.
    pub fn validate_amounts(items: &[ExpenseEntryItem]) -> Result<(), ExpenseError> {
        for (idx, item) in items.iter().enumerate() {
            let line = idx + 1;
            if item.amount < Decimal::ZERO {
                return Err(ExpenseError::NegativeAmount { line });
            }
            if item.amount > MAX_AMOUNT {
                return Err(ExpenseError::AmountOutOfRange {
                    line,
                    max: MAX_AMOUNT,
                });
            }
            if item.amount.round_dp(AMOUNT_SCALE) != item.amount {
                return Err(ExpenseError::AmountPrecision { line });
            }
        }
        Ok(())
    }

    /// Sums line amounts and counts lines.
    ///
    /// # Errors
    ///
    /// Returns `TotalOutOfRange` when the sum exceeds [`MAX_AMOUNT`].
    pub fn calculate_totals(items: &[ExpenseEntryItem]) -> Result<(Decimal, i32), ExpenseError> {
        let total = items
            .iter()
            .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.amount))
            .filter(|total| *total <= MAX_AMOUNT)
            .ok_or(ExpenseError::TotalOutOfRange { max: MAX_AMOUNT })?;
        let quantity = i32::try_from(items.len()).unwrap_or(i32::MAX);
        Ok((total, quantity))
    }

    /// Drops values whose key is neither a built-in nor a defined dimension.
    pub fn retain_known_dimensions(entry: &mut ExpenseEntry, known: &[String]) {
        entry.default_dimensions.retain_keys(known);
        for item in &mut entry.expenses {
            item.dimensions.retain_keys(known);
        }
    }

    /// Copies parent defaults into lines that have no value for a dimension.
    ///
    /// Lines that already carry a value keep it.
    pub fn propagate_defaults(entry: &mut ExpenseEntry, keys: &[String]) {
        for key in keys {
            let Some(default) = entry.default_dimensions.get(key).map(str::to_string) else {
                continue;
            };
            for item in &mut entry.expenses {
                if !item.dimensions.is_set(key) {
                    item.dimensions.set(key.clone(), default.clone());
                }
            }
        }
    }

    /// The per-save step: check amounts, recompute totals and propagate
    /// default dimensions.
    ///
    /// Built-in dimensions and every active custom dimension are propagated.
    ///
    /// # Errors
    ///
    /// Fails on an invalid line amount or an out-of-range total. `entry` is
    /// left untouched in that case.
    pub fn apply_totals_and_defaults(
        entry: &mut ExpenseEntry,
        dimensions: &[AccountingDimension],
    ) -> Result<(), ExpenseError> {
        Self::validate_amounts(&entry.expenses)?;
        let (total, quantity) = Self::calculate_totals(&entry.expenses)?;
        entry.total = total;
        entry.quantity = quantity;

        Self::propagate_defaults(entry, &dimension_keys(dimensions));
        Ok(())
    }

    /// Validates lines after defaults have been propagated.
    ///
    /// Every line needs a valid amount and a value for each required
    /// dimension. The cost center is always required.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, naming the 1-based line.
    pub fn validate_lines(entry: &ExpenseEntry, required: &[String]) -> Result<(), ExpenseError> {
        Self::validate_amounts(&entry.expenses)?;
        for (idx, item) in entry.expenses.iter().enumerate() {
            let line = idx + 1;
            let missing = std::iter::once(COST_CENTER)
                .chain(required.iter().map(String::as_str))
                .find(|key| !item.dimensions.is_set(key));

            if let Some(fieldname) = missing {
                return Err(ExpenseError::MissingDimension {
                    line,
                    fieldname: fieldname.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Validates that a report can be saved.
    ///
    /// # Errors
    ///
    /// Returns error if the report is cancelled.
    pub fn validate_can_modify(status: ExpenseStatus) -> Result<(), ExpenseError> {
        if status.is_editable() {
            Ok(())
        } else {
            Err(ExpenseError::CannotModify(status))
        }
    }

    /// Draft → Submitted.
    pub fn submit(current: ExpenseStatus) -> Result<ExpenseStatus, ExpenseError> {
        match current {
            ExpenseStatus::Draft => Ok(ExpenseStatus::Submitted),
            _ => Err(ExpenseError::InvalidTransition {
                from: current,
                to: ExpenseStatus::Submitted,
            }),
        }
    }

    /// Submitted → Approved.
    pub fn approve(current: ExpenseStatus) -> Result<ExpenseStatus, ExpenseError> {
        match current {
            ExpenseStatus::Submitted => Ok(ExpenseStatus::Approved),
            _ => Err(ExpenseError::InvalidTransition {
                from: current,
                to: ExpenseStatus::Approved,
            }),
        }
    }

    /// Submitted | Approved → Cancelled.
    pub fn cancel(current: ExpenseStatus) -> Result<ExpenseStatus, ExpenseError> {
        match current {
            ExpenseStatus::Submitted | ExpenseStatus::Approved => Ok(ExpenseStatus::Cancelled),
            _ => Err(ExpenseError::InvalidTransition {
                from: current,
                to: ExpenseStatus::Cancelled,
            }),
        }
    }

    /// Display name recorded as the approver.
    #[must_use]
    pub fn approver_display_name(first_name: &str, last_name: Option<&str>) -> String {
        match last_name.map(str::trim).filter(|last| !last.is_empty()) {
            Some(last) => format!("{} {last}", first_name.trim()),
            None => first_name.trim().to_string(),
        }
    }

    /// Picks the linked journal entries to cancel and delete when a report
    /// is cancelled: only posted ones.
    #[must_use]
    pub fn journal_entries_to_cancel(linked: &[(String, DocStatus)]) -> Vec<String> {
        linked
            .iter()
            .filter(|(_, status)| status.is_cancellable())
            .map(|(name, _)| name.clone())
            .collect()
    }
}
