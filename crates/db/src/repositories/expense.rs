//! Expense entry repository.
//!
//! Every save runs the same pipeline inside one database transaction:
//! unknown dimension keys dropped, amounts checked, totals and default
//! dimensions, line validation, journal entry generation for approved
//! entries, then the write itself.

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
    TransactionTrait,
};
use tracing::{info, warn};
use uuid::Uuid;

use claimdesk_core::dimension::{CORE_DIMENSIONS, DimensionValues, dimension_keys};
use claimdesk_core::expense::{
    ExpenseEntry, ExpenseEntryItem, ExpenseError, ExpenseService, ExpenseStatus,
    JournalContext, JournalEntryBuilder,
};

use super::custom_field::required_item_fields;
use super::dimension::load_dimensions;
use super::journal::{cancel_linked, exists_for_bill, insert_submitted};
use super::mode_of_payment::payment_account;
use super::naming::NamingSeries;
use crate::entities::{
    expense_entries, expense_entry_items, sea_orm_active_enums::ExpenseStatus as DbExpenseStatus,
    users,
};

/// Input for creating or updating an expense entry.
#[derive(Debug, Clone)]
pub struct ExpenseEntryInput {
    /// Company the expenses are booked in.
    pub company: String,
    /// Posting date.
    pub posting_date: NaiveDate,
    /// Default dimension values for the lines.
    pub default_dimensions: DimensionValues,
    /// Mode of payment.
    pub mode_of_payment: String,
    /// Payment reference for non-cash payments.
    pub payment_reference: Option<String>,
    /// Clearance date for non-cash payments.
    pub clearance_date: Option<NaiveDate>,
    /// Payee.
    pub payment_to: Option<String>,
    /// Free-text remarks.
    pub remarks: Option<String>,
    /// Expense lines.
    pub expenses: Vec<ExpenseEntryItem>,
}

/// Filter for listing expense entries.
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Only entries with this status.
    pub status: Option<ExpenseStatus>,
    /// Only entries of this company.
    pub company: Option<String>,
}

/// A saved expense entry and the journal entry the save generated, if any.
#[derive(Debug, Clone)]
pub struct SavedExpense {
    /// The expense entry as stored.
    pub entry: ExpenseEntry,
    /// Name of the journal entry created by this save.
    pub journal_entry: Option<String>,
}

/// Maps a stored status to the core status.
#[must_use]
pub const fn status_to_core(status: DbExpenseStatus) -> ExpenseStatus {
    match status {
        DbExpenseStatus::Draft => ExpenseStatus::Draft,
        DbExpenseStatus::Submitted => ExpenseStatus::Submitted,
        DbExpenseStatus::Approved => ExpenseStatus::Approved,
        DbExpenseStatus::Cancelled => ExpenseStatus::Cancelled,
    }
}

/// Maps a core status to the stored status.
#[must_use]
pub const fn status_to_db(status: ExpenseStatus) -> DbExpenseStatus {
    match status {
        ExpenseStatus::Draft => DbExpenseStatus::Draft,
        ExpenseStatus::Submitted => DbExpenseStatus::Submitted,
        ExpenseStatus::Approved => DbExpenseStatus::Approved,
        ExpenseStatus::Cancelled => DbExpenseStatus::Cancelled,
    }
}

fn dimensions_from_json(value: serde_json::Value) -> Result<DimensionValues, ExpenseError> {
    serde_json::from_value(value)
        .map_err(|e| ExpenseError::Database(format!("Invalid dimension values: {e}")))
}

fn dimensions_to_json(values: &DimensionValues) -> Result<serde_json::Value, ExpenseError> {
    serde_json::to_value(values)
        .map_err(|e| ExpenseError::Database(format!("Invalid dimension values: {e}")))
}

fn to_core(
    header: expense_entries::Model,
    items: Vec<expense_entry_items::Model>,
) -> Result<ExpenseEntry, ExpenseError> {
    let expenses = items
        .into_iter()
        .map(|item| {
            Ok(ExpenseEntryItem {
                amount: item.amount,
                description: item.description,
                expense_account: item.expense_account,
                dimensions: dimensions_from_json(item.dimensions)?,
            })
        })
        .collect::<Result<Vec<_>, ExpenseError>>()?;

    Ok(ExpenseEntry {
        name: header.name,
        status: status_to_core(header.status),
        company: header.company,
        posting_date: header.posting_date,
        total: header.total,
        quantity: header.quantity,
        default_dimensions: dimensions_from_json(header.default_dimensions)?,
        mode_of_payment: header.mode_of_payment,
        payment_reference: header.payment_reference,
        clearance_date: header.clearance_date,
        payment_to: header.payment_to,
        remarks: header.remarks,
        approved_by: header.approved_by,
        expenses,
    })
}

fn apply_input(entry: &mut ExpenseEntry, input: ExpenseEntryInput) {
    entry.company = input.company;
    entry.posting_date = input.posting_date;
    entry.default_dimensions = input.default_dimensions;
    entry.mode_of_payment = input.mode_of_payment;
    entry.payment_reference = input.payment_reference;
    entry.clearance_date = input.clearance_date;
    entry.payment_to = input.payment_to;
    entry.remarks = input.remarks;
    entry.expenses = input.expenses;
}

fn database(e: DbErr) -> ExpenseError {
    ExpenseError::Database(e.to_string())
}

/// Expense entry repository.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
    cash_mode_of_payment: String,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    ///
    /// `cash_mode_of_payment` names the mode of payment that needs no
    /// payment reference.
    #[must_use]
    pub fn new(db: DatabaseConnection, cash_mode_of_payment: impl Into<String>) -> Self {
        Self {
            db,
            cash_mode_of_payment: cash_mode_of_payment.into(),
        }
    }

    /// Finds an expense entry with its lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find(&self, name: &str) -> Result<Option<ExpenseEntry>, ExpenseError> {
        match self.load(&self.db, name, false).await {
            Ok(entry) => Ok(Some(entry)),
            Err(ExpenseError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Lists expense entries, newest first, with their lines.
    ///
    /// Returns the page and the total number of matching entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        filter: ExpenseFilter,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<ExpenseEntry>, u64), ExpenseError> {
        let mut query = expense_entries::Entity::find();
        if let Some(status) = filter.status {
            query = query.filter(expense_entries::Column::Status.eq(status_to_db(status)));
        }
        if let Some(company) = filter.company {
            query = query.filter(expense_entries::Column::Company.eq(company));
        }

        let total = query.clone().count(&self.db).await.map_err(database)?;
        let headers = query
            .order_by_desc(expense_entries::Column::PostingDate)
            .order_by_desc(expense_entries::Column::Name)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(database)?;

        let mut entries = Vec::with_capacity(headers.len());
        for header in headers {
            let items = Self::load_items(&self.db, &header.name).await?;
            entries.push(to_core(header, items)?);
        }

        Ok((entries, total))
    }

    /// Creates a draft expense entry.
    ///
    /// # Errors
    ///
    /// Returns an error if a line is invalid or the database operation fails.
    pub async fn create(
        &self,
        input: ExpenseEntryInput,
        created_by: Uuid,
    ) -> Result<SavedExpense, ExpenseError> {
        let txn = self.db.begin().await.map_err(database)?;

        let name = NamingSeries::ExpenseEntry.next(&txn).await.map_err(database)?;
        let mut entry = ExpenseEntry {
            name,
            status: ExpenseStatus::Draft,
            company: String::new(),
            posting_date: input.posting_date,
            total: rust_decimal::Decimal::ZERO,
            quantity: 0,
            default_dimensions: DimensionValues::new(),
            mode_of_payment: String::new(),
            payment_reference: None,
            clearance_date: None,
            payment_to: None,
            remarks: None,
            approved_by: None,
            expenses: Vec::new(),
        };
        apply_input(&mut entry, input);

        let journal_entry = self.save(&txn, &mut entry, Some(created_by)).await?;
        txn.commit().await.map_err(database)?;

        info!(expense_entry = %entry.name, total = %entry.total, "Expense entry created");
        Ok(SavedExpense {
            entry,
            journal_entry,
        })
    }

    /// Updates an expense entry.
    ///
    /// Saving an approved entry generates its journal entry again, which
    /// fails with a duplicate error once one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is not found, cancelled, invalid, or
    /// the journal entry cannot be generated.
    pub async fn update(
        &self,
        name: &str,
        input: ExpenseEntryInput,
    ) -> Result<SavedExpense, ExpenseError> {
        let txn = self.db.begin().await.map_err(database)?;

        let mut entry = self.load(&txn, name, true).await?;
        ExpenseService::validate_can_modify(entry.status)?;
        apply_input(&mut entry, input);

        let journal_entry = self.save(&txn, &mut entry, None).await?;
        txn.commit().await.map_err(database)?;

        Ok(SavedExpense {
            entry,
            journal_entry,
        })
    }

    /// Submits a draft expense entry for approval.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is invalid or the save fails.
    pub async fn submit(&self, name: &str) -> Result<SavedExpense, ExpenseError> {
        let txn = self.db.begin().await.map_err(database)?;

        let mut entry = self.load(&txn, name, true).await?;
        entry.status = ExpenseService::submit(entry.status)?;

        let journal_entry = self.save(&txn, &mut entry, None).await?;
        txn.commit().await.map_err(database)?;

        info!(expense_entry = %entry.name, "Expense entry submitted");
        Ok(SavedExpense {
            entry,
            journal_entry,
        })
    }

    /// Approves a submitted expense entry and generates its journal entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is invalid, the approver is
    /// unknown, or a journal entry precondition fails. Nothing is saved then.
    pub async fn approve(&self, name: &str, approver_id: Uuid) -> Result<SavedExpense, ExpenseError> {
        let txn = self.db.begin().await.map_err(database)?;

        let mut entry = self.load(&txn, name, true).await?;
        entry.status = ExpenseService::approve(entry.status)?;

        let approver = users::Entity::find_by_id(approver_id)
            .one(&txn)
            .await
            .map_err(database)?
            .ok_or(ExpenseError::NotPermitted("approve"))?;
        entry.approved_by = Some(ExpenseService::approver_display_name(
            &approver.first_name,
            approver.last_name.as_deref(),
        ));

        let journal_entry = self.save(&txn, &mut entry, None).await?;
        txn.commit().await.map_err(database)?;

        info!(
            expense_entry = %entry.name,
            approved_by = ?entry.approved_by,
            journal_entry = ?journal_entry,
            "Expense entry approved"
        );
        Ok(SavedExpense {
            entry,
            journal_entry,
        })
    }

    /// Cancels an expense entry and removes its posted journal entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is invalid or the database
    /// operation fails.
    pub async fn cancel(&self, name: &str) -> Result<ExpenseEntry, ExpenseError> {
        let txn = self.db.begin().await.map_err(database)?;

        let mut entry = self.load(&txn, name, true).await?;
        entry.status = ExpenseService::cancel(entry.status)?;

        expense_entries::ActiveModel {
            name: Set(entry.name.clone()),
            status: Set(status_to_db(entry.status)),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(database)?;

        let removed = cancel_linked(&txn, &entry.name).await.map_err(database)?;
        txn.commit().await.map_err(database)?;

        info!(expense_entry = %entry.name, journal_entries = ?removed, "Expense entry cancelled");
        Ok(entry)
    }

    /// Generates the journal entry of an expense entry on demand.
    ///
    /// Returns `None` when the entry is not approved.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is not found or a journal entry
    /// precondition fails.
    pub async fn make_journal_entry(&self, name: &str) -> Result<Option<String>, ExpenseError> {
        let txn = self.db.begin().await.map_err(database)?;

        let mut entry = self.load(&txn, name, true).await?;
        let journal_entry = self.generate_journal_entry(&txn, &mut entry).await?;
        if journal_entry.is_some() {
            self.write(&txn, &entry, None).await?;
        }
        txn.commit().await.map_err(database)?;

        Ok(journal_entry)
    }

    /// The save pipeline. Returns the generated journal entry name.
    async fn save(
        &self,
        txn: &DatabaseTransaction,
        entry: &mut ExpenseEntry,
        created_by: Option<Uuid>,
    ) -> Result<Option<String>, ExpenseError> {
        let dimensions = load_dimensions(txn, true).await.map_err(database)?;
        let known: Vec<String> = CORE_DIMENSIONS
            .iter()
            .map(|(key, _)| (*key).to_string())
            .chain(dimensions.iter().map(|d| d.fieldname.clone()))
            .collect();
        ExpenseService::retain_known_dimensions(entry, &known);
        ExpenseService::apply_totals_and_defaults(entry, &dimensions)?;

        let required = required_item_fields(txn).await.map_err(database)?;
        ExpenseService::validate_lines(entry, &required)?;

        let journal_entry = self.generate_journal_entry(txn, entry).await?;
        self.write(txn, entry, created_by).await?;

        Ok(journal_entry)
    }

    async fn generate_journal_entry(
        &self,
        txn: &DatabaseTransaction,
        entry: &mut ExpenseEntry,
    ) -> Result<Option<String>, ExpenseError> {
        if entry.status != ExpenseStatus::Approved {
            return Ok(None);
        }

        let existing_entry = exists_for_bill(txn, &entry.name).await.map_err(database)?;
        let account = payment_account(txn, &entry.mode_of_payment, &entry.company)
            .await
            .map_err(database)?;

        let active = load_dimensions(txn, false).await.map_err(database)?;

        let ctx = JournalContext {
            existing_entry,
            payment_account: account.as_deref(),
            cash_mode_of_payment: &self.cash_mode_of_payment,
        };

        let keys = dimension_keys(&active);
        let Some(draft) = JournalEntryBuilder::build(entry, &ctx, &keys)? else {
            return Ok(None);
        };

        match insert_submitted(txn, &draft).await {
            Ok(journal_entry) => Ok(Some(journal_entry.name)),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                warn!(expense_entry = %entry.name, "Concurrent journal entry creation rejected");
                Err(ExpenseError::DuplicateJournalEntry(entry.name.clone()))
            }
            Err(e) => Err(database(e)),
        }
    }

    /// Writes the header and replaces the lines.
    async fn write(
        &self,
        txn: &DatabaseTransaction,
        entry: &ExpenseEntry,
        created_by: Option<Uuid>,
    ) -> Result<(), ExpenseError> {
        let now = Utc::now().into();
        let mut header = expense_entries::ActiveModel {
            name: Set(entry.name.clone()),
            status: Set(status_to_db(entry.status)),
            company: Set(entry.company.clone()),
            posting_date: Set(entry.posting_date),
            total: Set(entry.total),
            quantity: Set(entry.quantity),
            default_dimensions: Set(dimensions_to_json(&entry.default_dimensions)?),
            mode_of_payment: Set(entry.mode_of_payment.clone()),
            payment_reference: Set(entry.payment_reference.clone()),
            clearance_date: Set(entry.clearance_date),
            payment_to: Set(entry.payment_to.clone()),
            remarks: Set(entry.remarks.clone()),
            approved_by: Set(entry.approved_by.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(created_by) = created_by {
            header.created_by = Set(created_by);
            header.created_at = Set(now);
            header.insert(txn).await.map_err(database)?;
        } else {
            header.update(txn).await.map_err(database)?;
        }

        expense_entry_items::Entity::delete_many()
            .filter(expense_entry_items::Column::Parent.eq(entry.name.as_str()))
            .exec(txn)
            .await
            .map_err(database)?;

        for (idx, item) in entry.expenses.iter().enumerate() {
            expense_entry_items::ActiveModel {
                id: Set(Uuid::new_v4()),
                parent: Set(entry.name.clone()),
                idx: Set(i32::try_from(idx + 1).unwrap_or(i32::MAX)),
                amount: Set(item.amount),
                description: Set(item.description.clone()),
                expense_account: Set(item.expense_account.clone()),
                dimensions: Set(dimensions_to_json(&item.dimensions)?),
            }
            .insert(txn)
            .await
            .map_err(database)?;
        }

        Ok(())
    }

    /// Loads an entry with its lines, locking the header row when asked.
    async fn load<C: ConnectionTrait>(
        &self,
        conn: &C,
        name: &str,
        lock: bool,
    ) -> Result<ExpenseEntry, ExpenseError> {
        let mut query = expense_entries::Entity::find_by_id(name.to_string());
        if lock {
            query = query.lock_exclusive();
        }

        let header = query
            .one(conn)
            .await
            .map_err(database)?
            .ok_or_else(|| ExpenseError::NotFound(name.to_string()))?;
        let items = Self::load_items(conn, name).await?;

        to_core(header, items)
    }

    async fn load_items<C: ConnectionTrait>(
        conn: &C,
        name: &str,
    ) -> Result<Vec<expense_entry_items::Model>, ExpenseError> {
        expense_entry_items::Entity::find()
            .filter(expense_entry_items::Column::Parent.eq(name))
            .order_by_asc(expense_entry_items::Column::Idx)
            .all(conn)
            .await
            .map_err(database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_status_mapping_round_trips() {
        for status in [
            ExpenseStatus::Draft,
            ExpenseStatus::Submitted,
            ExpenseStatus::Approved,
            ExpenseStatus::Cancelled,
        ] {
            assert_eq!(status_to_core(status_to_db(status)), status);
        }
    }

    #[test]
    fn test_to_core_reads_dimension_json() {
        let now = Utc::now().into();
        let header = expense_entries::Model {
            name: "EXP-00001".to_string(),
            status: DbExpenseStatus::Approved,
            company: "Acme".to_string(),
            posting_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            total: dec!(100),
            quantity: 1,
            default_dimensions: json!({"cost_center": "Main - AC"}),
            mode_of_payment: "Cash".to_string(),
            payment_reference: None,
            clearance_date: None,
            payment_to: None,
            remarks: None,
            approved_by: Some("Ada Lovelace".to_string()),
            created_by: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        };
        let items = vec![expense_entry_items::Model {
            id: Uuid::new_v4(),
            parent: "EXP-00001".to_string(),
            idx: 1,
            amount: dec!(100),
            description: "Taxi".to_string(),
            expense_account: "Travel - AC".to_string(),
            dimensions: json!({"cost_center": "Sales - AC", "region": "North"}),
        }];

        let entry = to_core(header, items).unwrap();

        assert_eq!(entry.status, ExpenseStatus::Approved);
        assert_eq!(entry.default_dimensions.get("cost_center"), Some("Main - AC"));
        assert_eq!(entry.expenses[0].dimensions.get("region"), Some("North"));
    }

    #[test]
    fn test_to_core_rejects_malformed_dimensions() {
        let now = Utc::now().into();
        let header = expense_entries::Model {
            name: "EXP-00002".to_string(),
            status: DbExpenseStatus::Draft,
            company: "Acme".to_string(),
            posting_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            total: dec!(0),
            quantity: 0,
            default_dimensions: json!(["not", "a", "map"]),
            mode_of_payment: "Cash".to_string(),
            payment_reference: None,
            clearance_date: None,
            payment_to: None,
            remarks: None,
            approved_by: None,
            created_by: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        };

        assert!(matches!(to_core(header, vec![]), Err(ExpenseError::Database(_))));
    }
}
