//! Journal entry repository.
//!
//! Journal entries generated from expense entries are inserted and
//! submitted in the caller's transaction. Cancelling an expense entry
//! cancels and then deletes its submitted journal entries.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;
use uuid::Uuid;

use claimdesk_core::expense::ExpenseService;
use claimdesk_core::ledger::{DocStatus, JournalEntryDraft};

use super::naming::NamingSeries;
use crate::entities::{journal_entries, journal_entry_accounts};

/// A journal entry with its account lines.
#[derive(Debug, Clone)]
pub struct JournalEntryWithAccounts {
    /// Journal entry header.
    pub entry: journal_entries::Model,
    /// Account lines in order.
    pub accounts: Vec<journal_entry_accounts::Model>,
}

/// Maps a stored docstatus to the core status.
#[must_use]
pub const fn docstatus_to_core(docstatus: i16) -> DocStatus {
    match docstatus {
        1 => DocStatus::Submitted,
        2 => DocStatus::Cancelled,
        _ => DocStatus::Draft,
    }
}

/// Returns true if any journal entry references the source document.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn exists_for_bill<C: ConnectionTrait>(conn: &C, bill_no: &str) -> Result<bool, DbErr> {
    let count = journal_entries::Entity::find()
        .filter(journal_entries::Column::BillNo.eq(bill_no))
        .count(conn)
        .await?;

    Ok(count > 0)
}

/// Inserts a journal entry with its lines and submits it.
///
/// # Errors
///
/// Returns an error if any insert fails, including the unique `bill_no`
/// constraint when another entry was created concurrently.
pub async fn insert_submitted<C: ConnectionTrait>(
    conn: &C,
    draft: &JournalEntryDraft,
) -> Result<journal_entries::Model, DbErr> {
    let name = NamingSeries::JournalEntry.next(conn).await?;
    let totals = draft.totals();
    let now = Utc::now().into();

    let header = journal_entries::ActiveModel {
        name: Set(name.clone()),
        title: Set(draft.title.clone()),
        voucher_type: Set(draft.voucher_type.clone()),
        posting_date: Set(draft.posting_date),
        company: Set(draft.company.clone()),
        user_remark: Set(draft.user_remark.clone()),
        mode_of_payment: Set(draft.mode_of_payment.clone()),
        cheque_no: Set(draft.cheque_no.clone()),
        cheque_date: Set(draft.cheque_date),
        reference_date: Set(draft.reference_date),
        pay_to_recd_from: Set(draft.pay_to_recd_from.clone()),
        bill_no: Set(draft.bill_no.clone()),
        docstatus: Set(DocStatus::Draft.as_i16()),
        total_debit: Set(totals.debit),
        total_credit: Set(totals.credit),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await?;

    for (idx, line) in draft.accounts.iter().enumerate() {
        let dimensions = serde_json::to_value(&line.dimensions)
            .map_err(|e| DbErr::Custom(format!("Invalid dimension values: {e}")))?;

        journal_entry_accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            parent: Set(name.clone()),
            idx: Set(i32::try_from(idx + 1).unwrap_or(i32::MAX)),
            account: Set(line.account.clone()),
            debit: Set(line.debit),
            credit: Set(line.credit),
            user_remark: Set(line.user_remark.clone()),
            dimensions: Set(dimensions),
        }
        .insert(conn)
        .await?;
    }

    let mut submit: journal_entries::ActiveModel = header.into();
    submit.docstatus = Set(DocStatus::Submitted.as_i16());
    submit.updated_at = Set(Utc::now().into());
    let submitted = submit.update(conn).await?;

    info!(
        journal_entry = %submitted.name,
        bill_no = %submitted.bill_no,
        total = %submitted.total_debit,
        "Journal entry submitted"
    );
    Ok(submitted)
}

/// Cancels and deletes the submitted journal entries of a source document.
///
/// Returns the names of the deleted entries.
///
/// # Errors
///
/// Returns the first database error; nothing is retried.
pub async fn cancel_linked<C: ConnectionTrait>(
    conn: &C,
    bill_no: &str,
) -> Result<Vec<String>, DbErr> {
    let linked: Vec<(String, DocStatus)> = journal_entries::Entity::find()
        .filter(journal_entries::Column::BillNo.eq(bill_no))
        .all(conn)
        .await?
        .into_iter()
        .map(|je| (je.name, docstatus_to_core(je.docstatus)))
        .collect();

    let to_cancel = ExpenseService::journal_entries_to_cancel(&linked);

    for name in &to_cancel {
        journal_entries::ActiveModel {
            name: Set(name.clone()),
            docstatus: Set(DocStatus::Cancelled.as_i16()),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .update(conn)
        .await?;

        journal_entries::Entity::delete_by_id(name.clone())
            .exec(conn)
            .await?;

        info!(journal_entry = %name, bill_no = %bill_no, "Journal entry cancelled and deleted");
    }

    Ok(to_cancel)
}

/// Journal entry repository for read access.
#[derive(Debug, Clone)]
pub struct JournalRepository {
    db: DatabaseConnection,
}

impl JournalRepository {
    /// Creates a new journal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the journal entry generated from a source document.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_bill_no(
        &self,
        bill_no: &str,
    ) -> Result<Option<JournalEntryWithAccounts>, DbErr> {
        let Some(entry) = journal_entries::Entity::find()
            .filter(journal_entries::Column::BillNo.eq(bill_no))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let accounts = journal_entry_accounts::Entity::find()
            .filter(journal_entry_accounts::Column::Parent.eq(entry.name.as_str()))
            .order_by_asc(journal_entry_accounts::Column::Idx)
            .all(&self.db)
            .await?;

        Ok(Some(JournalEntryWithAccounts { entry, accounts }))
    }
}
