//! `SeaORM` Entity for journal_entries table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
    pub title: String,
    pub voucher_type: String,
    pub posting_date: Date,
    pub company: String,
    pub user_remark: Option<String>,
    pub mode_of_payment: String,
    pub cheque_no: Option<String>,
    pub cheque_date: Option<Date>,
    pub reference_date: Option<Date>,
    pub pay_to_recd_from: Option<String>,
    /// Name of the source expense entry.
    #[sea_orm(unique)]
    pub bill_no: String,
    /// 0 = draft, 1 = submitted, 2 = cancelled.
    pub docstatus: i16,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub total_debit: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub total_credit: Decimal,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::journal_entry_accounts::Entity")]
    JournalEntryAccounts,
}

impl Related<super::journal_entry_accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalEntryAccounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
