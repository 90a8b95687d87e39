//! `SeaORM` Entity for journal_entry_accounts table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_entry_accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub parent: String,
    pub idx: i32,
    pub account: String,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub debit: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub credit: Decimal,
    pub user_remark: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub dimensions: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::journal_entries::Entity",
        from = "Column::Parent",
        to = "super::journal_entries::Column::Name",
        on_delete = "Cascade"
    )]
    JournalEntries,
}

impl Related<super::journal_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
