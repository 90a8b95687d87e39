//! `SeaORM` Entity for expense_entry_items table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "expense_entry_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub parent: String,
    pub idx: i32,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub amount: Decimal,
    pub description: String,
    pub expense_account: String,
    /// Dimension values keyed by dimension field key.
    #[sea_orm(column_type = "JsonBinary")]
    pub dimensions: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::expense_entries::Entity",
        from = "Column::Parent",
        to = "super::expense_entries::Column::Name",
        on_delete = "Cascade"
    )]
    ExpenseEntries,
}

impl Related<super::expense_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExpenseEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
