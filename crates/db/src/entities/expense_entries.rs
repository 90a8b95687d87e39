//! `SeaORM` Entity for expense_entries table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ExpenseStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "expense_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
    pub status: ExpenseStatus,
    pub company: String,
    pub posting_date: Date,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub total: Decimal,
    pub quantity: i32,
    /// Default dimension values keyed by dimension field key.
    #[sea_orm(column_type = "JsonBinary")]
    pub default_dimensions: Json,
    pub mode_of_payment: String,
    pub payment_reference: Option<String>,
    pub clearance_date: Option<Date>,
    pub payment_to: Option<String>,
    pub remarks: Option<String>,
    pub approved_by: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::expense_entry_items::Entity")]
    ExpenseEntryItems,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl Related<super::expense_entry_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExpenseEntryItems.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
