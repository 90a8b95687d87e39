//! `SeaORM` Entity for mode_of_payment_accounts table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "mode_of_payment_accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub mode_of_payment: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub company: String,
    pub default_account: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
