//! `SeaORM` Entity for doc_fields table (standard fields per document type).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "doc_fields")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub doctype: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub fieldname: String,
    pub label: String,
    pub fieldtype: String,
    pub options: Option<String>,
    pub idx: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
