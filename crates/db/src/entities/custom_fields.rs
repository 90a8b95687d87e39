//! `SeaORM` Entity for custom_fields table.
//!
//! Fields added to a document type at runtime, on top of its standard
//! fields in `doc_fields`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "custom_fields")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub doctype: String,
    pub fieldname: String,
    pub label: String,
    pub fieldtype: String,
    pub options: Option<String>,
    pub insert_after: Option<String>,
    pub in_list_view: bool,
    pub in_standard_filter: bool,
    pub reqd: bool,
    pub description: Option<String>,
    pub columns: Option<i16>,
    pub collapsible: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
