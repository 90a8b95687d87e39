//! `SeaORM` entity definitions.

pub mod accounting_dimensions;
pub mod custom_fields;
pub mod doc_fields;
pub mod expense_entries;
pub mod expense_entry_items;
pub mod journal_entries;
pub mod journal_entry_accounts;
pub mod mode_of_payment_accounts;
pub mod sea_orm_active_enums;
pub mod users;
