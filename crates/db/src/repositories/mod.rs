//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Operations that must share a caller's transaction are free functions
//! generic over `ConnectionTrait`.

pub mod custom_field;
pub mod dimension;
pub mod expense;
pub mod journal;
pub mod mode_of_payment;
pub mod naming;
pub mod user;

pub use custom_field::{CustomFieldRepository, FieldSet};
pub use dimension::{AccountingDimensionRepository, CreateDimensionInput, UpdateDimensionInput};
pub use expense::{ExpenseEntryInput, ExpenseFilter, ExpenseRepository, SavedExpense};
pub use journal::{JournalEntryWithAccounts, JournalRepository};
pub use mode_of_payment::ModeOfPaymentRepository;
pub use naming::NamingSeries;
pub use user::UserRepository;
