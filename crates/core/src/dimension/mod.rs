//! Accounting dimensions and their generated document fields.
//!
//! # Modules
//!
//! - `types` - Dimension definitions and per-document dimension values
//! - `fields` - Custom field definitions for the expense document types
//! - `sync` - Field creation/removal planning
//! - `filter` - Link filter criteria for dimension pickers
//! - `error` - Dimension error types

pub mod error;
pub mod fields;
pub mod filter;
pub mod sync;
pub mod types;

#[cfg(test)]
mod sync_props;

pub use error::DimensionError;
pub use fields::{CustomFieldSpec, DocType, FieldType, PROTECTED_FIELDS};
pub use filter::{DimensionFilter, FilterCondition, FilterOperator};
pub use sync::{DimensionFieldSync, FieldRemoval};
pub use types::{
    AccountingDimension, CORE_DIMENSIONS, COST_CENTER, DimensionEvent, DimensionValues, PROJECT,
    default_fieldname, dimension_keys, is_core_dimension,
};
