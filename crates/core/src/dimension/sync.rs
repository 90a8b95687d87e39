//! Planning of generated dimension fields.
//!
//! The planner decides which custom fields must be created or removed for a
//! dimension. Lookups against the field store are passed in as closures so
//! the same rules serve the lifecycle hooks, the admin rebuild, and the data
//! migration.

use super::error::DimensionError;
use super::fields::{
    BUILTIN_DEFAULT_FIELDS, BUILTIN_ITEM_FIELDS, CustomFieldSpec, DocType, PROTECTED_FIELDS,
};
use super::types::{AccountingDimension, CORE_DIMENSIONS};

/// A generated field to delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRemoval {
    /// Document type holding the field.
    pub doctype: DocType,
    /// Field name.
    pub fieldname: String,
}

/// Stateless planner for dimension fields.
pub struct DimensionFieldSync;

impl DimensionFieldSync {
    /// Plans the fields to create for one dimension.
    ///
    /// A field is planned only if its name is not a built-in and
    /// `field_exists` reports it absent, so applying the plan and planning
    /// again yields nothing. Disabled dimensions get no fields.
    ///
    /// # Arguments
    ///
    /// * `dimension` - The dimension definition
    /// * `field_exists` - Whether a field with that name exists on the document type
    /// * `anchor_exists` - Whether a standard field exists, used to pick `insert_after`
    pub fn plan_creation<E, A>(
        dimension: &AccountingDimension,
        field_exists: E,
        anchor_exists: A,
    ) -> Vec<CustomFieldSpec>
    where
        E: Fn(DocType, &str) -> bool,
        A: Fn(DocType, &str) -> bool,
    {
        if !dimension.is_active() {
            return Vec::new();
        }

        let mut plan = Vec::with_capacity(2);

        let default_fieldname = dimension.default_fieldname();
        if !BUILTIN_DEFAULT_FIELDS.contains(&default_fieldname.as_str())
            && !field_exists(DocType::ExpenseEntry, &default_fieldname)
        {
            let insert_after = DocType::ExpenseEntry
                .resolve_insert_after(|f| anchor_exists(DocType::ExpenseEntry, f));
            plan.push(CustomFieldSpec::default_dimension_field(dimension, insert_after));
        }

        if !BUILTIN_ITEM_FIELDS.contains(&dimension.fieldname.as_str())
            && !field_exists(DocType::ExpenseEntryItem, &dimension.fieldname)
        {
            let insert_after = DocType::ExpenseEntryItem
                .resolve_insert_after(|f| anchor_exists(DocType::ExpenseEntryItem, f));
            plan.push(CustomFieldSpec::item_dimension_field(dimension, insert_after));
        }

        plan
    }

    /// Plans the fields to delete when a dimension is removed.
    ///
    /// Protected built-in fields are never part of the plan.
    #[must_use]
    pub fn plan_removal(dimension: &AccountingDimension) -> Vec<FieldRemoval> {
        [
            (DocType::ExpenseEntry, dimension.default_fieldname()),
            (DocType::ExpenseEntryItem, dimension.fieldname.clone()),
        ]
        .into_iter()
        .filter(|(_, fieldname)| !PROTECTED_FIELDS.contains(&fieldname.as_str()))
        .map(|(doctype, fieldname)| FieldRemoval { doctype, fieldname })
        .collect()
    }

    /// Plans the "Additional Accounting Dimensions" section break.
    ///
    /// Needed once at least one active dimension is not a built-in.
    #[must_use]
    pub fn plan_section(
        dimensions: &[AccountingDimension],
        section_exists: bool,
    ) -> Option<CustomFieldSpec> {
        let has_additional = dimensions
            .iter()
            .filter(|d| d.is_active())
            .any(|d| !BUILTIN_DEFAULT_FIELDS.contains(&d.default_fieldname().as_str()));

        (has_additional && !section_exists).then(CustomFieldSpec::additional_dimensions_section)
    }

    /// Validates a dimension field key.
    ///
    /// Keys become field names, so they must be lowercase identifiers.
    pub fn validate_fieldname(fieldname: &str) -> Result<(), DimensionError> {
        let mut chars = fieldname.chars();
        let valid_start = chars.next().is_some_and(|c| c.is_ascii_lowercase());
        let valid_rest = chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

        if valid_start && valid_rest {
            Ok(())
        } else {
            Err(DimensionError::InvalidFieldname(fieldname.to_string()))
        }
    }

    /// Returns the label-by-key directory of all dimensions a form can show:
    /// the built-ins followed by active custom dimensions.
    #[must_use]
    pub fn all_dimension_fieldnames(dimensions: &[AccountingDimension]) -> Vec<(String, String)> {
        let mut all: Vec<(String, String)> = CORE_DIMENSIONS
            .iter()
            .map(|(key, label)| ((*key).to_string(), (*label).to_string()))
            .collect();

        for dimension in dimensions.iter().filter(|d| d.is_active() && !d.is_core()) {
            if !all.iter().any(|(key, _)| *key == dimension.fieldname) {
                all.push((dimension.fieldname.clone(), dimension.label.clone()));
            }
        }

        all
    }

    /// Summary message returned by a full sync.
    #[must_use]
    pub fn sync_message(count: usize) -> String {
        format!("Synced {count} accounting dimensions")
    }
}
