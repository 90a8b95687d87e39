//! Custom field definitions generated for accounting dimensions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::types::AccountingDimension;

/// Default-value fields that already exist on the expense entry.
pub const BUILTIN_DEFAULT_FIELDS: [&str; 2] = ["default_project", "default_cost_center"];

/// Dimension fields that already exist on the expense entry item.
pub const BUILTIN_ITEM_FIELDS: [&str; 2] = ["project", "cost_center"];

/// Field names that are never removed when a dimension is deleted.
pub const PROTECTED_FIELDS: [&str; 4] = [
    "default_project",
    "default_cost_center",
    "project",
    "cost_center",
];

/// Section break that groups the generated default fields.
pub const ADDITIONAL_DIMENSIONS_SECTION: &str = "additional_dimensions_section";

/// Column break that anchors the accounting dimension section.
pub const ACCOUNTING_COLUMN: &str = "accounting_col";

const DEFAULT_FIELD_DESCRIPTION: &str = "Applies to all expenses below unless specified differently";

/// Document types that receive dimension fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DocType {
    /// The expense report (parent).
    #[serde(rename = "Expense Entry")]
    ExpenseEntry,
    /// The expense line (child).
    #[serde(rename = "Expense Entry Item")]
    ExpenseEntryItem,
}

impl DocType {
    /// Returns the document type name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExpenseEntry => "Expense Entry",
            Self::ExpenseEntryItem => "Expense Entry Item",
        }
    }

    /// Parses a document type name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Expense Entry" => Some(Self::ExpenseEntry),
            "Expense Entry Item" => Some(Self::ExpenseEntryItem),
            _ => None,
        }
    }

    /// Anchor fields to insert generated fields after, in order of preference.
    #[must_use]
    pub const fn preferred_anchors(self) -> &'static [&'static str] {
        match self {
            Self::ExpenseEntry => &[ACCOUNTING_COLUMN, "default_cost_center", "default_project"],
            Self::ExpenseEntryItem => &["cost_center", "project", "amount"],
        }
    }

    /// Picks the first preferred anchor that exists on the document type.
    pub fn resolve_insert_after<F>(self, has_field: F) -> Option<String>
    where
        F: Fn(&str) -> bool,
    {
        self.preferred_anchors()
            .iter()
            .find(|anchor| has_field(anchor))
            .map(|anchor| (*anchor).to_string())
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Custom field types used by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    /// Link to a record of another document type.
    Link,
    /// Form section break.
    #[serde(rename = "Section Break")]
    SectionBreak,
}

impl FieldType {
    /// Returns the field type name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Link => "Link",
            Self::SectionBreak => "Section Break",
        }
    }

    /// Parses a field type name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Link" => Some(Self::Link),
            "Section Break" => Some(Self::SectionBreak),
            _ => None,
        }
    }
}

/// A custom field to be created on a document type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomFieldSpec {
    /// Target document type.
    pub doctype: DocType,
    /// Field name (unique per document type).
    pub fieldname: String,
    /// Display label.
    pub label: String,
    /// Field type.
    pub fieldtype: FieldType,
    /// Linked document type for link fields.
    pub options: Option<String>,
    /// Field to insert after.
    pub insert_after: Option<String>,
    /// Show in list view.
    pub in_list_view: bool,
    /// Show in the standard filter bar.
    pub in_standard_filter: bool,
    /// Value is required.
    pub reqd: bool,
    /// Help text.
    pub description: Option<String>,
    /// Grid column width.
    pub columns: Option<i16>,
    /// Section is collapsible.
    pub collapsible: bool,
}

impl CustomFieldSpec {
    /// The `default_<key>` link field on the expense entry.
    #[must_use]
    pub fn default_dimension_field(
        dimension: &AccountingDimension,
        insert_after: Option<String>,
    ) -> Self {
        Self {
            doctype: DocType::ExpenseEntry,
            fieldname: dimension.default_fieldname(),
            label: format!("Default {}", dimension.label),
            fieldtype: FieldType::Link,
            options: Some(dimension.document_type.clone()),
            insert_after,
            in_list_view: false,
            in_standard_filter: true,
            reqd: false,
            description: Some(DEFAULT_FIELD_DESCRIPTION.to_string()),
            columns: None,
            collapsible: false,
        }
    }

    /// The `<key>` link field on the expense entry item.
    #[must_use]
    pub fn item_dimension_field(
        dimension: &AccountingDimension,
        insert_after: Option<String>,
    ) -> Self {
        Self {
            doctype: DocType::ExpenseEntryItem,
            fieldname: dimension.fieldname.clone(),
            label: dimension.label.clone(),
            fieldtype: FieldType::Link,
            options: Some(dimension.document_type.clone()),
            insert_after,
            in_list_view: true,
            in_standard_filter: false,
            reqd: dimension.mandatory_for_pl,
            description: None,
            columns: Some(2),
            collapsible: false,
        }
    }

    /// The collapsible section holding additional dimension defaults.
    #[must_use]
    pub fn additional_dimensions_section() -> Self {
        Self {
            doctype: DocType::ExpenseEntry,
            fieldname: ADDITIONAL_DIMENSIONS_SECTION.to_string(),
            label: "Additional Accounting Dimensions".to_string(),
            fieldtype: FieldType::SectionBreak,
            options: None,
            insert_after: Some(ACCOUNTING_COLUMN.to_string()),
            in_list_view: false,
            in_standard_filter: false,
            reqd: false,
            description: None,
            columns: None,
            collapsible: true,
        }
    }
}
