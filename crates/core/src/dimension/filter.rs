//! Link-field filter criteria for dimension pickers.

use serde::ser::{Serialize, SerializeTuple, Serializer};
use serde_json::Value;

/// Comparison operator of a filter condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Equal.
    Eq,
    /// Not equal.
    NotEq,
}

impl FilterOperator {
    /// Returns the operator symbol.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
        }
    }
}

/// One filter condition, serialized as `[doctype, field, operator, value]`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCondition {
    /// Document type the condition applies to.
    pub doctype: String,
    /// Field name.
    pub field: String,
    /// Comparison operator.
    pub operator: FilterOperator,
    /// Value to compare against.
    pub value: Value,
}

impl Serialize for FilterCondition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(4)?;
        tuple.serialize_element(&self.doctype)?;
        tuple.serialize_element(&self.field)?;
        tuple.serialize_element(self.operator.as_str())?;
        tuple.serialize_element(&self.value)?;
        tuple.end()
    }
}

/// Filter for the records a dimension field may link to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DimensionFilter {
    /// Conditions, all of which must hold.
    pub conditions: Vec<FilterCondition>,
}

impl DimensionFilter {
    /// Creates a new empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a condition to the filter.
    #[must_use]
    pub fn with_condition(
        mut self,
        doctype: &str,
        field: &str,
        operator: FilterOperator,
        value: impl Into<Value>,
    ) -> Self {
        self.conditions.push(FilterCondition {
            doctype: doctype.to_string(),
            field: field.to_string(),
            operator,
            value: value.into(),
        });
        self
    }

    /// Builds the criteria for a dimension's linked document type.
    ///
    /// Cost centers are limited to the company's leaf nodes and projects to
    /// the company's non-cancelled projects. Any other document type excludes
    /// disabled records and is scoped to the company when it has a
    /// `company` field.
    #[must_use]
    pub fn for_document_type(document_type: &str, company: &str, has_company_field: bool) -> Self {
        match document_type {
            "Cost Center" => Self::new()
                .with_condition(document_type, "is_group", FilterOperator::Eq, "0")
                .with_condition(document_type, "company", FilterOperator::Eq, company),
            "Project" => Self::new()
                .with_condition(document_type, "status", FilterOperator::NotEq, "Cancelled")
                .with_condition(document_type, "company", FilterOperator::Eq, company),
            _ => {
                let filter =
                    Self::new().with_condition(document_type, "disabled", FilterOperator::NotEq, 1);
                if has_company_field {
                    filter.with_condition(document_type, "company", FilterOperator::Eq, company)
                } else {
                    filter
                }
            }
        }
    }

    /// Returns true if the filter is empty (matches everything).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl Serialize for DimensionFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.conditions.serialize(serializer)
    }
}
