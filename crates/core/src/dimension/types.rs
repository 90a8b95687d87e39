//! Accounting dimension domain types.
//!
//! A dimension is a classification axis (cost center, project, region...)
//! that is attached to expense lines and journal entry lines. Dimension
//! values are carried in a [`DimensionValues`] map keyed by the dimension's
//! field key instead of one struct field per dimension.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Field key of the built-in project dimension.
pub const PROJECT: &str = "project";

/// Field key of the built-in cost center dimension.
pub const COST_CENTER: &str = "cost_center";

/// Built-in dimensions that exist as standard fields on the expense
/// document types, with their display labels.
pub const CORE_DIMENSIONS: [(&str, &str); 2] = [(PROJECT, "Project"), (COST_CENTER, "Cost Center")];

/// Returns the parent-level default field name for a dimension key.
#[must_use]
pub fn default_fieldname(fieldname: &str) -> String {
    format!("default_{fieldname}")
}

/// Returns true if the field key belongs to a built-in dimension.
#[must_use]
pub fn is_core_dimension(fieldname: &str) -> bool {
    CORE_DIMENSIONS.iter().any(|(key, _)| *key == fieldname)
}

/// An accounting dimension definition.
///
/// Owned by the accounting setup; the expense module only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountingDimension {
    /// Unique dimension name (e.g. "Region").
    pub name: String,
    /// Field key used on documents (e.g. "region").
    pub fieldname: String,
    /// Display label.
    pub label: String,
    /// Document type the dimension values link to (e.g. "Territory").
    pub document_type: String,
    /// Mandatory for balance sheet accounts.
    pub mandatory_for_bs: bool,
    /// Mandatory for profit and loss accounts.
    pub mandatory_for_pl: bool,
    /// Disabled dimensions are ignored everywhere.
    pub disabled: bool,
}

impl AccountingDimension {
    /// Returns the parent-level default field name (`default_<fieldname>`).
    #[must_use]
    pub fn default_fieldname(&self) -> String {
        default_fieldname(&self.fieldname)
    }

    /// Returns true if the dimension is not disabled.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.disabled
    }

    /// Returns true if this dimension shadows a built-in dimension.
    #[must_use]
    pub fn is_core(&self) -> bool {
        is_core_dimension(&self.fieldname)
    }
}

/// Lifecycle events on a dimension definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionEvent {
    /// The dimension was just inserted.
    AfterInsert,
    /// The dimension was updated.
    OnUpdate,
    /// The dimension is being deleted.
    OnTrash,
}

impl DimensionEvent {
    /// Returns true if the event should (re)create the dimension's fields.
    #[must_use]
    pub const fn creates_fields(self) -> bool {
        matches!(self, Self::AfterInsert | Self::OnUpdate)
    }
}

/// Returns every dimension key that documents may carry: the built-ins
/// followed by the active custom dimensions, without duplicates.
#[must_use]
pub fn dimension_keys(dimensions: &[AccountingDimension]) -> Vec<String> {
    let mut keys: Vec<String> = CORE_DIMENSIONS
        .iter()
        .map(|(key, _)| (*key).to_string())
        .collect();

    for dimension in dimensions.iter().filter(|d| d.is_active()) {
        if !keys.contains(&dimension.fieldname) {
            keys.push(dimension.fieldname.clone());
        }
    }

    keys
}

/// Dimension values keyed by dimension field key.
///
/// Empty strings are treated as "not set", so `get` never returns an
/// empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionValues(BTreeMap<String, String>);

impl DimensionValues {
    /// Creates an empty set of values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the non-empty value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    /// Returns true if the key has a non-empty value.
    #[must_use]
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Sets a value, replacing any previous one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style variant of [`DimensionValues::set`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Removes a key and returns its previous value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Copies the non-empty values of `keys` into a new map.
    #[must_use]
    pub fn select(&self, keys: &[String]) -> Self {
        keys.iter()
            .filter_map(|key| self.get(key).map(|value| (key.clone(), value.to_string())))
            .collect()
    }

    /// Removes every key not listed in `keys`.
    pub fn retain_keys(&mut self, keys: &[String]) {
        self.0.retain(|key, _| keys.contains(key));
    }

    /// Iterates over non-empty values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Returns true if no non-empty value is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl FromIterator<(String, String)> for DimensionValues {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dimension(fieldname: &str, disabled: bool) -> AccountingDimension {
        AccountingDimension {
            name: fieldname.to_uppercase(),
            fieldname: fieldname.to_string(),
            label: fieldname.to_string(),
            document_type: "Territory".to_string(),
            mandatory_for_bs: false,
            mandatory_for_pl: false,
            disabled,
        }
    }

    #[test]
    fn test_default_fieldname() {
        assert_eq!(default_fieldname("region"), "default_region");
        assert_eq!(dimension("branch", false).default_fieldname(), "default_branch");
    }

    #[test]
    fn test_core_dimension_detection() {
        assert!(is_core_dimension("project"));
        assert!(is_core_dimension("cost_center"));
        assert!(!is_core_dimension("region"));
        assert!(dimension("project", false).is_core());
    }

    #[test]
    fn test_dimension_keys_skip_disabled_and_duplicates() {
        let dims = vec![
            dimension("region", false),
            dimension("cost_center", false),
            dimension("branch", true),
        ];

        assert_eq!(dimension_keys(&dims), vec!["project", "cost_center", "region"]);
    }

    #[test]
    fn test_dimension_event_creates_fields() {
        assert!(DimensionEvent::AfterInsert.creates_fields());
        assert!(DimensionEvent::OnUpdate.creates_fields());
        assert!(!DimensionEvent::OnTrash.creates_fields());
    }

    #[test]
    fn test_values_treat_empty_as_unset() {
        let values = DimensionValues::new()
            .with("region", "")
            .with("project", "PRJ-1");

        assert_eq!(values.get("region"), None);
        assert!(!values.is_set("region"));
        assert_eq!(values.get("project"), Some("PRJ-1"));
        assert_eq!(values.iter().count(), 1);
    }

    #[test]
    fn test_values_select() {
        let values = DimensionValues::new()
            .with("region", "North")
            .with("stray", "x")
            .with("project", " ");

        let selected = values.select(&["region".to_string(), "project".to_string()]);

        assert_eq!(selected, DimensionValues::new().with("region", "North"));
    }

    #[test]
    fn test_values_serialize_as_plain_map() {
        let values = DimensionValues::new().with("region", "North");
        let json = serde_json::to_value(&values).unwrap();

        assert_eq!(json, serde_json::json!({ "region": "North" }));
    }
}
