//! Property-based tests for dimension field planning.
//!
//! - Property 1: Sync idempotence
//! - Property 2: Removal never touches built-in fields

use std::cell::RefCell;
use std::collections::BTreeSet;

use proptest::prelude::*;

use super::fields::{ADDITIONAL_DIMENSIONS_SECTION, DocType, PROTECTED_FIELDS};
use super::sync::DimensionFieldSync;
use super::types::AccountingDimension;

/// In-memory field registry keyed by (doctype, fieldname).
#[derive(Default)]
struct Registry {
    fields: RefCell<BTreeSet<(DocType, String)>>,
}

impl Registry {
    fn has(&self, doctype: DocType, fieldname: &str) -> bool {
        self.fields
            .borrow()
            .contains(&(doctype, fieldname.to_string()))
    }

    /// Runs the planner for every dimension and applies the plans.
    /// Returns how many fields were created.
    fn sync(&self, dimensions: &[AccountingDimension]) -> usize {
        let mut created = 0;
        for dimension in dimensions {
            let plan = DimensionFieldSync::plan_creation(
                dimension,
                |dt, f| self.has(dt, f),
                |dt, f| dt == DocType::ExpenseEntryItem && f == "amount",
            );
            for definition in plan {
                self.fields.borrow_mut().insert((definition.doctype, definition.fieldname));
                created += 1;
            }
        }
        created
    }

    fn snapshot(&self) -> BTreeSet<(DocType, String)> {
        self.fields.borrow().clone()
    }
}

fn make_dimension(fieldname: &str, disabled: bool) -> AccountingDimension {
    AccountingDimension {
        name: fieldname.to_uppercase(),
        fieldname: fieldname.to_string(),
        label: fieldname.replace('_', " "),
        document_type: "Territory".to_string(),
        mandatory_for_bs: false,
        mandatory_for_pl: false,
        disabled,
    }
}

/// Strategy for dimension field keys, including the built-ins.
fn fieldname_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("project".to_string()),
        Just("cost_center".to_string()),
        "[a-z][a-z0-9_]{0,12}",
    ]
}

fn dimensions_strategy() -> impl Strategy<Value = Vec<AccountingDimension>> {
    prop::collection::vec((fieldname_strategy(), any::<bool>()), 0..8).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(fieldname, disabled)| make_dimension(&fieldname, disabled))
            .collect()
    })
}

proptest! {
    /// Property 1: Running the sync twice produces the same field set and
    /// the second run creates nothing.
    #[test]
    fn prop_sync_is_idempotent(dimensions in dimensions_strategy()) {
        let registry = Registry::default();

        registry.sync(&dimensions);
        let first = registry.snapshot();

        let created_again = registry.sync(&dimensions);
        prop_assert_eq!(created_again, 0);
        prop_assert_eq!(registry.snapshot(), first);
    }

    /// Property 1b: Built-in dimensions never produce fields and disabled
    /// dimensions are skipped.
    #[test]
    fn prop_sync_skips_builtins_and_disabled(dimensions in dimensions_strategy()) {
        let registry = Registry::default();
        registry.sync(&dimensions);

        for (_, fieldname) in registry.snapshot() {
            prop_assert!(!PROTECTED_FIELDS.contains(&fieldname.as_str()));
        }

        for dimension in dimensions.iter().filter(|d| d.disabled) {
            let enabled_twin = dimensions
                .iter()
                .any(|d| !d.disabled && d.fieldname == dimension.fieldname);
            if !enabled_twin {
                prop_assert!(!registry.has(DocType::ExpenseEntryItem, &dimension.fieldname));
            }
        }
    }

    /// Property 2: Removal targets exactly the generated fields of the
    /// dimension and never a protected field.
    #[test]
    fn prop_removal_never_touches_protected(fieldname in fieldname_strategy()) {
        let dimension = make_dimension(&fieldname, false);
        let removals = DimensionFieldSync::plan_removal(&dimension);

        for removal in &removals {
            prop_assert!(!PROTECTED_FIELDS.contains(&removal.fieldname.as_str()));
        }

        if dimension.is_core() {
            prop_assert!(removals.is_empty());
        } else {
            prop_assert_eq!(removals.len(), 2);
        }
    }
}

#[test]
fn test_removal_after_sync_leaves_other_dimensions() {
    let registry = Registry::default();
    let region = make_dimension("region", false);
    let branch = make_dimension("branch", false);
    registry.sync(&[region.clone(), branch]);

    for removal in DimensionFieldSync::plan_removal(&region) {
        registry
            .fields
            .borrow_mut()
            .remove(&(removal.doctype, removal.fieldname));
    }

    let remaining = registry.snapshot();
    assert_eq!(remaining.len(), 2);
    assert!(registry.has(DocType::ExpenseEntry, "default_branch"));
    assert!(registry.has(DocType::ExpenseEntryItem, "branch"));
}

#[test]
fn test_plan_uses_probed_anchor() {
    let plan = DimensionFieldSync::plan_creation(
        &make_dimension("region", false),
        |_, _| false,
        |dt, f| match dt {
            DocType::ExpenseEntry => f == "default_project",
            DocType::ExpenseEntryItem => f == "project",
        },
    );

    assert_eq!(plan.len(), 2);
    assert_eq!(plan[0].insert_after.as_deref(), Some("default_project"));
    assert_eq!(plan[1].insert_after.as_deref(), Some("project"));
}

#[test]
fn test_plan_skips_existing_custom_field() {
    let plan = DimensionFieldSync::plan_creation(
        &make_dimension("region", false),
        |dt, f| dt == DocType::ExpenseEntry && f == "default_region",
        |_, _| false,
    );

    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].fieldname, "region");
    assert_eq!(plan[0].insert_after, None);
}

#[test]
fn test_section_planned_only_for_additional_dimensions() {
    let core_only = vec![make_dimension("project", false), make_dimension("cost_center", false)];
    assert!(DimensionFieldSync::plan_section(&core_only, false).is_none());

    let with_region = vec![make_dimension("region", false)];
    let section = DimensionFieldSync::plan_section(&with_region, false).unwrap();
    assert_eq!(section.fieldname, ADDITIONAL_DIMENSIONS_SECTION);
    assert!(DimensionFieldSync::plan_section(&with_region, true).is_none());

    let disabled = vec![make_dimension("region", true)];
    assert!(DimensionFieldSync::plan_section(&disabled, false).is_none());
}

#[test]
fn test_validate_fieldname() {
    assert!(DimensionFieldSync::validate_fieldname("region").is_ok());
    assert!(DimensionFieldSync::validate_fieldname("sales_team_2").is_ok());
    assert!(DimensionFieldSync::validate_fieldname("").is_err());
    assert!(DimensionFieldSync::validate_fieldname("2fast").is_err());
    assert!(DimensionFieldSync::validate_fieldname("Region").is_err());
    assert!(DimensionFieldSync::validate_fieldname("cost-center").is_err());
}

#[test]
fn test_all_dimension_fieldnames_merges_core_and_custom() {
    let dims = vec![
        make_dimension("region", false),
        make_dimension("project", false),
        make_dimension("branch", true),
    ];

    let all = DimensionFieldSync::all_dimension_fieldnames(&dims);
    let keys: Vec<&str> = all.iter().map(|(k, _)| k.as_str()).collect();

    assert_eq!(keys, vec!["project", "cost_center", "region"]);
    assert_eq!(all[0].1, "Project");
}

#[test]
fn test_sync_message() {
    assert_eq!(DimensionFieldSync::sync_message(3), "Synced 3 accounting dimensions");
}
