//! Property-based tests for ExpenseService.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::dimension::{AccountingDimension, DimensionValues};
use crate::expense::service::ExpenseService;
use crate::expense::types::{ExpenseEntry, ExpenseEntryItem, ExpenseStatus};

fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn arb_value() -> impl Strategy<Value = Option<String>> {
    prop_oneof![Just(None), "[A-Z][a-z]{2,8}".prop_map(Some)]
}

fn arb_item() -> impl Strategy<Value = ExpenseEntryItem> {
    (arb_amount(), arb_value()).prop_map(|(amount, region)| ExpenseEntryItem {
        amount,
        description: "Expense".to_string(),
        expense_account: "Travel - AC".to_string(),
        dimensions: region
            .map(|value| DimensionValues::new().with("region", value))
            .unwrap_or_default(),
    })
}

fn report(expenses: Vec<ExpenseEntryItem>, default_region: Option<String>) -> ExpenseEntry {
    ExpenseEntry {
        name: "EXP-00001".to_string(),
        status: ExpenseStatus::Draft,
        company: "Acme".to_string(),
        posting_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        total: Decimal::ZERO,
        quantity: 0,
        default_dimensions: default_region
            .map(|value| DimensionValues::new().with("region", value))
            .unwrap_or_default(),
        mode_of_payment: "Cash".to_string(),
        payment_reference: None,
        clearance_date: None,
        payment_to: None,
        remarks: None,
        approved_by: None,
        expenses,
    }
}

fn region() -> AccountingDimension {
    AccountingDimension {
        name: "Region".to_string(),
        fieldname: "region".to_string(),
        label: "Region".to_string(),
        document_type: "Territory".to_string(),
        mandatory_for_bs: false,
        mandatory_for_pl: false,
        disabled: false,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Total is the sum of line amounts and quantity the number of lines.
    #[test]
    fn prop_totals_match_lines(items in prop::collection::vec(arb_item(), 0..20)) {
        let expected: Decimal = items.iter().map(|item| item.amount).sum();
        let count = i32::try_from(items.len()).unwrap();
        let mut entry = report(items, None);

        ExpenseService::apply_totals_and_defaults(&mut entry, &[region()]).unwrap();

        prop_assert_eq!(entry.total, expected);
        prop_assert_eq!(entry.quantity, count);
    }

    /// Lines with a value keep it; blank lines take the non-empty default.
    #[test]
    fn prop_defaults_fill_only_blank_lines(
        items in prop::collection::vec(arb_item(), 1..10),
        default_region in arb_value(),
    ) {
        let before: Vec<Option<String>> = items
            .iter()
            .map(|item| item.dimensions.get("region").map(str::to_string))
            .collect();
        let mut entry = report(items, default_region.clone());

        ExpenseService::apply_totals_and_defaults(&mut entry, &[region()]).unwrap();

        for (item, original) in entry.expenses.iter().zip(before) {
            let expected = original.or_else(|| default_region.clone());
            prop_assert_eq!(item.dimensions.get("region").map(str::to_string), expected);
        }
    }

    /// Running the save step twice changes nothing.
    #[test]
    fn prop_save_step_is_idempotent(
        items in prop::collection::vec(arb_item(), 0..10),
        default_region in arb_value(),
    ) {
        let mut entry = report(items, default_region);
        ExpenseService::apply_totals_and_defaults(&mut entry, &[region()]).unwrap();
        let once = entry.clone();
        ExpenseService::apply_totals_and_defaults(&mut entry, &[region()]).unwrap();

        prop_assert_eq!(entry, once);
    }
}
