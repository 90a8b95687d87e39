//! Property-based tests for JournalEntryBuilder.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::dimension::{DimensionValues, dimension_keys};
use crate::expense::journal::{JournalContext, JournalEntryBuilder};
use crate::expense::service::ExpenseService;
use crate::expense::types::{ExpenseEntry, ExpenseEntryItem, ExpenseStatus};
use crate::ledger::EntryType;

fn arb_items() -> impl Strategy<Value = Vec<ExpenseEntryItem>> {
    prop::collection::vec(
        (1i64..10_000_000i64, "[a-z]{3,8}").prop_map(|(cents, center)| ExpenseEntryItem {
            amount: Decimal::new(cents, 2),
            description: "Expense".to_string(),
            expense_account: "Travel - AC".to_string(),
            dimensions: DimensionValues::new().with("cost_center", center),
        }),
        1..15,
    )
}

fn approved(expenses: Vec<ExpenseEntryItem>) -> ExpenseEntry {
    let mut entry = ExpenseEntry {
        name: "EXP-00042".to_string(),
        status: ExpenseStatus::Approved,
        company: "Acme".to_string(),
        posting_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        total: Decimal::ZERO,
        quantity: 0,
        default_dimensions: DimensionValues::new().with("cost_center", "Main - AC"),
        mode_of_payment: "Cash".to_string(),
        payment_reference: None,
        clearance_date: None,
        payment_to: None,
        remarks: None,
        approved_by: None,
        expenses,
    };
    ExpenseService::apply_totals_and_defaults(&mut entry, &[]).unwrap();
    entry
}

const CTX: JournalContext<'static> = JournalContext {
    existing_entry: false,
    payment_account: Some("Cash - AC"),
    cash_mode_of_payment: "Cash",
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Debits sum to the total, and there is one credit line for the total.
    #[test]
    fn prop_entry_balances_to_total(items in arb_items()) {
        let mut entry = approved(items);
        let total = entry.total;
        let lines = entry.expenses.len();

        let draft = JournalEntryBuilder::build(&mut entry, &CTX, &dimension_keys(&[]))
            .unwrap()
            .unwrap();

        let debits: Decimal = draft.accounts.iter().map(|line| line.debit).sum();
        let credits: Vec<_> = draft
            .accounts
            .iter()
            .filter(|line| line.entry_type() == EntryType::Credit)
            .collect();

        prop_assert_eq!(draft.accounts.len(), lines + 1);
        prop_assert_eq!(debits, total);
        prop_assert_eq!(credits.len(), 1);
        prop_assert_eq!(credits[0].credit, total);
    }

    /// Each debit line carries the dimensions of its expense line.
    #[test]
    fn prop_debit_lines_follow_expense_lines(items in arb_items()) {
        let mut entry = approved(items);
        let expected: Vec<_> = entry.expenses.iter().map(|item| item.dimensions.clone()).collect();

        let draft = JournalEntryBuilder::build(&mut entry, &CTX, &dimension_keys(&[]))
            .unwrap()
            .unwrap();

        for (line, dimensions) in draft.accounts.iter().zip(expected) {
            prop_assert_eq!(&line.dimensions, &dimensions);
        }
    }

    /// An existing entry always blocks a second one.
    #[test]
    fn prop_existing_entry_blocks_build(items in arb_items()) {
        let mut entry = approved(items);
        let ctx = JournalContext { existing_entry: true, ..CTX };

        prop_assert!(JournalEntryBuilder::build(&mut entry, &ctx, &dimension_keys(&[])).is_err());
    }
}
