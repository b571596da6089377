//! Tests for the statement repository's in-memory bucketing.

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::statement::sum_by_account;
use crate::entities::journal_entries;

fn entry(debit: Uuid, credit: Uuid, amount: Decimal) -> journal_entries::Model {
    journal_entries::Model {
        id: Uuid::now_v7(),
        ledger_id: Uuid::nil(),
        entry_date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
        description: "Entry".to_string(),
        debit_account_id: debit,
        credit_account_id: credit,
        amount,
        reference: None,
        transaction_kind: None,
        journal_number: None,
        stakeholder: None,
        posting_group_id: Uuid::now_v7(),
        reverses_group_id: None,
        created_at: Utc::now().into(),
    }
}

#[test]
fn test_sum_by_account_buckets_sides() {
    let a = Uuid::now_v7();
    let b = Uuid::now_v7();
    let c = Uuid::now_v7();
    let entries = vec![
        entry(a, b, dec!(100.00)),
        entry(a, c, dec!(50.00)),
        entry(b, a, dec!(25.00)),
    ];

    let sums = sum_by_account(&entries);

    assert_eq!(sums[&a], (dec!(150.00), dec!(25.00)));
    assert_eq!(sums[&b], (dec!(25.00), dec!(100.00)));
    assert_eq!(sums[&c], (dec!(0), dec!(50.00)));
}

#[test]
fn test_sum_by_account_empty() {
    assert!(sum_by_account(&[]).is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// **Total debits equal total credits across all buckets.**
    ///
    /// *For any* set of journal entries, the sum of per-account debit
    /// totals equals the sum of per-account credit totals (each entry
    /// contributes its amount to exactly one of each).
    #[test]
    fn prop_bucket_totals_balance(
        amounts in prop::collection::vec(1i64..100_000, 1..30),
        pairs in prop::collection::vec((0usize..5, 0usize..5), 1..30),
    ) {
        let account_ids: Vec<Uuid> = (0..5).map(|_| Uuid::now_v7()).collect();
        let entries: Vec<journal_entries::Model> = amounts
            .iter()
            .zip(pairs.iter())
            .filter(|(_, (debit, credit))| debit != credit)
            .map(|(cents, (debit, credit))| {
                entry(
                    account_ids[*debit],
                    account_ids[*credit],
                    Decimal::new(*cents, 2),
                )
            })
            .collect();

        let sums = sum_by_account(&entries);
        let total_debits: Decimal = sums.values().map(|(debit, _)| *debit).sum();
        let total_credits: Decimal = sums.values().map(|(_, credit)| *credit).sum();
        let total_amounts: Decimal = entries.iter().map(|entry| entry.amount).sum();

        prop_assert_eq!(total_debits, total_credits);
        prop_assert_eq!(total_debits, total_amounts);
    }
}
