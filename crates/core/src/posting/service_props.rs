//! Property tests for compound posting and reversal.
//!
//! Posting a group for any business event and then reversing it must
//! restore every touched account's debit/credit position exactly, and
//! every planned group must consist of positive-amount legs.

use std::collections::HashMap;

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use tillbook_shared::types::{AccountId, EntryId, LedgerId};

use super::service::PostingService;
use super::types::{BusinessEvent, PaymentMethod, PostingAccounts, PostingGroup};
use crate::journal::{EntryInput, JournalEntry};

fn fixed_accounts() -> PostingAccounts {
    PostingAccounts {
        trade_debtors: Some(AccountId::new()),
        trade_creditors: Some(AccountId::new()),
        sales: Some(AccountId::new()),
        vat_output: Some(AccountId::new()),
        vat_input: Some(AccountId::new()),
        bank: Some(AccountId::new()),
        undeposited_funds: Some(AccountId::new()),
        cost_of_sales: Some(AccountId::new()),
        stock: Some(AccountId::new()),
    }
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, 1).unwrap()
}

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000).prop_map(|n| Decimal::new(n, 2))
}

fn vat_code_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(Some("S".to_string())),
        Just(Some("E".to_string())),
        Just(Some("Z".to_string())),
        Just(Some("X".to_string())),
        Just(None),
    ]
}

fn method_strategy() -> impl Strategy<Value = PaymentMethod> {
    prop_oneof![
        Just(PaymentMethod::Cash),
        Just(PaymentMethod::Card),
        Just(PaymentMethod::Cheque),
        Just(PaymentMethod::Bacs),
    ]
}

fn event_strategy(charge_account: AccountId) -> impl Strategy<Value = BusinessEvent> {
    prop_oneof![
        (
            1i64..100,
            amount_strategy(),
            vat_code_strategy(),
            any::<bool>()
        )
            .prop_map(|(quantity, unit_price, vat_code, tracked_product)| {
                BusinessEvent::SalesLine {
                    invoice_number: "SI-0001".to_string(),
                    customer: "Customer".to_string(),
                    description: "Line item".to_string(),
                    quantity: Decimal::from(quantity),
                    unit_price,
                    vat_code,
                    tracked_product,
                    unit_cost: None,
                }
            }),
        (1i64..100, amount_strategy(), vat_code_strategy()).prop_map(
            move |(quantity, unit_price, vat_code)| {
                BusinessEvent::SupplierLine {
                    invoice_number: "PI-0001".to_string(),
                    supplier: "Supplier".to_string(),
                    description: "Line item".to_string(),
                    quantity: Decimal::from(quantity),
                    unit_price,
                    vat_code,
                    charge_account,
                }
            }
        ),
        (amount_strategy(), method_strategy()).prop_map(|(amount, method)| {
            BusinessEvent::CustomerPaymentReceived {
                reference: "PAY-1".to_string(),
                customer: "Customer".to_string(),
                method,
                amount,
            }
        }),
        (amount_strategy(), method_strategy()).prop_map(|(amount, method)| {
            BusinessEvent::SupplierPaymentMade {
                reference: "PAY-2".to_string(),
                supplier: "Supplier".to_string(),
                method,
                amount,
            }
        }),
    ]
}

/// Treat planned legs as posted entries so the reversal planner can run.
fn as_posted(group: &PostingGroup, ledger_id: LedgerId) -> Vec<JournalEntry> {
    group
        .entries
        .iter()
        .map(|input: &EntryInput| JournalEntry {
            id: EntryId::new(),
            ledger_id,
            entry_date: input.entry_date,
            description: input.description.clone(),
            debit_account_id: input.debit_account_id,
            credit_account_id: input.credit_account_id,
            amount: input.amount,
            reference: input.reference.clone(),
            kind: input.kind,
            journal_number: input.journal_number.clone(),
            stakeholder: input.stakeholder.clone(),
            posting_group_id: group.id,
        })
        .collect()
}

/// Net debit-minus-credit effect per account across a set of legs.
fn account_effects(entries: &[EntryInput]) -> HashMap<AccountId, Decimal> {
    let mut effects: HashMap<AccountId, Decimal> = HashMap::new();
    for entry in entries {
        *effects.entry(entry.debit_account_id).or_default() += entry.amount;
        *effects.entry(entry.credit_account_id).or_default() -= entry.amount;
    }
    effects
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// **Every planned leg is positive and the group is balanced.**
    ///
    /// *For any* business event, each leg's amount is positive and the
    /// total debited equals the total credited (every leg contributes
    /// identically to one debit and one credit account).
    #[test]
    fn prop_group_legs_positive_and_balanced(
        event in event_strategy(AccountId::new()),
    ) {
        let group = PostingService::plan_event(date(), &event, &fixed_accounts()).unwrap();

        prop_assert!(!group.entries.is_empty());
        for entry in &group.entries {
            prop_assert!(entry.amount > Decimal::ZERO);
            prop_assert_ne!(entry.debit_account_id, entry.credit_account_id);
        }

        // Each leg debits and credits the same amount, so the net effect
        // across all touched accounts must cancel out.
        let residual: Decimal = account_effects(&group.entries).values().copied().sum();
        prop_assert_eq!(residual, Decimal::ZERO);
    }

    /// **Reversal restores every account exactly.**
    ///
    /// *For any* business event, posting the group and then its reversal
    /// leaves a net zero debit/credit effect on every touched account.
    #[test]
    fn prop_post_then_reverse_nets_to_zero(
        event in event_strategy(AccountId::new()),
    ) {
        let group = PostingService::plan_event(date(), &event, &fixed_accounts()).unwrap();
        let posted = as_posted(&group, LedgerId::new());

        let reversal_date = NaiveDate::from_ymd_opt(2026, 5, 8).unwrap();
        let reversal = PostingService::plan_reversal(&posted, reversal_date).unwrap();

        prop_assert_eq!(reversal.entries.len(), group.entries.len());

        let mut all_legs = group.entries.clone();
        all_legs.extend(reversal.entries.clone());
        for (account, effect) in account_effects(&all_legs) {
            prop_assert_eq!(
                effect,
                Decimal::ZERO,
                "account {} left with residual effect",
                account
            );
        }
    }

    /// **Every leg carries the group's ID shape.**
    ///
    /// *For any* event, all legs share one group and a reversal records
    /// which group it cancels.
    #[test]
    fn prop_reversal_records_reversed_group(
        event in event_strategy(AccountId::new()),
    ) {
        let group = PostingService::plan_event(date(), &event, &fixed_accounts()).unwrap();
        let posted = as_posted(&group, LedgerId::new());
        let reversal = PostingService::plan_reversal(&posted, date()).unwrap();

        prop_assert_eq!(reversal.reverses, Some(group.id));
        prop_assert_ne!(reversal.id, group.id);
    }
}
