//! Property tests for allocation conservation invariants.
//!
//! For any sequence of allocate/update/delete operations, at every
//! intermediate state:
//! - the sum of a payment's allocations never exceeds the payment amount
//! - the sum of an invoice's allocations never exceeds the invoice total
//! - every stored allocation amount is positive

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::service::{AllocationService, settlement_tolerance};
use super::types::{AllocationPlan, AllocationSnapshot, InvoiceStatus};

/// One payment allocated across a fixed set of invoices.
///
/// The pair uniqueness constraint means each invoice holds at most one
/// allocation from the payment, so per-invoice state is a single amount.
struct Model {
    payment_amount: Decimal,
    invoice_totals: Vec<Decimal>,
    pairs: Vec<Option<Decimal>>,
    statuses: Vec<InvoiceStatus>,
}

impl Model {
    fn new(payment_amount: Decimal, invoice_totals: Vec<Decimal>) -> Self {
        let n = invoice_totals.len();
        Self {
            payment_amount,
            invoice_totals,
            pairs: vec![None; n],
            statuses: vec![InvoiceStatus::Finalized; n],
        }
    }

    fn payment_allocated(&self) -> Decimal {
        self.pairs.iter().flatten().copied().sum()
    }

    fn snapshot(&self, invoice: usize) -> AllocationSnapshot {
        AllocationSnapshot {
            payment_amount: self.payment_amount,
            payment_allocated: self.payment_allocated(),
            invoice_total: self.invoice_totals[invoice],
            invoice_allocated: self.pairs[invoice].unwrap_or(Decimal::ZERO),
            existing_pair: self.pairs[invoice],
        }
    }

    fn outstanding(&self, invoice: usize) -> Decimal {
        self.invoice_totals[invoice] - self.pairs[invoice].unwrap_or(Decimal::ZERO)
    }

    fn recheck_status(&mut self, invoice: usize) {
        if let Some(next) =
            AllocationService::settled_status(self.statuses[invoice], self.outstanding(invoice))
        {
            self.statuses[invoice] = next;
        }
    }

    fn apply_allocate(&mut self, invoice: usize, amount: Decimal) {
        if let Ok(plan) = AllocationService::plan_allocation(&self.snapshot(invoice), amount) {
            match plan {
                AllocationPlan::Insert { amount } => self.pairs[invoice] = Some(amount),
                AllocationPlan::Merge { new_total } => self.pairs[invoice] = Some(new_total),
            }
            self.recheck_status(invoice);
        }
    }

    fn apply_update(&mut self, invoice: usize, new_amount: Decimal) {
        if self.pairs[invoice].is_none() {
            return;
        }
        if let Ok(amount) = AllocationService::plan_update(&self.snapshot(invoice), new_amount) {
            self.pairs[invoice] = Some(amount);
            self.recheck_status(invoice);
        }
    }

    fn apply_delete(&mut self, invoice: usize) {
        if self.pairs[invoice].take().is_some() {
            self.recheck_status(invoice);
        }
    }

    fn assert_invariants(&self) {
        assert!(
            self.payment_allocated() <= self.payment_amount,
            "payment over-allocated: {} > {}",
            self.payment_allocated(),
            self.payment_amount
        );
        for (i, pair) in self.pairs.iter().enumerate() {
            if let Some(amount) = pair {
                assert!(*amount > Decimal::ZERO, "stored allocation not positive");
                assert!(
                    *amount <= self.invoice_totals[i],
                    "invoice over-allocated: {} > {}",
                    amount,
                    self.invoice_totals[i]
                );
            }
            // Status must track the outstanding balance.
            let settled = self.outstanding(i) <= settlement_tolerance();
            match self.statuses[i] {
                InvoiceStatus::Paid => assert!(settled, "paid invoice with open balance"),
                _ => assert!(!settled, "settled invoice not marked paid"),
            }
        }
    }
}

/// A single allocation operation against one of the invoices.
#[derive(Debug, Clone)]
enum Op {
    Allocate(usize, Decimal),
    Update(usize, Decimal),
    Delete(usize),
}

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..20_000).prop_map(|n| Decimal::new(n, 2))
}

fn op_strategy(invoices: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..invoices, amount_strategy()).prop_map(|(i, a)| Op::Allocate(i, a)),
        (0..invoices, amount_strategy()).prop_map(|(i, a)| Op::Update(i, a)),
        (0..invoices).prop_map(Op::Delete),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// **Conservation holds at every intermediate state.**
    ///
    /// *For any* sequence of allocate/update/delete operations, neither
    /// the payment nor any invoice is ever over-allocated, and the paid
    /// status tracks the outstanding balance exactly.
    #[test]
    fn prop_conservation_under_random_ops(
        payment_cents in 1i64..100_000,
        // Totals start above the settlement tolerance so a fresh invoice
        // is never already settled.
        totals_cents in prop::collection::vec(2i64..50_000, 1..4),
        ops in prop::collection::vec(op_strategy(3), 1..40),
    ) {
        let totals: Vec<Decimal> = totals_cents.iter().map(|c| Decimal::new(*c, 2)).collect();
        let n = totals.len();
        let mut model = Model::new(Decimal::new(payment_cents, 2), totals);

        for op in ops {
            match op {
                Op::Allocate(i, amount) if i < n => model.apply_allocate(i, amount),
                Op::Update(i, amount) if i < n => model.apply_update(i, amount),
                Op::Delete(i) if i < n => model.apply_delete(i),
                _ => {}
            }
            model.assert_invariants();
        }
    }

    /// **Declined operations change nothing.**
    ///
    /// *For any* snapshot, a plan that fails leaves the planner's inputs
    /// untouched, so replaying the same snapshot yields the same result.
    #[test]
    fn prop_decline_is_pure(
        payment_cents in 1i64..10_000,
        total_cents in 1i64..10_000,
        amount_cents in 1i64..40_000,
    ) {
        let snapshot = AllocationSnapshot {
            payment_amount: Decimal::new(payment_cents, 2),
            payment_allocated: Decimal::ZERO,
            invoice_total: Decimal::new(total_cents, 2),
            invoice_allocated: Decimal::ZERO,
            existing_pair: None,
        };
        let amount = Decimal::new(amount_cents, 2);

        let first = AllocationService::plan_allocation(&snapshot, amount);
        let second = AllocationService::plan_allocation(&snapshot, amount);
        prop_assert_eq!(first.is_ok(), second.is_ok());
    }
}

// ============================================================================
// Scenario tests
// ============================================================================

/// Payment of 100.00 split across two invoices, then one allocation removed.
#[test]
fn test_split_payment_scenario() {
    let mut model = Model::new(dec!(100.00), vec![dec!(60.00), dec!(100.00)]);

    // Allocate 60.00 to invoice A: fully settles it.
    model.apply_allocate(0, dec!(60.00));
    assert_eq!(model.pairs[0], Some(dec!(60.00)));
    assert_eq!(model.statuses[0], InvoiceStatus::Paid);

    // Allocate 40.00 to invoice B: 60.00 remains outstanding.
    model.apply_allocate(1, dec!(40.00));
    assert_eq!(model.outstanding(1), dec!(60.00));
    assert_eq!(model.statuses[1], InvoiceStatus::Finalized);

    // The payment is now fully allocated.
    assert_eq!(model.payment_allocated(), dec!(100.00));

    // Deleting the 40.00 allocation restores both sides.
    model.apply_delete(1);
    assert_eq!(model.outstanding(1), dec!(100.00));
    assert_eq!(model.payment_amount - model.payment_allocated(), dec!(40.00));
}

/// Reducing an allocation below the invoice total reverts paid status.
#[test]
fn test_status_reverts_when_allocation_reduced() {
    let mut model = Model::new(dec!(100.00), vec![dec!(80.00)]);

    model.apply_allocate(0, dec!(80.00));
    assert_eq!(model.statuses[0], InvoiceStatus::Paid);

    model.apply_update(0, dec!(50.00));
    assert_eq!(model.statuses[0], InvoiceStatus::Finalized);
    assert_eq!(model.outstanding(0), dec!(30.00));
}

/// Merging into an existing pair keeps the uniqueness constraint: the pair
/// row is updated in place, never duplicated.
#[test]
fn test_merge_keeps_single_pair_row() {
    let mut model = Model::new(dec!(100.00), vec![dec!(90.00)]);

    model.apply_allocate(0, dec!(30.00));
    model.apply_allocate(0, dec!(40.00));
    assert_eq!(model.pairs[0], Some(dec!(70.00)));
    assert_eq!(model.payment_allocated(), dec!(70.00));
}
