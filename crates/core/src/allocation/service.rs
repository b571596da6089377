//! Allocation planning and invoice settlement rules.
//!
//! An allocation assigns part of a payment's value to an invoice. Two
//! conservation invariants hold at every instant:
//!
//! - the sum of a payment's allocations never exceeds the payment amount
//! - the sum of an invoice's allocations never exceeds the invoice total
//!
//! The planner validates one operation against a consistent snapshot of
//! both sums and returns the write to perform; it never mutates state, so
//! a declined operation leaves nothing to roll back.

use rust_decimal::Decimal;

use super::error::AllocationError;
use super::types::{AllocationPlan, AllocationSnapshot, InvoiceStatus};

/// Outstanding balance at or below this value counts as settled.
#[must_use]
pub fn settlement_tolerance() -> Decimal {
    Decimal::new(1, 2) // 0.01
}

/// Stateless service for allocation arithmetic.
pub struct AllocationService;

impl AllocationService {
    /// Plan allocating `amount` of a payment to an invoice.
    ///
    /// Validates, in order:
    /// 1. `amount` must be positive
    /// 2. `amount` must not exceed the payment's unallocated amount
    /// 3. `amount` must not exceed the invoice's outstanding balance
    /// 4. When the pair already has an allocation, the merged total is
    ///    re-validated against `outstanding + existing` (what the pair
    ///    already consumed is added back before the check)
    ///
    /// # Errors
    ///
    /// Returns `AllocationError` with the limiting figure on decline.
    pub fn plan_allocation(
        snapshot: &AllocationSnapshot,
        amount: Decimal,
    ) -> Result<AllocationPlan, AllocationError> {
        if amount <= Decimal::ZERO {
            return Err(AllocationError::NonPositiveAmount);
        }

        let unallocated = snapshot.unallocated();
        if amount > unallocated {
            return Err(AllocationError::ExceedsUnallocated {
                requested: amount,
                available: unallocated,
            });
        }

        let outstanding = snapshot.outstanding();
        if amount > outstanding {
            return Err(AllocationError::ExceedsOutstanding {
                requested: amount,
                available: outstanding,
            });
        }

        match snapshot.existing_pair {
            Some(existing) => {
                let new_total = existing + amount;
                let available = outstanding + existing;
                if new_total > available {
                    return Err(AllocationError::ExceedsOutstanding {
                        requested: new_total,
                        available,
                    });
                }
                Ok(AllocationPlan::Merge { new_total })
            }
            None => Ok(AllocationPlan::Insert { amount }),
        }
    }

    /// Plan replacing an existing allocation's amount with `new_amount`.
    ///
    /// The current amount is released before checking: the payment side
    /// allows up to `unallocated + current`, the invoice side up to
    /// `outstanding + current`. Returns the validated new amount.
    ///
    /// `snapshot.existing_pair` must hold the allocation being updated.
    ///
    /// # Errors
    ///
    /// Returns `AllocationError` with the limiting figure on decline.
    pub fn plan_update(
        snapshot: &AllocationSnapshot,
        new_amount: Decimal,
    ) -> Result<Decimal, AllocationError> {
        if new_amount <= Decimal::ZERO {
            return Err(AllocationError::NonPositiveAmount);
        }

        let current = snapshot.existing_pair.unwrap_or(Decimal::ZERO);

        let available = snapshot.unallocated() + current;
        if new_amount > available {
            return Err(AllocationError::ExceedsUnallocated {
                requested: new_amount,
                available,
            });
        }

        let outstanding_with_current = snapshot.outstanding() + current;
        if new_amount > outstanding_with_current {
            return Err(AllocationError::ExceedsOutstanding {
                requested: new_amount,
                available: outstanding_with_current,
            });
        }

        Ok(new_amount)
    }

    /// Status transition after an allocation change, if any.
    ///
    /// An invoice flips to `Paid` exactly when its outstanding balance is
    /// within the settlement tolerance, and reverts to `Finalized` when the
    /// outstanding rises back above it. Callers must recheck after every
    /// successful allocate, update, or delete.
    #[must_use]
    pub fn settled_status(
        current: InvoiceStatus,
        outstanding: Decimal,
    ) -> Option<InvoiceStatus> {
        if outstanding <= settlement_tolerance() {
            if current == InvoiceStatus::Paid {
                None
            } else {
                Some(InvoiceStatus::Paid)
            }
        } else if current == InvoiceStatus::Paid {
            Some(InvoiceStatus::Finalized)
        } else {
            None
        }
    }
}
