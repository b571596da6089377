//! Allocation domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Invoice lifecycle status.
///
/// `Paid` is derived from the outstanding balance, never set freely: an
/// invoice becomes `Paid` exactly when outstanding drops to the settlement
/// tolerance and reverts to `Finalized` when it rises back above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Invoice is being drafted.
    Draft,
    /// Invoice has been issued and awaits payment.
    Finalized,
    /// Invoice is fully allocated (outstanding within tolerance).
    Paid,
    /// Invoice has been cancelled.
    Cancelled,
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Finalized => write!(f, "finalized"),
            Self::Paid => write!(f, "paid"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Pre-fetched sums needed to validate one allocation operation.
///
/// The repository reads these inside the operation's database transaction
/// so the checks and the write see one consistent state.
#[derive(Debug, Clone, Copy)]
pub struct AllocationSnapshot {
    /// The payment's full amount.
    pub payment_amount: Decimal,
    /// Sum of all allocations drawn from the payment (including the pair
    /// row, when one exists).
    pub payment_allocated: Decimal,
    /// The invoice's total owed.
    pub invoice_total: Decimal,
    /// Sum of all allocations applied to the invoice (including the pair
    /// row, when one exists).
    pub invoice_allocated: Decimal,
    /// Amount already allocated on this exact (payment, invoice) pair.
    pub existing_pair: Option<Decimal>,
}

impl AllocationSnapshot {
    /// Amount of the payment not yet allocated to any invoice.
    #[must_use]
    pub fn unallocated(&self) -> Decimal {
        self.payment_amount - self.payment_allocated
    }

    /// Amount of the invoice not yet covered by any payment.
    #[must_use]
    pub fn outstanding(&self) -> Decimal {
        self.invoice_total - self.invoice_allocated
    }
}

/// The validated write to perform for an allocate operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationPlan {
    /// Insert a new allocation row for the pair.
    Insert {
        /// Amount to allocate.
        amount: Decimal,
    },
    /// Merge into the existing pair row, replacing its amount.
    Merge {
        /// The pair row's new total.
        new_total: Decimal,
    },
}
