//! Allocation error types.
//!
//! Every declined operation carries the limiting figure so the caller can
//! report how much was actually available.

use rust_decimal::Decimal;
use thiserror::Error;
use tillbook_shared::types::AllocationId;

/// Errors that can occur during allocation operations.
#[derive(Debug, Error)]
pub enum AllocationError {
    /// Allocation amount must be greater than zero.
    #[error("Allocation amount must be greater than zero")]
    NonPositiveAmount,

    /// Requested amount exceeds the payment's unallocated amount.
    #[error("Allocation amount {requested} exceeds unallocated payment amount ({available})")]
    ExceedsUnallocated {
        /// The amount requested.
        requested: Decimal,
        /// The payment amount still available.
        available: Decimal,
    },

    /// Requested amount exceeds the invoice's outstanding balance.
    #[error("Allocation amount {requested} exceeds invoice outstanding balance ({available})")]
    ExceedsOutstanding {
        /// The amount requested (for merges, the pair's new total).
        requested: Decimal,
        /// The invoice balance still open to this operation.
        available: Decimal,
    },

    /// Allocation not found.
    #[error("Allocation not found: {0}")]
    NotFound(AllocationId),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_limiting_figure_in_message() {
        let err = AllocationError::ExceedsUnallocated {
            requested: dec!(60.00),
            available: dec!(40.00),
        };
        assert_eq!(
            err.to_string(),
            "Allocation amount 60.00 exceeds unallocated payment amount (40.00)"
        );
    }
}
