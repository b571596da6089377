//! Journal error types.

use thiserror::Error;
use tillbook_shared::types::{AccountId, EntryId};

/// Errors that can occur during journal operations.
#[derive(Debug, Error)]
pub enum JournalError {
    /// Entry description is required.
    #[error("Description is required")]
    DescriptionRequired,

    /// Entry amount must be greater than zero.
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    /// Debit and credit accounts must differ.
    #[error("Debit and credit accounts cannot be the same")]
    SameAccount,

    /// Debit account not found in this ledger.
    #[error("Debit account not found: {0}")]
    DebitAccountNotFound(AccountId),

    /// Credit account not found in this ledger.
    #[error("Credit account not found: {0}")]
    CreditAccountNotFound(AccountId),

    /// Journal entry not found.
    #[error("Journal entry not found: {0}")]
    NotFound(EntryId),
}
