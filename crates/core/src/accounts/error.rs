//! Chart of accounts error types.

use thiserror::Error;
use tillbook_shared::types::AccountId;

use super::types::AccountType;

/// Errors that can occur during chart of accounts operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Account name is required.
    #[error("Account name is required")]
    NameRequired,

    /// Account code is outside the reserved range for the account type.
    #[error("{account_type} accounts must use codes {lo}-{hi}")]
    CodeOutOfRange {
        /// The account type.
        account_type: AccountType,
        /// Lower bound of the reserved range.
        lo: i32,
        /// Upper bound of the reserved range.
        hi: i32,
    },

    /// Account code already used within the ledger.
    #[error("Account code {0} already exists in this ledger")]
    DuplicateCode(i32),

    /// Account not found.
    #[error("Account not found: {0}")]
    NotFound(AccountId),

    /// Cannot delete an account that is referenced by journal entries.
    #[error("Cannot delete account with {0} existing journal entries")]
    HasJournalEntries(u64),
}
