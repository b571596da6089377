//! Posting error types.

use thiserror::Error;

use super::types::AccountRole;

/// Errors that can occur when planning a compound posting.
#[derive(Debug, Error)]
pub enum PostingError {
    /// A required account role is not configured in the chart of accounts.
    #[error("No {0} account is configured")]
    MissingAccount(AccountRole),

    /// The event's amount is not positive.
    #[error("Posting amount must be greater than zero")]
    NonPositiveAmount,

    /// A reversal was requested for an empty entry set.
    #[error("No journal entries found for the posting group")]
    EmptyGroup,

    /// A reversal was given entries from more than one posting group.
    #[error("Journal entries belong to more than one posting group")]
    MixedGroups,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_account_display() {
        let err = PostingError::MissingAccount(AccountRole::VatOutput);
        assert_eq!(err.to_string(), "No VAT Output account is configured");
    }
}
