//! Chart of accounts validation and balance rules.
//!
//! Pure business logic: uniqueness of account codes is checked through an
//! injected predicate so the caller can exclude an account's own row when
//! validating an update.

use rust_decimal::Decimal;

use super::error::AccountError;
use super::types::{AccountInput, AccountType};

/// Stateless service for account validation and balance calculation.
pub struct AccountService;

impl AccountService {
    /// Validate an account create or update.
    ///
    /// Checks, in order:
    /// 1. Name must be non-blank after trimming
    /// 2. Code must lie in the account type's reserved range
    /// 3. Code must not be taken by another account in the same ledger
    ///    (`is_code_taken` must already exclude the account's own row when
    ///    validating an update)
    ///
    /// Returns the trimmed account name on success.
    ///
    /// # Errors
    ///
    /// Returns `AccountError` describing the first failed check.
    pub fn validate(
        input: &AccountInput,
        is_code_taken: impl Fn(i32) -> bool,
    ) -> Result<String, AccountError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(AccountError::NameRequired);
        }

        let range = input.account_type.code_range();
        if !range.contains(&input.code) {
            return Err(AccountError::CodeOutOfRange {
                account_type: input.account_type,
                lo: *range.start(),
                hi: *range.end(),
            });
        }

        if is_code_taken(input.code) {
            return Err(AccountError::DuplicateCode(input.code));
        }

        Ok(name.to_string())
    }

    /// Validate that an account can be deleted.
    ///
    /// An account referenced by any journal entry (as debit or credit side)
    /// must be kept.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::HasJournalEntries` with the entry count.
    pub fn validate_can_delete(entry_count: u64) -> Result<(), AccountError> {
        if entry_count > 0 {
            return Err(AccountError::HasJournalEntries(entry_count));
        }
        Ok(())
    }

    /// Current balance from opening balance and entry totals.
    ///
    /// Asset/Expense: opening + debits - credits.
    /// Liability/Equity/Income: opening + credits - debits.
    #[must_use]
    pub fn balance(
        account_type: AccountType,
        opening_balance: Decimal,
        total_debits: Decimal,
        total_credits: Decimal,
    ) -> Decimal {
        opening_balance + account_type.balance_change(total_debits, total_credits)
    }

    /// Period-only movement, excluding the opening balance.
    ///
    /// Used by the Profit & Loss statement, which reports activity within
    /// a date range rather than a cumulative position.
    #[must_use]
    pub fn period_movement(
        account_type: AccountType,
        total_debits: Decimal,
        total_credits: Decimal,
    ) -> Decimal {
        account_type.balance_change(total_debits, total_credits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn input(code: i32, name: &str, account_type: AccountType) -> AccountInput {
        AccountInput {
            code,
            name: name.to_string(),
            account_type,
            opening_balance: Decimal::ZERO,
            is_bank: false,
        }
    }

    #[test]
    fn test_validate_ok_trims_name() {
        let result = AccountService::validate(
            &input(1400, "  Trade Debtors  ", AccountType::Asset),
            |_| false,
        );
        assert_eq!(result.unwrap(), "Trade Debtors");
    }

    #[test]
    fn test_validate_blank_name() {
        let result = AccountService::validate(&input(1400, "   ", AccountType::Asset), |_| false);
        assert!(matches!(result, Err(AccountError::NameRequired)));
    }

    // Boundary cases: 1999 and 1000 are valid Asset codes, 2000 is not;
    // 2000 is a valid Liability code.
    #[rstest]
    #[case(AccountType::Asset, 1000, true)]
    #[case(AccountType::Asset, 1999, true)]
    #[case(AccountType::Asset, 2000, false)]
    #[case(AccountType::Asset, 999, false)]
    #[case(AccountType::Liability, 2000, true)]
    #[case(AccountType::Income, 4000, true)]
    #[case(AccountType::Income, 5000, false)]
    fn test_validate_code_range(
        #[case] account_type: AccountType,
        #[case] code: i32,
        #[case] ok: bool,
    ) {
        let result = AccountService::validate(&input(code, "Test", account_type), |_| false);
        assert_eq!(result.is_ok(), ok);
    }

    #[test]
    fn test_validate_duplicate_code() {
        let result =
            AccountService::validate(&input(1400, "Trade Debtors", AccountType::Asset), |code| {
                code == 1400
            });
        assert!(matches!(result, Err(AccountError::DuplicateCode(1400))));
    }

    #[test]
    fn test_validate_can_delete() {
        assert!(AccountService::validate_can_delete(0).is_ok());
        assert!(matches!(
            AccountService::validate_can_delete(2),
            Err(AccountError::HasJournalEntries(2))
        ));
    }

    #[test]
    fn test_balance_debit_normal() {
        let balance =
            AccountService::balance(AccountType::Asset, dec!(50), dec!(120), dec!(20));
        assert_eq!(balance, dec!(150));
    }

    #[test]
    fn test_balance_credit_normal() {
        let balance =
            AccountService::balance(AccountType::Income, dec!(0), dec!(20), dec!(120));
        assert_eq!(balance, dec!(100));
    }

    #[test]
    fn test_period_movement_ignores_opening() {
        let movement = AccountService::period_movement(AccountType::Expense, dec!(80), dec!(5));
        assert_eq!(movement, dec!(75));
    }
}
