//! Journal entry validation, numbering, and account activity annotation.
//!
//! Pure business logic with account lookups injected as closures; the
//! database layer supplies the existing journal numbers and entry lists.

use rust_decimal::Decimal;
use tillbook_shared::types::{AccountId, LedgerId};

use super::error::JournalError;
use super::types::{AccountActivityEntry, EntryInput, JournalEntry};
use crate::accounts::AccountType;

/// Width of the numeric suffix in a journal number (`JNL-0001`).
const JOURNAL_NUMBER_WIDTH: usize = 4;

/// Stateless service for journal entry logic.
pub struct JournalService;

impl JournalService {
    /// Validate a new journal entry.
    ///
    /// Checks, in order:
    /// 1. Description must be non-blank after trimming
    /// 2. Amount must be positive
    /// 3. Debit and credit accounts must differ
    /// 4. Both accounts must exist and belong to the entry's ledger
    ///
    /// Returns the trimmed description on success.
    ///
    /// # Errors
    ///
    /// Returns `JournalError` describing the first failed check.
    pub fn validate(
        input: &EntryInput,
        ledger_id: LedgerId,
        account_ledger: impl Fn(AccountId) -> Option<LedgerId>,
    ) -> Result<String, JournalError> {
        let description = input.description.trim();
        if description.is_empty() {
            return Err(JournalError::DescriptionRequired);
        }

        if input.amount <= Decimal::ZERO {
            return Err(JournalError::NonPositiveAmount);
        }

        if input.debit_account_id == input.credit_account_id {
            return Err(JournalError::SameAccount);
        }

        if account_ledger(input.debit_account_id) != Some(ledger_id) {
            return Err(JournalError::DebitAccountNotFound(input.debit_account_id));
        }
        if account_ledger(input.credit_account_id) != Some(ledger_id) {
            return Err(JournalError::CreditAccountNotFound(input.credit_account_id));
        }

        Ok(description.to_string())
    }

    /// Next sequential journal number for a prefix.
    ///
    /// Scans existing numbers of the form `PFX-NNNN`, takes the highest
    /// numeric suffix plus one. Numbers with a different prefix or an
    /// unparseable suffix are ignored; when nothing parses the sequence
    /// starts at 1.
    #[must_use]
    pub fn next_journal_number<'a>(
        prefix: &str,
        existing: impl IntoIterator<Item = &'a str>,
    ) -> String {
        let max = existing
            .into_iter()
            .filter_map(|number| number.strip_prefix(prefix)?.strip_prefix('-'))
            .filter_map(|suffix| suffix.parse::<u32>().ok())
            .max()
            .unwrap_or(0);

        format!("{prefix}-{:0width$}", max + 1, width = JOURNAL_NUMBER_WIDTH)
    }

    /// Annotate entries relative to one account, with running balances.
    ///
    /// `entries` must be in the listing order (`entry_date DESC`, creation
    /// order DESC). Each entry is flagged `is_debit`/`is_credit` for the
    /// given account (exactly one is true), and the running balance is
    /// accumulated chronologically from the opening balance using the
    /// account type's sign convention, then reported against the original
    /// ordering.
    #[must_use]
    pub fn annotate_activity(
        entries: Vec<JournalEntry>,
        account_id: AccountId,
        account_type: AccountType,
        opening_balance: Decimal,
    ) -> Vec<AccountActivityEntry> {
        let mut annotated: Vec<AccountActivityEntry> = entries
            .into_iter()
            .map(|entry| {
                let is_debit = entry.debit_account_id == account_id;
                AccountActivityEntry {
                    is_debit,
                    is_credit: !is_debit,
                    running_balance: Decimal::ZERO,
                    entry,
                }
            })
            .collect();

        // Oldest entry is last in the DESC listing.
        let mut balance = opening_balance;
        for activity in annotated.iter_mut().rev() {
            let (debit, credit) = if activity.is_debit {
                (activity.entry.amount, Decimal::ZERO)
            } else {
                (Decimal::ZERO, activity.entry.amount)
            };
            balance += account_type.balance_change(debit, credit);
            activity.running_balance = balance;
        }

        annotated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::types::TransactionKind;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tillbook_shared::types::{EntryId, PostingGroupId};

    fn make_input(debit: AccountId, credit: AccountId, amount: Decimal) -> EntryInput {
        EntryInput {
            entry_date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            description: "Office supplies".to_string(),
            debit_account_id: debit,
            credit_account_id: credit,
            amount,
            reference: None,
            kind: Some(TransactionKind::Journal),
            journal_number: None,
            stakeholder: None,
        }
    }

    fn make_entry(
        account: AccountId,
        other: AccountId,
        amount: Decimal,
        debit_side: bool,
        day: u32,
    ) -> JournalEntry {
        let (debit_account_id, credit_account_id) = if debit_side {
            (account, other)
        } else {
            (other, account)
        };
        JournalEntry {
            id: EntryId::new(),
            ledger_id: LedgerId::new(),
            entry_date: NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
            description: "Entry".to_string(),
            debit_account_id,
            credit_account_id,
            amount,
            reference: None,
            kind: None,
            journal_number: None,
            stakeholder: None,
            posting_group_id: PostingGroupId::new(),
        }
    }

    #[test]
    fn test_validate_ok() {
        let ledger = LedgerId::new();
        let debit = AccountId::new();
        let credit = AccountId::new();
        let result = JournalService::validate(
            &make_input(debit, credit, dec!(100)),
            ledger,
            |_| Some(ledger),
        );
        assert_eq!(result.unwrap(), "Office supplies");
    }

    #[test]
    fn test_validate_blank_description() {
        let ledger = LedgerId::new();
        let mut input = make_input(AccountId::new(), AccountId::new(), dec!(100));
        input.description = "  ".to_string();
        let result = JournalService::validate(&input, ledger, |_| Some(ledger));
        assert!(matches!(result, Err(JournalError::DescriptionRequired)));
    }

    #[test]
    fn test_validate_non_positive_amount() {
        let ledger = LedgerId::new();
        let result = JournalService::validate(
            &make_input(AccountId::new(), AccountId::new(), dec!(0)),
            ledger,
            |_| Some(ledger),
        );
        assert!(matches!(result, Err(JournalError::NonPositiveAmount)));
    }

    #[test]
    fn test_validate_same_account() {
        let ledger = LedgerId::new();
        let account = AccountId::new();
        let result = JournalService::validate(
            &make_input(account, account, dec!(100)),
            ledger,
            |_| Some(ledger),
        );
        assert!(matches!(result, Err(JournalError::SameAccount)));
    }

    #[test]
    fn test_validate_foreign_account() {
        let ledger = LedgerId::new();
        let other_ledger = LedgerId::new();
        let debit = AccountId::new();
        let credit = AccountId::new();
        let result =
            JournalService::validate(&make_input(debit, credit, dec!(100)), ledger, |id| {
                if id == debit {
                    Some(other_ledger)
                } else {
                    Some(ledger)
                }
            });
        assert!(matches!(result, Err(JournalError::DebitAccountNotFound(id)) if id == debit));
    }

    #[test]
    fn test_next_journal_number_empty() {
        assert_eq!(JournalService::next_journal_number("JNL", []), "JNL-0001");
    }

    #[test]
    fn test_next_journal_number_increments_max() {
        let existing = ["JNL-0001", "JNL-0007", "JNL-0003"];
        assert_eq!(
            JournalService::next_journal_number("JNL", existing),
            "JNL-0008"
        );
    }

    #[test]
    fn test_next_journal_number_ignores_other_prefixes_and_garbage() {
        let existing = ["TFR-0009", "JNL-abcd", "JNL-0002"];
        assert_eq!(
            JournalService::next_journal_number("JNL", existing),
            "JNL-0003"
        );
    }

    #[test]
    fn test_next_journal_number_all_unparseable() {
        let existing = ["JNL-", "JNL-xyz"];
        assert_eq!(
            JournalService::next_journal_number("JNL", existing),
            "JNL-0001"
        );
    }

    #[test]
    fn test_annotate_activity_sides_and_running_balance() {
        let account = AccountId::new();
        let other = AccountId::new();
        // Listing order: newest first. Chronologically: +100 debit, then -30 credit.
        let entries = vec![
            make_entry(account, other, dec!(30), false, 20),
            make_entry(account, other, dec!(100), true, 10),
        ];

        let activity = JournalService::annotate_activity(
            entries,
            account,
            AccountType::Asset,
            dec!(50),
        );

        assert!(activity[0].is_credit && !activity[0].is_debit);
        assert!(activity[1].is_debit && !activity[1].is_credit);
        // Oldest entry: 50 + 100 = 150; newest: 150 - 30 = 120.
        assert_eq!(activity[1].running_balance, dec!(150));
        assert_eq!(activity[0].running_balance, dec!(120));
    }

    #[test]
    fn test_annotate_activity_credit_normal() {
        let account = AccountId::new();
        let other = AccountId::new();
        let entries = vec![make_entry(account, other, dec!(120), false, 10)];

        let activity = JournalService::annotate_activity(
            entries,
            account,
            AccountType::Income,
            Decimal::ZERO,
        );

        assert_eq!(activity[0].running_balance, dec!(120));
    }
}
