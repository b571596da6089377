//! Chart of accounts domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use tillbook_shared::types::{AccountId, LedgerId};

/// Nominal account classification.
///
/// Each type owns a reserved range of account codes (UK small-business
/// convention) and a normal balance side:
/// - Asset/Expense are debit-normal: balance = opening + debits - credits
/// - Liability/Equity/Income are credit-normal: balance = opening + credits - debits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Asset account (codes 1000-1999).
    Asset,
    /// Liability account (codes 2000-2999).
    Liability,
    /// Equity account (codes 3000-3999).
    Equity,
    /// Income account (codes 4000-4999).
    Income,
    /// Expense account (codes 5000-5999).
    Expense,
}

impl AccountType {
    /// All account types, in code-range order.
    pub const ALL: [Self; 5] = [
        Self::Asset,
        Self::Liability,
        Self::Equity,
        Self::Income,
        Self::Expense,
    ];

    /// The reserved account code range for this type.
    #[must_use]
    pub const fn code_range(self) -> RangeInclusive<i32> {
        match self {
            Self::Asset => 1000..=1999,
            Self::Liability => 2000..=2999,
            Self::Equity => 3000..=3999,
            Self::Income => 4000..=4999,
            Self::Expense => 5000..=5999,
        }
    }

    /// Returns true if this type carries a debit-normal balance.
    #[must_use]
    pub const fn is_debit_normal(self) -> bool {
        matches!(self, Self::Asset | Self::Expense)
    }

    /// Signed balance contribution of an entry against this account.
    ///
    /// Debit-normal: debit - credit. Credit-normal: credit - debit.
    #[must_use]
    pub fn balance_change(self, debit: Decimal, credit: Decimal) -> Decimal {
        if self.is_debit_normal() {
            debit - credit
        } else {
            credit - debit
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asset => write!(f, "Asset"),
            Self::Liability => write!(f, "Liability"),
            Self::Equity => write!(f, "Equity"),
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// A nominal account in the chart of accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// The account ID.
    pub id: AccountId,
    /// The ledger this account belongs to.
    pub ledger_id: LedgerId,
    /// Account code within the type's reserved range.
    pub code: i32,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Opening balance on the account's normal side.
    pub opening_balance: Decimal,
    /// Whether this is a bank account (for reconciliation).
    pub is_bank: bool,
}

/// Input for creating or updating an account.
#[derive(Debug, Clone)]
pub struct AccountInput {
    /// Account code.
    pub code: i32,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Opening balance.
    pub opening_balance: Decimal,
    /// Whether this is a bank account.
    pub is_bank: bool,
}
