//! Statement data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tillbook_shared::types::AccountId;

use crate::accounts::AccountType;
use crate::posting::VatCode;

/// Per-account sums fed into statement generation.
///
/// The repository computes the debit/credit totals for the statement's
/// date window; the statement service applies the sign conventions.
#[derive(Debug, Clone)]
pub struct AccountBalanceLine {
    /// Account ID.
    pub account_id: AccountId,
    /// Account code.
    pub code: i32,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Opening balance.
    pub opening_balance: Decimal,
    /// Total debited against the account in the window.
    pub total_debit: Decimal,
    /// Total credited against the account in the window.
    pub total_credit: Decimal,
}

/// One line item's net amount and raw VAT code, for the VAT Return.
#[derive(Debug, Clone)]
pub struct VatLine {
    /// Raw VAT code as stored on the line item.
    pub vat_code: Option<String>,
    /// Net amount (excluding VAT).
    pub net: Decimal,
}

/// A row of the trial balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// Account code.
    pub code: i32,
    /// Account name.
    pub name: String,
    /// Debit column value.
    pub debit: Decimal,
    /// Credit column value.
    pub credit: Decimal,
    /// Signed balance per the account type's convention.
    pub balance: Decimal,
}

/// Trial balance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalance {
    /// As-of date (inclusive).
    pub as_of: NaiveDate,
    /// One row per account.
    pub rows: Vec<TrialBalanceRow>,
    /// Total of the debit column.
    pub total_debit: Decimal,
    /// Total of the credit column.
    pub total_credit: Decimal,
    /// Whether the columns total equally (the built-in consistency check).
    pub is_balanced: bool,
}

/// A labelled amount line in the P&L or balance sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementLine {
    /// Display label (`code - name`).
    pub account: String,
    /// Amount.
    pub amount: Decimal,
}

/// Profit & Loss report over a period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitAndLoss {
    /// Period start (inclusive).
    pub period_start: NaiveDate,
    /// Period end (inclusive).
    pub period_end: NaiveDate,
    /// Income lines.
    pub income: Vec<StatementLine>,
    /// Expense lines.
    pub expenses: Vec<StatementLine>,
    /// Total income.
    pub total_income: Decimal,
    /// Total expenses.
    pub total_expenses: Decimal,
    /// Net profit (income minus expenses).
    pub net_profit: Decimal,
}

/// Balance sheet report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// As-of date (inclusive).
    pub as_of: NaiveDate,
    /// Asset lines.
    pub assets: Vec<StatementLine>,
    /// Liability lines.
    pub liabilities: Vec<StatementLine>,
    /// Equity lines (excluding retained earnings).
    pub equity: Vec<StatementLine>,
    /// Total assets.
    pub total_assets: Decimal,
    /// Total liabilities.
    pub total_liabilities: Decimal,
    /// Total tracked equity, excluding retained earnings.
    pub total_equity: Decimal,
    /// Balancing plug: assets minus liabilities minus tracked equity.
    /// An approximation of retained earnings, not a period-close figure.
    pub retained_earnings: Decimal,
    /// Liabilities plus equity plus retained earnings.
    pub liabilities_and_equity: Decimal,
    /// Whether assets equal liabilities plus equity.
    pub is_balanced: bool,
}

/// Net and VAT per code group in the VAT Return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VatBreakdownRow {
    /// The VAT code group.
    pub code: VatCode,
    /// Total net amount in the group.
    pub net: Decimal,
    /// Total VAT attributed to the group.
    pub vat: Decimal,
}

/// VAT Return over a period.
///
/// Computed directly from invoice line items, independent of posted VAT
/// journal entries; the two can diverge when entries were manually
/// adjusted or reversed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VatReturn {
    /// Period start (inclusive).
    pub period_start: NaiveDate,
    /// Period end (inclusive).
    pub period_end: NaiveDate,
    /// Sales (output) breakdown by code.
    pub sales: Vec<VatBreakdownRow>,
    /// Purchases (input) breakdown by code.
    pub purchases: Vec<VatBreakdownRow>,
    /// Total output VAT on sales.
    pub total_output_vat: Decimal,
    /// Total input VAT on purchases.
    pub total_input_vat: Decimal,
    /// Net VAT payable (positive) or refundable (negative).
    pub net_vat: Decimal,
}
