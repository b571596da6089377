//! Statement computation from pre-fetched account sums.
//!
//! All four statements are pure functions of their inputs: the repository
//! supplies per-account debit/credit totals (or line-item nets for the VAT
//! Return) for the requested window, and the service applies the sign
//! conventions and builds the report. No statement ever writes.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::{
    AccountBalanceLine, BalanceSheet, ProfitAndLoss, StatementLine, TrialBalance, TrialBalanceRow,
    VatBreakdownRow, VatLine, VatReturn,
};
use crate::accounts::{AccountService, AccountType};
use crate::posting::VatCode;
use crate::posting::vat::{reporting_group, reporting_vat};

/// Balances at or below this magnitude are left off the P&L and balance
/// sheet.
fn materiality_threshold() -> Decimal {
    Decimal::new(1, 2) // 0.01
}

/// Stateless service for statement generation.
pub struct StatementService;

impl StatementService {
    /// Trial balance as of a date.
    ///
    /// Every account appears; the signed balance lands in its natural
    /// column, or the opposite column when negative. The report carries
    /// its own consistency check: the two column totals must be equal.
    #[must_use]
    pub fn trial_balance(as_of: NaiveDate, lines: &[AccountBalanceLine]) -> TrialBalance {
        let mut rows = Vec::with_capacity(lines.len());
        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;

        for line in lines {
            let balance = AccountService::balance(
                line.account_type,
                line.opening_balance,
                line.total_debit,
                line.total_credit,
            );

            let (debit, credit) = if line.account_type.is_debit_normal() {
                if balance >= Decimal::ZERO {
                    (balance, Decimal::ZERO)
                } else {
                    (Decimal::ZERO, -balance)
                }
            } else if balance >= Decimal::ZERO {
                (Decimal::ZERO, balance)
            } else {
                (-balance, Decimal::ZERO)
            };

            total_debit += debit;
            total_credit += credit;

            rows.push(TrialBalanceRow {
                code: line.code,
                name: line.name.clone(),
                debit,
                credit,
                balance,
            });
        }

        TrialBalance {
            as_of,
            rows,
            total_debit,
            total_credit,
            is_balanced: total_debit == total_credit,
        }
    }

    /// Profit & Loss for a period.
    ///
    /// Reports period movement only: the debit/credit totals must cover the
    /// period's entries and the opening balance is excluded. Accounts with
    /// immaterial movement are omitted.
    #[must_use]
    pub fn profit_and_loss(
        period_start: NaiveDate,
        period_end: NaiveDate,
        lines: &[AccountBalanceLine],
    ) -> ProfitAndLoss {
        let mut income = Vec::new();
        let mut expenses = Vec::new();
        let mut total_income = Decimal::ZERO;
        let mut total_expenses = Decimal::ZERO;

        for line in lines {
            let movement = AccountService::period_movement(
                line.account_type,
                line.total_debit,
                line.total_credit,
            );
            if movement.abs() <= materiality_threshold() {
                continue;
            }

            match line.account_type {
                AccountType::Income => {
                    income.push(statement_line(line, movement));
                    total_income += movement;
                }
                AccountType::Expense => {
                    expenses.push(statement_line(line, movement));
                    total_expenses += movement;
                }
                _ => {}
            }
        }

        ProfitAndLoss {
            period_start,
            period_end,
            income,
            expenses,
            total_income,
            total_expenses,
            net_profit: total_income - total_expenses,
        }
    }

    /// Balance sheet as of a date.
    ///
    /// Retained earnings is a balancing plug (assets − liabilities −
    /// tracked equity), not a tracked period-close value.
    #[must_use]
    pub fn balance_sheet(as_of: NaiveDate, lines: &[AccountBalanceLine]) -> BalanceSheet {
        let mut assets = Vec::new();
        let mut liabilities = Vec::new();
        let mut equity = Vec::new();
        let mut total_assets = Decimal::ZERO;
        let mut total_liabilities = Decimal::ZERO;
        let mut total_equity = Decimal::ZERO;

        for line in lines {
            let balance = AccountService::balance(
                line.account_type,
                line.opening_balance,
                line.total_debit,
                line.total_credit,
            );
            if balance.abs() <= materiality_threshold() {
                continue;
            }

            match line.account_type {
                AccountType::Asset => {
                    assets.push(statement_line(line, balance));
                    total_assets += balance;
                }
                AccountType::Liability => {
                    liabilities.push(statement_line(line, balance));
                    total_liabilities += balance;
                }
                AccountType::Equity => {
                    equity.push(statement_line(line, balance));
                    total_equity += balance;
                }
                _ => {}
            }
        }

        let retained_earnings = total_assets - total_liabilities - total_equity;
        let liabilities_and_equity = total_liabilities + total_equity + retained_earnings;

        BalanceSheet {
            as_of,
            assets,
            liabilities,
            equity,
            total_assets,
            total_liabilities,
            total_equity,
            retained_earnings,
            liabilities_and_equity,
            is_balanced: total_assets == liabilities_and_equity,
        }
    }

    /// VAT Return for a period, from sales and purchase line items.
    ///
    /// Output and input VAT are 20% of net for standard-rated lines and
    /// zero otherwise; unrecognised codes are grouped as standard but
    /// contribute no VAT.
    #[must_use]
    pub fn vat_return(
        period_start: NaiveDate,
        period_end: NaiveDate,
        sales: &[VatLine],
        purchases: &[VatLine],
    ) -> VatReturn {
        let sales_rows = breakdown(sales);
        let purchase_rows = breakdown(purchases);

        let total_output_vat: Decimal = sales_rows.iter().map(|row| row.vat).sum();
        let total_input_vat: Decimal = purchase_rows.iter().map(|row| row.vat).sum();

        VatReturn {
            period_start,
            period_end,
            sales: sales_rows,
            purchases: purchase_rows,
            total_output_vat,
            total_input_vat,
            net_vat: total_output_vat - total_input_vat,
        }
    }
}

fn statement_line(line: &AccountBalanceLine, amount: Decimal) -> StatementLine {
    StatementLine {
        account: format!("{} - {}", line.code, line.name),
        amount,
    }
}

/// Group line items by reporting code, in S/E/Z order.
fn breakdown(lines: &[VatLine]) -> Vec<VatBreakdownRow> {
    let groups = [VatCode::Standard, VatCode::Exempt, VatCode::ZeroRated];
    let mut rows: Vec<VatBreakdownRow> = groups
        .into_iter()
        .map(|code| VatBreakdownRow {
            code,
            net: Decimal::ZERO,
            vat: Decimal::ZERO,
        })
        .collect();

    for line in lines {
        let index = match reporting_group(line.vat_code.as_deref()) {
            VatCode::Standard => 0,
            VatCode::Exempt => 1,
            VatCode::ZeroRated => 2,
        };
        rows[index].net += line.net;
        rows[index].vat += reporting_vat(line.vat_code.as_deref(), line.net);
    }

    rows.retain(|row| !row.net.is_zero() || !row.vat.is_zero());
    rows
}
