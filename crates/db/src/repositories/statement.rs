//! Statement repository: read-only statement queries.
//!
//! Loads the journal and line-item rows a statement needs, sums them in
//! memory, and hands the totals to the core statement service. All
//! queries are pure reads, safe to retry and to run concurrently with
//! other reads.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, prelude::Uuid,
};
use tillbook_shared::types::{AccountId, LedgerId};

use crate::entities::{
    accounts, invoice_items, invoices, journal_entries, sales_invoice_items, sales_invoices,
};
use tillbook_core::statements::{
    AccountBalanceLine, BalanceSheet, ProfitAndLoss, StatementService, TrialBalance, VatLine,
    VatReturn,
};

/// Error types for statement operations.
#[derive(Debug, thiserror::Error)]
pub enum StatementRepoError {
    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Period start.
        start: NaiveDate,
        /// Period end.
        end: NaiveDate,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Repository for statement generation.
pub struct StatementRepository {
    db: DatabaseConnection,
}

impl StatementRepository {
    /// Creates a new statement repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Trial balance as of a date (inclusive).
    pub async fn trial_balance(
        &self,
        ledger_id: LedgerId,
        as_of: NaiveDate,
    ) -> Result<TrialBalance, StatementRepoError> {
        let lines = self.balance_lines(ledger_id, None, Some(as_of)).await?;
        Ok(StatementService::trial_balance(as_of, &lines))
    }

    /// Profit & Loss over a period (inclusive bounds).
    ///
    /// # Errors
    ///
    /// Returns an error when `start` is after `end`.
    pub async fn profit_and_loss(
        &self,
        ledger_id: LedgerId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ProfitAndLoss, StatementRepoError> {
        check_range(start, end)?;
        let lines = self.balance_lines(ledger_id, Some(start), Some(end)).await?;
        Ok(StatementService::profit_and_loss(start, end, &lines))
    }

    /// Balance sheet as of a date (inclusive).
    pub async fn balance_sheet(
        &self,
        ledger_id: LedgerId,
        as_of: NaiveDate,
    ) -> Result<BalanceSheet, StatementRepoError> {
        let lines = self.balance_lines(ledger_id, None, Some(as_of)).await?;
        Ok(StatementService::balance_sheet(as_of, &lines))
    }

    /// VAT Return over a period (inclusive bounds).
    ///
    /// Aggregated from the sales and purchase line-item tables directly,
    /// independent of the posted VAT journal entries.
    ///
    /// # Errors
    ///
    /// Returns an error when `start` is after `end`.
    pub async fn vat_return(
        &self,
        ledger_id: LedgerId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<VatReturn, StatementRepoError> {
        check_range(start, end)?;

        let sales_ids: Vec<Uuid> = sales_invoices::Entity::find()
            .filter(sales_invoices::Column::LedgerId.eq(ledger_id.into_inner()))
            .filter(sales_invoices::Column::DocumentDate.between(start, end))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|invoice| invoice.id)
            .collect();
        let sales_lines: Vec<VatLine> = sales_invoice_items::Entity::find()
            .filter(sales_invoice_items::Column::SalesInvoiceId.is_in(sales_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|item| VatLine {
                vat_code: item.vat_code,
                net: item.line_total,
            })
            .collect();

        let purchase_ids: Vec<Uuid> = invoices::Entity::find()
            .filter(invoices::Column::LedgerId.eq(ledger_id.into_inner()))
            .filter(invoices::Column::InvoiceDate.between(start, end))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|invoice| invoice.id)
            .collect();
        let purchase_lines: Vec<VatLine> = invoice_items::Entity::find()
            .filter(invoice_items::Column::InvoiceId.is_in(purchase_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|item| VatLine {
                vat_code: item.vat_code,
                net: item.line_total,
            })
            .collect();

        Ok(StatementService::vat_return(
            start,
            end,
            &sales_lines,
            &purchase_lines,
        ))
    }

    /// Per-account debit/credit sums for a date window.
    ///
    /// One journal scan per call, bucketed in memory; balances are always
    /// derived, never cached.
    async fn balance_lines(
        &self,
        ledger_id: LedgerId,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AccountBalanceLine>, StatementRepoError> {
        let accounts = accounts::Entity::find()
            .filter(accounts::Column::LedgerId.eq(ledger_id.into_inner()))
            .order_by_asc(accounts::Column::Code)
            .all(&self.db)
            .await?;

        let mut query = journal_entries::Entity::find()
            .filter(journal_entries::Column::LedgerId.eq(ledger_id.into_inner()));
        if let Some(from) = from {
            query = query.filter(journal_entries::Column::EntryDate.gte(from));
        }
        if let Some(to) = to {
            query = query.filter(journal_entries::Column::EntryDate.lte(to));
        }
        let entries = query.all(&self.db).await?;
        let sums = sum_by_account(&entries);

        Ok(accounts
            .into_iter()
            .map(|account| {
                let (total_debit, total_credit) =
                    sums.get(&account.id).copied().unwrap_or_default();
                AccountBalanceLine {
                    account_id: AccountId::from_uuid(account.id),
                    code: account.code,
                    name: account.name,
                    account_type: account.account_type.into(),
                    opening_balance: account.opening_balance,
                    total_debit,
                    total_credit,
                }
            })
            .collect())
    }
}

fn check_range(start: NaiveDate, end: NaiveDate) -> Result<(), StatementRepoError> {
    if start > end {
        return Err(StatementRepoError::InvalidDateRange { start, end });
    }
    Ok(())
}

/// Buckets entry amounts into per-account (debit, credit) totals.
pub(crate) fn sum_by_account(
    entries: &[journal_entries::Model],
) -> HashMap<Uuid, (Decimal, Decimal)> {
    let mut sums: HashMap<Uuid, (Decimal, Decimal)> = HashMap::new();
    for entry in entries {
        sums.entry(entry.debit_account_id).or_default().0 += entry.amount;
        sums.entry(entry.credit_account_id).or_default().1 += entry.amount;
    }
    sums
}
