//! Account repository for chart of accounts database operations.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tillbook_shared::types::{AccountId, LedgerId};

use crate::entities::{accounts, journal_entries};
use tillbook_core::accounts::{AccountError, AccountInput, AccountService};

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountRepoError {
    /// Domain validation failure.
    #[error(transparent)]
    Domain(#[from] AccountError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Account with its computed current balance.
#[derive(Debug, Clone)]
pub struct AccountWithBalance {
    /// The account record.
    pub account: accounts::Model,
    /// Current balance derived from the journal.
    pub balance: Decimal,
}

/// Repository for chart of accounts operations.
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new account.
    ///
    /// # Errors
    ///
    /// Returns an error when the name is blank, the code lies outside the
    /// account type's reserved range, or the code is already used in the
    /// ledger.
    pub async fn create(
        &self,
        ledger_id: LedgerId,
        input: AccountInput,
    ) -> Result<accounts::Model, AccountRepoError> {
        let txn = self.db.begin().await?;

        let code_taken = accounts::Entity::find()
            .filter(accounts::Column::LedgerId.eq(ledger_id.into_inner()))
            .filter(accounts::Column::Code.eq(input.code))
            .one(&txn)
            .await?
            .is_some();

        let name = AccountService::validate(&input, |_| code_taken)?;

        let now = Utc::now().into();
        let account = accounts::ActiveModel {
            id: Set(AccountId::new().into_inner()),
            ledger_id: Set(ledger_id.into_inner()),
            code: Set(input.code),
            name: Set(name),
            account_type: Set(input.account_type.into()),
            opening_balance: Set(input.opening_balance),
            is_bank: Set(input.is_bank),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        tracing::info!(account_id = %account.id, code = account.code, "account created");
        Ok(account)
    }

    /// Updates an account.
    ///
    /// Runs the same validation as `create`, excluding the account's own
    /// row from the code uniqueness check.
    ///
    /// # Errors
    ///
    /// Returns an error when validation fails or the account does not
    /// exist in the ledger.
    pub async fn update(
        &self,
        ledger_id: LedgerId,
        account_id: AccountId,
        input: AccountInput,
    ) -> Result<accounts::Model, AccountRepoError> {
        let txn = self.db.begin().await?;

        let existing = accounts::Entity::find_by_id(account_id.into_inner())
            .filter(accounts::Column::LedgerId.eq(ledger_id.into_inner()))
            .one(&txn)
            .await?
            .ok_or(AccountError::NotFound(account_id))?;

        let code_taken = accounts::Entity::find()
            .filter(accounts::Column::LedgerId.eq(ledger_id.into_inner()))
            .filter(accounts::Column::Code.eq(input.code))
            .filter(accounts::Column::Id.ne(account_id.into_inner()))
            .one(&txn)
            .await?
            .is_some();

        let name = AccountService::validate(&input, |_| code_taken)?;

        let mut active: accounts::ActiveModel = existing.into();
        active.code = Set(input.code);
        active.name = Set(name);
        active.account_type = Set(input.account_type.into());
        active.opening_balance = Set(input.opening_balance);
        active.is_bank = Set(input.is_bank);
        active.updated_at = Set(Utc::now().into());
        let account = active.update(&txn).await?;

        txn.commit().await?;

        tracing::info!(account_id = %account.id, "account updated");
        Ok(account)
    }

    /// Deletes an account.
    ///
    /// # Errors
    ///
    /// Returns an error when any journal entry references the account as
    /// its debit or credit side, or when the account does not exist.
    pub async fn delete(
        &self,
        ledger_id: LedgerId,
        account_id: AccountId,
    ) -> Result<(), AccountRepoError> {
        let txn = self.db.begin().await?;

        let entry_count = journal_entries::Entity::find()
            .filter(journal_entries::Column::LedgerId.eq(ledger_id.into_inner()))
            .filter(
                sea_orm::Condition::any()
                    .add(journal_entries::Column::DebitAccountId.eq(account_id.into_inner()))
                    .add(journal_entries::Column::CreditAccountId.eq(account_id.into_inner())),
            )
            .count(&txn)
            .await?;
        AccountService::validate_can_delete(entry_count)?;

        let account = accounts::Entity::find_by_id(account_id.into_inner())
            .filter(accounts::Column::LedgerId.eq(ledger_id.into_inner()))
            .one(&txn)
            .await?
            .ok_or(AccountError::NotFound(account_id))?;

        account.delete(&txn).await?;
        txn.commit().await?;

        tracing::info!(account_id = %account_id, "account deleted");
        Ok(())
    }

    /// Fetches an account with its current balance.
    ///
    /// # Errors
    ///
    /// Returns an error when the account does not exist in the ledger.
    pub async fn get(
        &self,
        ledger_id: LedgerId,
        account_id: AccountId,
    ) -> Result<AccountWithBalance, AccountRepoError> {
        let account = accounts::Entity::find_by_id(account_id.into_inner())
            .filter(accounts::Column::LedgerId.eq(ledger_id.into_inner()))
            .one(&self.db)
            .await?
            .ok_or(AccountError::NotFound(account_id))?;

        let balance = self.balance_of(&account, None).await?;
        Ok(AccountWithBalance { account, balance })
    }

    /// Lists the ledger's accounts in code order, with current balances.
    pub async fn list(
        &self,
        ledger_id: LedgerId,
    ) -> Result<Vec<AccountWithBalance>, AccountRepoError> {
        let accounts = accounts::Entity::find()
            .filter(accounts::Column::LedgerId.eq(ledger_id.into_inner()))
            .order_by_asc(accounts::Column::Code)
            .all(&self.db)
            .await?;

        let mut result = Vec::with_capacity(accounts.len());
        for account in accounts {
            let balance = self.balance_of(&account, None).await?;
            result.push(AccountWithBalance { account, balance });
        }
        Ok(result)
    }

    /// Point-in-time balance for an account.
    ///
    /// With `as_of` set, only entries dated on or before the cutoff count.
    ///
    /// # Errors
    ///
    /// Returns an error when the account does not exist in the ledger.
    pub async fn balance(
        &self,
        ledger_id: LedgerId,
        account_id: AccountId,
        as_of: Option<NaiveDate>,
    ) -> Result<Decimal, AccountRepoError> {
        let account = accounts::Entity::find_by_id(account_id.into_inner())
            .filter(accounts::Column::LedgerId.eq(ledger_id.into_inner()))
            .one(&self.db)
            .await?
            .ok_or(AccountError::NotFound(account_id))?;

        self.balance_of(&account, as_of).await
    }

    /// Balance from a full scan of the account's journal history.
    ///
    /// Derived on every call rather than cached; this method is the single
    /// seam where a materialized balance could be introduced later.
    async fn balance_of(
        &self,
        account: &accounts::Model,
        as_of: Option<NaiveDate>,
    ) -> Result<Decimal, AccountRepoError> {
        let total_debits = self
            .entry_sum(journal_entries::Column::DebitAccountId, account.id, as_of)
            .await?;
        let total_credits = self
            .entry_sum(journal_entries::Column::CreditAccountId, account.id, as_of)
            .await?;

        Ok(AccountService::balance(
            account.account_type.into(),
            account.opening_balance,
            total_debits,
            total_credits,
        ))
    }

    async fn entry_sum(
        &self,
        side: journal_entries::Column,
        account_id: sea_orm::prelude::Uuid,
        as_of: Option<NaiveDate>,
    ) -> Result<Decimal, AccountRepoError> {
        let mut query = journal_entries::Entity::find().filter(side.eq(account_id));
        if let Some(cutoff) = as_of {
            query = query.filter(journal_entries::Column::EntryDate.lte(cutoff));
        }
        let entries = query.all(&self.db).await?;
        Ok(entries.iter().map(|entry| entry.amount).sum())
    }
}
