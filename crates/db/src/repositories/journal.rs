//! Journal repository for double-entry journal database operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tillbook_shared::types::{AccountId, EntryId, LedgerId, PostingGroupId};

use crate::entities::{accounts, journal_entries};
use tillbook_core::journal::{
    AccountActivityEntry, EntryInput, JournalError, JournalService,
};

/// Error types for journal operations.
#[derive(Debug, thiserror::Error)]
pub enum JournalRepoError {
    /// Domain validation failure.
    #[error(transparent)]
    Domain(#[from] JournalError),

    /// Account not found in this ledger.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Repository for journal entry operations.
pub struct JournalRepository {
    db: DatabaseConnection,
}

impl JournalRepository {
    /// Creates a new journal repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Posts a journal entry.
    ///
    /// Validates that both accounts exist in the ledger, the amount is
    /// positive, and the accounts differ. Manual journals and transfers
    /// without a supplied journal number get the next sequential number
    /// for their prefix. Every entry is stamped with a fresh posting
    /// group ID.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first failed validation.
    pub async fn post(
        &self,
        ledger_id: LedgerId,
        input: EntryInput,
    ) -> Result<journal_entries::Model, JournalRepoError> {
        let txn = self.db.begin().await?;
        let entry = self
            .insert_entry(&txn, ledger_id, input, PostingGroupId::new(), None)
            .await?;
        txn.commit().await?;

        tracing::info!(entry_id = %entry.id, amount = %entry.amount, "journal entry posted");
        Ok(entry)
    }

    /// Inserts one validated entry inside an open transaction.
    ///
    /// Shared with the posting repository, which stamps a common group ID
    /// across a compound posting's legs.
    pub(crate) async fn insert_entry(
        &self,
        txn: &sea_orm::DatabaseTransaction,
        ledger_id: LedgerId,
        input: EntryInput,
        group_id: PostingGroupId,
        reverses_group_id: Option<PostingGroupId>,
    ) -> Result<journal_entries::Model, JournalRepoError> {
        let involved = accounts::Entity::find()
            .filter(
                accounts::Column::Id.is_in([
                    input.debit_account_id.into_inner(),
                    input.credit_account_id.into_inner(),
                ]),
            )
            .all(txn)
            .await?;
        let description = JournalService::validate(&input, ledger_id, |id| {
            involved
                .iter()
                .find(|account| account.id == id.into_inner())
                .map(|account| LedgerId::from_uuid(account.ledger_id))
        })?;

        let journal_number = match (
            input.kind.and_then(tillbook_core::journal::TransactionKind::journal_prefix),
            input.journal_number,
        ) {
            (Some(prefix), None) => {
                Some(self.next_number(txn, ledger_id, prefix).await?)
            }
            (_, provided) => provided,
        };

        let entry = journal_entries::ActiveModel {
            id: Set(EntryId::new().into_inner()),
            ledger_id: Set(ledger_id.into_inner()),
            entry_date: Set(input.entry_date),
            description: Set(description),
            debit_account_id: Set(input.debit_account_id.into_inner()),
            credit_account_id: Set(input.credit_account_id.into_inner()),
            amount: Set(input.amount),
            reference: Set(input.reference),
            transaction_kind: Set(input.kind.map(Into::into)),
            journal_number: Set(journal_number),
            stakeholder: Set(input.stakeholder),
            posting_group_id: Set(group_id.into_inner()),
            reverses_group_id: Set(reverses_group_id.map(PostingGroupId::into_inner)),
            created_at: Set(Utc::now().into()),
        }
        .insert(txn)
        .await?;

        Ok(entry)
    }

    /// Next sequential journal number for a prefix in this ledger.
    async fn next_number(
        &self,
        txn: &sea_orm::DatabaseTransaction,
        ledger_id: LedgerId,
        prefix: &str,
    ) -> Result<String, JournalRepoError> {
        let existing: Vec<Option<String>> = journal_entries::Entity::find()
            .select_only()
            .column(journal_entries::Column::JournalNumber)
            .filter(journal_entries::Column::LedgerId.eq(ledger_id.into_inner()))
            .filter(journal_entries::Column::JournalNumber.like(format!("{prefix}-%")))
            .into_tuple()
            .all(txn)
            .await?;

        Ok(JournalService::next_journal_number(
            prefix,
            existing.iter().flatten().map(String::as_str),
        ))
    }

    /// Lists entries, newest first (entry date, then creation order).
    ///
    /// With `account_filter` set, only entries touching the account on
    /// either side are returned.
    pub async fn list(
        &self,
        ledger_id: LedgerId,
        account_filter: Option<AccountId>,
    ) -> Result<Vec<journal_entries::Model>, JournalRepoError> {
        let mut query = journal_entries::Entity::find()
            .filter(journal_entries::Column::LedgerId.eq(ledger_id.into_inner()));

        if let Some(account_id) = account_filter {
            query = query.filter(
                Condition::any()
                    .add(journal_entries::Column::DebitAccountId.eq(account_id.into_inner()))
                    .add(journal_entries::Column::CreditAccountId.eq(account_id.into_inner())),
            );
        }

        let entries = query
            .order_by_desc(journal_entries::Column::EntryDate)
            .order_by_desc(journal_entries::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(entries)
    }

    /// Fetches one entry.
    ///
    /// # Errors
    ///
    /// Returns an error when the entry does not exist in the ledger.
    pub async fn get(
        &self,
        ledger_id: LedgerId,
        entry_id: EntryId,
    ) -> Result<journal_entries::Model, JournalRepoError> {
        let entry = journal_entries::Entity::find_by_id(entry_id.into_inner())
            .filter(journal_entries::Column::LedgerId.eq(ledger_id.into_inner()))
            .one(&self.db)
            .await?
            .ok_or(JournalError::NotFound(entry_id))?;
        Ok(entry)
    }

    /// Deletes an entry outright.
    ///
    /// This is a hard delete: no reversing entry is created and account
    /// balances simply change. Corrections through the posting repository
    /// use reversals instead.
    ///
    /// # Errors
    ///
    /// Returns an error when the entry does not exist in the ledger.
    pub async fn delete(
        &self,
        ledger_id: LedgerId,
        entry_id: EntryId,
    ) -> Result<(), JournalRepoError> {
        let entry = journal_entries::Entity::find_by_id(entry_id.into_inner())
            .filter(journal_entries::Column::LedgerId.eq(ledger_id.into_inner()))
            .one(&self.db)
            .await?
            .ok_or(JournalError::NotFound(entry_id))?;

        entry.delete(&self.db).await?;

        tracing::warn!(entry_id = %entry_id, "journal entry hard-deleted");
        Ok(())
    }

    /// Activity for one account: entries annotated with the side they hit
    /// and a running balance from the opening balance.
    ///
    /// # Errors
    ///
    /// Returns an error when the account does not exist in the ledger.
    pub async fn account_activity(
        &self,
        ledger_id: LedgerId,
        account_id: AccountId,
    ) -> Result<Vec<AccountActivityEntry>, JournalRepoError> {
        let account = accounts::Entity::find_by_id(account_id.into_inner())
            .filter(accounts::Column::LedgerId.eq(ledger_id.into_inner()))
            .one(&self.db)
            .await?
            .ok_or(JournalRepoError::AccountNotFound(account_id))?;

        let entries = self
            .list(ledger_id, Some(account_id))
            .await?
            .iter()
            .map(journal_entries::Model::to_domain)
            .collect();

        Ok(JournalService::annotate_activity(
            entries,
            account_id,
            account.account_type.into(),
            account.opening_balance,
        ))
    }
}
