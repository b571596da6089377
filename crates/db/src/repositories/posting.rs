//! Posting repository: compound business-event postings and reversals.
//!
//! A business event produces 2-3 journal legs that must land together.
//! Each operation here runs in one database transaction, so a failed leg
//! aborts the whole group and the error reaches the caller; no partially
//! posted group can exist.

use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use tillbook_shared::types::{LedgerId, PostingGroupId};

use crate::entities::journal_entries;
use crate::repositories::journal::{JournalRepoError, JournalRepository};
use tillbook_core::posting::{BusinessEvent, PostingAccounts, PostingError, PostingService};

/// Error types for posting operations.
#[derive(Debug, thiserror::Error)]
pub enum PostingRepoError {
    /// Event planning failure (missing account role, bad amount).
    #[error(transparent)]
    Domain(#[from] PostingError),

    /// A leg failed journal validation.
    #[error(transparent)]
    Journal(#[from] JournalRepoError),

    /// No entries exist for the posting group.
    #[error("Posting group not found: {0}")]
    GroupNotFound(PostingGroupId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// A posted group: the group ID and its inserted journal rows.
#[derive(Debug)]
pub struct PostedGroup {
    /// The posting group ID stamped on every row.
    pub group_id: PostingGroupId,
    /// The inserted journal entries.
    pub entries: Vec<journal_entries::Model>,
}

/// Repository for compound posting operations.
pub struct PostingRepository {
    db: DatabaseConnection,
    journal: JournalRepository,
}

impl PostingRepository {
    /// Creates a new posting repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        let journal = JournalRepository::new(db.clone());
        Self { db, journal }
    }

    /// Posts the journal legs for a business event, all-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns an error when the event cannot be planned (missing account
    /// role, non-positive amount) or any leg fails journal validation; in
    /// either case nothing is written.
    pub async fn post_event(
        &self,
        ledger_id: LedgerId,
        date: NaiveDate,
        event: &BusinessEvent,
        accounts: &PostingAccounts,
    ) -> Result<PostedGroup, PostingRepoError> {
        let group = PostingService::plan_event(date, event, accounts)?;

        let txn = self.db.begin().await?;
        let posted = self.insert_group(&txn, ledger_id, &group).await?;
        txn.commit().await?;

        tracing::info!(
            group_id = %posted.group_id,
            legs = posted.entries.len(),
            "business event posted"
        );
        Ok(posted)
    }

    /// Reverses a posted group.
    ///
    /// Entries are located by their posting group ID. Every reversing leg
    /// swaps debit and credit, keeps the amount, and takes the given date;
    /// the reversal is itself a group and inserts all-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns an error when the group has no entries in this ledger.
    pub async fn reverse_group(
        &self,
        ledger_id: LedgerId,
        group_id: PostingGroupId,
        date: NaiveDate,
    ) -> Result<PostedGroup, PostingRepoError> {
        let txn = self.db.begin().await?;
        let reversal = self.reverse_in_txn(&txn, ledger_id, group_id, date).await?;
        txn.commit().await?;

        tracing::info!(
            reversed_group = %group_id,
            reversal_group = %reversal.group_id,
            "posting group reversed"
        );
        Ok(reversal)
    }

    /// Replaces a posted event: reverses the old group and posts the
    /// corrected event in one transaction.
    ///
    /// The net effect on every touched account equals what a single
    /// adjusting entry for the difference would have produced.
    ///
    /// # Errors
    ///
    /// Returns an error when the old group is missing or the corrected
    /// event fails to plan or validate; in either case nothing changes.
    pub async fn replace_event(
        &self,
        ledger_id: LedgerId,
        group_id: PostingGroupId,
        date: NaiveDate,
        event: &BusinessEvent,
        accounts: &PostingAccounts,
    ) -> Result<(PostedGroup, PostedGroup), PostingRepoError> {
        let replacement = PostingService::plan_event(date, event, accounts)?;

        let txn = self.db.begin().await?;
        let reversal = self.reverse_in_txn(&txn, ledger_id, group_id, date).await?;
        let posted = self.insert_group(&txn, ledger_id, &replacement).await?;
        txn.commit().await?;

        tracing::info!(
            replaced_group = %group_id,
            new_group = %posted.group_id,
            "posted event replaced"
        );
        Ok((reversal, posted))
    }

    /// Loads the entries of a posted group, in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error when the group has no entries in this ledger.
    pub async fn group_entries(
        &self,
        ledger_id: LedgerId,
        group_id: PostingGroupId,
    ) -> Result<Vec<journal_entries::Model>, PostingRepoError> {
        let entries = journal_entries::Entity::find()
            .filter(journal_entries::Column::LedgerId.eq(ledger_id.into_inner()))
            .filter(journal_entries::Column::PostingGroupId.eq(group_id.into_inner()))
            .order_by_asc(journal_entries::Column::CreatedAt)
            .all(&self.db)
            .await?;
        if entries.is_empty() {
            return Err(PostingRepoError::GroupNotFound(group_id));
        }
        Ok(entries)
    }

    async fn reverse_in_txn(
        &self,
        txn: &DatabaseTransaction,
        ledger_id: LedgerId,
        group_id: PostingGroupId,
        date: NaiveDate,
    ) -> Result<PostedGroup, PostingRepoError> {
        let original = journal_entries::Entity::find()
            .filter(journal_entries::Column::LedgerId.eq(ledger_id.into_inner()))
            .filter(journal_entries::Column::PostingGroupId.eq(group_id.into_inner()))
            .order_by_asc(journal_entries::Column::CreatedAt)
            .all(txn)
            .await?;
        if original.is_empty() {
            return Err(PostingRepoError::GroupNotFound(group_id));
        }

        let domain: Vec<_> = original
            .iter()
            .map(journal_entries::Model::to_domain)
            .collect();
        let reversal = PostingService::plan_reversal(&domain, date)?;

        self.insert_group(txn, ledger_id, &reversal).await
    }

    async fn insert_group(
        &self,
        txn: &DatabaseTransaction,
        ledger_id: LedgerId,
        group: &tillbook_core::posting::PostingGroup,
    ) -> Result<PostedGroup, PostingRepoError> {
        let mut entries = Vec::with_capacity(group.entries.len());
        for input in &group.entries {
            let entry = self
                .journal
                .insert_entry(txn, ledger_id, input.clone(), group.id, group.reverses)
                .await?;
            entries.push(entry);
        }
        Ok(PostedGroup {
            group_id: group.id,
            entries,
        })
    }
}
