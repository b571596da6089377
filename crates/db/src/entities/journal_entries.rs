//! `SeaORM` Entity for the journal_entries table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use tillbook_shared::types::{AccountId, EntryId, LedgerId, PostingGroupId};

use super::sea_orm_active_enums::TransactionKind;

/// An immutable journal entry: one debit account, one credit account, one
/// amount. Corrections are made with reversing entries, never updates.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_entries")]
pub struct Model {
    /// Entry ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning ledger.
    pub ledger_id: Uuid,
    /// Entry date.
    pub entry_date: Date,
    /// Entry description.
    pub description: String,
    /// The account debited.
    pub debit_account_id: Uuid,
    /// The account credited.
    pub credit_account_id: Uuid,
    /// Amount (always positive).
    pub amount: Decimal,
    /// Optional reference (e.g. invoice number).
    pub reference: Option<String>,
    /// Transaction classification.
    pub transaction_kind: Option<TransactionKind>,
    /// Sequential journal number for manual journals and transfers.
    pub journal_number: Option<String>,
    /// Counterparty name.
    pub stakeholder: Option<String>,
    /// Posting group stamped at post time; reversals look groups up by
    /// this ID.
    pub posting_group_id: Uuid,
    /// The group this entry reverses, for reversal legs.
    pub reverses_group_id: Option<Uuid>,
    /// Creation timestamp (tie-breaker for listing order).
    pub created_at: DateTimeWithTimeZone,
}

impl Model {
    /// Maps the row to the core domain entry.
    #[must_use]
    pub fn to_domain(&self) -> tillbook_core::journal::JournalEntry {
        tillbook_core::journal::JournalEntry {
            id: EntryId::from_uuid(self.id),
            ledger_id: LedgerId::from_uuid(self.ledger_id),
            entry_date: self.entry_date,
            description: self.description.clone(),
            debit_account_id: AccountId::from_uuid(self.debit_account_id),
            credit_account_id: AccountId::from_uuid(self.credit_account_id),
            amount: self.amount,
            reference: self.reference.clone(),
            kind: self.transaction_kind.map(Into::into),
            journal_number: self.journal_number.clone(),
            stakeholder: self.stakeholder.clone(),
            posting_group_id: PostingGroupId::from_uuid(self.posting_group_id),
        }
    }
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The owning ledger.
    #[sea_orm(
        belongs_to = "super::ledgers::Entity",
        from = "Column::LedgerId",
        to = "super::ledgers::Column::Id"
    )]
    Ledgers,
    /// The debited account.
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::DebitAccountId",
        to = "super::accounts::Column::Id"
    )]
    DebitAccount,
    /// The credited account.
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::CreditAccountId",
        to = "super::accounts::Column::Id"
    )]
    CreditAccount,
}

impl Related<super::ledgers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ledgers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
