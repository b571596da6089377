//! `SeaORM` Entity for the ledgers table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A ledger: one set of books owning accounts, entries, and documents.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ledgers")]
pub struct Model {
    /// Ledger ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Display name of the books.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Accounts belonging to the ledger.
    #[sea_orm(has_many = "super::accounts::Entity")]
    Accounts,
    /// Journal entries belonging to the ledger.
    #[sea_orm(has_many = "super::journal_entries::Entity")]
    JournalEntries,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl Related<super::journal_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
