//! `SeaORM` Entity for the invoices table (supplier side).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::InvoiceStatus;

/// A supplier invoice. `status` is derived from the outstanding balance;
/// see the allocation repository.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    /// Invoice ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning ledger.
    pub ledger_id: Uuid,
    /// Supplier's invoice number.
    pub invoice_number: String,
    /// Invoice date.
    pub invoice_date: Date,
    /// Total owed including VAT.
    pub total: Decimal,
    /// Lifecycle status.
    pub status: InvoiceStatus,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Line items on the invoice.
    #[sea_orm(has_many = "super::invoice_items::Entity")]
    InvoiceItems,
    /// Allocations applied to the invoice.
    #[sea_orm(has_many = "super::payment_allocations::Entity")]
    PaymentAllocations,
}

impl Related<super::invoice_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InvoiceItems.def()
    }
}

impl Related<super::payment_allocations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaymentAllocations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
