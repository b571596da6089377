//! `SeaORM` Entity for the payment_allocations table (supplier side).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Assignment of part of a payment to an invoice. At most one row exists
/// per (payment, invoice) pair; repeated allocations merge into it.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payment_allocations")]
pub struct Model {
    /// Allocation ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// The payment the amount is drawn from.
    pub payment_id: Uuid,
    /// The invoice the amount is applied to.
    pub invoice_id: Uuid,
    /// Amount allocated (always positive).
    pub amount_allocated: Decimal,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The source payment.
    #[sea_orm(
        belongs_to = "super::payments::Entity",
        from = "Column::PaymentId",
        to = "super::payments::Column::Id"
    )]
    Payments,
    /// The target invoice.
    #[sea_orm(
        belongs_to = "super::invoices::Entity",
        from = "Column::InvoiceId",
        to = "super::invoices::Column::Id"
    )]
    Invoices,
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl Related<super::invoices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
