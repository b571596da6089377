//! `SeaORM` Entity for the customer_payment_allocations table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Assignment of part of a customer payment to a sales invoice. At most
/// one row exists per (payment, invoice) pair.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer_payment_allocations")]
pub struct Model {
    /// Allocation ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// The customer payment the amount is drawn from.
    pub payment_id: Uuid,
    /// The sales invoice the amount is applied to.
    pub invoice_id: Uuid,
    /// Amount allocated (always positive).
    pub amount_allocated: Decimal,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The source customer payment.
    #[sea_orm(
        belongs_to = "super::customer_payments::Entity",
        from = "Column::PaymentId",
        to = "super::customer_payments::Column::Id"
    )]
    CustomerPayments,
    /// The target sales invoice.
    #[sea_orm(
        belongs_to = "super::sales_invoices::Entity",
        from = "Column::InvoiceId",
        to = "super::sales_invoices::Column::Id"
    )]
    SalesInvoices,
}

impl Related<super::customer_payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CustomerPayments.def()
    }
}

impl Related<super::sales_invoices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesInvoices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
