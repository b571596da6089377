//! `SeaORM` Entity for the sales_invoices table (customer side).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::InvoiceStatus;

/// A sales invoice issued to a customer.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sales_invoices")]
pub struct Model {
    /// Invoice ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning ledger.
    pub ledger_id: Uuid,
    /// Document number issued to the customer.
    pub document_number: String,
    /// Document date.
    pub document_date: Date,
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
    #[sea_orm(has_many = "super::sales_invoice_items::Entity")]
    SalesInvoiceItems,
    /// Allocations applied to the invoice.
    #[sea_orm(has_many = "super::customer_payment_allocations::Entity")]
    CustomerPaymentAllocations,
}

impl Related<super::sales_invoice_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesInvoiceItems.def()
    }
}

impl Related<super::customer_payment_allocations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CustomerPaymentAllocations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
