//! `SeaORM` Entity for the customer_payments table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::PaymentMethod;

/// A payment received from a customer, allocatable across sales invoices.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer_payments")]
pub struct Model {
    /// Payment ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning ledger.
    pub ledger_id: Uuid,
    /// Payment date.
    pub payment_date: Date,
    /// Amount received.
    pub amount: Decimal,
    /// Optional payment reference.
    pub reference: Option<String>,
    /// How the payment was made.
    pub method: PaymentMethod,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Allocations drawn from the payment.
    #[sea_orm(has_many = "super::customer_payment_allocations::Entity")]
    CustomerPaymentAllocations,
}

impl Related<super::customer_payment_allocations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CustomerPaymentAllocations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
