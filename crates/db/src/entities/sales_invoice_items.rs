//! `SeaORM` Entity for the sales_invoice_items table (customer side).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A sales invoice line item. The VAT Return aggregates these rows
/// directly, independent of the posted VAT journal entries.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sales_invoice_items")]
pub struct Model {
    /// Line item ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// The sales invoice this line belongs to.
    pub sales_invoice_id: Uuid,
    /// Line item description.
    pub description: String,
    /// Quantity sold.
    pub quantity: Decimal,
    /// Unit price excluding VAT.
    pub unit_price: Decimal,
    /// Net line total (quantity x unit price).
    pub line_total: Decimal,
    /// Raw VAT code (S, E, Z).
    pub vat_code: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The owning sales invoice.
    #[sea_orm(
        belongs_to = "super::sales_invoices::Entity",
        from = "Column::SalesInvoiceId",
        to = "super::sales_invoices::Column::Id"
    )]
    SalesInvoices,
}

impl Related<super::sales_invoices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesInvoices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
