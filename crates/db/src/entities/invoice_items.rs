//! `SeaORM` Entity for the invoice_items table (supplier side).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A supplier invoice line item. The VAT Return aggregates these rows
/// directly, independent of the posted VAT journal entries.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invoice_items")]
pub struct Model {
    /// Line item ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// The invoice this line belongs to.
    pub invoice_id: Uuid,
    /// Line item description.
    pub description: String,
    /// Quantity purchased.
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
    /// The owning invoice.
    #[sea_orm(
        belongs_to = "super::invoices::Entity",
        from = "Column::InvoiceId",
        to = "super::invoices::Column::Id"
    )]
    Invoices,
}

impl Related<super::invoices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
