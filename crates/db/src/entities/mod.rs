//! `SeaORM` entity definitions for the Tillbook schema.

pub mod accounts;
pub mod customer_payment_allocations;
pub mod customer_payments;
pub mod invoice_items;
pub mod invoices;
pub mod journal_entries;
pub mod ledgers;
pub mod payment_allocations;
pub mod payments;
pub mod sales_invoice_items;
pub mod sales_invoices;
pub mod sea_orm_active_enums;
