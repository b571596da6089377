//! Database enum types and their mappings to the core domain enums.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Nominal account classification (`account_type` enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_type")]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Asset account.
    #[sea_orm(string_value = "asset")]
    Asset,
    /// Liability account.
    #[sea_orm(string_value = "liability")]
    Liability,
    /// Equity account.
    #[sea_orm(string_value = "equity")]
    Equity,
    /// Income account.
    #[sea_orm(string_value = "income")]
    Income,
    /// Expense account.
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl From<tillbook_core::accounts::AccountType> for AccountType {
    fn from(value: tillbook_core::accounts::AccountType) -> Self {
        use tillbook_core::accounts::AccountType as Core;
        match value {
            Core::Asset => Self::Asset,
            Core::Liability => Self::Liability,
            Core::Equity => Self::Equity,
            Core::Income => Self::Income,
            Core::Expense => Self::Expense,
        }
    }
}

impl From<AccountType> for tillbook_core::accounts::AccountType {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Asset => Self::Asset,
            AccountType::Liability => Self::Liability,
            AccountType::Equity => Self::Equity,
            AccountType::Income => Self::Income,
            AccountType::Expense => Self::Expense,
        }
    }
}

/// Journal entry classification (`transaction_kind` enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_kind")]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Manual journal entry.
    #[sea_orm(string_value = "journal")]
    Journal,
    /// Transfer between accounts.
    #[sea_orm(string_value = "transfer")]
    Transfer,
    /// Sales invoice line item.
    #[sea_orm(string_value = "sales_invoice")]
    SalesInvoice,
    /// Supplier invoice line item.
    #[sea_orm(string_value = "supplier_invoice")]
    SupplierInvoice,
    /// Customer payment received.
    #[sea_orm(string_value = "customer_payment")]
    CustomerPayment,
    /// Supplier payment made.
    #[sea_orm(string_value = "supplier_payment")]
    SupplierPayment,
    /// Stock adjustment.
    #[sea_orm(string_value = "stock_adjustment")]
    StockAdjustment,
    /// Reversal of a posting group.
    #[sea_orm(string_value = "reversal")]
    Reversal,
}

impl From<tillbook_core::journal::TransactionKind> for TransactionKind {
    fn from(value: tillbook_core::journal::TransactionKind) -> Self {
        use tillbook_core::journal::TransactionKind as Core;
        match value {
            Core::Journal => Self::Journal,
            Core::Transfer => Self::Transfer,
            Core::SalesInvoice => Self::SalesInvoice,
            Core::SupplierInvoice => Self::SupplierInvoice,
            Core::CustomerPayment => Self::CustomerPayment,
            Core::SupplierPayment => Self::SupplierPayment,
            Core::StockAdjustment => Self::StockAdjustment,
            Core::Reversal => Self::Reversal,
        }
    }
}

impl From<TransactionKind> for tillbook_core::journal::TransactionKind {
    fn from(value: TransactionKind) -> Self {
        match value {
            TransactionKind::Journal => Self::Journal,
            TransactionKind::Transfer => Self::Transfer,
            TransactionKind::SalesInvoice => Self::SalesInvoice,
            TransactionKind::SupplierInvoice => Self::SupplierInvoice,
            TransactionKind::CustomerPayment => Self::CustomerPayment,
            TransactionKind::SupplierPayment => Self::SupplierPayment,
            TransactionKind::StockAdjustment => Self::StockAdjustment,
            TransactionKind::Reversal => Self::Reversal,
        }
    }
}

/// Invoice lifecycle status (`invoice_status` enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "invoice_status")]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Invoice is being drafted.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Invoice has been issued and awaits payment.
    #[sea_orm(string_value = "finalized")]
    Finalized,
    /// Invoice is fully allocated.
    #[sea_orm(string_value = "paid")]
    Paid,
    /// Invoice has been cancelled.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl From<tillbook_core::allocation::InvoiceStatus> for InvoiceStatus {
    fn from(value: tillbook_core::allocation::InvoiceStatus) -> Self {
        use tillbook_core::allocation::InvoiceStatus as Core;
        match value {
            Core::Draft => Self::Draft,
            Core::Finalized => Self::Finalized,
            Core::Paid => Self::Paid,
            Core::Cancelled => Self::Cancelled,
        }
    }
}

impl From<InvoiceStatus> for tillbook_core::allocation::InvoiceStatus {
    fn from(value: InvoiceStatus) -> Self {
        match value {
            InvoiceStatus::Draft => Self::Draft,
            InvoiceStatus::Finalized => Self::Finalized,
            InvoiceStatus::Paid => Self::Paid,
            InvoiceStatus::Cancelled => Self::Cancelled,
        }
    }
}

/// Payment method (`payment_method` enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_method")]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash.
    #[sea_orm(string_value = "cash")]
    Cash,
    /// Card payment.
    #[sea_orm(string_value = "card")]
    Card,
    /// Cheque.
    #[sea_orm(string_value = "cheque")]
    Cheque,
    /// Bank transfer (BACS).
    #[sea_orm(string_value = "bacs")]
    Bacs,
}

impl From<tillbook_core::posting::PaymentMethod> for PaymentMethod {
    fn from(value: tillbook_core::posting::PaymentMethod) -> Self {
        use tillbook_core::posting::PaymentMethod as Core;
        match value {
            Core::Cash => Self::Cash,
            Core::Card => Self::Card,
            Core::Cheque => Self::Cheque,
            Core::Bacs => Self::Bacs,
        }
    }
}

impl From<PaymentMethod> for tillbook_core::posting::PaymentMethod {
    fn from(value: PaymentMethod) -> Self {
        match value {
            PaymentMethod::Cash => Self::Cash,
            PaymentMethod::Card => Self::Card,
            PaymentMethod::Cheque => Self::Cheque,
            PaymentMethod::Bacs => Self::Bacs,
        }
    }
}
