//! Journal domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tillbook_shared::types::{AccountId, EntryId, LedgerId, PostingGroupId};

/// Transaction classification for journal entries.
///
/// Manual journals and transfers receive sequential journal numbers
/// (`JNL-0001` / `TFR-0001`); entries posted from business events carry
/// the event kind instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Manual journal entry.
    Journal,
    /// Transfer between accounts.
    Transfer,
    /// Sales invoice line item.
    SalesInvoice,
    /// Supplier invoice line item.
    SupplierInvoice,
    /// Customer payment received.
    CustomerPayment,
    /// Supplier payment made.
    SupplierPayment,
    /// Stock quantity/value adjustment.
    StockAdjustment,
    /// Reversal of a previous posting group.
    Reversal,
}

impl TransactionKind {
    /// The journal-number prefix for kinds that are numbered sequentially.
    #[must_use]
    pub const fn journal_prefix(self) -> Option<&'static str> {
        match self {
            Self::Journal => Some("JNL"),
            Self::Transfer => Some("TFR"),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Journal => write!(f, "Journal Entry"),
            Self::Transfer => write!(f, "Transfer"),
            Self::SalesInvoice => write!(f, "Sales Invoice"),
            Self::SupplierInvoice => write!(f, "Supplier Invoice"),
            Self::CustomerPayment => write!(f, "Customer Payment"),
            Self::SupplierPayment => write!(f, "Supplier Payment"),
            Self::StockAdjustment => write!(f, "Stock Adjustment"),
            Self::Reversal => write!(f, "Reversal"),
        }
    }
}

/// An immutable journal entry.
///
/// Every entry debits one account and credits another by the same amount,
/// so the ledger as a whole is balanced by construction. Corrections are
/// made with reversing entries, never by mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// The entry ID.
    pub id: EntryId,
    /// The ledger this entry belongs to.
    pub ledger_id: LedgerId,
    /// Entry date.
    pub entry_date: NaiveDate,
    /// Entry description.
    pub description: String,
    /// The account debited.
    pub debit_account_id: AccountId,
    /// The account credited.
    pub credit_account_id: AccountId,
    /// Amount (always positive).
    pub amount: Decimal,
    /// Optional reference (e.g. invoice number).
    pub reference: Option<String>,
    /// Transaction classification.
    pub kind: Option<TransactionKind>,
    /// Sequential journal number for manual journals and transfers.
    pub journal_number: Option<String>,
    /// Counterparty name (customer or supplier).
    pub stakeholder: Option<String>,
    /// The posting group this entry was created in.
    ///
    /// Stamped at post time; reversals look entries up by this ID.
    pub posting_group_id: PostingGroupId,
}

/// Input for a new journal entry.
#[derive(Debug, Clone)]
pub struct EntryInput {
    /// Entry date.
    pub entry_date: NaiveDate,
    /// Entry description.
    pub description: String,
    /// The account to debit.
    pub debit_account_id: AccountId,
    /// The account to credit.
    pub credit_account_id: AccountId,
    /// Amount (must be positive).
    pub amount: Decimal,
    /// Optional reference.
    pub reference: Option<String>,
    /// Transaction classification.
    pub kind: Option<TransactionKind>,
    /// Journal number; assigned automatically for manual journals and
    /// transfers when not supplied.
    pub journal_number: Option<String>,
    /// Counterparty name.
    pub stakeholder: Option<String>,
}

/// A journal entry annotated relative to one account.
///
/// Exactly one of `is_debit`/`is_credit` is true.
#[derive(Debug, Clone, Serialize)]
pub struct AccountActivityEntry {
    /// The underlying journal entry.
    pub entry: JournalEntry,
    /// True when the account is the debit side of the entry.
    pub is_debit: bool,
    /// True when the account is the credit side of the entry.
    pub is_credit: bool,
    /// Account balance after this entry, accumulated in date order from
    /// the opening balance.
    pub running_balance: Decimal,
}
