//! Posting domain types: business events and posting groups.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tillbook_shared::types::{AccountId, PostingGroupId};

use crate::journal::EntryInput;

/// How a payment was made.
///
/// BACS settles straight into the bank account; cash, card, and cheque
/// receipts sit in Undeposited Funds until banked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash.
    Cash,
    /// Card payment.
    Card,
    /// Cheque.
    Cheque,
    /// Bank transfer (BACS).
    Bacs,
}

impl PaymentMethod {
    /// Returns true when the method settles directly into the bank account.
    #[must_use]
    pub const fn settles_direct_to_bank(self) -> bool {
        matches!(self, Self::Bacs)
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cash => write!(f, "Cash"),
            Self::Card => write!(f, "Card"),
            Self::Cheque => write!(f, "Cheque"),
            Self::Bacs => write!(f, "BACS"),
        }
    }
}

/// Well-known account roles required by posting legs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    /// Trade Debtors (Asset).
    TradeDebtors,
    /// Trade Creditors (Liability).
    TradeCreditors,
    /// Sales (Income).
    Sales,
    /// VAT Output (Liability).
    VatOutput,
    /// VAT Input (Asset).
    VatInput,
    /// Bank (Asset).
    Bank,
    /// Undeposited Funds (Asset).
    UndepositedFunds,
    /// Cost of Sales (Expense).
    CostOfSales,
    /// Stock (Asset).
    Stock,
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TradeDebtors => write!(f, "Trade Debtors"),
            Self::TradeCreditors => write!(f, "Trade Creditors"),
            Self::Sales => write!(f, "Sales"),
            Self::VatOutput => write!(f, "VAT Output"),
            Self::VatInput => write!(f, "VAT Input"),
            Self::Bank => write!(f, "Bank"),
            Self::UndepositedFunds => write!(f, "Undeposited Funds"),
            Self::CostOfSales => write!(f, "Cost of Sales"),
            Self::Stock => write!(f, "Stock"),
        }
    }
}

/// Resolved account IDs for the posting roles.
///
/// The caller resolves roles from the chart of accounts; a role left
/// unresolved declines any event that needs it for a leg.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostingAccounts {
    /// Trade Debtors account.
    pub trade_debtors: Option<AccountId>,
    /// Trade Creditors account.
    pub trade_creditors: Option<AccountId>,
    /// Sales account.
    pub sales: Option<AccountId>,
    /// VAT Output account.
    pub vat_output: Option<AccountId>,
    /// VAT Input account.
    pub vat_input: Option<AccountId>,
    /// Bank account.
    pub bank: Option<AccountId>,
    /// Undeposited Funds account.
    pub undeposited_funds: Option<AccountId>,
    /// Cost of Sales account.
    pub cost_of_sales: Option<AccountId>,
    /// Stock account.
    pub stock: Option<AccountId>,
}

/// A business event mapped to a fixed set of balanced journal legs.
#[derive(Debug, Clone)]
pub enum BusinessEvent {
    /// A sales invoice line item.
    SalesLine {
        /// Invoice number (journal reference).
        invoice_number: String,
        /// Customer name (stakeholder).
        customer: String,
        /// Line item description.
        description: String,
        /// Quantity sold.
        quantity: Decimal,
        /// Unit price excluding VAT.
        unit_price: Decimal,
        /// Raw VAT code from the line item.
        vat_code: Option<String>,
        /// True when the line sells a stock-tracked product, which adds a
        /// cost-of-sales leg.
        tracked_product: bool,
        /// Unit cost for the cost-of-sales leg; the sale's unit price
        /// stands in when no cost is known.
        unit_cost: Option<Decimal>,
    },
    /// A supplier invoice line item.
    SupplierLine {
        /// Invoice number (journal reference).
        invoice_number: String,
        /// Supplier name (stakeholder).
        supplier: String,
        /// Line item description.
        description: String,
        /// Quantity purchased.
        quantity: Decimal,
        /// Unit price excluding VAT.
        unit_price: Decimal,
        /// Raw VAT code from the line item.
        vat_code: Option<String>,
        /// The expense or stock account to charge.
        charge_account: AccountId,
    },
    /// A payment received from a customer.
    CustomerPaymentReceived {
        /// Payment reference.
        reference: String,
        /// Customer name.
        customer: String,
        /// How the payment was made.
        method: PaymentMethod,
        /// Amount received.
        amount: Decimal,
    },
    /// A payment made to a supplier.
    SupplierPaymentMade {
        /// Payment reference.
        reference: String,
        /// Supplier name.
        supplier: String,
        /// How the payment was made.
        method: PaymentMethod,
        /// Amount paid.
        amount: Decimal,
    },
    /// A stock value adjustment; positive amounts write stock up.
    StockAdjustment {
        /// Adjustment reference.
        reference: String,
        /// Adjustment description.
        description: String,
        /// Signed adjustment amount.
        amount: Decimal,
        /// The account absorbing the adjustment.
        adjustment_account: AccountId,
    },
}

/// A planned compound posting: the balanced journal legs for one event.
///
/// Every leg carries the group's ID, so reversal can locate the whole
/// group without matching on descriptions.
#[derive(Debug, Clone)]
pub struct PostingGroup {
    /// The posting group ID stamped on every leg.
    pub id: PostingGroupId,
    /// The group this posting reverses, when it is a reversal.
    pub reverses: Option<PostingGroupId>,
    /// The journal legs to insert, all-or-nothing.
    pub entries: Vec<EntryInput>,
}
