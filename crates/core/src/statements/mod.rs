//! Financial statement generation: Trial Balance, P&L, Balance Sheet,
//! VAT Return.

pub mod service;
pub mod types;


pub use service::StatementService;
pub use types::{
    AccountBalanceLine, BalanceSheet, ProfitAndLoss, StatementLine, TrialBalance, TrialBalanceRow,
    VatBreakdownRow, VatLine, VatReturn,
};
