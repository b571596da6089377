//! Chart of accounts: account types, code ranges, and balance rules.

pub mod error;
pub mod service;
pub mod types;

pub use error::AccountError;
pub use service::AccountService;
pub use types::{Account, AccountInput, AccountType};
