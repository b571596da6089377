//! Business-event posting: compound journal groups and their reversal.

pub mod error;
pub mod service;
pub mod types;
pub mod vat;

#[cfg(test)]
mod service_props;

pub use error::PostingError;
pub use service::PostingService;
pub use types::{AccountRole, BusinessEvent, PaymentMethod, PostingAccounts, PostingGroup};
pub use vat::VatCode;
