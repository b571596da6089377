//! Double-entry journal: entry validation, numbering, and account activity.

pub mod error;
pub mod service;
pub mod types;

pub use error::JournalError;
pub use service::JournalService;
pub use types::{AccountActivityEntry, EntryInput, JournalEntry, TransactionKind};
