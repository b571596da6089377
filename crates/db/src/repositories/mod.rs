//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Each business operation runs inside one database
//! transaction; decision logic lives in `tillbook-core`.

pub mod account;
pub mod allocation;
pub mod journal;
pub mod posting;
pub mod statement;

#[cfg(test)]
mod statement_tests;

pub use account::{AccountRepoError, AccountRepository, AccountWithBalance};
pub use allocation::{
    AllocationRepoError, CustomerAllocationRepository, PaymentAllocationRepository,
};
pub use journal::{JournalRepoError, JournalRepository};
pub use posting::{PostedGroup, PostingRepoError, PostingRepository};
pub use statement::{StatementRepoError, StatementRepository};
