//! Payment-to-invoice allocation under conservation constraints.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::AllocationError;
pub use service::{AllocationService, settlement_tolerance};
pub use types::{AllocationPlan, AllocationSnapshot, InvoiceStatus};
