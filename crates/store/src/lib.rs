//! Data access for the Haulbook ledger engine.
//!
//! This crate provides:
//! - The `LedgerStore` read contract the engine consumes
//! - An in-memory store loadable from a JSON dataset export
//! - `LedgerQueryService`, which reads fresh records per request and calls the engine

pub mod dataset;
pub mod error;
pub mod memory;
pub mod query;
pub mod store;

pub use dataset::LedgerDataset;
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryLedgerStore;
pub use query::LedgerQueryService;
pub use store::LedgerStore;
