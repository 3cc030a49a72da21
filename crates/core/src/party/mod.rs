//! Ledger participants.
//!
//! Every party carries a role fixed at creation. The role decides which
//! delivery charges reach the party's ledger and which way its balance reads.

pub mod registry;
pub mod types;

pub use registry::PartyRegistry;
pub use types::{Party, PartyRole, PartyStatus};
