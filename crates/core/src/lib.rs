//! Core business logic for Haulbook.
//!
//! This crate contains the pure ledger engine with ZERO storage or web dependencies.
//! Every balance shown anywhere in the application is produced here.
//!
//! # Modules
//!
//! - `party` - Party identities, roles, and the party registry
//! - `ledger` - Delivery charge derivation, aggregation, and role-aware balances
//! - `statement` - Report-ready statements with material grouping

pub mod ledger;
pub mod party;
pub mod statement;
