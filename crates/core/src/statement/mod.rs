//! Account statements.
//!
//! A statement is the snapshot plus the itemized records behind it, grouped
//! by material for summary cards and printed reports.

pub mod builder;
pub mod types;

#[cfg(test)]
mod tests;

pub use builder::{StatementBuilder, group_by_material};
pub use types::*;
