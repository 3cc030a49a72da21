//! Multi-party ledger engine.
//!
//! This module implements the balance pipeline:
//! - Input records (deliveries, payments, adjustments, opening balances, capital)
//! - Delivery charge derivation per view
//! - Windowed aggregation into raw sums
//! - Role sign resolution into a balance and label
//! - Write-time validation and read-time anomaly reporting

pub mod aggregate;
pub mod anomaly;
pub mod balance;
pub mod derive;
pub mod error;
pub mod material;
pub mod records;
pub mod service;
pub mod validation;
pub mod window;

#[cfg(test)]
mod service_props;

pub use aggregate::{
    AggregateTotals, Aggregation, DeliveryLine, LedgerInputs, TransactionAggregator,
};
pub use anomaly::LedgerAnomaly;
pub use balance::{BalanceLabel, BalanceResolver, LedgerSnapshot};
pub use derive::{DeliveryView, DerivedCharge, derive_charge, net_volume};
pub use error::LedgerError;
pub use material::{UNSPECIFIED_MATERIAL, normalize_material};
pub use records::{
    Adjustment, CapitalMovement, CapitalMovementKind, Delivery, DeliverySource, OpeningBalance,
    Payment,
};
pub use service::LedgerService;
pub use validation::{
    is_valid_opening_balance, validate_capital_movement, validate_delivery,
    validate_opening_balance, validate_payment,
};
pub use window::DateWindow;
