//! Statement data types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::{
    Adjustment, CapitalMovement, DeliveryLine, LedgerSnapshot, OpeningBalance, Payment,
};
use crate::party::Party;

/// The period a statement describes, for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatementWindow {
    /// The caller asked for this window.
    Requested {
        /// First included date, if bounded.
        from: Option<NaiveDate>,
        /// Last included date, if bounded.
        to: Option<NaiveDate>,
    },
    /// No window was asked for; these are the first and last record dates.
    Derived {
        /// Earliest record date.
        from: NaiveDate,
        /// Latest record date.
        to: NaiveDate,
    },
    /// No window was asked for and there are no dated records.
    AllData,
}

/// Deliveries of one normalized material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialTotal {
    /// Normalized material name.
    pub material: String,
    /// Quantity priced for the statement's view.
    pub quantity: Decimal,
    /// Value for the statement's view.
    pub value: Decimal,
    /// Number of deliveries.
    pub count: usize,
    /// How many of them had no price.
    pub unpriced: usize,
}

/// Caller-supplied statement metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementMeta {
    /// Currency code printed on the statement.
    pub currency: String,
    /// When the statement was generated.
    pub generated_at: DateTime<Utc>,
}

/// Report-ready account statement for one party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    /// The party.
    pub party: Party,
    /// Period shown on the statement.
    pub window: StatementWindow,
    /// Currency code.
    pub currency: String,
    /// Generation time.
    pub generated_at: DateTime<Utc>,
    /// Resolved balance and totals.
    pub snapshot: LedgerSnapshot,
    /// Deliveries grouped by normalized material.
    pub material_totals: Vec<MaterialTotal>,
    /// Opening balance lines counted in the snapshot.
    pub opening_balances: Vec<OpeningBalance>,
    /// Delivery lines, chronological.
    pub deliveries: Vec<DeliveryLine>,
    /// Payments, chronological.
    pub payments: Vec<Payment>,
    /// Adjustments, chronological.
    pub adjustments: Vec<Adjustment>,
    /// Capital movements, chronological.
    pub capital_movements: Vec<CapitalMovement>,
}
