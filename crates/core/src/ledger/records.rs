//! Ledger input records.
//!
//! These are the canonical shapes the data-access layer normalises into.
//! The engine only reads them.

use chrono::{DateTime, Utc};
use haulbook_shared::types::{
    AdjustmentId, CapitalMovementId, DeliveryId, OpeningBalanceId, PartyId, PaymentId, ProjectId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::party::PartyRole;

/// A load of material moved from a source to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    /// Unique identifier.
    pub id: DeliveryId,
    /// Receiving client.
    pub client_id: PartyId,
    /// Crusher source, if the material came from a crusher.
    pub crusher_id: Option<PartyId>,
    /// Supplier source, if the material came from a supplier.
    pub supplier_id: Option<PartyId>,
    /// Hauling contractor, if any.
    pub contractor_id: Option<PartyId>,
    /// Material name as entered.
    pub material: String,
    /// Stated load quantity (cubic meters) billed to the client and hauler.
    pub quantity: Decimal,
    /// Measured car volume (crusher deliveries).
    pub car_volume: Option<Decimal>,
    /// Volume discounted from the car volume.
    pub discount_volume: Option<Decimal>,
    /// Client-facing unit price.
    pub price_per_meter: Option<Decimal>,
    /// Source-facing unit price at the time of delivery.
    pub material_price_at_time: Option<Decimal>,
    /// Hauler rate per meter.
    pub contractor_charge_per_meter: Option<Decimal>,
    /// When the delivery was recorded.
    pub created_at: DateTime<Utc>,
}

/// Where a delivery's material came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliverySource {
    /// A crusher plant.
    Crusher(PartyId),
    /// A supplier.
    Supplier(PartyId),
}

impl DeliverySource {
    /// The source party.
    #[must_use]
    pub const fn party_id(self) -> PartyId {
        match self {
            Self::Crusher(id) | Self::Supplier(id) => id,
        }
    }
}

impl Delivery {
    /// Returns the single source of this delivery, or `None` if the record
    /// names both a crusher and a supplier, or neither.
    #[must_use]
    pub fn source(&self) -> Option<DeliverySource> {
        match (self.crusher_id, self.supplier_id) {
            (Some(id), None) => Some(DeliverySource::Crusher(id)),
            (None, Some(id)) => Some(DeliverySource::Supplier(id)),
            _ => None,
        }
    }

    /// Returns true if `party_id` sits in the slot a party of `role` is
    /// charged through.
    ///
    /// A delivery naming both a crusher and a supplier involves both, so the
    /// fault can be reported on each of their ledgers.
    #[must_use]
    pub fn involves(&self, party_id: PartyId, role: PartyRole) -> bool {
        match role {
            PartyRole::Client => self.client_id == party_id,
            PartyRole::Crusher => self.crusher_id == Some(party_id),
            PartyRole::Supplier => self.supplier_id == Some(party_id),
            PartyRole::Contractor => self.contractor_id == Some(party_id),
            PartyRole::Administration => false,
        }
    }

    /// Returns true if a supplier-sourced delivery names a hauler.
    ///
    /// Suppliers deliver without a contractor, so such a record is a data
    /// fault and is never charged to the contractor.
    #[must_use]
    pub fn supplier_with_hauler(&self) -> bool {
        matches!(self.source(), Some(DeliverySource::Supplier(_))) && self.contractor_id.is_some()
    }

    /// Returns true if the recorded discount is larger than the car volume.
    #[must_use]
    pub fn discount_exceeds_car_volume(&self) -> bool {
        matches!(
            (self.car_volume, self.discount_volume),
            (Some(car), Some(discount)) if discount > car
        )
    }
}

/// Money that flowed between the business and a party.
///
/// Direction is implied by the party's role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier.
    pub id: PaymentId,
    /// The party paid or paying.
    pub party_id: PartyId,
    /// Amount, never negative.
    pub amount: Decimal,
    /// Payment method (cash, transfer, cheque...).
    pub method: String,
    /// Method details such as a cheque number.
    #[serde(default)]
    pub details: Option<String>,
    /// Free-form note.
    #[serde(default)]
    pub note: Option<String>,
    /// Reference to uploaded evidence.
    #[serde(default)]
    pub evidence_ref: Option<String>,
    /// When the payment happened.
    pub paid_at: DateTime<Utc>,
}

/// A manual signed correction to a party's balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjustment {
    /// Unique identifier.
    pub id: AdjustmentId,
    /// The adjusted party.
    pub party_id: PartyId,
    /// Signed amount, read with the role's balance sign.
    pub amount: Decimal,
    /// Method, if money moved.
    #[serde(default)]
    pub method: Option<String>,
    /// Reason for the correction.
    pub reason: String,
    /// When the adjustment was recorded.
    pub created_at: DateTime<Utc>,
}

/// Seed balance present before any dated activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningBalance {
    /// Unique identifier.
    pub id: OpeningBalanceId,
    /// The party.
    pub party_id: PartyId,
    /// Project the balance belongs to.
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    /// Signed amount, read with the role's balance sign.
    pub amount: Decimal,
    /// Description.
    #[serde(default)]
    pub description: String,
}

/// Direction of a partner capital movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapitalMovementKind {
    /// Partner put money into the business.
    Injection,
    /// Partner took money out of the business.
    Withdrawal,
}

/// Capital put into or taken out of the business by an administration party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapitalMovement {
    /// Unique identifier.
    pub id: CapitalMovementId,
    /// The partner or financier.
    pub party_id: PartyId,
    /// Direction.
    pub kind: CapitalMovementKind,
    /// Amount, never negative.
    pub amount: Decimal,
    /// Free-form note.
    #[serde(default)]
    pub note: Option<String>,
    /// When the movement happened.
    pub occurred_at: DateTime<Utc>,
}
