//! Party domain types.

use haulbook_shared::types::PartyId;
use serde::{Deserialize, Serialize};

use crate::ledger::derive::DeliveryView;

/// Role of a party in the ledger.
///
/// The role is immutable once the party exists: historical balances are only
/// meaningful under the sign convention of the role they were recorded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartyRole {
    /// Buys material; billed per delivered quantity.
    Client,
    /// Hauls material; paid per hauled quantity.
    Contractor,
    /// Crusher plant supplying material.
    Crusher,
    /// Third-party material supplier.
    Supplier,
    /// Partner or financier providing and withdrawing capital.
    Administration,
}

impl PartyRole {
    /// All roles, in display order.
    pub const ALL: [Self; 5] = [
        Self::Client,
        Self::Contractor,
        Self::Crusher,
        Self::Supplier,
        Self::Administration,
    ];

    /// Returns the delivery view whose charges land on this role's ledger.
    ///
    /// Administration parties never appear on deliveries.
    #[must_use]
    pub const fn delivery_view(self) -> Option<DeliveryView> {
        match self {
            Self::Client => Some(DeliveryView::Client),
            Self::Contractor => Some(DeliveryView::Hauler),
            Self::Crusher | Self::Supplier => Some(DeliveryView::Source),
            Self::Administration => None,
        }
    }

    /// Returns true if a positive opening balance must name a project.
    #[must_use]
    pub const fn requires_project_for_credit(self) -> bool {
        matches!(self, Self::Contractor | Self::Crusher)
    }

    /// Stable string form used in logs and configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Contractor => "contractor",
            Self::Crusher => "crusher",
            Self::Supplier => "supplier",
            Self::Administration => "administration",
        }
    }
}

impl std::fmt::Display for PartyRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PartyRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "client" => Ok(Self::Client),
            "contractor" => Ok(Self::Contractor),
            "crusher" => Ok(Self::Crusher),
            "supplier" => Ok(Self::Supplier),
            "administration" | "partner" | "financier" => Ok(Self::Administration),
            _ => Err(format!("Unknown party role: {s}")),
        }
    }
}

/// Lifecycle status of a party.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyStatus {
    /// Party can receive new deliveries and payments.
    #[default]
    Active,
    /// Party is archived; its history and balance remain valid.
    Inactive,
}

/// A ledger participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Stable identity.
    pub id: PartyId,
    /// Role, fixed at creation.
    pub role: PartyRole,
    /// Display name.
    pub name: String,
    /// Lifecycle status.
    #[serde(default)]
    pub status: PartyStatus,
}

impl Party {
    /// Creates a new active party with a fresh id.
    #[must_use]
    pub fn new(role: PartyRole, name: impl Into<String>) -> Self {
        Self {
            id: PartyId::new(),
            role,
            name: name.into(),
            status: PartyStatus::Active,
        }
    }

    /// Returns true if the party is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == PartyStatus::Active
    }
}
