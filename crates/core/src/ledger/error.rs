//! Ledger error types for validation and lookup failures.
//!
//! Errors here are hard failures: a write the validation layer must reject,
//! or a request that cannot be answered. Data faults found while aggregating
//! are reported as [`LedgerAnomaly`](super::anomaly::LedgerAnomaly) instead.

use chrono::NaiveDate;
use haulbook_shared::AppError;
use haulbook_shared::types::{DeliveryId, OpeningBalanceId, PartyId};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::party::PartyRole;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Window Errors ==========
    /// Window start is after its end.
    #[error("Invalid date range: start {from} is after end {to}")]
    InvalidDateRange {
        /// Start date.
        from: NaiveDate,
        /// End date.
        to: NaiveDate,
    },

    // ========== Delivery Errors ==========
    /// Delivery references both a crusher and a supplier, or neither.
    #[error("Delivery {0} must reference exactly one of crusher or supplier")]
    AmbiguousSource(DeliveryId),

    /// Discount volume is larger than the car volume.
    #[error(
        "Delivery {delivery_id} discount volume {discount_volume} exceeds car volume {car_volume}"
    )]
    DiscountExceedsCarVolume {
        /// The delivery.
        delivery_id: DeliveryId,
        /// Loaded car volume.
        car_volume: Decimal,
        /// Discounted volume.
        discount_volume: Decimal,
    },

    /// Supplier-sourced delivery names a hauling contractor.
    #[error("Delivery {0} comes from a supplier and cannot name a contractor")]
    HaulerOnSupplierDelivery(DeliveryId),

    /// Delivery quantity or volume is negative.
    #[error("Delivery {0} has a negative quantity or volume")]
    NegativeQuantity(DeliveryId),

    /// Unit price, payment, or capital amount is negative.
    #[error("{0} cannot be negative")]
    NegativeAmount(&'static str),

    // ========== Opening Balance Errors ==========
    /// Positive contractor/crusher opening balance without a project.
    #[error("Opening balance {0} is owed to the party and must name a project")]
    InvalidOpeningBalance(OpeningBalanceId),

    // ========== Party Errors ==========
    /// Party not found.
    #[error("Party not found: {0}")]
    PartyNotFound(PartyId),

    /// Party id already registered.
    #[error("Party already registered: {0}")]
    DuplicateParty(PartyId),

    /// Attempt to change a party's role.
    #[error("Cannot change role of party {party_id} from {from} to {to}")]
    RoleChangeNotAllowed {
        /// The party.
        party_id: PartyId,
        /// Current role.
        from: PartyRole,
        /// Requested role.
        to: PartyRole,
    },
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            Self::AmbiguousSource(_) => "AMBIGUOUS_SOURCE",
            Self::DiscountExceedsCarVolume { .. } => "DISCOUNT_EXCEEDS_CAR_VOLUME",
            Self::HaulerOnSupplierDelivery(_) => "HAULER_ON_SUPPLIER_DELIVERY",
            Self::NegativeQuantity(_) => "NEGATIVE_QUANTITY",
            Self::NegativeAmount(_) => "NEGATIVE_AMOUNT",
            Self::InvalidOpeningBalance(_) => "INVALID_OPENING_BALANCE",
            Self::PartyNotFound(_) => "PARTY_NOT_FOUND",
            Self::DuplicateParty(_) => "DUPLICATE_PARTY",
            Self::RoleChangeNotAllowed { .. } => "ROLE_CHANGE_NOT_ALLOWED",
        }
    }

    /// Returns true if the error rejects input rather than a missing resource.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::PartyNotFound(_))
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::PartyNotFound(_) => Self::NotFound(err.to_string()),
            LedgerError::DuplicateParty(_) | LedgerError::RoleChangeNotAllowed { .. } => {
                Self::BusinessRule(err.to_string())
            }
            _ => Self::Validation(err.to_string()),
        }
    }
}
