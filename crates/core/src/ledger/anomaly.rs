//! Data faults surfaced alongside ledger results.

use haulbook_shared::types::{CapitalMovementId, DeliveryId, OpeningBalanceId, PaymentId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::derive::DeliveryView;

/// A record that was skipped, clamped, or counted at zero while aggregating.
///
/// Aggregation never fails on bad data; it reports what it found here and
/// leaves display and recovery to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerAnomaly {
    /// The unit price for this view is not set; the line counts as zero.
    MissingPrice {
        /// The delivery.
        delivery_id: DeliveryId,
        /// The view lacking a price.
        view: DeliveryView,
    },
    /// Positive contractor/crusher opening balance without a project; skipped.
    InvalidOpeningBalance {
        /// The opening balance line.
        opening_balance_id: OpeningBalanceId,
        /// Its amount.
        amount: Decimal,
    },
    /// Delivery with both or neither source; excluded.
    AmbiguousSource {
        /// The delivery.
        delivery_id: DeliveryId,
    },
    /// Supplier-sourced delivery naming a hauler; left off the hauler's ledger.
    HaulerOnSupplierDelivery {
        /// The delivery.
        delivery_id: DeliveryId,
    },
    /// Discount larger than car volume; net volume clamped to zero.
    DiscountExceedsCarVolume {
        /// The delivery.
        delivery_id: DeliveryId,
    },
    /// Negative payment amount; skipped.
    NegativePayment {
        /// The payment.
        payment_id: PaymentId,
    },
    /// Negative capital movement amount; skipped.
    NegativeCapitalMovement {
        /// The capital movement.
        capital_movement_id: CapitalMovementId,
    },
}

impl LedgerAnomaly {
    /// Stable code for logs and API payloads.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingPrice { .. } => "MISSING_PRICE",
            Self::InvalidOpeningBalance { .. } => "INVALID_OPENING_BALANCE",
            Self::AmbiguousSource { .. } => "AMBIGUOUS_SOURCE",
            Self::HaulerOnSupplierDelivery { .. } => "HAULER_ON_SUPPLIER_DELIVERY",
            Self::DiscountExceedsCarVolume { .. } => "DISCOUNT_EXCEEDS_CAR_VOLUME",
            Self::NegativePayment { .. } => "NEGATIVE_PAYMENT",
            Self::NegativeCapitalMovement { .. } => "NEGATIVE_CAPITAL_MOVEMENT",
        }
    }

    /// Returns true if the record was left out of the totals entirely.
    #[must_use]
    pub const fn excludes_record(&self) -> bool {
        !matches!(
            self,
            Self::MissingPrice { .. } | Self::DiscountExceedsCarVolume { .. }
        )
    }
}
