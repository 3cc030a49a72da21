//! Write-time validation for ledger records.
//!
//! The data-access layer calls these before persisting. The aggregator applies
//! the same rules defensively and reports violations as anomalies.

use rust_decimal::Decimal;

use super::error::LedgerError;
use super::records::{CapitalMovement, Delivery, OpeningBalance, Payment};
use crate::party::PartyRole;

/// Validates a delivery.
///
/// # Errors
///
/// - `AmbiguousSource` unless exactly one of crusher/supplier is set
/// - `HaulerOnSupplierDelivery` if a supplier-sourced delivery names a contractor
/// - `NegativeQuantity` for a negative quantity, car volume, or discount
/// - `DiscountExceedsCarVolume` if the discount is larger than the car volume
/// - `NegativeAmount` for a negative unit price
pub fn validate_delivery(delivery: &Delivery) -> Result<(), LedgerError> {
    if delivery.source().is_none() {
        return Err(LedgerError::AmbiguousSource(delivery.id));
    }

    if delivery.supplier_with_hauler() {
        return Err(LedgerError::HaulerOnSupplierDelivery(delivery.id));
    }

    let volumes = [
        Some(delivery.quantity),
        delivery.car_volume,
        delivery.discount_volume,
    ];
    if volumes.into_iter().flatten().any(|v| v < Decimal::ZERO) {
        return Err(LedgerError::NegativeQuantity(delivery.id));
    }

    if let (Some(car_volume), Some(discount_volume)) =
        (delivery.car_volume, delivery.discount_volume)
        && discount_volume > car_volume
    {
        return Err(LedgerError::DiscountExceedsCarVolume {
            delivery_id: delivery.id,
            car_volume,
            discount_volume,
        });
    }

    let prices = [
        delivery.price_per_meter,
        delivery.material_price_at_time,
        delivery.contractor_charge_per_meter,
    ];
    if prices.into_iter().flatten().any(|p| p < Decimal::ZERO) {
        return Err(LedgerError::NegativeAmount("Unit price"));
    }

    Ok(())
}

/// Validates an opening balance for a party of the given role.
///
/// # Errors
///
/// Returns `InvalidOpeningBalance` for a positive contractor or crusher
/// balance without a project.
pub fn validate_opening_balance(
    opening: &OpeningBalance,
    role: PartyRole,
) -> Result<(), LedgerError> {
    if is_valid_opening_balance(opening, role) {
        Ok(())
    } else {
        Err(LedgerError::InvalidOpeningBalance(opening.id))
    }
}

/// Returns true if the opening balance satisfies the project rule.
#[must_use]
pub fn is_valid_opening_balance(opening: &OpeningBalance, role: PartyRole) -> bool {
    !(role.requires_project_for_credit()
        && opening.amount > Decimal::ZERO
        && opening.project_id.is_none())
}

/// Validates a payment.
///
/// # Errors
///
/// Returns `NegativeAmount` for a negative amount.
pub fn validate_payment(payment: &Payment) -> Result<(), LedgerError> {
    if payment.amount < Decimal::ZERO {
        return Err(LedgerError::NegativeAmount("Payment amount"));
    }
    Ok(())
}

/// Validates a capital movement.
///
/// # Errors
///
/// Returns `NegativeAmount` for a negative amount.
pub fn validate_capital_movement(movement: &CapitalMovement) -> Result<(), LedgerError> {
    if movement.amount < Decimal::ZERO {
        return Err(LedgerError::NegativeAmount("Capital movement amount"));
    }
    Ok(())
}
