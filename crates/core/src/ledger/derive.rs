//! Delivery ledger entry derivation.
//!
//! One delivery touches up to three ledgers, each priced differently:
//!
//! | View | Party | Quantity | Unit price |
//! |---|---|---|---|
//! | `Client` | client | `quantity` | `price_per_meter` |
//! | `Source` | crusher or supplier | net volume | `material_price_at_time` |
//! | `Hauler` | contractor | `quantity` | `contractor_charge_per_meter` |
//!
//! The client is always billed the stated `quantity`, never the discounted
//! net volume the source is paid for.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::records::Delivery;

/// Which ledger a delivery charge is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryView {
    /// What the client is billed.
    Client,
    /// What the crusher or supplier is owed.
    Source,
    /// What the hauling contractor is owed.
    Hauler,
}

/// A delivery priced for one view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedCharge {
    /// The view this charge belongs to.
    pub view: DeliveryView,
    /// Quantity the price applies to.
    pub quantity: Decimal,
    /// Unit price used, if one was set.
    pub unit_price: Option<Decimal>,
    /// Charge amount; zero when unpriced.
    pub amount: Decimal,
    /// True if the view needed a price the delivery does not carry.
    pub unpriced: bool,
}

/// Net volume costed to the source.
///
/// `car_volume - discount_volume` clamped at zero when a car volume was
/// measured, otherwise the stated quantity.
#[must_use]
pub fn net_volume(delivery: &Delivery) -> Decimal {
    match delivery.car_volume {
        Some(car) => {
            let discount = delivery.discount_volume.unwrap_or(Decimal::ZERO);
            (car - discount).max(Decimal::ZERO)
        }
        None => delivery.quantity,
    }
}

/// Prices one delivery for one view.
///
/// A hauler view on a delivery without a contractor, or on a supplier-sourced
/// delivery, is a real zero, not an unpriced line.
#[must_use]
pub fn derive_charge(delivery: &Delivery, view: DeliveryView) -> DerivedCharge {
    let (quantity, unit_price) = match view {
        DeliveryView::Client => (delivery.quantity, delivery.price_per_meter),
        DeliveryView::Source => (net_volume(delivery), delivery.material_price_at_time),
        DeliveryView::Hauler => {
            if delivery.contractor_id.is_none() || delivery.supplier_with_hauler() {
                return DerivedCharge {
                    view,
                    quantity: delivery.quantity,
                    unit_price: None,
                    amount: Decimal::ZERO,
                    unpriced: false,
                };
            }
            (delivery.quantity, delivery.contractor_charge_per_meter)
        }
    };

    DerivedCharge {
        view,
        quantity,
        unit_price,
        amount: unit_price.map_or(Decimal::ZERO, |price| quantity * price),
        unpriced: unit_price.is_none(),
    }
}
