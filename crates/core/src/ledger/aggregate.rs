//! Transaction aggregation.
//!
//! Turns a party's raw records into plain sums for one date window. No sign
//! convention is applied here; see [`BalanceResolver`](super::balance::BalanceResolver).

use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::anomaly::LedgerAnomaly;
use super::derive::{DeliveryView, DerivedCharge, derive_charge};
use super::records::{
    Adjustment, CapitalMovement, CapitalMovementKind, Delivery, OpeningBalance, Payment,
};
use super::validation::is_valid_opening_balance;
use super::window::DateWindow;
use crate::party::{Party, PartyRole};

/// Raw records read from the system of record for one request.
#[derive(Debug, Clone, Default)]
pub struct LedgerInputs {
    /// Deliveries the party may appear on.
    pub deliveries: Vec<Delivery>,
    /// Payments.
    pub payments: Vec<Payment>,
    /// Manual adjustments.
    pub adjustments: Vec<Adjustment>,
    /// Opening balance lines.
    pub opening_balances: Vec<OpeningBalance>,
    /// Partner capital movements.
    pub capital_movements: Vec<CapitalMovement>,
}

/// Unsigned-by-role sums for one party and window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateTotals {
    /// Sum of valid opening balance lines, never windowed.
    pub opening_balance: Decimal,
    /// Sum of the role's derived delivery charges.
    pub total_deliveries: Decimal,
    /// Sum of payment amounts.
    pub total_payments: Decimal,
    /// Signed sum of adjustments.
    pub total_adjustments: Decimal,
    /// Sum of capital injections (administration only).
    pub total_capital_injections: Decimal,
    /// Sum of capital withdrawals (administration only).
    pub total_capital_withdrawals: Decimal,
}

/// A delivery with its charge for the ledger being computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryLine {
    /// The delivery record.
    pub delivery: Delivery,
    /// Its charge for the party's view.
    pub charge: DerivedCharge,
}

/// Aggregation result: totals plus the itemized records that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    /// The sums.
    pub totals: AggregateTotals,
    /// Opening balance lines that were counted.
    pub opening_balances: Vec<OpeningBalance>,
    /// Counted deliveries, chronological.
    pub deliveries: Vec<DeliveryLine>,
    /// Counted payments, chronological.
    pub payments: Vec<Payment>,
    /// Counted adjustments, chronological.
    pub adjustments: Vec<Adjustment>,
    /// Counted capital movements, chronological.
    pub capital_movements: Vec<CapitalMovement>,
    /// Faults found along the way.
    pub anomalies: Vec<LedgerAnomaly>,
}

/// Sums a party's records within a date window.
///
/// Pure and order-independent: inputs are sorted by timestamp and id before
/// summing, so identical inputs always give identical output.
#[derive(Debug, Clone, Copy)]
pub struct TransactionAggregator {
    tz: Tz,
}

impl TransactionAggregator {
    /// Creates an aggregator that reads dates in the given business timezone.
    #[must_use]
    pub const fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Aggregates `inputs` for `party` within `window`.
    ///
    /// Records belonging to other parties are ignored. Opening balances are
    /// always included in full.
    #[must_use]
    pub fn aggregate(
        &self,
        party: &Party,
        inputs: &LedgerInputs,
        window: &DateWindow,
    ) -> Aggregation {
        let mut out = Aggregation::default();

        self.add_opening_balances(party, inputs, &mut out);
        self.add_deliveries(party, inputs, window, &mut out);
        self.add_payments(party, inputs, window, &mut out);
        self.add_adjustments(party, inputs, window, &mut out);
        if party.role == PartyRole::Administration {
            self.add_capital_movements(party, inputs, window, &mut out);
        }

        out
    }

    #[allow(clippy::unused_self)]
    fn add_opening_balances(&self, party: &Party, inputs: &LedgerInputs, out: &mut Aggregation) {
        let mut lines: Vec<&OpeningBalance> = inputs
            .opening_balances
            .iter()
            .filter(|o| o.party_id == party.id)
            .collect();
        lines.sort_by_key(|o| o.id);

        for line in lines {
            if !is_valid_opening_balance(line, party.role) {
                out.anomalies.push(LedgerAnomaly::InvalidOpeningBalance {
                    opening_balance_id: line.id,
                    amount: line.amount,
                });
                continue;
            }
            out.totals.opening_balance += line.amount;
            out.opening_balances.push(line.clone());
        }
    }

    fn add_deliveries(
        &self,
        party: &Party,
        inputs: &LedgerInputs,
        window: &DateWindow,
        out: &mut Aggregation,
    ) {
        let Some(view) = party.role.delivery_view() else {
            return;
        };

        let mut deliveries: Vec<&Delivery> = inputs
            .deliveries
            .iter()
            .filter(|d| d.involves(party.id, party.role) && window.contains(d.created_at, self.tz))
            .collect();
        deliveries.sort_by_key(|d| (d.created_at, d.id));

        for delivery in deliveries {
            if delivery.source().is_none() {
                out.anomalies.push(LedgerAnomaly::AmbiguousSource {
                    delivery_id: delivery.id,
                });
                continue;
            }

            if view == DeliveryView::Hauler && delivery.supplier_with_hauler() {
                out.anomalies.push(LedgerAnomaly::HaulerOnSupplierDelivery {
                    delivery_id: delivery.id,
                });
                continue;
            }

            if view == DeliveryView::Source && delivery.discount_exceeds_car_volume() {
                out.anomalies.push(LedgerAnomaly::DiscountExceedsCarVolume {
                    delivery_id: delivery.id,
                });
            }

            let charge = derive_charge(delivery, view);
            if charge.unpriced {
                out.anomalies.push(LedgerAnomaly::MissingPrice {
                    delivery_id: delivery.id,
                    view,
                });
            }

            out.totals.total_deliveries += charge.amount;
            out.deliveries.push(DeliveryLine {
                delivery: delivery.clone(),
                charge,
            });
        }
    }

    fn add_payments(
        &self,
        party: &Party,
        inputs: &LedgerInputs,
        window: &DateWindow,
        out: &mut Aggregation,
    ) {
        let mut payments: Vec<&Payment> = inputs
            .payments
            .iter()
            .filter(|p| p.party_id == party.id && window.contains(p.paid_at, self.tz))
            .collect();
        payments.sort_by_key(|p| (p.paid_at, p.id));

        for payment in payments {
            if payment.amount < Decimal::ZERO {
                out.anomalies.push(LedgerAnomaly::NegativePayment {
                    payment_id: payment.id,
                });
                continue;
            }
            out.totals.total_payments += payment.amount;
            out.payments.push(payment.clone());
        }
    }

    fn add_adjustments(
        &self,
        party: &Party,
        inputs: &LedgerInputs,
        window: &DateWindow,
        out: &mut Aggregation,
    ) {
        let mut adjustments: Vec<&Adjustment> = inputs
            .adjustments
            .iter()
            .filter(|a| a.party_id == party.id && window.contains(a.created_at, self.tz))
            .collect();
        adjustments.sort_by_key(|a| (a.created_at, a.id));

        for adjustment in adjustments {
            out.totals.total_adjustments += adjustment.amount;
            out.adjustments.push(adjustment.clone());
        }
    }

    fn add_capital_movements(
        &self,
        party: &Party,
        inputs: &LedgerInputs,
        window: &DateWindow,
        out: &mut Aggregation,
    ) {
        let mut movements: Vec<&CapitalMovement> = inputs
            .capital_movements
            .iter()
            .filter(|m| m.party_id == party.id && window.contains(m.occurred_at, self.tz))
            .collect();
        movements.sort_by_key(|m| (m.occurred_at, m.id));

        for movement in movements {
            if movement.amount < Decimal::ZERO {
                out.anomalies.push(LedgerAnomaly::NegativeCapitalMovement {
                    capital_movement_id: movement.id,
                });
                continue;
            }
            match movement.kind {
                CapitalMovementKind::Injection => {
                    out.totals.total_capital_injections += movement.amount;
                }
                CapitalMovementKind::Withdrawal => {
                    out.totals.total_capital_withdrawals += movement.amount;
                }
            }
            out.capital_movements.push(movement.clone());
        }
    }
}
