//! Statement assembly.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use chrono_tz::Tz;
use rust_decimal::Decimal;

use super::types::{MaterialTotal, Statement, StatementMeta, StatementWindow};
use crate::ledger::{
    Aggregation, DateWindow, DeliveryLine, LedgerInputs, LedgerService, LedgerSnapshot,
    normalize_material,
};
use crate::party::Party;

/// Builds statements from the same aggregation the snapshot uses.
#[derive(Debug, Clone, Copy)]
pub struct StatementBuilder {
    ledger: LedgerService,
}

impl StatementBuilder {
    /// Creates a builder over a ledger service.
    #[must_use]
    pub const fn new(ledger: LedgerService) -> Self {
        Self { ledger }
    }

    /// Builds a statement for `party` within `window`.
    ///
    /// An unbounded window is treated as "no window": the display window is
    /// then derived from the itemized records.
    #[must_use]
    pub fn build(
        &self,
        party: &Party,
        inputs: &LedgerInputs,
        window: &DateWindow,
        meta: StatementMeta,
    ) -> Statement {
        let aggregation = self.ledger.aggregate(party, inputs, window);
        Self::assemble(party, window, aggregation, meta, self.ledger.timezone())
    }

    fn assemble(
        party: &Party,
        window: &DateWindow,
        aggregation: Aggregation,
        meta: StatementMeta,
        tz: Tz,
    ) -> Statement {
        let display_window = if window.is_unbounded() {
            derive_window(&aggregation, tz)
        } else {
            StatementWindow::Requested {
                from: window.from(),
                to: window.to(),
            }
        };

        let material_totals = group_by_material(&aggregation.deliveries);
        let snapshot = LedgerSnapshot::from_totals(
            party.id,
            party.role,
            &aggregation.totals,
            aggregation.anomalies,
        );

        Statement {
            party: party.clone(),
            window: display_window,
            currency: meta.currency,
            generated_at: meta.generated_at,
            snapshot,
            material_totals,
            opening_balances: aggregation.opening_balances,
            deliveries: aggregation.deliveries,
            payments: aggregation.payments,
            adjustments: aggregation.adjustments,
            capital_movements: aggregation.capital_movements,
        }
    }
}

/// Groups delivery lines by normalized material, ordered by material name.
///
/// Quantity and value come from each line's charge, so a client statement
/// groups billed quantity and a source statement groups net volume.
#[must_use]
pub fn group_by_material(lines: &[DeliveryLine]) -> Vec<MaterialTotal> {
    let mut groups: BTreeMap<String, MaterialTotal> = BTreeMap::new();

    for line in lines {
        let key = normalize_material(&line.delivery.material);
        let entry = groups.entry(key.clone()).or_insert_with(|| MaterialTotal {
            material: key,
            quantity: Decimal::ZERO,
            value: Decimal::ZERO,
            count: 0,
            unpriced: 0,
        });
        entry.quantity += line.charge.quantity;
        entry.value += line.charge.amount;
        entry.count += 1;
        if line.charge.unpriced {
            entry.unpriced += 1;
        }
    }

    groups.into_values().collect()
}

/// First and last business-local record dates, or `AllData` if there are none.
fn derive_window(aggregation: &Aggregation, tz: Tz) -> StatementWindow {
    let dates = aggregation
        .deliveries
        .iter()
        .map(|l| l.delivery.created_at)
        .chain(aggregation.payments.iter().map(|p| p.paid_at))
        .chain(aggregation.adjustments.iter().map(|a| a.created_at))
        .chain(aggregation.capital_movements.iter().map(|m| m.occurred_at))
        .map(|at| at.with_timezone(&tz).date_naive());

    let bounds = dates.fold(None, |acc: Option<(NaiveDate, NaiveDate)>, d| match acc {
        None => Some((d, d)),
        Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
    });

    match bounds {
        Some((from, to)) => StatementWindow::Derived { from, to },
        None => StatementWindow::AllData,
    }
}
