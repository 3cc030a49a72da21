//! Ledger service.
//!
//! Pure entry point for balance computation: aggregate, then resolve. The
//! caller reads fresh inputs for every request and hands them in; nothing is
//! cached between calls.

use chrono_tz::Tz;

use super::aggregate::{Aggregation, LedgerInputs, TransactionAggregator};
use super::balance::LedgerSnapshot;
use super::window::DateWindow;
use crate::party::Party;

/// Computes ledger snapshots for parties.
#[derive(Debug, Clone, Copy)]
pub struct LedgerService {
    aggregator: TransactionAggregator,
    tz: Tz,
}

impl LedgerService {
    /// Creates a service reading dates in the given business timezone.
    #[must_use]
    pub const fn new(tz: Tz) -> Self {
        Self {
            aggregator: TransactionAggregator::new(tz),
            tz,
        }
    }

    /// The business timezone.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.tz
    }

    /// Aggregates the party's records, keeping the itemized lines.
    #[must_use]
    pub fn aggregate(
        &self,
        party: &Party,
        inputs: &LedgerInputs,
        window: &DateWindow,
    ) -> Aggregation {
        self.aggregator.aggregate(party, inputs, window)
    }

    /// Computes the party's snapshot for the window.
    ///
    /// Never fails: empty inputs give an all-zero settled snapshot and data
    /// faults come back as anomalies.
    #[must_use]
    pub fn compute_snapshot(
        &self,
        party: &Party,
        inputs: &LedgerInputs,
        window: &DateWindow,
    ) -> LedgerSnapshot {
        let aggregation = self.aggregate(party, inputs, window);
        LedgerSnapshot::from_totals(
            party.id,
            party.role,
            &aggregation.totals,
            aggregation.anomalies,
        )
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new(chrono_tz::UTC)
    }
}
