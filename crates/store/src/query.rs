//! Request-scoped ledger queries.
//!
//! Every call reads the party's records fresh from the store, then hands them
//! to the pure engine. No result is kept between calls.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use haulbook_core::ledger::{
    DateWindow, LedgerAnomaly, LedgerInputs, LedgerService, LedgerSnapshot,
};
use haulbook_core::party::{Party, PartyRole};
use haulbook_core::statement::{Statement, StatementBuilder, StatementMeta};
use haulbook_shared::types::PartyId;
use tracing::{debug, info, warn};

use crate::error::StoreResult;
use crate::store::LedgerStore;

/// Computes snapshots and statements against a live store.
pub struct LedgerQueryService<S> {
    store: Arc<S>,
    ledger: LedgerService,
    currency: String,
}

impl<S: LedgerStore> LedgerQueryService<S> {
    /// Creates a query service.
    pub fn new(store: Arc<S>, ledger: LedgerService, currency: impl Into<String>) -> Self {
        Self {
            store,
            ledger,
            currency: currency.into(),
        }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Reads every record the engine needs for one party.
    async fn load_inputs(&self, party: &Party, window: &DateWindow) -> StoreResult<LedgerInputs> {
        let store = self.store.as_ref();
        let capital = async {
            if party.role == PartyRole::Administration {
                store.list_capital_movements(party.id, window).await
            } else {
                Ok(Vec::new())
            }
        };

        let (deliveries, payments, adjustments, opening_balances, capital_movements) =
            futures::try_join!(
                store.list_deliveries(party.id, party.role, window),
                store.list_payments(party.id, window),
                store.list_adjustments(party.id, window),
                store.list_opening_balances(party.id),
                capital,
            )?;

        debug!(
            party_id = %party.id,
            deliveries = deliveries.len(),
            payments = payments.len(),
            adjustments = adjustments.len(),
            opening_balances = opening_balances.len(),
            capital_movements = capital_movements.len(),
            "Loaded ledger inputs"
        );

        Ok(LedgerInputs {
            deliveries,
            payments,
            adjustments,
            opening_balances,
            capital_movements,
        })
    }

    /// Computes a party's snapshot for the window.
    pub async fn compute_snapshot(
        &self,
        party_id: PartyId,
        window: &DateWindow,
    ) -> StoreResult<LedgerSnapshot> {
        let party = self.store.get_party(party_id).await?;
        self.snapshot_for(&party, window).await
    }

    async fn snapshot_for(
        &self,
        party: &Party,
        window: &DateWindow,
    ) -> StoreResult<LedgerSnapshot> {
        let inputs = self.load_inputs(party, window).await?;
        let snapshot = self.ledger.compute_snapshot(party, &inputs, window);

        report_anomalies(party.id, &snapshot.anomalies);
        info!(
            party_id = %party.id,
            role = %party.role,
            balance = %snapshot.balance,
            label = %snapshot.balance_label,
            "Computed ledger snapshot"
        );
        Ok(snapshot)
    }

    /// Builds a party's statement for the window.
    ///
    /// `generated_at` is stamped on the statement as-is.
    pub async fn build_statement(
        &self,
        party_id: PartyId,
        window: &DateWindow,
        generated_at: DateTime<Utc>,
    ) -> StoreResult<Statement> {
        let party = self.store.get_party(party_id).await?;
        let inputs = self.load_inputs(&party, window).await?;

        let meta = StatementMeta {
            currency: self.currency.clone(),
            generated_at,
        };
        let statement = StatementBuilder::new(self.ledger).build(&party, &inputs, window, meta);

        report_anomalies(party.id, &statement.snapshot.anomalies);
        info!(
            party_id = %party.id,
            role = %party.role,
            balance = %statement.snapshot.balance,
            deliveries = statement.deliveries.len(),
            materials = statement.material_totals.len(),
            "Built statement"
        );
        Ok(statement)
    }

    /// Computes one snapshot per party of a role, ordered by party id.
    pub async fn snapshots_for_role(
        &self,
        role: PartyRole,
        window: &DateWindow,
    ) -> StoreResult<Vec<LedgerSnapshot>> {
        let parties = self.store.list_parties(Some(role)).await?;
        let mut snapshots = Vec::with_capacity(parties.len());
        for party in &parties {
            snapshots.push(self.snapshot_for(party, window).await?);
        }
        Ok(snapshots)
    }
}

fn report_anomalies(party_id: PartyId, anomalies: &[LedgerAnomaly]) {
    for anomaly in anomalies {
        warn!(%party_id, code = anomaly.code(), ?anomaly, "Ledger anomaly");
    }
}
