//! In-memory ledger store backed by a dataset document.
//!
//! Writes go through the same validators the engine applies on read, so a
//! store filled through this API never produces anomalies. A dataset loaded
//! from disk is taken as-is: faulty exported records are surfaced by the
//! engine as anomalies instead of failing the load.

use std::path::Path;

use async_trait::async_trait;
use chrono_tz::Tz;
use haulbook_core::ledger::{
    Adjustment, CapitalMovement, DateWindow, Delivery, OpeningBalance, Payment,
    validate_capital_movement, validate_delivery, validate_opening_balance, validate_payment,
};
use haulbook_core::party::{Party, PartyRegistry, PartyRole};
use haulbook_shared::types::PartyId;
use tokio::sync::RwLock;
use tracing::debug;

use crate::dataset::LedgerDataset;
use crate::error::{StoreError, StoreResult};
use crate::store::LedgerStore;

#[derive(Debug, Default)]
struct State {
    registry: PartyRegistry,
    deliveries: Vec<Delivery>,
    payments: Vec<Payment>,
    adjustments: Vec<Adjustment>,
    opening_balances: Vec<OpeningBalance>,
    capital_movements: Vec<CapitalMovement>,
}

/// Ledger store held in memory.
#[derive(Debug)]
pub struct InMemoryLedgerStore {
    tz: Tz,
    state: RwLock<State>,
}

impl InMemoryLedgerStore {
    /// Creates an empty store that windows dates in `tz`.
    #[must_use]
    pub fn new(tz: Tz) -> Self {
        Self {
            tz,
            state: RwLock::new(State::default()),
        }
    }

    /// Creates a store holding a dataset.
    ///
    /// Duplicate party ids keep the first occurrence.
    #[must_use]
    pub fn from_dataset(tz: Tz, dataset: LedgerDataset) -> Self {
        let state = State {
            registry: dataset.parties.into_iter().collect(),
            deliveries: dataset.deliveries,
            payments: dataset.payments,
            adjustments: dataset.adjustments,
            opening_balances: dataset.opening_balances,
            capital_movements: dataset.capital_movements,
        };
        Self {
            tz,
            state: RwLock::new(state),
        }
    }

    /// Loads a store from a JSON dataset file.
    pub async fn load_json(tz: Tz, path: impl AsRef<Path>) -> StoreResult<Self> {
        let dataset = LedgerDataset::load(path).await?;
        Ok(Self::from_dataset(tz, dataset))
    }

    /// Exports the current contents as a dataset.
    pub async fn to_dataset(&self) -> LedgerDataset {
        let state = self.state.read().await;
        LedgerDataset {
            parties: state.registry.iter().cloned().collect(),
            deliveries: state.deliveries.clone(),
            payments: state.payments.clone(),
            adjustments: state.adjustments.clone(),
            opening_balances: state.opening_balances.clone(),
            capital_movements: state.capital_movements.clone(),
        }
    }

    /// Writes the current contents to a JSON dataset file.
    pub async fn save_json(&self, path: impl AsRef<Path>) -> StoreResult<()> {
        self.to_dataset().await.save(path).await
    }

    /// Registers a new party.
    pub async fn register_party(&self, party: Party) -> StoreResult<()> {
        self.state.write().await.registry.register(party)?;
        Ok(())
    }

    /// Updates a party's name or status. The role cannot change.
    pub async fn update_party(&self, party: Party) -> StoreResult<()> {
        self.state.write().await.registry.update(party)?;
        Ok(())
    }

    /// Records a validated delivery.
    ///
    /// Every party it names must be registered under the role of its slot.
    pub async fn record_delivery(&self, delivery: Delivery) -> StoreResult<()> {
        validate_delivery(&delivery)?;
        let mut state = self.state.write().await;

        let slots = [
            (Some(delivery.client_id), PartyRole::Client),
            (delivery.crusher_id, PartyRole::Crusher),
            (delivery.supplier_id, PartyRole::Supplier),
            (delivery.contractor_id, PartyRole::Contractor),
        ];
        for (party_id, expected) in slots {
            let Some(party_id) = party_id else {
                continue;
            };
            let actual = state.registry.get(party_id)?.role;
            if actual != expected {
                return Err(StoreError::RoleMismatch {
                    party_id,
                    expected,
                    actual,
                });
            }
        }

        state.deliveries.push(delivery);
        Ok(())
    }

    /// Records a validated payment.
    pub async fn record_payment(&self, payment: Payment) -> StoreResult<()> {
        validate_payment(&payment)?;
        let mut state = self.state.write().await;
        state.registry.get(payment.party_id)?;
        state.payments.push(payment);
        Ok(())
    }

    /// Records an adjustment.
    pub async fn record_adjustment(&self, adjustment: Adjustment) -> StoreResult<()> {
        let mut state = self.state.write().await;
        state.registry.get(adjustment.party_id)?;
        state.adjustments.push(adjustment);
        Ok(())
    }

    /// Adds an opening balance line, checked against the party's role.
    pub async fn add_opening_balance(&self, opening: OpeningBalance) -> StoreResult<()> {
        let mut state = self.state.write().await;
        let role = state.registry.get(opening.party_id)?.role;
        validate_opening_balance(&opening, role)?;
        state.opening_balances.push(opening);
        Ok(())
    }

    /// Replaces an existing opening balance line.
    pub async fn edit_opening_balance(&self, opening: OpeningBalance) -> StoreResult<()> {
        let mut state = self.state.write().await;
        let role = state.registry.get(opening.party_id)?.role;
        validate_opening_balance(&opening, role)?;

        let slot = state
            .opening_balances
            .iter_mut()
            .find(|o| o.id == opening.id)
            .ok_or(StoreError::OpeningBalanceNotFound(opening.id))?;
        *slot = opening;
        Ok(())
    }

    /// Records a validated capital movement for an administration party.
    pub async fn record_capital_movement(&self, movement: CapitalMovement) -> StoreResult<()> {
        validate_capital_movement(&movement)?;
        let mut state = self.state.write().await;
        if state.registry.get(movement.party_id)?.role != PartyRole::Administration {
            return Err(StoreError::NotAdministration(movement.party_id));
        }
        state.capital_movements.push(movement);
        Ok(())
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn get_party(&self, party_id: PartyId) -> StoreResult<Party> {
        let state = self.state.read().await;
        state
            .registry
            .get(party_id)
            .cloned()
            .map_err(|_| StoreError::PartyNotFound(party_id))
    }

    async fn list_parties(&self, role: Option<PartyRole>) -> StoreResult<Vec<Party>> {
        let state = self.state.read().await;
        let parties = match role {
            Some(role) => state.registry.list_by_role(role).cloned().collect(),
            None => state.registry.iter().cloned().collect(),
        };
        Ok(parties)
    }

    async fn list_deliveries(
        &self,
        party_id: PartyId,
        role: PartyRole,
        window: &DateWindow,
    ) -> StoreResult<Vec<Delivery>> {
        let state = self.state.read().await;
        let deliveries: Vec<Delivery> = state
            .deliveries
            .iter()
            .filter(|d| d.involves(party_id, role) && window.contains(d.created_at, self.tz))
            .cloned()
            .collect();
        debug!(%party_id, %role, count = deliveries.len(), "Fetched deliveries");
        Ok(deliveries)
    }

    async fn list_payments(
        &self,
        party_id: PartyId,
        window: &DateWindow,
    ) -> StoreResult<Vec<Payment>> {
        let state = self.state.read().await;
        let payments: Vec<Payment> = state
            .payments
            .iter()
            .filter(|p| p.party_id == party_id && window.contains(p.paid_at, self.tz))
            .cloned()
            .collect();
        debug!(%party_id, count = payments.len(), "Fetched payments");
        Ok(payments)
    }

    async fn list_adjustments(
        &self,
        party_id: PartyId,
        window: &DateWindow,
    ) -> StoreResult<Vec<Adjustment>> {
        let state = self.state.read().await;
        let adjustments: Vec<Adjustment> = state
            .adjustments
            .iter()
            .filter(|a| a.party_id == party_id && window.contains(a.created_at, self.tz))
            .cloned()
            .collect();
        debug!(%party_id, count = adjustments.len(), "Fetched adjustments");
        Ok(adjustments)
    }

    async fn list_opening_balances(&self, party_id: PartyId) -> StoreResult<Vec<OpeningBalance>> {
        let state = self.state.read().await;
        let lines: Vec<OpeningBalance> = state
            .opening_balances
            .iter()
            .filter(|o| o.party_id == party_id)
            .cloned()
            .collect();
        debug!(%party_id, count = lines.len(), "Fetched opening balances");
        Ok(lines)
    }

    async fn list_capital_movements(
        &self,
        party_id: PartyId,
        window: &DateWindow,
    ) -> StoreResult<Vec<CapitalMovement>> {
        let state = self.state.read().await;
        let movements: Vec<CapitalMovement> = state
            .capital_movements
            .iter()
            .filter(|m| m.party_id == party_id && window.contains(m.occurred_at, self.tz))
            .cloned()
            .collect();
        debug!(%party_id, count = movements.len(), "Fetched capital movements");
        Ok(movements)
    }
}
