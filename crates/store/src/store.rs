//! The read contract the ledger engine needs from the system of record.

use async_trait::async_trait;
use haulbook_core::ledger::{
    Adjustment, CapitalMovement, DateWindow, Delivery, OpeningBalance, Payment,
};
use haulbook_core::party::{Party, PartyRole};
use haulbook_shared::types::PartyId;

use crate::error::StoreResult;

/// Read accessors scoped by party and optional date window.
///
/// Implementations must return records as currently committed; callers never
/// cache results across requests. An unbounded window means full history.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Looks up a party.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::PartyNotFound` for unknown ids.
    async fn get_party(&self, party_id: PartyId) -> StoreResult<Party>;

    /// Lists parties, optionally of one role.
    async fn list_parties(&self, role: Option<PartyRole>) -> StoreResult<Vec<Party>>;

    /// Deliveries where the party holds the position its role is charged for.
    async fn list_deliveries(
        &self,
        party_id: PartyId,
        role: PartyRole,
        window: &DateWindow,
    ) -> StoreResult<Vec<Delivery>>;

    /// Payments to or from the party, windowed by `paid_at`.
    async fn list_payments(
        &self,
        party_id: PartyId,
        window: &DateWindow,
    ) -> StoreResult<Vec<Payment>>;

    /// Adjustments for the party, windowed by `created_at`.
    async fn list_adjustments(
        &self,
        party_id: PartyId,
        window: &DateWindow,
    ) -> StoreResult<Vec<Adjustment>>;

    /// All opening balance lines of the party. Never windowed.
    async fn list_opening_balances(&self, party_id: PartyId) -> StoreResult<Vec<OpeningBalance>>;

    /// Capital movements of the party, windowed by `occurred_at`.
    async fn list_capital_movements(
        &self,
        party_id: PartyId,
        window: &DateWindow,
    ) -> StoreResult<Vec<CapitalMovement>>;
}
