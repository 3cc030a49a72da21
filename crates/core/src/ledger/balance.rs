//! Balance resolution.
//!
//! Every role shares one formula:
//!
//! ```text
//! balance = opening + charges - payments + adjustments
//! ```
//!
//! where `charges` is the role's delivery charge total, or capital
//! injections minus withdrawals for administration parties. A positive
//! balance means the client owes the business, or the business owes any
//! other role. Adjustments and opening balances carry that same sign.

use haulbook_shared::types::PartyId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::aggregate::AggregateTotals;
use super::anomaly::LedgerAnomaly;
use crate::party::PartyRole;

/// Who owes whom, as a stable key for rendering layers to localize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceLabel {
    /// Client has an outstanding debt.
    ClientOwesBusiness,
    /// Client has paid in advance.
    BusinessOwesClient,
    /// Hauling is unpaid.
    BusinessOwesContractor,
    /// Contractor was overpaid.
    ContractorOwesBusiness,
    /// Crusher material is unpaid.
    BusinessOwesCrusher,
    /// Crusher was overpaid.
    CrusherOwesBusiness,
    /// Supplier material is unpaid.
    BusinessOwesSupplier,
    /// Supplier was overpaid.
    BusinessOverpaidSupplier,
    /// Partner capital is outstanding.
    BusinessOwesPartner,
    /// Partner took out more than they put in.
    PartnerOwesBusiness,
    /// Balance is exactly zero.
    Settled,
}

impl BalanceLabel {
    /// The label key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::ClientOwesBusiness => "client_owes_business",
            Self::BusinessOwesClient => "business_owes_client",
            Self::BusinessOwesContractor => "business_owes_contractor",
            Self::ContractorOwesBusiness => "contractor_owes_business",
            Self::BusinessOwesCrusher => "business_owes_crusher",
            Self::CrusherOwesBusiness => "crusher_owes_business",
            Self::BusinessOwesSupplier => "business_owes_supplier",
            Self::BusinessOverpaidSupplier => "business_overpaid_supplier",
            Self::BusinessOwesPartner => "business_owes_partner",
            Self::PartnerOwesBusiness => "partner_owes_business",
            Self::Settled => "settled",
        }
    }
}

impl std::fmt::Display for BalanceLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Applies the role sign convention to aggregated totals.
///
/// This is the only place a balance sign is decided.
pub struct BalanceResolver;

impl BalanceResolver {
    /// Resolves the signed balance and its label.
    #[must_use]
    pub fn resolve(role: PartyRole, totals: &AggregateTotals) -> (Decimal, BalanceLabel) {
        let balance = Self::balance(role, totals);
        (balance, Self::label_for(role, balance))
    }

    /// Computes the signed balance.
    #[must_use]
    pub fn balance(role: PartyRole, totals: &AggregateTotals) -> Decimal {
        let charges = match role {
            PartyRole::Administration => {
                totals.total_capital_injections - totals.total_capital_withdrawals
            }
            PartyRole::Client
            | PartyRole::Contractor
            | PartyRole::Crusher
            | PartyRole::Supplier => totals.total_deliveries,
        };

        totals.opening_balance + charges - totals.total_payments + totals.total_adjustments
    }

    /// Label for a signed balance under the role's convention.
    #[must_use]
    pub fn label_for(role: PartyRole, balance: Decimal) -> BalanceLabel {
        if balance.is_zero() {
            return BalanceLabel::Settled;
        }
        let positive = balance.is_sign_positive();

        match (role, positive) {
            (PartyRole::Client, true) => BalanceLabel::ClientOwesBusiness,
            (PartyRole::Client, false) => BalanceLabel::BusinessOwesClient,
            (PartyRole::Contractor, true) => BalanceLabel::BusinessOwesContractor,
            (PartyRole::Contractor, false) => BalanceLabel::ContractorOwesBusiness,
            (PartyRole::Crusher, true) => BalanceLabel::BusinessOwesCrusher,
            (PartyRole::Crusher, false) => BalanceLabel::CrusherOwesBusiness,
            (PartyRole::Supplier, true) => BalanceLabel::BusinessOwesSupplier,
            (PartyRole::Supplier, false) => BalanceLabel::BusinessOverpaidSupplier,
            (PartyRole::Administration, true) => BalanceLabel::BusinessOwesPartner,
            (PartyRole::Administration, false) => BalanceLabel::PartnerOwesBusiness,
        }
    }
}

/// A party's ledger position, computed fresh per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// The party.
    pub party_id: PartyId,
    /// Its role.
    pub role: PartyRole,
    /// Sum of valid opening balances.
    pub opening_balance: Decimal,
    /// Sum of delivery charges in the window.
    pub total_deliveries: Decimal,
    /// Sum of payments in the window.
    pub total_payments: Decimal,
    /// Signed sum of adjustments in the window.
    pub total_adjustments: Decimal,
    /// Capital injections in the window.
    pub total_capital_injections: Decimal,
    /// Capital withdrawals in the window.
    pub total_capital_withdrawals: Decimal,
    /// Resolved signed balance.
    pub balance: Decimal,
    /// Who owes whom.
    pub balance_label: BalanceLabel,
    /// Number of counted deliveries with no price for this view.
    pub unpriced_deliveries: usize,
    /// Data faults found while aggregating.
    pub anomalies: Vec<LedgerAnomaly>,
}

impl LedgerSnapshot {
    /// Resolves totals into a snapshot.
    #[must_use]
    pub fn from_totals(
        party_id: PartyId,
        role: PartyRole,
        totals: &AggregateTotals,
        anomalies: Vec<LedgerAnomaly>,
    ) -> Self {
        let (balance, balance_label) = BalanceResolver::resolve(role, totals);
        let unpriced_deliveries = anomalies
            .iter()
            .filter(|a| matches!(a, LedgerAnomaly::MissingPrice { .. }))
            .count();

        Self {
            party_id,
            role,
            opening_balance: totals.opening_balance,
            total_deliveries: totals.total_deliveries,
            total_payments: totals.total_payments,
            total_adjustments: totals.total_adjustments,
            total_capital_injections: totals.total_capital_injections,
            total_capital_withdrawals: totals.total_capital_withdrawals,
            balance,
            balance_label,
            unpriced_deliveries,
            anomalies,
        }
    }

    /// Returns true if any anomaly was found.
    #[must_use]
    pub fn has_anomalies(&self) -> bool {
        !self.anomalies.is_empty()
    }
}
