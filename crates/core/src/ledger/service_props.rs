//! Property-based tests for `LedgerService`.
//!
//! - Property 1: Opening-only balances
//! - Property 2: Net volume clamping
//! - Property 6: Window limit case equals full history
//! - Property 7: Determinism and input-order independence

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use haulbook_shared::types::{
    AdjustmentId, DeliveryId, OpeningBalanceId, PartyId, PaymentId, ProjectId,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::aggregate::LedgerInputs;
use super::balance::BalanceResolver;
use super::derive::net_volume;
use super::records::{Adjustment, Delivery, OpeningBalance, Payment};
use super::service::LedgerService;
use super::window::DateWindow;
use crate::party::{Party, PartyRole};

/// Strategy for non-negative quantities (0.00 to 100.00).
fn quantity() -> impl Strategy<Value = Decimal> {
    (0i64..10_000i64).prop_map(|v| Decimal::new(v, 2))
}

/// Strategy for unit prices (0.00 to 500.00).
fn price() -> impl Strategy<Value = Decimal> {
    (0i64..50_000i64).prop_map(|v| Decimal::new(v, 2))
}

/// Strategy for signed amounts (-100,000.00 to 100,000.00).
fn signed_amount() -> impl Strategy<Value = Decimal> {
    (-10_000_000i64..10_000_000i64).prop_map(|v| Decimal::new(v, 2))
}

/// Strategy for instants spread over one year, minute granularity.
fn instant() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..525_600i64).prop_map(|minutes| base_time() + Duration::minutes(minutes))
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

fn role() -> impl Strategy<Value = PartyRole> {
    prop::sample::select(PartyRole::ALL.to_vec())
}

/// A crusher-sourced, hauled delivery to `client`.
fn delivery_strategy(
    client: PartyId,
    crusher: PartyId,
    hauler: PartyId,
) -> impl Strategy<Value = Delivery> {
    (
        quantity(),
        prop::option::of(quantity()),
        prop::option::of(quantity()),
        prop::option::of(price()),
        price(),
        price(),
        instant(),
    )
        .prop_map(
            move |(qty, car, discount, client_price, source_price, haul_price, at)| Delivery {
                id: DeliveryId::new(),
                client_id: client,
                crusher_id: Some(crusher),
                supplier_id: None,
                contractor_id: Some(hauler),
                material: "سن1".to_string(),
                quantity: qty,
                car_volume: car,
                discount_volume: discount,
                price_per_meter: client_price,
                material_price_at_time: Some(source_price),
                contractor_charge_per_meter: Some(haul_price),
                created_at: at,
            },
        )
}

fn payment_strategy(party: PartyId) -> impl Strategy<Value = Payment> {
    (quantity(), instant()).prop_map(move |(amount, at)| Payment {
        id: PaymentId::new(),
        party_id: party,
        amount,
        method: "cash".to_string(),
        details: None,
        note: None,
        evidence_ref: None,
        paid_at: at,
    })
}

fn adjustment_strategy(party: PartyId) -> impl Strategy<Value = Adjustment> {
    (signed_amount(), instant()).prop_map(move |(amount, at)| Adjustment {
        id: AdjustmentId::new(),
        party_id: party,
        amount,
        method: None,
        reason: "correction".to_string(),
        created_at: at,
    })
}

/// Parties on both ends of every generated delivery.
#[derive(Debug, Clone)]
struct Cast {
    client: Party,
    crusher: Party,
    hauler: Party,
}

impl Cast {
    fn new() -> Self {
        Self {
            client: Party::new(PartyRole::Client, "Client"),
            crusher: Party::new(PartyRole::Crusher, "Crusher"),
            hauler: Party::new(PartyRole::Contractor, "Hauler"),
        }
    }

    fn inputs(&self) -> impl Strategy<Value = LedgerInputs> + use<> {
        let client = self.client.id;
        let crusher = self.crusher.id;
        let hauler = self.hauler.id;
        (
            prop::collection::vec(delivery_strategy(client, crusher, hauler), 0..15),
            prop::collection::vec(payment_strategy(client), 0..8),
            prop::collection::vec(payment_strategy(crusher), 0..8),
            prop::collection::vec(adjustment_strategy(client), 0..4),
        )
            .prop_map(|(deliveries, mut payments, crusher_payments, adjustments)| {
                payments.extend(crusher_payments);
                LedgerInputs {
                    deliveries,
                    payments,
                    adjustments,
                    ..LedgerInputs::default()
                }
            })
    }

    fn parties(&self) -> [&Party; 3] {
        [&self.client, &self.crusher, &self.hauler]
    }
}

/// Earliest and latest record date touching any party.
fn span(inputs: &LedgerInputs) -> Option<(NaiveDate, NaiveDate)> {
    let dates = inputs
        .deliveries
        .iter()
        .map(|d| d.created_at)
        .chain(inputs.payments.iter().map(|p| p.paid_at))
        .chain(inputs.adjustments.iter().map(|a| a.created_at))
        .map(|at| at.date_naive());
    let mut dates = dates.peekable();
    let first = *dates.peek()?;
    let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
    Some((min, max))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Property 1: Opening-only balances
    // =========================================================================

    /// *For any* role and opening balance lines with no other activity, the
    /// snapshot balance SHALL equal the opening total with the role's label.
    #[test]
    fn prop_opening_only_snapshot(
        role in role(),
        amounts in prop::collection::vec(signed_amount(), 0..4),
    ) {
        let party = Party::new(role, "Seeded");
        let opening_balances: Vec<OpeningBalance> = amounts
            .iter()
            .map(|amount| OpeningBalance {
                id: OpeningBalanceId::new(),
                party_id: party.id,
                project_id: Some(ProjectId::new()),
                amount: *amount,
                description: String::new(),
            })
            .collect();
        let inputs = LedgerInputs { opening_balances, ..LedgerInputs::default() };

        let service = LedgerService::default();
        let snapshot = service.compute_snapshot(&party, &inputs, &DateWindow::all());
        let expected: Decimal = amounts.iter().copied().sum();

        prop_assert_eq!(snapshot.opening_balance, expected);
        prop_assert_eq!(snapshot.balance, expected);
        prop_assert_eq!(snapshot.balance_label, BalanceResolver::label_for(role, expected));
        prop_assert!(snapshot.anomalies.is_empty());
    }

    // =========================================================================
    // Property 2: Net volume clamping
    // =========================================================================

    /// *For any* delivery, net volume SHALL never be negative.
    #[test]
    fn prop_net_volume_never_negative(
        delivery in delivery_strategy(PartyId::new(), PartyId::new(), PartyId::new()),
    ) {
        prop_assert!(net_volume(&delivery) >= Decimal::ZERO);
    }

    // =========================================================================
    // Property 6: Window limit case
    // =========================================================================

    /// *For any* inputs, a window from the earliest to the latest record date
    /// SHALL give the same snapshot as no window at all.
    #[test]
    fn prop_spanning_window_equals_full_history(
        (cast, inputs) in Just(Cast::new()).prop_flat_map(|cast| {
            let inputs = cast.inputs();
            (Just(cast), inputs)
        }),
    ) {
        let service = LedgerService::default();
        let window = match span(&inputs) {
            Some((from, to)) => DateWindow::new(Some(from), Some(to)).unwrap(),
            None => DateWindow::all(),
        };

        for party in cast.parties() {
            let full = service.compute_snapshot(party, &inputs, &DateWindow::all());
            let windowed = service.compute_snapshot(party, &inputs, &window);
            prop_assert_eq!(full, windowed);
        }
    }

    /// *For any* split date, the windows before and after it SHALL partition
    /// the full-history delivery and payment totals.
    #[test]
    fn prop_adjacent_windows_partition_totals(
        (cast, inputs) in Just(Cast::new()).prop_flat_map(|cast| {
            let inputs = cast.inputs();
            (Just(cast), inputs)
        }),
        split_day in 0i64..365i64,
    ) {
        let service = LedgerService::default();
        let split = base_time().date_naive() + Duration::days(split_day);
        let before = DateWindow::new(None, Some(split)).unwrap();
        let after = DateWindow::new(split.succ_opt(), None).unwrap();

        for party in cast.parties() {
            let full = service.aggregate(party, &inputs, &DateWindow::all()).totals;
            let a = service.aggregate(party, &inputs, &before).totals;
            let b = service.aggregate(party, &inputs, &after).totals;

            prop_assert_eq!(full.total_deliveries, a.total_deliveries + b.total_deliveries);
            prop_assert_eq!(full.total_payments, a.total_payments + b.total_payments);
            prop_assert_eq!(full.opening_balance, a.opening_balance);
        }
    }

    // =========================================================================
    // Property 7: Determinism
    // =========================================================================

    /// *For any* inputs, computing twice SHALL give identical snapshots.
    #[test]
    fn prop_snapshot_deterministic(
        (cast, inputs) in Just(Cast::new()).prop_flat_map(|cast| {
            let inputs = cast.inputs();
            (Just(cast), inputs)
        }),
    ) {
        let service = LedgerService::default();
        for party in cast.parties() {
            let first = service.compute_snapshot(party, &inputs, &DateWindow::all());
            let second = service.compute_snapshot(party, &inputs, &DateWindow::all());
            prop_assert_eq!(first, second);
        }
    }

    /// *For any* inputs, reversing record order SHALL not change the snapshot
    /// or the order of itemized lines.
    #[test]
    fn prop_input_order_irrelevant(
        (cast, inputs) in Just(Cast::new()).prop_flat_map(|cast| {
            let inputs = cast.inputs();
            (Just(cast), inputs)
        }),
    ) {
        let service = LedgerService::default();
        let mut reversed = inputs.clone();
        reversed.deliveries.reverse();
        reversed.payments.reverse();
        reversed.adjustments.reverse();

        for party in cast.parties() {
            let a = service.aggregate(party, &inputs, &DateWindow::all());
            let b = service.aggregate(party, &reversed, &DateWindow::all());
            prop_assert_eq!(a, b);
        }
    }
}
