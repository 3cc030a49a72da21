//! Tests for statement building and material grouping.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use haulbook_shared::types::{CapitalMovementId, DeliveryId, PartyId, PaymentId};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::builder::{StatementBuilder, group_by_material};
use super::types::{StatementMeta, StatementWindow};
use crate::ledger::{
    CapitalMovement, CapitalMovementKind, DateWindow, Delivery, DeliveryLine, DeliveryView,
    LedgerInputs, LedgerService, Payment, UNSPECIFIED_MATERIAL, derive_charge,
};
use crate::party::{Party, PartyRole};

fn at(month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, month, day, 9, 30, 0).unwrap()
}

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day).unwrap()
}

fn meta() -> StatementMeta {
    StatementMeta {
        currency: "EGP".to_string(),
        generated_at: Utc.with_ymd_and_hms(2025, 6, 30, 12, 0, 0).unwrap(),
    }
}

fn builder() -> StatementBuilder {
    StatementBuilder::new(LedgerService::default())
}

/// Crusher delivery: 20 m3 billed at 150, car 22 less 3 discount costed at 90.
fn delivery(
    client: PartyId,
    crusher: PartyId,
    material: &str,
    created_at: DateTime<Utc>,
) -> Delivery {
    Delivery {
        id: DeliveryId::new(),
        client_id: client,
        crusher_id: Some(crusher),
        supplier_id: None,
        contractor_id: None,
        material: material.to_string(),
        quantity: dec!(20),
        car_volume: Some(dec!(22)),
        discount_volume: Some(dec!(3)),
        price_per_meter: Some(dec!(150)),
        material_price_at_time: Some(dec!(90)),
        contractor_charge_per_meter: None,
        created_at,
    }
}

fn payment(party: PartyId, amount: Decimal, paid_at: DateTime<Utc>) -> Payment {
    Payment {
        id: PaymentId::new(),
        party_id: party,
        amount,
        method: "transfer".to_string(),
        details: None,
        note: None,
        evidence_ref: None,
        paid_at,
    }
}

fn line(material: &str, view: DeliveryView) -> DeliveryLine {
    let delivery = delivery(PartyId::new(), PartyId::new(), material, at(1, 1));
    let charge = derive_charge(&delivery, view);
    DeliveryLine { delivery, charge }
}

#[test]
fn test_client_statement_uses_billed_quantity() {
    let client = Party::new(PartyRole::Client, "Delta Builders");
    let crusher = Party::new(PartyRole::Crusher, "North Quarry");
    let inputs = LedgerInputs {
        deliveries: vec![
            delivery(client.id, crusher.id, "سن1", at(2, 3)),
            delivery(client.id, crusher.id, "سن 1", at(2, 10)),
            delivery(client.id, crusher.id, "رمل", at(2, 12)),
        ],
        payments: vec![payment(client.id, dec!(5000), at(2, 20))],
        ..LedgerInputs::default()
    };

    let statement = builder().build(&client, &inputs, &DateWindow::all(), meta());

    assert_eq!(statement.material_totals.len(), 2);
    let grade = statement
        .material_totals
        .iter()
        .find(|t| t.material == "سن 1")
        .unwrap();
    assert_eq!(grade.quantity, dec!(40));
    assert_eq!(grade.value, dec!(6000));
    assert_eq!(grade.count, 2);

    assert_eq!(statement.snapshot.total_deliveries, dec!(9000));
    assert_eq!(statement.snapshot.balance, dec!(4000));
    assert_eq!(statement.deliveries.len(), 3);
    assert_eq!(statement.payments.len(), 1);
    assert_eq!(statement.currency, "EGP");
}

#[test]
fn test_crusher_statement_uses_net_volume() {
    let client = Party::new(PartyRole::Client, "Delta Builders");
    let crusher = Party::new(PartyRole::Crusher, "North Quarry");
    let inputs = LedgerInputs {
        deliveries: vec![
            delivery(client.id, crusher.id, "سن2", at(3, 1)),
            delivery(client.id, crusher.id, "سن 2", at(3, 2)),
        ],
        ..LedgerInputs::default()
    };

    let statement = builder().build(&crusher, &inputs, &DateWindow::all(), meta());

    assert_eq!(statement.material_totals.len(), 1);
    let total = &statement.material_totals[0];
    assert_eq!(total.material, "سن 2");
    assert_eq!(total.quantity, dec!(38));
    assert_eq!(total.value, dec!(3420));
    assert_eq!(statement.snapshot.balance, dec!(3420));
}

#[test]
fn test_requested_window_is_echoed_and_filters() {
    let client = Party::new(PartyRole::Client, "Delta Builders");
    let crusher = PartyId::new();
    let inputs = LedgerInputs {
        deliveries: vec![
            delivery(client.id, crusher, "رمل", at(1, 15)),
            delivery(client.id, crusher, "رمل", at(2, 15)),
        ],
        ..LedgerInputs::default()
    };
    let window = DateWindow::new(Some(date(2, 1)), Some(date(2, 28))).unwrap();

    let statement = builder().build(&client, &inputs, &window, meta());

    assert_eq!(
        statement.window,
        StatementWindow::Requested {
            from: Some(date(2, 1)),
            to: Some(date(2, 28)),
        }
    );
    assert_eq!(statement.deliveries.len(), 1);
    assert_eq!(statement.snapshot.total_deliveries, dec!(3000));
}

#[test]
fn test_derived_window_spans_all_itemized_lists() {
    let client = Party::new(PartyRole::Client, "Delta Builders");
    let inputs = LedgerInputs {
        deliveries: vec![delivery(client.id, PartyId::new(), "رمل", at(3, 5))],
        payments: vec![
            payment(client.id, dec!(100), at(2, 27)),
            payment(client.id, dec!(100), at(4, 2)),
        ],
        ..LedgerInputs::default()
    };

    let statement = builder().build(&client, &inputs, &DateWindow::all(), meta());

    assert_eq!(
        statement.window,
        StatementWindow::Derived {
            from: date(2, 27),
            to: date(4, 2),
        }
    );
}

#[test]
fn test_empty_statement_is_all_data_and_settled() {
    let supplier = Party::new(PartyRole::Supplier, "Nile Sands");
    let inputs = LedgerInputs::default();
    let statement = builder().build(&supplier, &inputs, &DateWindow::all(), meta());

    assert_eq!(statement.window, StatementWindow::AllData);
    assert!(statement.material_totals.is_empty());
    assert_eq!(statement.snapshot.balance, Decimal::ZERO);
    assert_eq!(statement.snapshot.balance_label.key(), "settled");
}

#[test]
fn test_partner_statement_lists_capital_movements() {
    let partner = Party::new(PartyRole::Administration, "Partner A");
    let inputs = LedgerInputs {
        capital_movements: vec![CapitalMovement {
            id: CapitalMovementId::new(),
            party_id: partner.id,
            kind: CapitalMovementKind::Injection,
            amount: dec!(250000),
            note: Some("initial capital".to_string()),
            occurred_at: at(1, 2),
        }],
        payments: vec![payment(partner.id, dec!(20000), at(5, 1))],
        ..LedgerInputs::default()
    };

    let statement = builder().build(&partner, &inputs, &DateWindow::all(), meta());

    assert_eq!(statement.capital_movements.len(), 1);
    assert_eq!(statement.snapshot.balance, dec!(230000));
    assert_eq!(
        statement.window,
        StatementWindow::Derived {
            from: date(1, 2),
            to: date(5, 1),
        }
    );
}

#[test]
fn test_unpriced_lines_counted_per_material() {
    let mut unpriced = line("رمل", DeliveryView::Client);
    unpriced.delivery.price_per_meter = None;
    unpriced.charge = derive_charge(&unpriced.delivery, DeliveryView::Client);
    let lines = vec![unpriced, line("رمل", DeliveryView::Client)];

    let totals = group_by_material(&lines);

    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0].count, 2);
    assert_eq!(totals[0].unpriced, 1);
    assert_eq!(totals[0].value, dec!(3000));
}

#[test]
fn test_blank_material_grouped_as_unspecified() {
    let lines = vec![line("", DeliveryView::Client), line("  ", DeliveryView::Client)];
    let totals = group_by_material(&lines);

    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0].material, UNSPECIFIED_MATERIAL);
    assert_eq!(totals[0].count, 2);
}

// ============================================================================
// Property 5: Material grouping idempotence
// ============================================================================

fn material_name() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["سن1", "سن 1", "سن2", " سن 2 ", "سن3", "رمل", ""])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* mix of compact and spaced material names, grouping SHALL
    /// give the same buckets regardless of input order.
    #[test]
    fn prop_grouping_order_independent(
        names in prop::collection::vec(material_name(), 0..20),
    ) {
        let lines: Vec<DeliveryLine> = names
            .iter()
            .map(|name| line(name, DeliveryView::Source))
            .collect();
        let mut reversed = lines.clone();
        reversed.reverse();

        prop_assert_eq!(group_by_material(&lines), group_by_material(&reversed));
    }

    /// *For any* input, compact and spaced grades SHALL share one bucket whose
    /// count, quantity and value are the sums over its lines.
    #[test]
    fn prop_grouping_merges_variants(
        names in prop::collection::vec(material_name(), 1..20),
    ) {
        let lines: Vec<DeliveryLine> = names
            .iter()
            .map(|name| line(name, DeliveryView::Client))
            .collect();

        let totals = group_by_material(&lines);
        let materials: Vec<&str> = totals.iter().map(|t| t.material.as_str()).collect();

        prop_assert!(!materials.contains(&"سن1"));
        prop_assert_eq!(totals.iter().map(|t| t.count).sum::<usize>(), lines.len());
        let value: Decimal = totals.iter().map(|t| t.value).sum();
        let expected: Decimal = lines.iter().map(|l| l.charge.amount).sum();
        prop_assert_eq!(value, expected);
    }
}
