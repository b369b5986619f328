//! Property-based tests: arithmetic identities over generated invoices and
//! pruning idempotence over generated trees.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};
use zugferd_cii::cii::{Mode, Version, XmlNode, format, serialize};
use zugferd_cii::core::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn party(name: &str) -> Party {
    Party {
        name: name.into(),
        street: Some("Hauptstraße 1".into()),
        postal_code: Some("10115".into()),
        city: Some("Berlin".into()),
        country_code: Some("DE".into()),
        vat_id: Some("DE123456789".into()),
    }
}

/// Build an arithmetically consistent invoice from (net, quantity) pairs and
/// a shared tax rate.
fn consistent_invoice(lines: &[(Decimal, Decimal)], percent: Decimal) -> Invoice {
    let items: Vec<LineItem> = lines
        .iter()
        .map(|(net, quantity)| {
            let charge = round2(net * quantity);
            LineItem {
                name: "Position".into(),
                description: None,
                quantity: quantity.to_string(),
                unit: "piece".into(),
                gross_amount: format::amount(*net),
                net_amount: format::amount(*net),
                tax_category: "standard".into(),
                tax_percent: percent.to_string(),
                tax_amount: format::amount(round2(charge * percent / Decimal::ONE_HUNDRED)),
                discount_amount: None,
                discount_reason: None,
                charge_amount: format::amount(charge),
                origin_country: "DE".into(),
                currency: "EUR".into(),
                buyer_item_id: None,
                period: None,
                note: None,
                reference_id: None,
            }
        })
        .collect();

    let basis: Decimal = lines
        .iter()
        .map(|(net, quantity)| round2(net * quantity))
        .sum();
    let tax = round2(basis * percent / Decimal::ONE_HUNDRED);
    let grand_total = basis + tax;

    Invoice {
        id: "R2024-PROP".into(),
        issue_date: date(2024, 6, 15),
        seller: party("ACME GmbH"),
        buyer: party("Kunde AG"),
        recipient: None,
        line_items: items,
        currency: "EUR".into(),
        payment_type: Some("sepa_transfer".into()),
        payment_text: None,
        iban: Some("DE89370400440532013000".into()),
        bic: None,
        account_name: None,
        tax_category: "standard".into(),
        tax_percent: percent.to_string(),
        tax_amount: format::amount(tax),
        tax_exemption_reason: None,
        basis_amount: format::amount(basis),
        grand_total_amount: format::amount(grand_total),
        due_amount: format::amount(grand_total),
        paid_amount: "0.00".into(),
        buyer_reference: None,
        payment_description: None,
        payment_status: None,
        payment_due_date: Some(date(2024, 7, 15)),
        header_text: None,
        footer_text: None,
        project_id: None,
        project_name: None,
        period: None,
        kind: None,
    }
}

/// Net price between 0.01 and 99999.99.
fn arb_net() -> impl Strategy<Value = Decimal> {
    (1u64..10_000_000u64).prop_map(|cents| Decimal::new(cents as i64, 2))
}

/// Quantity between 1 and 100.
fn arb_quantity() -> impl Strategy<Value = Decimal> {
    (1u32..=100u32).prop_map(Decimal::from)
}

fn arb_percent() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        Just(Decimal::ZERO),
        Just(Decimal::from(7)),
        Just(Decimal::from(19)),
    ]
}

fn arb_lines() -> impl Strategy<Value = Vec<(Decimal, Decimal)>> {
    proptest::collection::vec((arb_net(), arb_quantity()), 1..5)
}

proptest! {
    #[test]
    fn consistent_invoices_validate(lines in arb_lines(), percent in arb_percent()) {
        let invoice = consistent_invoice(&lines, percent);
        prop_assert!(validate_invoice(&invoice).is_ok());
    }

    #[test]
    fn consistent_invoices_serialize_for_all_configurations(
        lines in arb_lines(),
        percent in arb_percent(),
    ) {
        let invoice = consistent_invoice(&lines, percent);
        for (version, mode) in [
            (Version::V1, Mode::Standard),
            (Version::V2, Mode::Standard),
            (Version::V3, Mode::Standard),
            (Version::V2, Mode::XRechnung),
            (Version::V3, Mode::XRechnung),
        ] {
            let xml = serialize(&invoice, version, mode, false).unwrap();
            let expected = format!(
                "<ram:GrandTotalAmount>{}</ram:GrandTotalAmount>",
                invoice.grand_total_amount
            );
            prop_assert!(xml.contains(&expected));
        }
    }

    #[test]
    fn perturbed_tax_amount_fails_validation(
        lines in arb_lines(),
        offset_cents in 1i64..100,
    ) {
        // 19% keeps a nonzero tax to perturb
        let mut invoice = consistent_invoice(&lines, Decimal::from(19));
        let stated = invoice.tax_amount.parse::<Decimal>().unwrap();
        invoice.tax_amount = format::amount(stated + Decimal::new(offset_cents, 2));
        match validate_invoice(&invoice).unwrap_err() {
            ZugferdError::Validation(messages) => {
                prop_assert_eq!(messages.len(), 1);
                prop_assert!(messages[0].contains("tax amount"));
            }
            other => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    #[test]
    fn amounts_always_carry_two_decimals(cents in -10_000_000i64..10_000_000) {
        let formatted = format::amount(Decimal::new(cents, 2));
        let (_, decimals) = formatted.split_once('.').unwrap();
        prop_assert_eq!(decimals.len(), 2);
    }
}

// ── Pruning ────────────────────────────────────────────────────────────────

fn arb_tree() -> impl Strategy<Value = XmlNode> {
    let leaf = ("[a-z]{1,8}", proptest::option::of("[a-z ]{0,6}")).prop_map(|(name, text)| {
        match text {
            Some(t) => XmlNode::text(name, t),
            None => XmlNode::element(name),
        }
    });
    leaf.prop_recursive(4, 32, 4, |inner| {
        ("[a-z]{1,8}", proptest::collection::vec(inner, 0..4)).prop_map(|(name, children)| {
            let mut node = XmlNode::element(name);
            for child in children {
                node.add(child);
            }
            node
        })
    })
}

proptest! {
    #[test]
    fn pruning_is_idempotent(tree in arb_tree()) {
        let mut once = tree;
        once.prune_empty();
        let mut twice = once.clone();
        twice.prune_empty();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn pruned_trees_serialize(tree in arb_tree()) {
        let mut tree = tree;
        tree.prune_empty();
        prop_assert!(tree.to_xml().is_ok());
    }
}
