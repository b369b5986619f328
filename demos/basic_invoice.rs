//! End-to-end example: construct an invoice and serialize it for every
//! supported (version, mode) combination.
//!
//! Run with: `cargo run --example basic_invoice`

use chrono::NaiveDate;
use zugferd_cii::cii::{Mode, Version, serialize};
use zugferd_cii::core::*;

fn main() {
    let invoice = Invoice {
        id: "R2024-001".into(),
        issue_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        seller: Party {
            name: "ACME GmbH".into(),
            street: Some("Friedrichstraße 123".into()),
            postal_code: Some("10115".into()),
            city: Some("Berlin".into()),
            country_code: Some("DE".into()),
            vat_id: Some("DE123456789".into()),
        },
        buyer: Party {
            name: "Kunde AG".into(),
            street: Some("Marienplatz 1".into()),
            postal_code: Some("80331".into()),
            city: Some("München".into()),
            country_code: Some("DE".into()),
            vat_id: None,
        },
        recipient: None,
        line_items: vec![LineItem {
            name: "Beratung".into(),
            description: Some("Projektberatung Januar".into()),
            quantity: "1".into(),
            unit: "hour".into(),
            gross_amount: "100.00".into(),
            net_amount: "100.00".into(),
            tax_category: "standard".into(),
            tax_percent: "19".into(),
            tax_amount: "19.00".into(),
            discount_amount: None,
            discount_reason: None,
            charge_amount: "100.00".into(),
            origin_country: "DE".into(),
            currency: "EUR".into(),
            buyer_item_id: None,
            period: None,
            note: None,
            reference_id: None,
        }],
        currency: "EUR".into(),
        payment_type: Some("sepa_transfer".into()),
        payment_text: Some("Überweisung auf das unten genannte Konto".into()),
        iban: Some("DE89370400440532013000".into()),
        bic: Some("COBADEFFXXX".into()),
        account_name: Some("ACME GmbH".into()),
        tax_category: "standard".into(),
        tax_percent: "19".into(),
        tax_amount: "19.00".into(),
        tax_exemption_reason: None,
        basis_amount: "100.00".into(),
        grand_total_amount: "119.00".into(),
        due_amount: "119.00".into(),
        paid_amount: "0.00".into(),
        buyer_reference: Some("04011000-12345-03".into()),
        payment_description: Some("Zahlbar innerhalb von 30 Tagen".into()),
        payment_status: None,
        payment_due_date: NaiveDate::from_ymd_opt(2024, 2, 14),
        header_text: Some("Vielen Dank für Ihren Auftrag".into()),
        footer_text: None,
        project_id: None,
        project_name: None,
        period: None,
        kind: None,
    };

    for (version, mode) in [
        (Version::V1, Mode::Standard),
        (Version::V2, Mode::Standard),
        (Version::V2, Mode::XRechnung),
        (Version::V3, Mode::Standard),
        (Version::V3, Mode::XRechnung),
    ] {
        match serialize(&invoice, version, mode, false) {
            Ok(xml) => {
                println!(
                    "=== version {} / {} ({} bytes) ===",
                    version.number(),
                    mode.as_str(),
                    xml.len()
                );
                println!("{xml}\n");
            }
            Err(err) => eprintln!("serialization failed: {err}"),
        }
    }
}
