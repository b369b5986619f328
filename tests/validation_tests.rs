use chrono::NaiveDate;
use zugferd_cii::core::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn party(name: &str) -> Party {
    Party {
        name: name.into(),
        street: Some("Friedrichstraße 123".into()),
        postal_code: Some("10115".into()),
        city: Some("Berlin".into()),
        country_code: Some("DE".into()),
        vat_id: Some("DE123456789".into()),
    }
}

fn line(net: &str, quantity: &str, charge: &str, tax: &str) -> LineItem {
    LineItem {
        name: "Beratung".into(),
        description: None,
        quantity: quantity.into(),
        unit: "hour".into(),
        gross_amount: net.into(),
        net_amount: net.into(),
        tax_category: "standard".into(),
        tax_percent: "19".into(),
        tax_amount: tax.into(),
        discount_amount: None,
        discount_reason: None,
        charge_amount: charge.into(),
        origin_country: "DE".into(),
        currency: "EUR".into(),
        buyer_item_id: None,
        period: None,
        note: None,
        reference_id: None,
    }
}

/// The reference scenario: 100.00 basis, 19% VAT, one line.
fn invoice() -> Invoice {
    Invoice {
        id: "R2024-001".into(),
        issue_date: date(2024, 1, 15),
        seller: party("ACME GmbH"),
        buyer: party("Kunde AG"),
        recipient: None,
        line_items: vec![line("100.00", "1", "100.00", "19.00")],
        currency: "EUR".into(),
        payment_type: Some("sepa_transfer".into()),
        payment_text: None,
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
        payment_due_date: Some(date(2024, 2, 14)),
        header_text: None,
        footer_text: None,
        project_id: None,
        project_name: None,
        period: None,
        kind: None,
    }
}

fn messages(err: ZugferdError) -> Vec<String> {
    match err {
        ZugferdError::Validation(messages) => messages,
        other => panic!("expected validation error, got: {other}"),
    }
}

#[test]
fn consistent_invoice_passes() {
    assert!(validate_invoice(&invoice()).is_ok());
}

#[test]
fn deviating_tax_amount_is_reported() {
    let mut inv = invoice();
    inv.tax_amount = "20.00".into();
    let messages = messages(validate_invoice(&inv).unwrap_err());
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("tax amount 20.00"));
    assert!(messages[0].contains("does not match"));
    assert!(messages[0].contains("calculated from basis 100.00 at 19%"));
}

#[test]
fn validation_stops_at_first_violation() {
    // both the tax amount and the grand total are wrong — only the tax
    // check may report
    let mut inv = invoice();
    inv.tax_amount = "20.00".into();
    inv.grand_total_amount = "999.99".into();
    let messages = messages(validate_invoice(&inv).unwrap_err());
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("tax amount"));
    assert!(!messages[0].contains("grand total"));
}

#[test]
fn deviating_grand_total_is_reported() {
    let mut inv = invoice();
    inv.grand_total_amount = "120.00".into();
    let messages = messages(validate_invoice(&inv).unwrap_err());
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("grand total 120.00"));
}

#[test]
fn line_sum_must_match_basis() {
    let mut inv = invoice();
    inv.line_items.push(line("50.00", "1", "50.00", "9.50"));
    let messages = messages(validate_invoice(&inv).unwrap_err());
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("sum to 150.00"));
    assert!(messages[0].contains("basis amount is 100.00"));
}

#[test]
fn line_charge_must_match_net_times_quantity() {
    let mut inv = invoice();
    inv.line_items[0].quantity = "2".into();
    inv.basis_amount = "100.00".into();
    let messages = messages(validate_invoice(&inv).unwrap_err());
    assert!(messages[0].contains("line 1"));
    assert!(messages[0].contains("charge amount 100.00"));
}

#[test]
fn line_numbers_are_one_based_in_messages() {
    let mut inv = invoice();
    inv.basis_amount = "150.00".into();
    inv.tax_amount = "28.50".into();
    inv.grand_total_amount = "178.50".into();
    inv.due_amount = "178.50".into();
    let mut second = line("50.00", "1", "50.00", "9.50");
    second.tax_amount = "1.00".into();
    inv.line_items.push(second);
    let messages = messages(validate_invoice(&inv).unwrap_err());
    assert!(messages[0].contains("line 2"));
}

#[test]
fn discount_requires_net_gross_consistency() {
    let mut item = line("90.00", "1", "90.00", "17.10");
    item.gross_amount = "100.00".into();
    item.discount_amount = Some("10.00".into());
    item.discount_reason = Some("Treuerabatt".into());
    assert!(validate_line(&item, 1).is_ok());

    item.discount_amount = Some("5.00".into());
    let messages = messages(validate_line(&item, 1).unwrap_err());
    assert!(messages[0].contains("net amount 90.00"));
    assert!(messages[0].contains("discount 5.00"));
}

#[test]
fn rounding_is_half_up() {
    // 33.33 × 3 = 99.99; 19% of 99.99 = 18.9981 → 19.00
    let item = line("33.33", "3", "99.99", "19.00");
    assert!(validate_line(&item, 1).is_ok());

    let mut inv = invoice();
    inv.line_items = vec![line("33.33", "3", "99.99", "19.00")];
    inv.basis_amount = "99.99".into();
    inv.tax_amount = "19.00".into();
    inv.grand_total_amount = "118.99".into();
    inv.due_amount = "118.99".into();
    assert!(validate_invoice(&inv).is_ok());
}

#[test]
fn malformed_amount_is_fatal_not_a_validation_failure() {
    let mut inv = invoice();
    inv.basis_amount = "hundert".into();
    match validate_invoice(&inv).unwrap_err() {
        ZugferdError::Amount { field, value } => {
            assert_eq!(field, "basis_amount");
            assert_eq!(value, "hundert");
        }
        other => panic!("expected amount error, got: {other}"),
    }
}

#[test]
fn malformed_line_amount_is_fatal() {
    let mut inv = invoice();
    inv.line_items[0].charge_amount = "1O0.00".into();
    assert!(matches!(
        validate_invoice(&inv).unwrap_err(),
        ZugferdError::Amount { .. }
    ));
}

#[test]
fn zero_rate_invoice_is_consistent() {
    let mut inv = invoice();
    inv.tax_category = "reverse_charge".into();
    inv.tax_percent = "0".into();
    inv.tax_amount = "0.00".into();
    inv.grand_total_amount = "100.00".into();
    inv.due_amount = "100.00".into();
    inv.line_items[0].tax_percent = "0".into();
    inv.line_items[0].tax_amount = "0.00".into();
    assert!(validate_invoice(&inv).is_ok());
}
