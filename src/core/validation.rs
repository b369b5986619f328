//! Cross-field monetary consistency checks.
//!
//! Checking is fail-fast: invariants are evaluated in a fixed order and the
//! first violation aborts with that single message. The error still carries a
//! message list so callers aggregate uniformly.

use rust_decimal::{Decimal, RoundingStrategy};

use super::error::ZugferdError;
use super::types::{Invoice, LineItem, parse_amount};

/// Half-up rounding to two decimal places, as used by all invariants.
fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn fail(message: String) -> Result<(), ZugferdError> {
    Err(ZugferdError::Validation(vec![message]))
}

/// Validate the invoice-level arithmetic identities, then every line item.
///
/// Order: stated tax vs. calculated tax, grand total, line-sum vs. basis,
/// then each line's own checks (see [`validate_line`]).
pub fn validate_invoice(invoice: &Invoice) -> Result<(), ZugferdError> {
    let basis = parse_amount("basis_amount", &invoice.basis_amount)?;
    let percent = parse_amount("tax_percent", &invoice.tax_percent)?;
    let tax = parse_amount("tax_amount", &invoice.tax_amount)?;
    let grand_total = parse_amount("grand_total_amount", &invoice.grand_total_amount)?;

    let calculated_tax = round2(basis * percent / Decimal::ONE_HUNDRED);
    if tax != calculated_tax {
        return fail(format!(
            "tax amount {tax} does not match {calculated_tax} calculated from basis {basis} at {percent}%"
        ));
    }

    let calculated_total = basis + tax;
    if grand_total != calculated_total {
        return fail(format!(
            "grand total {grand_total} does not match basis {basis} plus tax {tax}"
        ));
    }

    let mut line_sum = Decimal::ZERO;
    for line in &invoice.line_items {
        line_sum += parse_amount("charge_amount", &line.charge_amount)?;
    }
    if line_sum != basis {
        return fail(format!(
            "line item charge amounts sum to {line_sum}, basis amount is {basis}"
        ));
    }

    for (index, line) in invoice.line_items.iter().enumerate() {
        validate_line(line, index + 1)?;
    }

    Ok(())
}

/// Validate one line item's arithmetic. `number` is the 1-based line number
/// used in messages.
///
/// Order: charge vs. net × quantity, net vs. gross − discount (only when a
/// discount is set), stated line tax vs. calculated.
pub fn validate_line(line: &LineItem, number: usize) -> Result<(), ZugferdError> {
    let quantity = parse_amount("quantity", &line.quantity)?;
    let net = parse_amount("net_amount", &line.net_amount)?;
    let charge = parse_amount("charge_amount", &line.charge_amount)?;

    let calculated_charge = round2(net * quantity);
    if charge != calculated_charge {
        return fail(format!(
            "line {number}: charge amount {charge} does not match {calculated_charge} calculated from net {net} times quantity {quantity}"
        ));
    }

    if let Some(discount) = &line.discount_amount {
        let discount = parse_amount("discount_amount", discount)?;
        let gross = parse_amount("gross_amount", &line.gross_amount)?;
        let calculated_net = round2(gross - discount);
        if net != calculated_net {
            return fail(format!(
                "line {number}: net amount {net} does not match gross {gross} minus discount {discount}"
            ));
        }
    }

    let percent = parse_amount("tax_percent", &line.tax_percent)?;
    let tax = parse_amount("tax_amount", &line.tax_amount)?;
    let calculated_tax = round2(charge * percent / Decimal::ONE_HUNDRED);
    if tax != calculated_tax {
        return fail(format!(
            "line {number}: tax amount {tax} does not match {calculated_tax} calculated from charge {charge} at {percent}%"
        ));
    }

    Ok(())
}
