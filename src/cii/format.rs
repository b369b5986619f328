//! Fixed-point decimal and date formatting for CII literals.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Format a monetary amount with exactly two decimal places, half-up.
pub fn amount(value: Decimal) -> String {
    fixed(value, 2)
}

/// Format a unit price or quantity with four decimal places.
pub fn unit_amount(value: Decimal) -> String {
    fixed(value, 4)
}

/// CII date literal for the `format="102"` qualifier.
pub fn date(value: NaiveDate) -> String {
    value.format("%Y%m%d").to_string()
}

fn fixed(value: Decimal, places: u32) -> String {
    let rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    let mut s = rounded.to_string();
    match s.find('.') {
        Some(dot) => {
            let missing = places as usize - (s.len() - dot - 1);
            if missing > 0 {
                s.push_str(&"0".repeat(missing));
            }
        }
        None => {
            s.push('.');
            s.push_str(&"0".repeat(places as usize));
        }
    }
    s
}
