//! Currency conversion over a rate table

use super::rates::RateTable;

/// Round half up on the scaled value, so -0.125 becomes -0.12.
fn round_to_cents(value: f64) -> f64 {
    ((value * 100.0) + 0.5).floor() / 100.0
}

/// Converts `amount` from one currency to another through USD.
///
/// Identical codes return `amount` untouched. Unknown codes, or a table that
/// yields a non-finite result, also return `amount` untouched. The result is
/// rounded half up to two decimals.
pub fn convert(rates: &RateTable, amount: f64, from: &str, to: &str) -> f64 {
    if from == to {
        return amount;
    }

    let (Some(from_rate), Some(to_rate)) = (rates.get(from), rates.get(to)) else {
        return amount;
    };

    let amount_in_usd = amount / from_rate;
    let converted = round_to_cents(amount_in_usd * to_rate);
    if converted.is_finite() {
        converted
    } else {
        amount
    }
}

/// Units of `to` per one unit of `from`, or `None` if either code is unknown.
pub fn get_rate(rates: &RateTable, from: &str, to: &str) -> Option<f64> {
    if from == to {
        return Some(1.0);
    }
    Some(rates.get(to)? / rates.get(from)?)
}
