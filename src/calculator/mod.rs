//! Price Calculator - conversions between an amount of money and a weight at a
//! fixed price per kilogram.
//!
//! Results use `0.0` as the "no result" sentinel: any input that is not a
//! positive finite number (and any rate that is not) yields `0.0` instead of
//! an error.

mod format;

pub use format::{format_amount, format_price, format_weight, DEFAULT_CURRENCY_SYMBOL, NO_RESULT};

const GRAMS_PER_KG: f64 = 1000.0;

/// Weights offered as one-tap shortcuts, with their display labels.
pub const QUICK_WEIGHTS: [(&str, f64); 4] = [
    ("100gm", 100.0),
    ("250gm", 250.0),
    ("500gm", 500.0),
    ("1kg", 1000.0),
];

/// One row of [`quick_calculate`].
#[derive(Debug, Clone, PartialEq)]
pub struct QuickCalculation {
    pub label: &'static str,
    pub grams: f64,
    pub price: f64,
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Grams that `entered_price` buys at `price_per_kg`.
pub fn weight_from_price(entered_price: f64, price_per_kg: f64) -> f64 {
    if !is_positive(entered_price) || !is_positive(price_per_kg) {
        return 0.0;
    }
    entered_price / price_per_kg * GRAMS_PER_KG
}

/// Price of `entered_grams` at `price_per_kg`.
pub fn price_from_weight(entered_grams: f64, price_per_kg: f64) -> f64 {
    if !is_positive(entered_grams) || !is_positive(price_per_kg) {
        return 0.0;
    }
    entered_grams / GRAMS_PER_KG * price_per_kg
}

/// Prices for the [`QUICK_WEIGHTS`] fixtures, in order.
pub fn quick_calculate(price_per_kg: f64) -> Vec<QuickCalculation> {
    QUICK_WEIGHTS
        .iter()
        .map(|&(label, grams)| QuickCalculation {
            label,
            grams,
            price: grams / GRAMS_PER_KG * price_per_kg,
        })
        .collect()
}

/// Parse the numeric prefix of form input: leading whitespace is skipped and
/// trailing junk is ignored, so `"12.5kg"` is `12.5`. `None` when no digits
/// lead the text.
pub fn parse_amount(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    text.get(..end)?.parse().ok()
}

/// [`weight_from_price`] over raw form text.
pub fn weight_from_price_input(entered_price: &str, price_per_kg: f64) -> f64 {
    parse_amount(entered_price).map_or(0.0, |price| weight_from_price(price, price_per_kg))
}

/// [`price_from_weight`] over raw form text.
pub fn price_from_weight_input(entered_grams: &str, price_per_kg: f64) -> f64 {
    parse_amount(entered_grams).map_or(0.0, |grams| price_from_weight(grams, price_per_kg))
}
