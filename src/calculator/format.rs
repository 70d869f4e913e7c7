//! Display formatting for calculator results. Two decimal places, currency as
//! a plain symbol prefix.

/// Taka sign, the symbol used unless configured otherwise.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "৳";

/// What to show instead of a zero-sentinel result.
pub const NO_RESULT: &str = "-";

/// `value` with two decimals.
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

/// `"250.00gm"`, or `None` for the zero sentinel.
pub fn format_weight(grams: f64) -> Option<String> {
    (grams > 0.0).then(|| format!("{}gm", format_amount(grams)))
}

/// `"৳30.00"` style, or `None` for the zero sentinel.
pub fn format_price(symbol: &str, price: f64) -> Option<String> {
    (price > 0.0).then(|| format!("{}{}", symbol, format_amount(price)))
}
