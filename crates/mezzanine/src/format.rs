//! Norwegian (nb-NO) number formatting for prices and measurements.
//!
//! Thousands are grouped with a no-break space (U+00A0), decimals are
//! separated by a comma and negative numbers use the minus sign (U+2212).

/// Thousands separator.
const GROUP_SEPARATOR: char = '\u{a0}';
const DECIMAL_SEPARATOR: char = ',';
const MINUS_SIGN: char = '\u{2212}';

/// Format a price rounded to whole kroner, e.g. `203 000`.
///
/// Halves round up, towards positive infinity.
pub fn format_price(price: f64) -> String {
    format_number((price + 0.5).floor(), 0)
}

/// Format `value` with exactly `decimals` fraction digits, e.g. `1 234,57`.
pub fn format_number(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 {
            "∞".to_string()
        } else {
            format!("{MINUS_SIGN}∞")
        };
    }

    let fixed = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match fixed.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + integer.len() / 3 + 1);
    let is_zero = fixed.bytes().all(|b| b == b'0' || b == b'.');
    if value < 0.0 && !is_zero {
        out.push(MINUS_SIGN);
    }
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(digit);
    }
    if let Some(fraction) = fraction {
        out.push(DECIMAL_SEPARATOR);
        out.push_str(fraction);
    }
    out
}
