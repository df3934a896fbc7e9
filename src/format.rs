//! Display formatting for currency, ratios, and counts.

use crate::config::DISPLAY_UNIT;

/// `$123.4M`
pub fn millions(amount: f64) -> String {
    format!("${:.1}M", amount / DISPLAY_UNIT)
}

/// `2.35x`
pub fn ratio(value: f64) -> String {
    format!("{:.2}x", value)
}

/// `1.5x` (threshold labels)
pub fn threshold(value: f64) -> String {
    format!("{:.1}x", value)
}

/// `3.25%` from a fraction.
pub fn percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// Rounded integer with thousands separators: `1,234,567`.
pub fn grouped(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if rounded < 0.0 {
        out.insert(0, '-');
    }
    out
}

/// `$1,234`
pub fn dollars(value: f64) -> String {
    let s = grouped(value);
    match s.strip_prefix('-') {
        Some(rest) => format!("-${rest}"),
        None => format!("${s}"),
    }
}

/// Round to `places` decimals, ties to even.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}
