//! Currency formatting in lakh/crore notation
//!
//! One implementation shared by every consumer of the engine (CLI, HTTP
//! adapter, preview renderers) so displayed figures always agree with the
//! calculated ones.

use crate::rounding::round_half_up;

/// One crore (1,00,00,000)
pub const CRORE: f64 = 10_000_000.0;

/// One lakh (1,00,000)
pub const LAKH: f64 = 100_000.0;

/// Format an amount the way the result cards show it
///
/// - `>= 1 Cr` -> `"1.25 Cr"`
/// - `>= 1 L`  -> `"4.07 L"`
/// - otherwise a whole number with Indian digit grouping (`"99,999"`)
///
/// Negative amounts keep their sign in front of the number.
pub fn format_inr(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }

    // Thresholds apply to the whole-unit amount that would be displayed.
    let magnitude = round_half_up(value.abs());
    let sign = if value < 0.0 && magnitude > 0.0 { "-" } else { "" };

    if magnitude >= CRORE {
        format!("{sign}{:.2} Cr", magnitude / CRORE)
    } else if magnitude >= LAKH {
        format!("{sign}{:.2} L", magnitude / LAKH)
    } else {
        format!("{sign}{}", group_indian(magnitude as u64))
    }
}

/// [`format_inr`] with a rupee sign
pub fn format_rupees(value: f64) -> String {
    let formatted = format_inr(value);
    match formatted.strip_prefix('-') {
        Some(rest) => format!("-₹{rest}"),
        None => format!("₹{formatted}"),
    }
}

/// Group digits as 12,34,56,789: the last three together, then pairs
pub fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
