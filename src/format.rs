// src/format.rs
//! fa-IR currency rendering for replies and logs: Persian digits, U+066C
//! thousands grouping, `ریال` suffix, no fraction digits.

const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];
const THOUSANDS_SEPARATOR: char = '\u{066C}';

/// Render an IRR amount the way the dashboard does. Amounts in this domain
/// are non-negative; the saturating cast floors anything below zero.
pub fn format_currency(value: f64) -> String {
    let amount = value.round() as u64;
    let digits = amount.to_string();

    let mut out = String::with_capacity(digits.len() * 3 + 8);
    for (i, ch) in digits.char_indices() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(THOUSANDS_SEPARATOR);
        }
        out.push(PERSIAN_DIGITS[(ch as u8 - b'0') as usize]);
    }
    out.push(' ');
    out.push_str("ریال");
    out
}
