use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a quantity cell from a packing list into a Decimal.
///
/// Handles formats like:
/// - "120.50"
/// - "67,89" (decimal comma)
/// - "52.00\n" (stray newlines/whitespace from cell extraction)
///
/// Returns None for anything that does not survive numeric coercion,
/// including negative values; the caller drops the record in that case
/// rather than emitting a zero-substituted quantity.
pub fn parse_quantity(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    let value = Decimal::from_str(&cleaned).ok()?;
    if value.is_sign_negative() {
        None
    } else {
        Some(value)
    }
}

/// True when the token is non-empty and consists only of ASCII digits.
pub fn is_numeric_token(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
