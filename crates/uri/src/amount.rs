use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Formats a user-typed amount to exactly two decimal places.
///
/// Returns `None` (omit the `am` parameter) when the text is blank, not a
/// plain decimal number, not positive after rounding, or above `max_amount`.
/// Rounding is half away from zero on the exact decimal value, so `"99.999"`
/// always becomes `"100.00"` and `"1.005"` becomes `"1.01"`.
///
/// ```rust
/// use rust_decimal::Decimal;
/// use uri::format_amount;
///
/// let ceiling = Decimal::new(100_000, 0);
/// assert_eq!(format_amount("49.5", ceiling).as_deref(), Some("49.50"));
/// assert_eq!(format_amount("0", ceiling), None);
/// assert_eq!(format_amount("250000", ceiling), None);
/// ```
pub fn format_amount(raw: &str, max_amount: Decimal) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let value = Decimal::from_str(trimmed).ok()?;
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded <= Decimal::ZERO || rounded > max_amount {
        return None;
    }

    rounded.rescale(2);
    Some(rounded.to_string())
}
