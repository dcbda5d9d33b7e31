/// Largest integer magnitude exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_I64_INT: i64 = 9_007_199_254_740_991;

/// Converts an `i64` to the nearest `f64`.
///
/// Values beyond [`MAX_SAFE_I64_INT`] in magnitude round to the nearest
/// representable float.
///
/// ## Example
/// ```
/// use reckon::util::num::{MAX_SAFE_I64_INT, i64_to_f64};
///
/// assert_eq!(i64_to_f64(42), 42.0);
/// assert_eq!(i64_to_f64(MAX_SAFE_I64_INT) as i64, MAX_SAFE_I64_INT);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn i64_to_f64(value: i64) -> f64 {
    value as f64
}

/// Converts a `u64` to the nearest `f64`.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn u64_to_f64(value: u64) -> f64 {
    value as f64
}

/// Returns `true` for text made of an optional sign followed by ASCII digits.
///
/// ## Example
/// ```
/// use reckon::util::num::is_integer_text;
///
/// assert!(is_integer_text("-17"));
/// assert!(!is_integer_text("1.5"));
/// assert!(!is_integer_text("1e3"));
/// ```
#[must_use]
pub fn is_integer_text(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Floored integer modulo: the result takes the sign of the divisor.
///
/// Returns `None` when `divisor` is zero or the operation overflows.
///
/// ## Example
/// ```
/// use reckon::util::num::floor_mod_i64;
///
/// assert_eq!(floor_mod_i64(-7, 3), Some(2));
/// assert_eq!(floor_mod_i64(7, -3), Some(-2));
/// assert_eq!(floor_mod_i64(7, 0), None);
/// ```
#[must_use]
pub const fn floor_mod_i64(dividend: i64, divisor: i64) -> Option<i64> {
    match dividend.checked_rem(divisor) {
        Some(r) if r != 0 && (r < 0) != (divisor < 0) => Some(r + divisor),
        other => other,
    }
}

/// Floored float modulo: the result takes the sign of the divisor.
///
/// ## Example
/// ```
/// use reckon::util::num::floor_mod_f64;
///
/// assert_eq!(floor_mod_f64(-7.5, 2.0), 0.5);
/// assert_eq!(floor_mod_f64(7.5, -2.0), -0.5);
/// ```
#[must_use]
pub fn floor_mod_f64(dividend: f64, divisor: f64) -> f64 {
    let r = dividend % divisor;
    if r != 0.0 && (r < 0.0) != (divisor < 0.0) {
        r + divisor
    } else {
        r
    }
}
