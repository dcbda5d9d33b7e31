use std::{
    cmp::Ordering,
    fmt,
    ops::{Add, Mul, Neg, Sub},
    str::FromStr,
};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::error::NumberError;

/// Significant digits shown for quotients without a terminating expansion.
pub const DISPLAY_PRECISION: usize = 28;
/// Largest power of ten a decimal literal may carry in its exponent.
pub const MAX_LITERAL_SCALE: u64 = 4_096;
/// Largest value the evaluator computes, in bits of numerator and denominator
/// together. About 19,700 decimal digits.
pub const MAX_MAGNITUDE_BITS: u64 = 1 << 16;

/// An exact base-10 number.
///
/// Values are read from their decimal digits and combined without rounding:
/// sums, differences, products and quotients are exact. Only the textual form
/// rounds, and only for quotients whose expansion never terminates (such as
/// `1/3`), which are shown with [`DISPLAY_PRECISION`] significant digits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExactDecimal(BigRational);

impl ExactDecimal {
    /// Converts a float through its shortest round-trip text, so `0.1_f64`
    /// becomes exactly `0.1`.
    ///
    /// Returns `None` for NaN and infinities.
    ///
    /// # Example
    /// ```
    /// use reckon::ExactDecimal;
    ///
    /// let tenth = ExactDecimal::from_f64(0.1).unwrap();
    /// assert_eq!(tenth, "0.1".parse::<ExactDecimal>().unwrap());
    /// assert!(ExactDecimal::from_f64(f64::NAN).is_none());
    /// ```
    #[must_use]
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        format!("{value:e}").parse().ok()
    }

    /// Converts to the nearest float, or `None` when the value is outside the
    /// float range.
    #[must_use]
    pub fn to_f64(&self) -> Option<f64> {
        self.to_string()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }

    /// Returns the value as an `i64` when it is an integer that fits.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        if self.0.is_integer() {
            self.0.numer().to_i64()
        } else {
            None
        }
    }

    /// Returns `true` when the value has no fractional part.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    /// Returns `true` for zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns `true` for values below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Bits needed to store the numerator and denominator together.
    #[must_use]
    pub fn magnitude_bits(&self) -> u64 {
        self.0.numer().bits() + self.0.denom().bits()
    }

    /// Exact quotient, or `None` when dividing by zero.
    #[must_use]
    pub fn checked_div(&self, rhs: &Self) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        Some(Self(&self.0 / &rhs.0))
    }

    /// Truncated remainder, or `None` when dividing by zero.
    ///
    /// The result carries the sign of the dividend: `-7 % 2` is `-1`.
    ///
    /// # Example
    /// ```
    /// use reckon::ExactDecimal;
    ///
    /// let a: ExactDecimal = "-7".parse().unwrap();
    /// let b: ExactDecimal = "2".parse().unwrap();
    /// assert_eq!(a.checked_rem(&b).unwrap().to_string(), "-1");
    /// ```
    #[must_use]
    pub fn checked_rem(&self, rhs: &Self) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        let quotient = (&self.0 / &rhs.0).trunc();
        Some(Self(&self.0 - &rhs.0 * quotient))
    }

    /// Raises to an integral power.
    ///
    /// The numerator and denominator are raised separately; powers of a
    /// reduced fraction are already reduced. Returns `None` when zero is raised
    /// to a negative power or the exponent exceeds `u32`. Callers bound the
    /// size of the result with [`ExactDecimal::magnitude_bits`].
    ///
    /// # Example
    /// ```
    /// use reckon::ExactDecimal;
    ///
    /// let base: ExactDecimal = "-1.5".parse().unwrap();
    /// assert_eq!(base.checked_powi(3).unwrap().to_string(), "-3.375");
    /// assert_eq!(base.checked_powi(-2).unwrap().to_string(), "0.4444444444444444444444444444");
    /// ```
    #[must_use]
    pub fn checked_powi(&self, exponent: i64) -> Option<Self> {
        if exponent < 0 && self.is_zero() {
            return None;
        }
        let e = u32::try_from(exponent.unsigned_abs()).ok()?;
        let power = BigRational::new_raw(self.0.numer().pow(e), self.0.denom().pow(e));
        Some(Self(if exponent < 0 { power.recip() } else { power }))
    }

    /// Renders a non-terminating value rounded half-to-even to `precision`
    /// significant digits.
    fn fmt_rounded(&self, f: &mut fmt::Formatter<'_>, precision: usize) -> fmt::Result {
        let numer = self.0.numer().abs();
        let denom = self.0.denom();
        let exponent = decimal_exponent(&numer, denom);
        // Digits kept to the right of the decimal point.
        let scale = i64::try_from(precision).unwrap_or(i64::MAX)
                                            .saturating_sub(1)
                                            .saturating_sub(exponent);

        let scaled = if scale >= 0 {
            round_half_even(&(numer * pow10(scale.unsigned_abs())), denom)
        } else {
            round_half_even(&numer, &(denom * pow10(scale.unsigned_abs())))
        };

        if self.is_negative() {
            f.write_str("-")?;
        }
        if scale <= 0 {
            let zeros = "0".repeat(usize::try_from(scale.unsigned_abs()).unwrap_or(0));
            return write!(f, "{scaled}{zeros}");
        }
        f.write_str(&scaled_to_decimal(&scaled, usize::try_from(scale).unwrap_or(0)))
    }
}

impl FromStr for ExactDecimal {
    type Err = NumberError;

    /// Reads decimal text such as `-12.5`, `.5`, `5.` or `1.5e-3` exactly.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || NumberError::Invalid(text.to_string());

        let (negative, unsigned) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };
        let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
            Some(idx) => (&unsigned[..idx],
                          unsigned[idx + 1..].parse::<i64>().map_err(|_| invalid())?),
            None => (unsigned, 0),
        };
        let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let digits = format!("{whole}{fraction}");
        let numer = BigInt::parse_bytes(digits.as_bytes(), 10).ok_or_else(invalid)?;
        let fraction_len = i64::try_from(fraction.len()).map_err(|_| invalid())?;
        let scale = exponent.checked_sub(fraction_len).ok_or_else(invalid)?;
        if scale.unsigned_abs() > MAX_LITERAL_SCALE {
            return Err(NumberError::OutOfRange(text.to_string()));
        }

        let value = if scale >= 0 {
            BigRational::from_integer(numer * pow10(scale.unsigned_abs()))
        } else {
            BigRational::new(numer, pow10(scale.unsigned_abs()))
        };

        Ok(Self(if negative { -value } else { value }))
    }
}

impl From<i64> for ExactDecimal {
    fn from(value: i64) -> Self {
        Self(BigRational::from_integer(BigInt::from(value)))
    }
}

impl Add for &ExactDecimal {
    type Output = ExactDecimal;

    fn add(self, rhs: Self) -> ExactDecimal {
        ExactDecimal(&self.0 + &rhs.0)
    }
}

impl Sub for &ExactDecimal {
    type Output = ExactDecimal;

    fn sub(self, rhs: Self) -> ExactDecimal {
        ExactDecimal(&self.0 - &rhs.0)
    }
}

impl Mul for &ExactDecimal {
    type Output = ExactDecimal;

    fn mul(self, rhs: Self) -> ExactDecimal {
        ExactDecimal(&self.0 * &rhs.0)
    }
}

impl Neg for &ExactDecimal {
    type Output = ExactDecimal;

    fn neg(self) -> ExactDecimal {
        ExactDecimal(-&self.0)
    }
}

/// Canonical text: exact digits when the expansion terminates, without
/// trailing zeros, otherwise [`DISPLAY_PRECISION`] significant digits.
///
/// # Example
/// ```
/// use reckon::ExactDecimal;
///
/// let third = ExactDecimal::from(1).checked_div(&ExactDecimal::from(3)).unwrap();
/// assert_eq!(third.to_string(), "0.3333333333333333333333333333");
///
/// let price: ExactDecimal = "19.990".parse().unwrap();
/// assert_eq!(price.to_string(), "19.99");
/// ```
impl fmt::Display for ExactDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let numer = self.0.numer();
        let denom = self.0.denom();
        if denom.is_one() {
            return write!(f, "{numer}");
        }

        match terminating_digits(denom) {
            Some(digits) => {
                let scaled = (numer.abs() * pow10(digits)) / denom;
                if numer.is_negative() {
                    f.write_str("-")?;
                }
                f.write_str(&scaled_to_decimal(&scaled, usize::try_from(digits).unwrap_or(0)))
            },
            None => self.fmt_rounded(f, DISPLAY_PRECISION),
        }
    }
}

fn pow10(n: u64) -> BigInt {
    BigInt::from(10).pow(u32::try_from(n).unwrap_or(u32::MAX))
}

/// Number of fractional digits of `1/denom` when its expansion terminates,
/// that is when `denom` has no prime factors besides 2 and 5.
fn terminating_digits(denom: &BigInt) -> Option<u64> {
    let five = BigInt::from(5);
    let twos = denom.trailing_zeros().unwrap_or(0);
    let mut rest = denom >> twos;
    let mut fives = 0;
    while (&rest % &five).is_zero() {
        rest /= &five;
        fives += 1;
    }
    rest.is_one().then_some(twos.max(fives))
}

/// `floor(log10(numer / denom))` for positive operands.
fn decimal_exponent(numer: &BigInt, denom: &BigInt) -> i64 {
    let digits = |n: &BigInt| i64::try_from(n.to_str_radix(10).len()).unwrap_or(i64::MAX);
    let estimate = digits(numer) - digits(denom);
    let below = if estimate >= 0 {
        *numer < denom * pow10(estimate.unsigned_abs())
    } else {
        numer * pow10(estimate.unsigned_abs()) < *denom
    };
    if below { estimate - 1 } else { estimate }
}

fn round_half_even(numer: &BigInt, denom: &BigInt) -> BigInt {
    let two = BigInt::from(2);
    let quotient = numer / denom;
    let twice_remainder = (numer % denom) * &two;
    match twice_remainder.cmp(denom) {
        Ordering::Greater => quotient + BigInt::one(),
        Ordering::Equal if !(&quotient % &two).is_zero() => quotient + BigInt::one(),
        _ => quotient,
    }
}

/// Places the decimal point `digits` positions from the right of a
/// non-negative scaled integer and drops trailing fractional zeros.
fn scaled_to_decimal(scaled: &BigInt, digits: usize) -> String {
    let mut text = scaled.to_str_radix(10);
    if text.len() <= digits {
        text.insert_str(0, &"0".repeat(digits + 1 - text.len()));
    }
    let (whole, fraction) = text.split_at(text.len() - digits);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{fraction}")
    }
}
