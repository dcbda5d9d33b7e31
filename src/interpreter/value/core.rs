use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};

use crate::{
    error::NumberError,
    interpreter::value::decimal::ExactDecimal,
    util::num::{i64_to_f64, is_integer_text, u64_to_f64},
};

/// Selects how numbers are represented during one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NumericMode {
    /// Integers and double precision floats. Function calls are allowed.
    #[default]
    Float,
    /// Exact base-10 arithmetic. Function calls are refused.
    Decimal,
}

impl fmt::Display for NumericMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float => f.write_str("float"),
            Self::Decimal => f.write_str("decimal"),
        }
    }
}

/// A number produced or consumed by the evaluator.
///
/// Float mode works with `Integer` and `Float`; exact-decimal mode works with
/// `Decimal`. Values handed in by the caller (previous result, variables) and
/// registered constants are converted to the active mode when referenced.
///
/// Equality is numeric: `Integer(4) == Float(4.0)`.
#[derive(Debug, Clone)]
pub enum Number {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A double precision float.
    Float(f64),
    /// An exact decimal.
    Decimal(ExactDecimal),
}

impl Number {
    /// Reads numeric text in the representation of `mode`.
    ///
    /// In float mode, text made of digits only becomes an `Integer` (or a
    /// `Float` when it exceeds 64 bits); anything else is read as a float. In
    /// decimal mode the digits are read exactly.
    ///
    /// # Errors
    /// `NumberError::Invalid` for text that is not a number and
    /// `NumberError::OutOfRange` for numbers the representation cannot hold.
    ///
    /// # Example
    /// ```
    /// use reckon::{Number, NumericMode};
    ///
    /// assert_eq!(Number::parse("42", NumericMode::Float).unwrap(), Number::Integer(42));
    /// assert_eq!(Number::parse("0.5", NumericMode::Float).unwrap(), Number::Float(0.5));
    /// assert_eq!(Number::parse("0.1", NumericMode::Decimal).unwrap().to_string(), "0.1");
    /// ```
    pub fn parse(text: &str, mode: NumericMode) -> Result<Self, NumberError> {
        match mode {
            NumericMode::Decimal => text.parse().map(Self::Decimal),
            NumericMode::Float => {
                if is_integer_text(text)
                   && let Ok(value) = text.parse::<i64>()
                {
                    return Ok(Self::Integer(value));
                }
                let value = text.parse::<f64>()
                                .map_err(|_| NumberError::Invalid(text.to_string()))?;
                if value.is_finite() || !is_numeric_text(text) {
                    Ok(Self::Float(value))
                } else {
                    Err(NumberError::OutOfRange(text.to_string()))
                }
            },
        }
    }

    /// Converts the value to the representation of `mode`.
    ///
    /// Returns `None` when the value has no counterpart there: a non-finite
    /// float in decimal mode, or a decimal outside the float range.
    #[must_use]
    pub fn to_mode(&self, mode: NumericMode) -> Option<Self> {
        match (mode, self) {
            (NumericMode::Float, Self::Integer(_) | Self::Float(_))
            | (NumericMode::Decimal, Self::Decimal(_)) => Some(self.clone()),
            (NumericMode::Float, Self::Decimal(d)) => d.to_f64().map(Self::Float),
            (NumericMode::Decimal, Self::Integer(i)) => Some(Self::Decimal(ExactDecimal::from(*i))),
            (NumericMode::Decimal, Self::Float(f)) => ExactDecimal::from_f64(*f).map(Self::Decimal),
        }
    }

    /// Converts the value to a float, or `None` for a decimal outside the float
    /// range.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(i64_to_f64(*i)),
            Self::Float(f) => Some(*f),
            Self::Decimal(d) => d.to_f64(),
        }
    }

    /// Returns `false` for NaN and infinite floats.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        match self {
            Self::Float(f) => f.is_finite(),
            Self::Integer(_) | Self::Decimal(_) => true,
        }
    }
}

/// Tells digit text apart from the `inf` and `nan` words that `f64` parsing
/// also accepts.
fn is_numeric_text(text: &str) -> bool {
    text.trim_start_matches(['+', '-'])
        .starts_with(|c: char| c.is_ascii_digit() || c == '.')
}

impl PartialEq for Number {
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Decimal(a), Self::Decimal(b)) => a == b,
            (Self::Integer(a), Self::Float(b)) | (Self::Float(b), Self::Integer(a)) => {
                i64_to_f64(*a) == *b
            },
            (Self::Integer(a), Self::Decimal(b)) | (Self::Decimal(b), Self::Integer(a)) => {
                ExactDecimal::from(*a) == *b
            },
            (Self::Float(a), Self::Decimal(b)) | (Self::Decimal(b), Self::Float(a)) => {
                ExactDecimal::from_f64(*a).is_some_and(|a| a == *b)
            },
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<ExactDecimal> for Number {
    fn from(value: ExactDecimal) -> Self {
        Self::Decimal(value)
    }
}

/// Integers print as digits, floats in their shortest round-trip form (always
/// with a fractional part or exponent), and decimals in canonical text.
///
/// # Example
/// ```
/// use reckon::Number;
///
/// assert_eq!(Number::Integer(8).to_string(), "8");
/// assert_eq!(Number::Float(4.0).to_string(), "4.0");
/// assert_eq!(Number::Float(0.1 + 0.2).to_string(), "0.30000000000000004");
/// ```
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Decimal(d) => write!(f, "{d}"),
        }
    }
}

/// Integers and floats serialize as JSON numbers; decimals as their canonical
/// text so no precision is lost.
impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Integer(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::Decimal(d) => serializer.collect_str(d),
        }
    }
}

/// Accepts JSON numbers, and strings holding decimal text which are read
/// exactly.
impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NumberVisitor)
    }
}

struct NumberVisitor;

impl Visitor<'_> for NumberVisitor {
    type Value = Number;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a number or a string holding a decimal number")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Number, E> {
        Ok(Number::Integer(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Number, E> {
        Ok(i64::try_from(value).map_or_else(|_| Number::Float(u64_to_f64(value)),
                                            Number::Integer))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Number, E> {
        Ok(Number::Float(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Number, E> {
        value.trim()
             .parse::<ExactDecimal>()
             .map(Number::Decimal)
             .map_err(E::custom)
    }
}
