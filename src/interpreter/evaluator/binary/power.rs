use crate::{
    error::{ArithmeticFault, EvalError},
    interpreter::{
        evaluator::{
            binary::scalar::finite,
            core::{EvalResult, Evaluator},
        },
        value::{
            core::Number,
            decimal::{ExactDecimal, MAX_MAGNITUDE_BITS},
        },
    },
    util::num::i64_to_f64,
};

/// Largest exponent magnitude accepted in exact-decimal mode.
pub const MAX_DECIMAL_EXPONENT: i64 = 10_000;

impl Evaluator {
    /// Evaluates an exponentiation of two integers.
    ///
    /// A non-negative exponent keeps the result integral when it fits in 64
    /// bits. Negative exponents and overflowing results are computed in
    /// floating point.
    ///
    /// # Example
    /// ```
    /// use reckon::{Evaluator, Number};
    ///
    /// assert_eq!(Evaluator::eval_integer_pow(2, 10, 0).unwrap(), Number::Integer(1024));
    /// assert_eq!(Evaluator::eval_integer_pow(2, -1, 0).unwrap(), Number::Float(0.5));
    /// assert!(Evaluator::eval_integer_pow(0, -1, 0).is_err());
    /// ```
    pub fn eval_integer_pow(base: i64, exponent: i64, position: usize) -> EvalResult<Number> {
        if exponent >= 0 {
            match u32::try_from(exponent) {
                Ok(e) => {
                    if let Some(value) = base.checked_pow(e) {
                        return Ok(Number::Integer(value));
                    }
                },
                // Bases whose powers never grow.
                Err(_) => match base {
                    0 | 1 => return Ok(Number::Integer(base)),
                    -1 => return Ok(Number::Integer(if exponent % 2 == 0 { 1 } else { -1 })),
                    _ => {},
                },
            }
        }
        Self::eval_float_pow(i64_to_f64(base), i64_to_f64(exponent), position)
    }

    /// Evaluates a floating-point exponentiation.
    ///
    /// # Errors
    /// - `DivisionByZero` when zero is raised to a negative power.
    /// - `ArithmeticError` when a negative base is raised to a fractional
    ///   power, or when the result overflows.
    pub fn eval_float_pow(base: f64, exponent: f64, position: usize) -> EvalResult<Number> {
        if base == 0.0 && exponent < 0.0 {
            return Err(EvalError::DivisionByZero { position });
        }
        if base < 0.0 && exponent.fract() != 0.0 {
            return Err(EvalError::Arithmetic { cause: ArithmeticFault::NegativeFractionalPower,
                                               position });
        }
        finite(base.powf(exponent), position)
    }

    /// Evaluates an exact-decimal exponentiation.
    ///
    /// The exponent must be an integer of magnitude at most
    /// [`MAX_DECIMAL_EXPONENT`], and the exact result must stay within
    /// [`MAX_MAGNITUDE_BITS`]. The size is checked before anything is
    /// computed.
    ///
    /// # Example
    /// ```
    /// use reckon::{ErrorKind, Evaluator, ExactDecimal};
    ///
    /// let base: ExactDecimal = "1.5".parse().unwrap();
    /// let two: ExactDecimal = "2".parse().unwrap();
    /// let half: ExactDecimal = "0.5".parse().unwrap();
    ///
    /// assert_eq!(Evaluator::eval_decimal_pow(&base, &two, 0).unwrap().to_string(), "2.25");
    ///
    /// let err = Evaluator::eval_decimal_pow(&base, &half, 0).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::ArithmeticError);
    /// ```
    pub fn eval_decimal_pow(base: &ExactDecimal,
                            exponent: &ExactDecimal,
                            position: usize)
                            -> EvalResult<Number> {
        let arithmetic = |cause| EvalError::Arithmetic { cause, position };
        let too_large = || arithmetic(ArithmeticFault::ExponentTooLarge { limit: MAX_DECIMAL_EXPONENT });

        if !exponent.is_integer() {
            return Err(arithmetic(ArithmeticFault::NonIntegralExponent));
        }
        let exponent = exponent.to_i64().ok_or_else(too_large)?;
        if exponent.unsigned_abs() > MAX_DECIMAL_EXPONENT.unsigned_abs() {
            return Err(too_large());
        }
        if base.magnitude_bits().saturating_mul(exponent.unsigned_abs()) > MAX_MAGNITUDE_BITS {
            return Err(arithmetic(ArithmeticFault::OutOfRange));
        }

        base.checked_powi(exponent)
            .map(Number::Decimal)
            .ok_or(EvalError::DivisionByZero { position })
    }
}
