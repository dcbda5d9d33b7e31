use crate::{
    ast::BinaryOperator,
    error::{ArithmeticFault, EvalError},
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Number,
    },
    util::num::{floor_mod_f64, floor_mod_i64, i64_to_f64},
};

impl Evaluator {
    /// Evaluates an operation on two integers.
    ///
    /// `+`, `-` and `*` stay integral unless they overflow, in which case they
    /// are recomputed in floats. `/` is true division and always yields a
    /// float. `%` is floored: the result takes the sign of the divisor.
    ///
    /// # Example
    /// ```
    /// use reckon::{Evaluator, Number, ast::BinaryOperator};
    ///
    /// let r = Evaluator::eval_integer_op(BinaryOperator::Mod, -7, 3, 0).unwrap();
    /// assert_eq!(r, Number::Integer(2));
    ///
    /// let q = Evaluator::eval_integer_op(BinaryOperator::Div, 7, 2, 0).unwrap();
    /// assert_eq!(q, Number::Float(3.5));
    /// ```
    pub fn eval_integer_op(op: BinaryOperator,
                           left: i64,
                           right: i64,
                           position: usize)
                           -> EvalResult<Number> {
        use BinaryOperator::{Add, Div, Mod, Mul, Pow, Sub};

        let exact = match op {
            Add => left.checked_add(right),
            Sub => left.checked_sub(right),
            Mul => left.checked_mul(right),
            Mod => {
                if right == 0 {
                    return Err(EvalError::DivisionByZero { position });
                }
                // Only `i64::MIN % -1` overflows, and its remainder is zero.
                Some(floor_mod_i64(left, right).unwrap_or(0))
            },
            Pow => return Self::eval_integer_pow(left, right, position),
            Div => None,
        };

        match exact {
            Some(value) => Ok(Number::Integer(value)),
            None => Self::eval_float_op(op, i64_to_f64(left), i64_to_f64(right), position),
        }
    }

    /// Evaluates an operation on two floats.
    ///
    /// # Errors
    /// - `DivisionByZero` for `/` and `%` with a zero divisor.
    /// - `ArithmeticError` when the result is not a finite number.
    pub fn eval_float_op(op: BinaryOperator,
                         left: f64,
                         right: f64,
                         position: usize)
                         -> EvalResult<Number> {
        use BinaryOperator::{Add, Div, Mod, Mul, Pow, Sub};

        let value = match op {
            Add => left + right,
            Sub => left - right,
            Mul => left * right,
            Div | Mod if right == 0.0 => return Err(EvalError::DivisionByZero { position }),
            Div => left / right,
            Mod => floor_mod_f64(left, right),
            Pow => return Self::eval_float_pow(left, right, position),
        };
        finite(value, position)
    }
}

/// Wraps a float result, refusing NaN and infinities.
pub(in crate::interpreter::evaluator) fn finite(value: f64, position: usize) -> EvalResult<Number> {
    if value.is_finite() {
        Ok(Number::Float(value))
    } else {
        Err(EvalError::Arithmetic { cause: ArithmeticFault::OutOfRange,
                                    position })
    }
}
