use crate::{
    ast::BinaryOperator,
    error::{ArithmeticFault, EvalError},
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::{
            core::Number,
            decimal::{ExactDecimal, MAX_MAGNITUDE_BITS},
        },
    },
};

impl Evaluator {
    /// Evaluates an operation on two exact decimals.
    ///
    /// `+`, `-`, `*` and `/` are exact. `%` is the truncated remainder, whose
    /// sign follows the dividend. `**` is delegated to
    /// [`Evaluator::eval_decimal_pow`].
    ///
    /// Operands holding more than [`MAX_MAGNITUDE_BITS`] between them fail
    /// with `ArithmeticError` before any work is done, which keeps every
    /// result within a small multiple of the limit.
    ///
    /// # Example
    /// ```
    /// use reckon::{Evaluator, ast::BinaryOperator};
    ///
    /// let a = "0.1".parse().unwrap();
    /// let b = "0.2".parse().unwrap();
    /// let sum = Evaluator::eval_decimal_op(BinaryOperator::Add, &a, &b, 0).unwrap();
    /// assert_eq!(sum.to_string(), "0.3");
    /// ```
    pub fn eval_decimal_op(op: BinaryOperator,
                           left: &ExactDecimal,
                           right: &ExactDecimal,
                           position: usize)
                           -> EvalResult<Number> {
        use BinaryOperator::{Add, Div, Mod, Mul, Pow, Sub};

        if op != Pow && left.magnitude_bits() + right.magnitude_bits() > MAX_MAGNITUDE_BITS {
            return Err(EvalError::Arithmetic { cause: ArithmeticFault::OutOfRange,
                                               position });
        }

        let value = match op {
            Add => left + right,
            Sub => left - right,
            Mul => left * right,
            Div => left.checked_div(right)
                       .ok_or(EvalError::DivisionByZero { position })?,
            Mod => left.checked_rem(right)
                       .ok_or(EvalError::DivisionByZero { position })?,
            Pow => return Self::eval_decimal_pow(left, right, position),
        };
        Ok(Number::Decimal(value))
    }
}
