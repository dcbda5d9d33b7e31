use crate::{
    ast::{BinaryOperator, Expr},
    error::{ArithmeticFault, EvalError},
    interpreter::{
        evaluator::core::{Context, EvalResult, Evaluator},
        value::core::{Number, NumericMode},
    },
};

impl Evaluator {
    /// Evaluates both operands, left first, then combines them.
    pub(in crate::interpreter::evaluator) fn eval_binary_op(&self,
                                                            left: &Expr,
                                                            op: BinaryOperator,
                                                            right: &Expr,
                                                            position: usize,
                                                            context: &Context<'_>,
                                                            depth: usize)
                                                            -> EvalResult<Number> {
        let left = self.eval(left, context, depth + 1)?;
        let right = self.eval(right, context, depth + 1)?;
        Self::apply_binary_op(op, &left, &right, position)
    }

    /// Applies a binary operator to two evaluated operands.
    ///
    /// Two integers use checked integer arithmetic, two exact decimals use
    /// exact arithmetic, and any other pair is computed in floats. A decimal
    /// paired with a non-decimal operand promotes the other operand to a
    /// decimal first.
    ///
    /// # Example
    /// ```
    /// use reckon::{Evaluator, Number, ast::BinaryOperator};
    ///
    /// let sum = Evaluator::apply_binary_op(BinaryOperator::Add,
    ///                                      &Number::Integer(2),
    ///                                      &Number::Float(0.5),
    ///                                      0).unwrap();
    /// assert_eq!(sum, Number::Float(2.5));
    /// ```
    pub fn apply_binary_op(op: BinaryOperator,
                           left: &Number,
                           right: &Number,
                           position: usize)
                           -> EvalResult<Number> {
        use Number::{Decimal, Float, Integer};

        match (left, right) {
            (Integer(a), Integer(b)) => Self::eval_integer_op(op, *a, *b, position),
            (Decimal(a), Decimal(b)) => Self::eval_decimal_op(op, a, b, position),
            (Decimal(_), _) | (_, Decimal(_)) => {
                let promote = |value: &Number| {
                    value.to_mode(NumericMode::Decimal)
                         .ok_or(EvalError::Arithmetic { cause: ArithmeticFault::OutOfRange,
                                                        position })
                };
                Self::apply_binary_op(op, &promote(left)?, &promote(right)?, position)
            },
            (Integer(_) | Float(_), Integer(_) | Float(_)) => {
                match (left.as_f64(), right.as_f64()) {
                    (Some(a), Some(b)) => Self::eval_float_op(op, a, b, position),
                    _ => Err(EvalError::Arithmetic { cause: ArithmeticFault::OutOfRange,
                                                     position }),
                }
            },
        }
    }
}
