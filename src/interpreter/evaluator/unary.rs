use crate::{
    ast::{Expr, UnaryOperator},
    interpreter::{
        evaluator::core::{Context, EvalResult, Evaluator},
        value::core::Number,
    },
    util::num::i64_to_f64,
};

impl Evaluator {
    /// Evaluates a prefix sign applied to an operand.
    pub(in crate::interpreter::evaluator) fn eval_unary_op(&self,
                                                           op: UnaryOperator,
                                                           operand: &Expr,
                                                           context: &Context<'_>,
                                                           depth: usize)
                                                           -> EvalResult<Number> {
        let value = self.eval(operand, context, depth + 1)?;
        Ok(match op {
               UnaryOperator::Plus => value,
               UnaryOperator::Negate => negate(value),
           })
    }
}

/// Negates a number in its own representation.
///
/// `-i64::MIN` does not fit in an integer and becomes a float.
///
/// # Example
/// ```
/// use reckon::{Number, interpreter::evaluator::unary::negate};
///
/// assert_eq!(negate(Number::Integer(5)), Number::Integer(-5));
/// assert_eq!(negate(Number::Integer(i64::MIN)), Number::Float(2f64.powi(63)));
/// ```
#[must_use]
pub fn negate(value: Number) -> Number {
    match value {
        Number::Integer(i) => i.checked_neg()
                               .map_or_else(|| Number::Float(-i64_to_f64(i)), Number::Integer),
        Number::Float(f) => Number::Float(-f),
        Number::Decimal(d) => Number::Decimal(-&d),
    }
}
