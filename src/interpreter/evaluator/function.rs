use crate::{
    ast::Expr,
    error::{ArithmeticFault, EvalError},
    interpreter::{
        evaluator::core::{Context, EvalResult, Evaluator},
        value::core::{Number, NumericMode},
    },
};

impl Evaluator {
    /// Evaluates a call of a registered function.
    ///
    /// Calls are refused in exact-decimal mode. The function handle is cloned
    /// out of the registry so the registry lock is released before the body
    /// runs. Arguments are evaluated left to right and the arity is checked
    /// once all of them are known.
    ///
    /// # Errors
    /// - `ModeError` in exact-decimal mode.
    /// - `UnknownName` when `name` is not bound to a function.
    /// - `ArityError` when the argument count differs from the declared arity.
    /// - `ArithmeticError` when the function returns NaN or an infinity.
    pub(in crate::interpreter::evaluator) fn eval_call(&self,
                                                       name: &str,
                                                       arguments: &[Expr],
                                                       position: usize,
                                                       context: &Context<'_>,
                                                       depth: usize)
                                                       -> EvalResult<Number> {
        if context.mode() == NumericMode::Decimal {
            return Err(EvalError::Mode { name: name.to_string(),
                                         position });
        }

        let function = self.registry()
                           .read()
                           .function(name)
                           .ok_or_else(|| EvalError::UnknownName { name: name.to_string(),
                                                                   position })?;

        let values = arguments.iter()
                              .map(|argument| self.eval_argument(argument, context, depth))
                              .collect::<EvalResult<Vec<f64>>>()?;

        if values.len() != function.arity() {
            return Err(EvalError::Arity { name: name.to_string(),
                                          expected: function.arity(),
                                          found: values.len(),
                                          position });
        }

        let result = function.call(&values);
        if result.is_finite() {
            Ok(Number::Float(result))
        } else {
            Err(EvalError::Arithmetic { cause: ArithmeticFault::Domain { function: name.to_string() },
                                        position })
        }
    }

    fn eval_argument(&self,
                     argument: &Expr,
                     context: &Context<'_>,
                     depth: usize)
                     -> EvalResult<f64> {
        self.eval(argument, context, depth + 1)?
            .as_f64()
            .ok_or(EvalError::Arithmetic { cause:    ArithmeticFault::OutOfRange,
                                           position: argument.position(), })
    }
}
