use crate::{
    error::{ArithmeticFault, EvalError},
    interpreter::{
        evaluator::core::{Context, EvalResult, Evaluator},
        registry::core::PREVIOUS_RESULT,
        value::core::{Number, NumericMode},
    },
};

impl Evaluator {
    /// Resolves a name to a number.
    ///
    /// The order is fixed:
    /// 1. `ans`, when the previous result is enabled, substitutes the
    ///    context's previous result or fails with `NoPreviousResult`.
    /// 2. A caller variable substitutes its value.
    /// 3. A registered constant substitutes its value.
    ///
    /// Any other name, including the name of a function, fails with
    /// `UnknownName`. Values are converted to the active mode.
    pub(in crate::interpreter::evaluator) fn eval_identifier(&self,
                                                             name: &str,
                                                             position: usize,
                                                             context: &Context<'_>)
                                                             -> EvalResult<Number> {
        if self.config().allow_previous_result && name == PREVIOUS_RESULT {
            let value = context.previous_result()
                               .ok_or(EvalError::NoPreviousResult { position })?;
            return supplied_value(name, value, position, context.mode());
        }

        if let Some(value) = context.variables().and_then(|variables| variables.get(name)) {
            return supplied_value(name, value, position, context.mode());
        }

        let constant = self.registry().read().constant(name).cloned();
        match constant {
            Some(value) => convert(&value, position, context.mode()),
            None => Err(EvalError::UnknownName { name: name.to_string(),
                                                 position }),
        }
    }
}

/// Checks and converts a value handed in by the caller.
fn supplied_value(name: &str,
                  value: &Number,
                  position: usize,
                  mode: NumericMode)
                  -> EvalResult<Number> {
    if !value.is_finite() {
        return Err(EvalError::NonNumericVariable { name: name.to_string(),
                                                   position });
    }
    convert(value, position, mode)
}

fn convert(value: &Number, position: usize, mode: NumericMode) -> EvalResult<Number> {
    value.to_mode(mode)
         .ok_or(EvalError::Arithmetic { cause: ArithmeticFault::OutOfRange,
                                        position })
}
