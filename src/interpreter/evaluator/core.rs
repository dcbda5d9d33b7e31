use std::{collections::HashMap, sync::Arc};

use parking_lot::RwLock;

use crate::{
    ast::Expr,
    error::{ArithmeticFault, Error, EvalError, ParseError, RegistryError},
    interpreter::{
        parser::core::{DEFAULT_MAX_DEPTH, parse_with_limit},
        registry::core::{Binding, Registry},
        value::core::{Number, NumericMode},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// `EvalError` describing the failure.
pub type EvalResult<T> = Result<T, EvalError>;

/// Default maximum expression length in bytes.
pub const DEFAULT_MAX_LENGTH: usize = 2_000;

/// Limits and switches of an [`Evaluator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatorConfig {
    /// Whether `ans` refers to the previous result.
    pub allow_previous_result: bool,
    /// Deepest tree accepted by the parser and the evaluator.
    pub max_depth:             usize,
    /// Longest expression accepted, in bytes; `None` disables the check.
    pub max_length:            Option<usize>,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self { allow_previous_result: true,
               max_depth:             DEFAULT_MAX_DEPTH,
               max_length:            Some(DEFAULT_MAX_LENGTH), }
    }
}

/// The inputs of one evaluation besides the expression itself.
///
/// A context borrows the caller's previous result and variables for the
/// duration of one call; the evaluator never stores them.
///
/// # Example
/// ```
/// use std::collections::HashMap;
///
/// use reckon::{Context, Evaluator, Number, NumericMode};
///
/// let previous = Number::Integer(10);
/// let variables = HashMap::from([("x".to_string(), Number::Integer(3))]);
/// let context = Context::new(NumericMode::Float).with_previous_result(&previous)
///                                               .with_variables(&variables);
///
/// let value = Evaluator::new().evaluate("ans * x", &context).unwrap();
/// assert_eq!(value, Number::Integer(30));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Context<'a> {
    mode:            NumericMode,
    previous_result: Option<&'a Number>,
    variables:       Option<&'a HashMap<String, Number>>,
}

impl<'a> Context<'a> {
    /// An empty context in the given mode.
    #[must_use]
    pub const fn new(mode: NumericMode) -> Self {
        Self { mode,
               previous_result: None,
               variables: None }
    }

    /// Supplies the value `ans` refers to.
    #[must_use]
    pub const fn with_previous_result(mut self, value: &'a Number) -> Self {
        self.previous_result = Some(value);
        self
    }

    /// Supplies the caller's variable bindings.
    #[must_use]
    pub const fn with_variables(mut self, variables: &'a HashMap<String, Number>) -> Self {
        self.variables = Some(variables);
        self
    }

    /// The active numeric mode.
    #[must_use]
    pub const fn mode(&self) -> NumericMode {
        self.mode
    }

    /// The previous result, if one was supplied.
    #[must_use]
    pub const fn previous_result(&self) -> Option<&'a Number> {
        self.previous_result
    }

    /// The caller's variables, if any were supplied.
    #[must_use]
    pub const fn variables(&self) -> Option<&'a HashMap<String, Number>> {
        self.variables
    }
}

/// Parses and evaluates arithmetic expressions against a name registry.
///
/// Clones share one registry: a name registered through any clone is visible
/// to all of them. Independent evaluators own independent registries.
///
/// # Example
/// ```
/// use reckon::{Context, Evaluator, Number, NumericMode};
///
/// let evaluator = Evaluator::new();
/// let context = Context::new(NumericMode::Float);
///
/// assert_eq!(evaluator.evaluate("2^3", &context).unwrap(), Number::Integer(8));
/// assert_eq!(evaluator.evaluate("sqrt(16)", &context).unwrap(), Number::Float(4.0));
/// assert!(evaluator.evaluate("1/0", &context).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Evaluator {
    registry: Arc<RwLock<Registry>>,
    config:   EvaluatorConfig,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// An evaluator with the built-in names and the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(Registry::builtin(), EvaluatorConfig::default())
    }

    /// An evaluator with the built-in names and the given configuration.
    #[must_use]
    pub fn with_config(config: EvaluatorConfig) -> Self {
        Self::with_registry(Registry::builtin(), config)
    }

    /// An evaluator that owns `registry`.
    #[must_use]
    pub fn with_registry(registry: Registry, config: EvaluatorConfig) -> Self {
        Self { registry: Arc::new(RwLock::new(registry)),
               config }
    }

    /// The configuration this evaluator was built with.
    #[must_use]
    pub const fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Merges `mapping` into the registry shared by this evaluator and its
    /// clones. See [`Registry::register`].
    ///
    /// # Example
    /// ```
    /// use reckon::{Binding, Context, Evaluator, Function, Number, NumericMode};
    ///
    /// let evaluator = Evaluator::new();
    /// evaluator.register([("cube", Binding::from(Function::unary(|x| x.powi(3))))])
    ///          .unwrap();
    ///
    /// let value = evaluator.evaluate("cube(3)", &Context::default()).unwrap();
    /// assert_eq!(value, Number::Float(27.0));
    /// ```
    pub fn register<I, K>(&self, mapping: I) -> Result<(), RegistryError>
        where I: IntoIterator<Item = (K, Binding)>,
              K: Into<String>
    {
        self.registry.write().register(mapping)
    }

    /// Returns `true` when `name` is bound in the registry.
    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.registry.read().contains(name)
    }

    /// All registered names, sorted.
    #[must_use]
    pub fn registered_names(&self) -> Vec<String> {
        self.registry
            .read()
            .names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Parses `expression` under this evaluator's length and depth limits.
    pub fn parse(&self, expression: &str) -> Result<Expr, ParseError> {
        if let Some(limit) = self.config.max_length
           && expression.len() > limit
        {
            return Err(ParseError::TooLong { length: expression.len(),
                                             limit });
        }
        parse_with_limit(expression, self.config.max_depth)
    }

    /// Parses and evaluates `expression`.
    ///
    /// # Errors
    /// `Error::Parse` when the expression cannot be parsed and `Error::Eval`
    /// when its tree cannot be reduced to a number.
    pub fn evaluate(&self, expression: &str, context: &Context<'_>) -> Result<Number, Error> {
        let tree = self.parse(expression)?;
        Ok(self.evaluate_tree(&tree, context)?)
    }

    /// Evaluates an already parsed tree.
    ///
    /// The tree is not modified, so it can be evaluated again with another
    /// context or mode.
    ///
    /// # Example
    /// ```
    /// use reckon::{Context, Evaluator, Number, NumericMode, parse};
    ///
    /// let evaluator = Evaluator::new();
    /// let tree = parse("0.1 + 0.2").unwrap();
    ///
    /// let float = evaluator.evaluate_tree(&tree, &Context::new(NumericMode::Float)).unwrap();
    /// let exact = evaluator.evaluate_tree(&tree, &Context::new(NumericMode::Decimal)).unwrap();
    /// assert_eq!(float.to_string(), "0.30000000000000004");
    /// assert_eq!(exact.to_string(), "0.3");
    /// ```
    pub fn evaluate_tree(&self, tree: &Expr, context: &Context<'_>) -> EvalResult<Number> {
        self.eval(tree, context, 0)
    }

    /// Evaluates one node.
    ///
    /// Children are evaluated before their parent combines them. `depth` is
    /// the distance from the root and is checked against the configured
    /// maximum.
    pub(in crate::interpreter::evaluator) fn eval(&self,
                                                  expr: &Expr,
                                                  context: &Context<'_>,
                                                  depth: usize)
                                                  -> EvalResult<Number> {
        if depth >= self.config.max_depth {
            return Err(EvalError::NestingTooDeep { limit: self.config.max_depth });
        }

        match expr {
            Expr::Literal { text, position } => eval_literal(text, *position, context.mode()),
            Expr::Identifier { name, position } => self.eval_identifier(name, *position, context),
            Expr::UnaryOp { op, operand, .. } => self.eval_unary_op(*op, operand, context, depth),
            Expr::BinaryOp { left,
                             op,
                             right,
                             position, } => {
                self.eval_binary_op(left, *op, right, *position, context, depth)
            },
            Expr::Call { name,
                         arguments,
                         position, } => self.eval_call(name, arguments, *position, context, depth),
        }
    }

    pub(in crate::interpreter::evaluator) fn registry(&self) -> &RwLock<Registry> {
        &self.registry
    }
}

/// Converts literal text to the representation of `mode`.
fn eval_literal(text: &str, position: usize, mode: NumericMode) -> EvalResult<Number> {
    Number::parse(text, mode).map_err(|_| {
                                 EvalError::Arithmetic { cause: ArithmeticFault::LiteralOutOfRange {
                                                             literal: text.to_string(),
                                                         },
                                                         position }
                             })
}
