use std::{collections::HashMap, fmt, sync::Arc};

use crate::{
    error::RegistryError,
    interpreter::{lexer::keyword_construct, registry::builtin, value::core::Number},
};

/// The reserved name that refers to the previous result.
pub const PREVIOUS_RESULT: &str = "ans";

/// Signature of a native function body.
pub type NativeFn = dyn Fn(&[f64]) -> f64 + Send + Sync;

/// A callable with a fixed, declared number of float arguments.
///
/// The body is reference counted so a function can be cloned out of a shared
/// registry and run without holding any lock.
#[derive(Clone)]
pub struct Function {
    arity: usize,
    body:  Arc<NativeFn>,
}

impl Function {
    /// Wraps a body that takes exactly `arity` arguments.
    ///
    /// The evaluator checks the argument count before calling `body`, so the
    /// slice it receives always has `arity` elements.
    pub fn new(arity: usize, body: impl Fn(&[f64]) -> f64 + Send + Sync + 'static) -> Self {
        Self { arity,
               body: Arc::new(body) }
    }

    /// Wraps a one-argument function.
    ///
    /// # Example
    /// ```
    /// use reckon::Function;
    ///
    /// let cube = Function::unary(|x| x.powi(3));
    /// assert_eq!(cube.arity(), 1);
    /// assert_eq!(cube.call(&[3.0]), 27.0);
    /// ```
    pub fn unary(body: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        Self::new(1, move |args| match args {
                         [x] => body(*x),
                         _ => f64::NAN,
                     })
    }

    /// Wraps a two-argument function.
    pub fn binary(body: impl Fn(f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        Self::new(2, move |args| match args {
                         [x, y] => body(*x, *y),
                         _ => f64::NAN,
                     })
    }

    /// Declared number of arguments.
    #[must_use]
    pub const fn arity(&self) -> usize {
        self.arity
    }

    /// Runs the body on already evaluated arguments.
    #[must_use]
    pub fn call(&self, args: &[f64]) -> f64 {
        (self.body)(args)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
         .field("arity", &self.arity)
         .finish_non_exhaustive()
    }
}

/// What a registered name resolves to.
#[derive(Debug, Clone)]
pub enum Binding {
    /// A value substituted wherever the name is referenced.
    Constant(Number),
    /// A callable, usable only in call position.
    Function(Function),
}

impl From<Number> for Binding {
    fn from(value: Number) -> Self {
        Self::Constant(value)
    }
}

impl From<f64> for Binding {
    fn from(value: f64) -> Self {
        Self::Constant(Number::Float(value))
    }
}

impl From<i64> for Binding {
    fn from(value: i64) -> Self {
        Self::Constant(Number::Integer(value))
    }
}

impl From<Function> for Binding {
    fn from(value: Function) -> Self {
        Self::Function(value)
    }
}

/// The closed set of names an expression may resolve.
///
/// A registry starts from the built-in set and only grows through
/// [`Registry::register`]; registering an existing name replaces its binding.
#[derive(Debug, Clone)]
pub struct Registry {
    bindings: HashMap<String, Binding>,
}

impl Registry {
    /// A registry holding only the built-in constants and functions.
    #[must_use]
    pub fn builtin() -> Self {
        Self { bindings: builtin::bindings() }
    }

    /// A registry with no names at all.
    #[must_use]
    pub fn empty() -> Self {
        Self { bindings: HashMap::new() }
    }

    /// Merges `mapping` into the registry, replacing existing bindings.
    ///
    /// Every entry is validated before anything is inserted, so a refused
    /// mapping leaves the registry exactly as it was.
    ///
    /// # Errors
    /// - `RegistryError::ReservedName` for [`PREVIOUS_RESULT`].
    /// - `RegistryError::InvalidName` for names that are not identifiers or
    ///   that are reserved keywords.
    /// - `RegistryError::NonFiniteConstant` for NaN or infinite constants.
    ///
    /// # Example
    /// ```
    /// use reckon::{Binding, Function, Registry};
    ///
    /// let mut registry = Registry::builtin();
    /// registry.register([("cube", Binding::from(Function::unary(|x| x * x * x)))]).unwrap();
    /// assert!(registry.contains("cube"));
    ///
    /// assert!(registry.register([("ans", Binding::from(1.0))]).is_err());
    /// assert!(!registry.contains("ans"));
    /// ```
    pub fn register<I, K>(&mut self, mapping: I) -> Result<(), RegistryError>
        where I: IntoIterator<Item = (K, Binding)>,
              K: Into<String>
    {
        let entries = mapping.into_iter()
                             .map(|(name, binding)| (name.into(), binding))
                             .collect::<Vec<(String, Binding)>>();
        for (name, binding) in &entries {
            validate(name, binding)?;
        }

        tracing::debug!(count = entries.len(), "registering names");
        for (name, binding) in entries {
            let kind = match &binding {
                Binding::Constant(_) => "constant",
                Binding::Function(_) => "function",
            };
            let replaced = self.bindings.insert(name.clone(), binding).is_some();
            tracing::trace!(%name, kind, replaced, "registered name");
        }
        Ok(())
    }

    /// Returns the value of `name` when it is bound to a constant.
    #[must_use]
    pub fn constant(&self, name: &str) -> Option<&Number> {
        match self.bindings.get(name) {
            Some(Binding::Constant(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a handle to `name` when it is bound to a function.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<Function> {
        match self.bindings.get(name) {
            Some(Binding::Function(function)) => Some(function.clone()),
            _ => None,
        }
    }

    /// Returns `true` when `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// All bound names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names = self.bindings.keys().map(String::as_str).collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    /// Number of bound names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` when no name is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate(name: &str, binding: &Binding) -> Result<(), RegistryError> {
    if name == PREVIOUS_RESULT {
        return Err(RegistryError::ReservedName { name: name.to_string() });
    }
    if !is_identifier(name) || keyword_construct(name).is_some() {
        return Err(RegistryError::InvalidName { name: name.to_string() });
    }
    if let Binding::Constant(value) = binding
       && !value.is_finite()
    {
        return Err(RegistryError::NonFiniteConstant { name: name.to_string() });
    }
    Ok(())
}

/// Returns `true` for names the lexer reads as a single identifier.
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next()
         .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
