/// The evaluator reduces expression trees to numbers.
///
/// It walks a tree produced by the parser, resolving names through the
/// caller's context and the registry, and applies the arithmetic of the active
/// numeric mode.
///
/// # Responsibilities
/// - Evaluates tree nodes children first.
/// - Resolves `ans`, caller variables and registered constants.
/// - Calls whitelisted functions with arity checks.
/// - Reports typed failures such as division by zero or domain errors.
pub mod evaluator;
/// The lexer module tokenizes expressions for further parsing.
///
/// Besides the tokens of the arithmetic grammar it recognizes the shapes of
/// constructs that are always refused, so that they can be reported by name.
pub mod lexer;
/// The parser module builds expression trees from tokens.
///
/// A recursive-descent parser over the arithmetic grammar. It enforces a depth
/// limit while building and never returns a partial tree.
pub mod parser;
/// The name registry: constants and functions an expression may refer to.
pub mod registry;
/// Numeric values and the two numeric modes.
pub mod value;
