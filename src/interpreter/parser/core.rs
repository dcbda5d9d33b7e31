use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::{Token, tokenize},
        parser::{binary::parse_additive, utils::unexpected},
    },
};

/// Result type used by the parsing rules.
pub type ParseResult<T> = Result<T, ParseError>;

/// Depth limit used by [`parse`].
pub const DEFAULT_MAX_DEPTH: usize = 200;

/// A subtree together with its height, so depth is known without walking it.
#[derive(Debug)]
pub(in crate::interpreter::parser) struct Node {
    pub expr:   Expr,
    pub height: usize,
}

impl Node {
    /// A node without children.
    pub const fn leaf(expr: Expr) -> Self {
        Self { expr, height: 1 }
    }
}

/// Bookkeeping shared by the parsing rules of one input.
///
/// `nesting` counts the rules currently on the call stack that may recurse
/// (signs, parentheses, exponents, call arguments); node heights bound the
/// tree itself, which also grows through long operator chains.
#[derive(Debug)]
pub(in crate::interpreter::parser) struct ParserState {
    max_depth: usize,
    nesting:   usize,
    end:       usize,
}

impl ParserState {
    const fn new(max_depth: usize, end: usize) -> Self {
        Self { max_depth,
               nesting: 0,
               end }
    }

    /// Records one more level of recursion starting at `position`.
    pub fn enter(&mut self, position: usize) -> ParseResult<()> {
        self.nesting += 1;
        if self.nesting > self.max_depth {
            return Err(ParseError::NestingTooDeep { limit: self.max_depth,
                                                    position });
        }
        Ok(())
    }

    pub const fn leave(&mut self) {
        self.nesting = self.nesting.saturating_sub(1);
    }

    /// Byte offset just past the input, reported for errors at its end.
    pub const fn end(&self) -> usize {
        self.end
    }

    fn check_height(&self, height: usize, position: usize) -> ParseResult<usize> {
        if height > self.max_depth {
            Err(ParseError::NestingTooDeep { limit: self.max_depth,
                                             position })
        } else {
            Ok(height)
        }
    }

    pub fn binary(&self,
                  left: Node,
                  op: BinaryOperator,
                  right: Node,
                  position: usize)
                  -> ParseResult<Node> {
        let height = self.check_height(left.height.max(right.height) + 1, position)?;
        Ok(Node { expr: Expr::BinaryOp { left: Box::new(left.expr),
                                         op,
                                         right: Box::new(right.expr),
                                         position },
                  height })
    }

    pub fn unary(&self, op: UnaryOperator, operand: Node, position: usize) -> ParseResult<Node> {
        let height = self.check_height(operand.height + 1, position)?;
        Ok(Node { expr: Expr::UnaryOp { op,
                                        operand: Box::new(operand.expr),
                                        position },
                  height })
    }

    pub fn call(&self, name: String, arguments: Vec<Node>, position: usize) -> ParseResult<Node> {
        let deepest = arguments.iter().map(|a| a.height).max().unwrap_or(0);
        let height = self.check_height(deepest + 1, position)?;
        Ok(Node { expr: Expr::Call { name,
                                     arguments: arguments.into_iter().map(|a| a.expr).collect(),
                                     position },
                  height })
    }
}

/// Parses an arithmetic expression into a tree, with the default depth limit.
///
/// The whole input must form one expression; the parser never returns a
/// partial tree.
///
/// Grammar:
/// ```text
///     expression     := additive
///     additive       := multiplicative (("+" | "-") multiplicative)*
///     multiplicative := unary (("*" | "/" | "%") unary)*
///     unary          := ("+" | "-") unary | power
///     power          := postfix ("**" unary)?
///     postfix        := primary | name "(" arguments? ")"
///     primary        := number | name | "(" expression ")"
/// ```
///
/// # Errors
/// - `ParseError::Syntax` for malformed input, including empty input,
///   unbalanced parentheses and trailing tokens.
/// - `ParseError::Unsupported` for constructs outside the grammar.
/// - `ParseError::NestingTooDeep` when the tree exceeds
///   [`DEFAULT_MAX_DEPTH`].
///
/// # Example
/// ```
/// use reckon::{ErrorKind, parse};
///
/// let tree = parse("2 ^ 3 ** 2").unwrap();
/// assert_eq!(tree.to_string(), "(2 ** (3 ** 2))");
///
/// let err = parse("x = 1").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::UnsupportedConstruct);
/// ```
pub fn parse(source: &str) -> ParseResult<Expr> {
    parse_with_limit(source, DEFAULT_MAX_DEPTH)
}

/// Parses an expression, failing with `ParseError::NestingTooDeep` once the
/// tree or the parenthesis nesting gets deeper than `max_depth`.
pub fn parse_with_limit(source: &str, max_depth: usize) -> ParseResult<Expr> {
    let tokens = tokenize(source)?;
    if tokens.is_empty() {
        return Err(ParseError::Syntax { message:  "empty expression".to_string(),
                                        position: 0, });
    }

    let mut state = ParserState::new(max_depth, source.len());
    let mut iter = tokens.iter().peekable();
    let node = parse_expression(&mut iter, &mut state)?;

    match iter.next() {
        None => Ok(node.expr),
        Some((Token::RParen, position)) => {
            Err(ParseError::Syntax { message:  "unmatched `)`".to_string(),
                                     position: *position, })
        },
        Some((token, position)) => Err(unexpected(token, *position, "end of expression")),
    }
}

/// Parses a full expression, starting at the lowest precedence level.
pub(in crate::interpreter::parser) fn parse_expression<'a, I>(tokens: &mut Peekable<I>,
                                                              state: &mut ParserState)
                                                              -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_additive(tokens, state)
}
