use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::{Token, keyword_construct},
        parser::{
            core::{Node, ParseResult, ParserState, parse_expression},
            utils::{end_of_input, parse_comma_separated, unexpected},
        },
    },
    util::num::is_integer_text,
};

/// Parses a unary expression.
///
/// Supports the prefix signs `+` and `-`. Signs are right-associative, so
/// `--x` is parsed as `-(-x)`. Without a sign the rule falls through to
/// [`parse_power`], which is why `-3**2` parses as `-(3**2)`.
///
/// Grammar:
/// ```text
///     unary := ("+" | "-") unary
///            | power
/// ```
///
/// Every call counts as one level of nesting.
pub(in crate::interpreter::parser) fn parse_unary<'a, I>(tokens: &mut Peekable<I>,
                                                         state: &mut ParserState)
                                                         -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let position = tokens.peek().map_or(state.end(), |(_, position)| *position);
    state.enter(position)?;
    let node = parse_signed(tokens, state);
    state.leave();
    node
}

fn parse_signed<'a, I>(tokens: &mut Peekable<I>, state: &mut ParserState) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let op = match tokens.peek() {
        Some((Token::Minus, _)) => UnaryOperator::Negate,
        Some((Token::Plus, _)) => UnaryOperator::Plus,
        _ => return parse_power(tokens, state),
    };
    let Some((_, position)) = tokens.next() else {
        return Err(end_of_input(state, "an operand"));
    };
    let operand = parse_unary(tokens, state)?;
    state.unary(op, operand, *position)
}

/// Parses a power expression.
///
/// The exponent is a full unary expression, which makes the operator
/// right-associative (`2**3**2` is `2**(3**2)`) and allows a signed exponent
/// (`2**-1`).
///
/// Grammar: `power := postfix ("**" unary)?`
fn parse_power<'a, I>(tokens: &mut Peekable<I>, state: &mut ParserState) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let base = parse_postfix(tokens, state)?;
    if let Some((Token::Power, position)) = tokens.peek() {
        let position = *position;
        tokens.next();
        let exponent = parse_unary(tokens, state)?;
        return state.binary(base, BinaryOperator::Pow, exponent, position);
    }
    Ok(base)
}

/// Parses a primary expression and refuses the postfix constructs that may
/// follow it.
///
/// Only a bare name may be called, and the call is handled in
/// [`parse_primary`]; a `(` reaching this point follows some other
/// expression, as in `(f)(1)` or `f(1)(2)`. Attribute access and subscripts
/// are never allowed.
fn parse_postfix<'a, I>(tokens: &mut Peekable<I>, state: &mut ParserState) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let node = parse_primary(tokens, state)?;
    let construct = match tokens.peek() {
        Some((Token::LParen, _)) => "call of a non-name expression",
        Some((Token::Dot, _)) => "attribute access",
        Some((Token::LBracket, _)) => "subscript",
        _ => return Ok(node),
    };
    let position = tokens.peek().map_or(state.end(), |(_, position)| *position);
    Err(ParseError::Unsupported { construct, position })
}

/// Parses a primary (atomic) expression.
///
/// Grammar:
/// ```text
///     primary := number
///              | name
///              | name "(" arguments? ")"
///              | "(" expression ")"
/// ```
///
/// # Errors
/// - `ParseError::Unsupported` for reserved keywords and for tokens that start
///   a construct outside the grammar.
/// - `ParseError::Syntax` for any other token and for missing input.
pub(in crate::interpreter::parser) fn parse_primary<'a, I>(tokens: &mut Peekable<I>,
                                                           state: &mut ParserState)
                                                           -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Number(text), position)) => parse_literal(text, *position),
        Some((Token::Identifier(name), position)) => {
            if let Some(construct) = keyword_construct(name) {
                return Err(ParseError::Unsupported { construct,
                                                     position: *position });
            }
            if let Some((Token::LParen, _)) = tokens.peek() {
                tokens.next();
                return parse_call(tokens, state, name, *position);
            }
            Ok(Node::leaf(Expr::Identifier { name:     name.clone(),
                                             position: *position, }))
        },
        Some((Token::LParen, position)) => parse_group(tokens, state, *position),
        Some((token, position)) => Err(unexpected(token, *position, "a number, name or `(`")),
        None => Err(end_of_input(state, "a number, name or `(`")),
    }
}

/// Builds a literal node, rejecting integer literals written with leading
/// zeros such as `007`. Literals made only of zeros are accepted.
fn parse_literal(text: &str, position: usize) -> ParseResult<Node> {
    let padded = text.len() > 1 && text.starts_with('0') && text.bytes().any(|b| b != b'0');
    if padded && is_integer_text(text) {
        return Err(ParseError::Syntax { message: format!("leading zeros are not allowed in \
                                                          integer literal `{text}`"),
                                        position });
    }
    Ok(Node::leaf(Expr::Literal { text: text.to_string(),
                                  position }))
}

/// Parses `"(" expression ")"` after the opening parenthesis was consumed.
///
/// Grouping produces no node of its own.
fn parse_group<'a, I>(tokens: &mut Peekable<I>,
                      state: &mut ParserState,
                      open: usize)
                      -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let inner = parse_expression(tokens, state)?;
    match tokens.next() {
        Some((Token::RParen, _)) => Ok(inner),
        Some((Token::Comma, position)) => {
            Err(ParseError::Unsupported { construct: "tuple",
                                          position:  *position, })
        },
        Some((token, position)) => Err(unexpected(token, *position, "`)`")),
        None => Err(ParseError::Syntax { message:  "unclosed `(`".to_string(),
                                         position: open, }),
    }
}

/// Parses the argument list of a call after its `(` was consumed.
///
/// Arguments are positional expressions; `name=value` and `*args` forms are
/// refused.
fn parse_call<'a, I>(tokens: &mut Peekable<I>,
                     state: &mut ParserState,
                     name: &str,
                     position: usize)
                     -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let arguments = parse_comma_separated(tokens, state, parse_argument, &Token::RParen)?;
    state.call(name.to_string(), arguments, position)
}

fn parse_argument<'a, I>(tokens: &mut Peekable<I>, state: &mut ParserState) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::Star | Token::Power, position)) => {
            return Err(ParseError::Unsupported { construct: "starred argument",
                                                 position:  *position, });
        },
        Some((Token::Identifier(_), position)) => {
            let position = *position;
            let mut ahead = tokens.clone();
            ahead.next();
            if let Some((Token::Assign, _)) = ahead.peek() {
                return Err(ParseError::Unsupported { construct: "keyword argument",
                                                     position });
            }
        },
        _ => {},
    }
    parse_expression(tokens, state)
}
