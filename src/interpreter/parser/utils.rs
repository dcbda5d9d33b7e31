use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, ParserState},
    },
};

/// Builds the error for `token` found where `expected` should be.
///
/// Tokens that start a construct outside the grammar (assignment, subscripts,
/// keywords and so on) are reported as unsupported; anything else is a syntax
/// error.
pub(in crate::interpreter::parser) fn unexpected(token: &Token,
                                                 position: usize,
                                                 expected: &str)
                                                 -> ParseError {
    match token.unsupported_construct() {
        Some(construct) => ParseError::Unsupported { construct, position },
        None => ParseError::Syntax { message: format!("expected {expected}, found {token}"),
                                     position },
    }
}

/// Error for input that stops before `expected`.
pub(in crate::interpreter::parser) fn end_of_input(state: &ParserState,
                                                   expected: &str)
                                                   -> ParseError {
    ParseError::Syntax { message:  format!("unexpected end of expression, expected {expected}"),
                         position: state.end(), }
}

/// Parses a comma-separated list of items until a closing token.
///
/// An immediately encountered closing token produces an empty list. A trailing
/// comma before the closing token is accepted, as in `f(1,)`.
///
/// Grammar (simplified): `list := (item ("," item)* ","?)?`
///
/// # Errors
/// Returns a `ParseError` if an item fails to parse, if anything other than a
/// comma or the closing token follows an item, or if the input ends before
/// the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    state: &mut ParserState,
    parse_item: impl Fn(&mut Peekable<I>, &mut ParserState) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut items = Vec::new();
    loop {
        if let Some((tok, _)) = tokens.peek()
           && tok == closing
        {
            tokens.next();
            return Ok(items);
        }
        items.push(parse_item(tokens, state)?);
        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((tok, _)) if tok == closing => return Ok(items),
            Some((tok, position)) => {
                return Err(unexpected(tok, *position, &format!("`,` or {closing}")));
            },
            None => return Err(end_of_input(state, &closing.to_string())),
        }
    }
}
