use std::iter::Peekable;

use crate::{
    ast::BinaryOperator,
    interpreter::{
        lexer::Token,
        parser::{
            core::{Node, ParseResult, ParserState},
            unary::parse_unary,
        },
    },
};

/// Parses addition and subtraction expressions.
///
/// Handles the left-associative binary operators `+` and `-`.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub(in crate::interpreter::parser) fn parse_additive<'a, I>(tokens: &mut Peekable<I>,
                                                            state: &mut ParserState)
                                                            -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_multiplicative(tokens, state)?;
    while let Some((token, position)) = tokens.peek()
          && let Some(op) = token_to_binary_operator(token)
          && matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
    {
        let position = *position;
        tokens.next();
        let right = parse_multiplicative(tokens, state)?;
        left = state.binary(left, op, right, position)?;
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// Handles the left-associative operators `*`, `/` and `%`.
///
/// The rule is: `multiplicative := unary (("*" | "/" | "%") unary)*`
pub(in crate::interpreter::parser) fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>,
                                                                  state: &mut ParserState)
                                                                  -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_unary(tokens, state)?;
    while let Some((token, position)) = tokens.peek()
          && let Some(op) = token_to_binary_operator(token)
          && matches!(op, BinaryOperator::Mul | BinaryOperator::Div | BinaryOperator::Mod)
    {
        let position = *position;
        tokens.next();
        let right = parse_unary(tokens, state)?;
        left = state.binary(left, op, right, position)?;
    }
    Ok(left)
}

/// Maps a token to the binary operator it spells, if any.
///
/// Both `**` and `^` lex to [`Token::Power`], so they map to the same
/// operator.
pub(in crate::interpreter::parser) const fn token_to_binary_operator(token: &Token)
                                                                     -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::Power => Some(BinaryOperator::Pow),
        _ => None,
    }
}
