use std::fmt;

use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in an expression.
///
/// Besides the tokens of the arithmetic grammar, the lexer recognizes the
/// shapes of common constructs that the evaluator refuses (strings,
/// assignment, subscripts, comparisons and so on) so the parser can report
/// them as unsupported instead of as plain syntax errors.
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
#[logos(skip r"[ \t\r\f]+")]
pub enum Token {
    /// Numeric literal tokens, such as `42`, `3.14`, `.5`, `5.` or `2.1e-10`.
    /// The original text is kept so that exact-decimal evaluation never
    /// passes through a binary float.
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?", |lex| lex.slice().to_string())]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", |lex| lex.slice().to_string())]
    Number(String),
    /// Identifier tokens; constant, variable or function names such as `pi`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `'...'` or `"..."`
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r"'([^'\\\n]|\\.)*'")]
    StringLiteral,
    /// `**`, with `^` accepted as an alternate spelling.
    #[token("**")]
    #[token("^")]
    Power,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
    /// `//`
    #[token("//")]
    FloorDivide,
    /// `=`
    #[token("=")]
    Assign,
    /// `:=`
    #[token(":=")]
    Walrus,
    /// `+=`, `**=`, `<<=` and the other augmented assignments.
    #[regex(r"(\+|-|\*|/|%|\*\*|//|\^|&|\||<<|>>|@)=")]
    AugmentedAssign,
    /// `==`, `!=`, `<`, `<=`, `>`, `>=`
    #[regex(r"==|!=|<=|>=|<|>")]
    Comparison,
    /// `&`, `|`, `~`, `<<`, `>>`
    #[regex(r"<<|>>|&|\||~")]
    Bitwise,
    /// `@`
    #[token("@")]
    At,
    /// `.`
    #[token(".")]
    Dot,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `:`
    #[token(":")]
    Colon,
    /// `;`
    #[token(";")]
    Semicolon,
    /// Line breaks separate statements, which are never accepted.
    #[token("\n")]
    NewLine,
}

impl Token {
    /// Names the construct this token introduces when the construct lies
    /// outside the arithmetic grammar.
    ///
    /// Returns `None` for tokens of the grammar itself and for identifiers that
    /// are not reserved keywords.
    ///
    /// # Example
    /// ```
    /// use reckon::interpreter::lexer::Token;
    ///
    /// assert_eq!(Token::Assign.unsupported_construct(), Some("assignment"));
    /// assert_eq!(Token::Plus.unsupported_construct(), None);
    /// ```
    #[must_use]
    pub fn unsupported_construct(&self) -> Option<&'static str> {
        match self {
            Self::StringLiteral => Some("string literal"),
            Self::FloorDivide => Some("floor division"),
            Self::Assign | Self::Walrus | Self::AugmentedAssign => Some("assignment"),
            Self::Comparison => Some("comparison"),
            Self::Bitwise => Some("bitwise operator"),
            Self::At => Some("matrix multiplication"),
            Self::Dot => Some("attribute access"),
            Self::LBracket | Self::RBracket => Some("subscript or list literal"),
            Self::LBrace | Self::RBrace => Some("dict or set literal"),
            Self::Colon => Some("slice, lambda or dict syntax"),
            Self::Semicolon | Self::NewLine => Some("multiple statements"),
            Self::Identifier(name) => keyword_construct(name),
            Self::Number(_)
            | Self::Power
            | Self::Plus
            | Self::Minus
            | Self::Star
            | Self::Slash
            | Self::Percent
            | Self::LParen
            | Self::RParen
            | Self::Comma => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(text) => write!(f, "number `{text}`"),
            Self::Identifier(name) => write!(f, "name `{name}`"),
            Self::StringLiteral => write!(f, "string literal"),
            Self::Power => write!(f, "`**`"),
            Self::Plus => write!(f, "`+`"),
            Self::Minus => write!(f, "`-`"),
            Self::Star => write!(f, "`*`"),
            Self::Slash => write!(f, "`/`"),
            Self::Percent => write!(f, "`%`"),
            Self::LParen => write!(f, "`(`"),
            Self::RParen => write!(f, "`)`"),
            Self::Comma => write!(f, "`,`"),
            Self::FloorDivide => write!(f, "`//`"),
            Self::Assign => write!(f, "`=`"),
            Self::Walrus => write!(f, "`:=`"),
            Self::AugmentedAssign => write!(f, "augmented assignment"),
            Self::Comparison => write!(f, "comparison operator"),
            Self::Bitwise => write!(f, "bitwise operator"),
            Self::At => write!(f, "`@`"),
            Self::Dot => write!(f, "`.`"),
            Self::LBracket => write!(f, "`[`"),
            Self::RBracket => write!(f, "`]`"),
            Self::LBrace => write!(f, "`{{`"),
            Self::RBrace => write!(f, "`}}`"),
            Self::Colon => write!(f, "`:`"),
            Self::Semicolon => write!(f, "`;`"),
            Self::NewLine => write!(f, "line break"),
        }
    }
}

/// Maps a reserved keyword to the construct it would start.
///
/// Keywords can never name a constant, variable or function, so they are
/// rejected wherever they appear.
#[must_use]
pub fn keyword_construct(name: &str) -> Option<&'static str> {
    match name {
        "True" | "False" => Some("boolean literal"),
        "None" => Some("`None` literal"),
        "lambda" => Some("lambda expression"),
        "for" | "async" => Some("comprehension"),
        "if" | "else" => Some("conditional expression"),
        "and" | "or" | "not" => Some("boolean operator"),
        "in" | "is" => Some("comparison"),
        "await" | "yield" => Some("generator or coroutine expression"),
        "import" | "from" | "def" | "class" | "return" | "del" | "global" | "nonlocal" | "pass"
        | "break" | "continue" | "while" | "with" | "try" | "except" | "finally" | "raise"
        | "assert" | "as" | "elif" | "match" | "case" => Some("statement"),
        _ => None,
    }
}

/// Splits an expression into `(token, byte offset)` pairs.
///
/// # Errors
/// Returns `ParseError::Syntax` at the first character that starts no token.
///
/// # Example
/// ```
/// use reckon::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("2 ^ 3").unwrap();
/// assert_eq!(tokens,
///            vec![(Token::Number("2".to_string()), 0),
///                 (Token::Power, 2),
///                 (Token::Number("3".to_string()), 4)]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        let position = lexer.span().start;
        match token {
            Ok(tok) => tokens.push((tok, position)),
            Err(()) => {
                return Err(ParseError::Syntax { message: format!("unexpected character `{}`",
                                                                 lexer.slice()),
                                                position });
            },
        }
    }

    Ok(tokens)
}
