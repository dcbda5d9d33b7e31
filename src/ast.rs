use std::fmt;

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`, true division.
    Div,
    /// `%`
    Mod,
    /// `**` (also spelled `^`).
    Pow,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "**",
        };
        f.write_str(symbol)
    }
}

/// Prefix sign operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// `+x`, identity.
    Plus,
    /// `-x`
    Negate,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plus => f.write_str("+"),
            Self::Negate => f.write_str("-"),
        }
    }
}

/// An immutable expression tree produced by the parser.
///
/// The tree is never modified by evaluation, so one tree can be evaluated any
/// number of times with different contexts and numeric modes. Every node keeps
/// the byte offset of the token that introduced it for error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A numeric literal, kept as written.
    ///
    /// The text is converted to the active numeric representation only when
    /// the tree is evaluated.
    Literal {
        /// Literal text, such as `0.1` or `2e10`.
        text:     String,
        /// Byte offset in the source.
        position: usize,
    },
    /// Reference to the previous result, a variable or a constant.
    Identifier {
        /// Name being referenced.
        name:     String,
        /// Byte offset in the source.
        position: usize,
    },
    /// A prefix sign applied to an operand.
    UnaryOp {
        /// The sign operator.
        op:       UnaryOperator,
        /// The operand expression.
        operand:  Box<Self>,
        /// Byte offset in the source.
        position: usize,
    },
    /// A binary arithmetic operation.
    BinaryOp {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        op:       BinaryOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Byte offset of the operator in the source.
        position: usize,
    },
    /// Call of a registered function, such as `sqrt(16)`.
    Call {
        /// Name of the function being called.
        name:      String,
        /// Positional arguments, in source order.
        arguments: Vec<Self>,
        /// Byte offset in the source.
        position:  usize,
    },
}

impl Expr {
    /// Returns the byte offset of the token that introduced this node.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::Literal { position, .. }
            | Self::Identifier { position, .. }
            | Self::UnaryOp { position, .. }
            | Self::BinaryOp { position, .. }
            | Self::Call { position, .. } => *position,
        }
    }
}

/// Renders the tree fully parenthesized, which makes grouping explicit.
///
/// # Example
/// ```
/// use reckon::parse;
///
/// assert_eq!(parse("-3**2 + 1").unwrap().to_string(), "((-(3 ** 2)) + 1)");
/// ```
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal { text, .. } => f.write_str(text),
            Self::Identifier { name, .. } => f.write_str(name),
            Self::UnaryOp { op, operand, .. } => write!(f, "({op}{operand})"),
            Self::BinaryOp { left, op, right, .. } => write!(f, "({left} {op} {right})"),
            Self::Call { name, arguments, .. } => {
                write!(f, "{name}(")?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                f.write_str(")")
            },
        }
    }
}
