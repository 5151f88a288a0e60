use crate::{
    parser::{
        ast::{binary::Binary, call::Call, list::List, literal::Literal, paren::Paren, unary::Unary},
        error::{kind, Error},
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents any kind of expression that can appear on either side of an equation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A function call, such as `z(t)` or `sin(x)`.
    Call(Call),

    /// A list of expressions, such as `[a, b]`.
    List(List),

    /// A unary operation, such as `-x`.
    Unary(Unary),

    /// A binary operation, such as `1 + 2`.
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Call(call) => call.span(),
            Expr::List(list) => list.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
        }
    }

    /// Parses a primary expression: a literal, call, parenthesized expression, or list.
    ///
    /// The kind of primary expression is decided by peeking at most two tokens ahead; a name
    /// directly followed by `(` is always a call.
    pub(crate) fn parse_primary(input: &mut Parser) -> Result<Self, Error> {
        match (input.peek_kind(), input.peek_nth_kind(1)) {
            (Some(TokenKind::Name), Some(TokenKind::OpenParen)) => input.try_parse().map(Self::Call),
            (Some(TokenKind::OpenParen), _) => input.try_parse().map(Self::Paren),
            (Some(TokenKind::OpenSquare), _) => input.try_parse().map(Self::List),
            _ => input.try_parse().map(Self::Literal),
        }
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        if input.peek_kind() == Some(TokenKind::CloseParen) {
            return Err(input.error(kind::UnclosedParenthesis { opening: false }));
        }

        let lhs = Unary::parse_or_lower(input)?;
        Binary::parse_expr(input, lhs, Precedence::Any)
    }
}
