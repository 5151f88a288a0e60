use crate::{
    parser::{
        ast::{binary::Binary, expr::Expr},
        error::Error,
        token::op::UnaryOp,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A unary expression, such as `-x`.
///
/// Unary expressions do not directly implement [`Parse`]; use [`Unary::parse_or_lower`], which
/// falls back to a primary expression when there is no operator.
///
/// [`Parse`]: crate::parser::Parse
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a unary expression, or a primary expression if there is no unary operator.
    ///
    /// The operand binds tighter than multiplication but looser than exponentiation, so `-x^2`
    /// parses as `-(x^2)` and `-x y` parses as `(-x) y`.
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        if input.peek_kind() != Some(TokenKind::Sub) {
            return Expr::parse_primary(input);
        }

        let op = input.try_parse::<UnaryOp>()?;
        let operand = {
            let lhs = Self::parse_or_lower(input)?;
            Binary::parse_expr(input, lhs, op.precedence())?
        };
        let span = op.span.start..operand.span().end;

        Ok(Expr::Unary(Self {
            operand: Box::new(operand),
            op,
            span,
        }))
    }
}
