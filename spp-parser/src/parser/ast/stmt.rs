use crate::{
    parser::{
        ast::expr::Expr,
        error::{kind, Error},
        token::Assign,
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An equation of the form `lhs = rhs`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Equation {
    /// The left-hand side of the equation.
    pub lhs: Expr,

    /// The right-hand side of the equation.
    pub rhs: Expr,

    /// The region of the source code that this equation was parsed from.
    pub span: Range<usize>,
}

/// A single line of input: either a bare expression or an equation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Stmt {
    /// An expression, such as `x^2 + 1`.
    Expr(Expr),

    /// An equation, such as `y = x^2 + 1`.
    Equation(Equation),
}

impl Stmt {
    /// Returns the span of the statement.
    pub fn span(&self) -> Range<usize> {
        match self {
            Stmt::Expr(expr) => expr.span(),
            Stmt::Equation(equation) => equation.span.clone(),
        }
    }
}

impl Parse for Stmt {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let lhs = input.try_parse::<Expr>()?;
        if input.try_parse::<Assign>().is_err() {
            return Ok(Stmt::Expr(lhs));
        }

        let rhs = input.try_parse::<Expr>()?;
        if input.peek_kind() == Some(TokenKind::Assign) {
            return Err(input.error(kind::ChainedEquation));
        }

        let span = lhs.span().start..rhs.span().end;
        Ok(Stmt::Equation(Equation { lhs, rhs, span }))
    }
}
