use crate::parser::{
    ast::{expr::Expr, unary::Unary},
    error::Error,
    token::op::{BinOp, BinOpKind},
    Associativity,
    Parser,
    Precedence,
};
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    fn build(lhs: Expr, op: BinOp, rhs: Expr) -> Expr {
        let span = lhs.span().start..rhs.span().end;
        Expr::Binary(Self {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
            span,
        })
    }

    /// After parsing the left-hand-side of a potential binary expression, parse ahead to see if
    /// there is a binary operator with at least the given precedence, and a right-hand-side.
    ///
    /// This is precedence climbing: the right-hand-side of an operator is parsed with a minimum
    /// precedence one step higher than the operator's own (or equal to it, for right-associative
    /// operators), so `1 + 2 * 3` groups the multiplication first and `a - b - c` groups to the
    /// left.
    ///
    /// When no operator follows but another primary expression does, such as the `x` in `2x`, an
    /// implicit multiplication is inserted. This only happens if multiplication is allowed at
    /// the current minimum precedence.
    pub fn parse_expr(
        input: &mut Parser,
        mut lhs: Expr,
        precedence: Precedence,
    ) -> Result<Expr, Error> {
        loop {
            let start = input.cursor;
            match input.try_parse::<BinOp>() {
                Ok(op) if op.precedence() >= precedence => {
                    let min = match op.associativity() {
                        Associativity::Left => op.precedence().next(),
                        Associativity::Right => op.precedence(),
                    };
                    let rhs = Unary::parse_or_lower(input)?;
                    let rhs = Self::parse_expr(input, rhs, min)?;
                    lhs = Self::build(lhs, op, rhs);
                },
                Ok(_) => {
                    // lower precedence; let the caller pick this operator up
                    input.cursor = start;
                    break;
                },
                Err(_) => {
                    let mul_precedence = BinOpKind::Mul.precedence();
                    if mul_precedence < precedence
                        || !input.peek_kind().is_some_and(|kind| kind.starts_primary()) {
                        break;
                    }

                    let rhs = Expr::parse_primary(input)?;
                    let rhs = Self::parse_expr(input, rhs, mul_precedence.next())?;
                    let op = BinOp {
                        kind: BinOpKind::Mul,
                        implicit: true,
                        span: lhs.span().end..rhs.span().start,
                    };
                    lhs = Self::build(lhs, op, rhs);
                },
            }
        }

        Ok(lhs)
    }
}
