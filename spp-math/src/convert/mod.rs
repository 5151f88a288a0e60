//! Conversion from the parser's AST into [`Expr`]s.
//!
//! Conversion is lossy: spans are dropped, parentheses disappear, and sums and products are
//! flattened. Two calls are given special meaning:
//!
//! - `diff(f, x)` and `diff(f, x, n)` differentiate `f` with respect to `x` (`n` times). The
//! derivative of a user-defined function stays unevaluated, so `diff(z(t), t)` is a
//! [`Derivative`](crate::expr::Derivative) node.
//! - A list `[a, b]` is a column vector, and a list of lists `[[a, b], [c, d]]` is a matrix given
//! by its rows.
//!
//! ```
//! use spp_math::{Expr, Statement};
//!
//! let expr: Expr = "g(x, y, t) * cos(x) * diff(z(t), t)".parse().unwrap();
//! assert_eq!(expr.to_string(), "g(x, y, t)*cos(x)*Derivative(z(t), t)");
//!
//! let stmt: Statement = "F = m a".parse().unwrap();
//! assert!(matches!(stmt, Statement::Equation(_)));
//! ```

pub mod error;

use crate::{
    derivative::derivative,
    expr::{Builtin, Equation, Expr},
    primitive::float_from_str,
};
use error::*;
use spp_error::Error;
use spp_parser::parser::{
    ast::{
        call::Call,
        expr::Expr as AstExpr,
        list::List,
        literal::Literal,
        stmt::{Equation as AstEquation, Stmt},
    },
    token::op::{BinOpKind, UnaryOpKind},
    Parser,
};
use std::{ops::Range, str::FromStr};

/// Removes any parentheses around the expression.
fn unparen(expr: AstExpr) -> AstExpr {
    match expr {
        AstExpr::Paren(paren) => paren.into_innermost(),
        expr => expr,
    }
}

/// Converts a call to `diff`.
fn convert_diff(call: Call) -> Result<Expr, Error> {
    let spans = call.outer_span().to_vec();
    let given = call.args.len();
    let mut args = call.args.into_iter();
    let (Some(f), Some(var), order, None) = (args.next(), args.next(), args.next(), args.next()) else {
        return Err(Error::new(spans, WrongArgumentCount {
            name: "diff".to_string(),
            expected: "2 or 3",
            given,
        }));
    };

    let var_span = var.span();
    let AstExpr::Literal(Literal::Symbol(var)) = unparen(var) else {
        return Err(Error::new(vec![var_span], InvalidDerivativeVariable));
    };

    let order = match order {
        Some(order) => {
            let order_span = order.span();
            match unparen(order) {
                AstExpr::Literal(Literal::Number(num)) => num.value.parse::<u32>()
                    .map_err(|_| Error::new(vec![order_span], InvalidDerivativeOrder))?,
                _ => return Err(Error::new(vec![order_span], InvalidDerivativeOrder)),
            }
        },
        None => 1,
    };

    let mut expr = Expr::try_from(f)?;
    for _ in 0..order {
        expr = derivative(&expr, &var.name)
            .map_err(|err| Error::new(spans.clone(), DerivativeFailed { reason: err.to_string() }))?;
    }
    Ok(expr)
}

/// Converts a function call, checking the number of arguments given to builtin functions.
fn convert_call(call: Call) -> Result<Expr, Error> {
    if call.name.name == "diff" {
        return convert_diff(call);
    }

    if let Some(builtin) = Builtin::from_name(&call.name.name) {
        if call.args.len() != builtin.arity() {
            return Err(Error::new(call.outer_span().to_vec(), WrongArgumentCount {
                name: call.name.name,
                expected: "1",
                given: call.args.len(),
            }));
        }
    }

    let args = call.args
        .into_iter()
        .map(Expr::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Expr::call(&call.name.name, args))
}

/// Converts a list into a matrix.
fn convert_list(list: List) -> Result<Expr, Error> {
    if list.values.is_empty() {
        return Err(Error::new(vec![list.span], EmptyMatrix));
    }

    let rows = list.values.iter().filter(|value| matches!(value, AstExpr::List(_))).count();
    if rows == 0 {
        // a column vector
        let column = list.values
            .into_iter()
            .map(|value| Ok(vec![Expr::try_from(value)?]))
            .collect::<Result<Vec<_>, Error>>()?;
        return Ok(Expr::Matrix(column));
    }
    if rows != list.values.len() {
        return Err(Error::new(vec![list.span], MixedMatrix));
    }

    let mut matrix: Vec<Vec<Expr>> = Vec::with_capacity(rows);
    for value in list.values {
        let AstExpr::List(row) = value else {
            continue;
        };
        let row_span: Range<usize> = row.span.clone();
        let row = row.values
            .into_iter()
            .map(Expr::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(first) = matrix.first() {
            if first.len() != row.len() {
                return Err(Error::new(vec![row_span], RaggedMatrix {
                    expected: first.len(),
                    found: row.len(),
                }));
            }
        }
        matrix.push(row);
    }

    Ok(Expr::Matrix(matrix))
}

impl TryFrom<AstExpr> for Expr {
    type Error = Error;

    fn try_from(expr: AstExpr) -> Result<Self, Self::Error> {
        match expr {
            AstExpr::Literal(Literal::Number(num)) => float_from_str(&num.value)
                .map(|value| Expr::Primary(crate::expr::Primary::Number(value)))
                .map_err(|_| Error::new(vec![num.span], InvalidNumber { value: num.value })),
            AstExpr::Literal(Literal::Symbol(sym)) => Ok(Expr::symbol(sym.name)),
            AstExpr::Paren(paren) => Self::try_from(paren.into_innermost()),
            AstExpr::Call(call) => convert_call(call),
            AstExpr::List(list) => convert_list(list),
            AstExpr::Unary(unary) => match unary.op.kind {
                UnaryOpKind::Neg => Ok(-Self::try_from(*unary.operand)?),
            },
            AstExpr::Binary(bin) => {
                let lhs = Self::try_from(*bin.lhs)?;
                let rhs = Self::try_from(*bin.rhs)?;
                Ok(match bin.op.kind {
                    BinOpKind::Add => lhs + rhs,
                    BinOpKind::Sub => lhs - rhs,
                    BinOpKind::Mul => lhs * rhs,
                    BinOpKind::Div => lhs / rhs,
                    BinOpKind::Exp => lhs.pow(rhs),
                })
            },
        }
    }
}

impl TryFrom<AstEquation> for Equation {
    type Error = Error;

    fn try_from(equation: AstEquation) -> Result<Self, Self::Error> {
        Ok(Equation::new(
            Expr::try_from(equation.lhs)?,
            Expr::try_from(equation.rhs)?,
        ))
    }
}

impl FromStr for Expr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let expr = Parser::new(s).try_parse_full::<AstExpr>()?;
        Self::try_from(expr)
    }
}

impl FromStr for Equation {
    type Err = Error;

    /// Parses an equation `lhs = rhs`. A bare expression `e` is read as the equation `e = 0`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<Statement>()? {
            Statement::Equation(equation) => Ok(equation),
            Statement::Expr(expr) => Ok(Equation::new(expr, Expr::number(0))),
        }
    }
}

/// A converted line of input: either a bare expression or an equation.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// An expression, such as `x^2 + 1`.
    Expr(Expr),

    /// An equation, such as `y = x^2 + 1`.
    Equation(Equation),
}

impl TryFrom<Stmt> for Statement {
    type Error = Error;

    fn try_from(stmt: Stmt) -> Result<Self, Self::Error> {
        match stmt {
            Stmt::Expr(expr) => Expr::try_from(expr).map(Self::Expr),
            Stmt::Equation(equation) => Equation::try_from(equation).map(Self::Equation),
        }
    }
}

impl FromStr for Statement {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stmt = Parser::new(s).try_parse_full::<Stmt>()?;
        Self::try_from(stmt)
    }
}

#[cfg(test)]
mod tests {
    use crate::expr::Derivative;
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(input: &str) -> Expr {
        input.parse().unwrap()
    }

    fn parse_err(input: &str) -> Error {
        input.parse::<Expr>().unwrap_err()
    }

    #[test]
    fn builtin_and_named_calls() {
        assert_eq!(parse("sin(x)"), Expr::call("sin", vec![Expr::symbol("x")]));
        assert_eq!(parse("z(t, x)"), Expr::named("z", vec![Expr::symbol("t"), Expr::symbol("x")]));
    }

    #[test]
    fn diff_builds_derivatives() {
        assert_eq!(
            parse("diff(z(t), t, 2)"),
            Expr::Derivative(Derivative::new(parse("z(t)"), "t", 2)),
        );
        assert_eq!(parse("diff(x^3, x)"), parse("3 x^2"));
        assert_eq!(parse("diff(z(t), t, 0)"), parse("z(t)"));
    }

    #[test]
    fn diff_errors() {
        assert_eq!(parse_err("diff(z(t))").spans, vec![0..5, 9..10]);
        assert_eq!(parse_err("diff(z(t), 2t)").spans, vec![11..13]);
        assert_eq!(parse_err("diff(z(t), t, 1.5)").spans, vec![14..17]);
        assert_eq!(parse_err("diff(abs(t), t)").spans, vec![0..5, 14..15]);
    }

    #[test]
    fn builtin_arity() {
        assert_eq!(parse_err("sin(x, y)").spans, vec![0..4, 8..9]);
    }

    #[test]
    fn matrices() {
        assert_eq!(parse("[[a, b], [c, d]]"), Expr::Matrix(vec![
            vec![Expr::symbol("a"), Expr::symbol("b")],
            vec![Expr::symbol("c"), Expr::symbol("d")],
        ]));
        assert_eq!(parse("[x, y]"), Expr::Matrix(vec![
            vec![Expr::symbol("x")],
            vec![Expr::symbol("y")],
        ]));
    }

    #[test]
    fn matrix_errors() {
        assert_eq!(parse_err("[[a, b], [c]]").spans, vec![9..12]);
        assert_eq!(parse_err("[[a], b]").spans, vec![0..8]);
        assert_eq!(parse_err("[]").spans, vec![0..2]);
    }

    #[test]
    fn statements() {
        let stmt: Statement = "r(t_0) = r_o".parse().unwrap();
        assert_eq!(stmt, Statement::Equation(Equation::new(
            Expr::named("r", vec![Expr::symbol("t_0")]),
            Expr::symbol("r_o"),
        )));

        let equation: Equation = "x^2 - 4".parse().unwrap();
        assert_eq!(equation.rhs, Expr::number(0));
    }
}
