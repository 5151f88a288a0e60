//! Symbolic differentiation of [`Expr`]s.
//!
//! Derivatives are built with [`MultBuilder`] and [`SumBuilder`], which fold numeric constants
//! as they go, so results such as `1 + -1` collapse to `0` instead of being left as a sum. The
//! derivative of a user-defined function cannot be computed, so it is left as an unevaluated
//! [`Derivative`] node.

mod function;

use crate::{
    expr::{Derivative, Expr, Func, Primary},
    primitive::float,
};
use rug::Float;
use std::fmt;

/// Helper struct to build a product of expressions while applying basic simplification rules.
/// Numeric factors are multiplied into a single coefficient, and factors of one are dropped. If
/// any factor is zero, the product is reduced to zero.
struct MultBuilder {
    coefficient: Float,
    factors: Vec<Expr>,
}

impl Default for MultBuilder {
    fn default() -> Self {
        Self {
            coefficient: float(1),
            factors: Vec::new(),
        }
    }
}

impl From<MultBuilder> for Expr {
    fn from(value: MultBuilder) -> Self {
        if value.coefficient.is_zero() || value.factors.iter().any(Expr::is_zero) {
            return Expr::number(0);
        }

        let mut factors = value.factors;
        if value.coefficient != 1 {
            factors.insert(0, Expr::Primary(Primary::Number(value.coefficient)));
        }
        Expr::Mul(factors).downgrade()
    }
}

impl MultBuilder {
    fn mult(&mut self, e: Expr) {
        match e {
            Expr::Primary(Primary::Number(num)) => self.coefficient *= num,
            Expr::Mul(factors) => factors.into_iter().for_each(|factor| self.mult(factor)),
            e if e.is_one() => {},
            e => self.factors.push(e),
        }
    }
}

/// Helper struct to build a summation of expressions while applying basic simplification rules.
/// Numeric terms are added into a single constant, and only non-zero expressions are added to
/// the sum.
struct SumBuilder {
    constant: Float,
    terms: Vec<Expr>,
}

impl Default for SumBuilder {
    fn default() -> Self {
        Self {
            constant: float(0),
            terms: Vec::new(),
        }
    }
}

impl From<SumBuilder> for Expr {
    fn from(value: SumBuilder) -> Self {
        let mut terms = value.terms;
        if !value.constant.is_zero() {
            terms.push(Expr::Primary(Primary::Number(value.constant)));
        }
        Expr::Add(terms).downgrade()
    }
}

impl SumBuilder {
    fn add(&mut self, e: Expr) {
        match e {
            Expr::Primary(Primary::Number(num)) => self.constant += num,
            Expr::Add(terms) => terms.into_iter().for_each(|term| self.add(term)),
            e if e.is_zero() => {},
            e => self.terms.push(e),
        }
    }
}

/// `(f + g)' = f' + g'`
fn sum_rule(exprs: &[Expr], var: &str) -> Result<Expr, SymbolicDerivativeError> {
    let mut sum = SumBuilder::default();
    for elem in exprs {
        sum.add(derivative(elem, var)?);
    }
    Ok(sum.into())
}

/// `(f * g * h)' = f' * g * h + f * g' * h + f * g * h'`
fn product_rule(product: &[Expr], with: &str) -> Result<Expr, SymbolicDerivativeError> {
    let mut outer_sum = SumBuilder::default();

    for derivative_index in 0..product.len() {
        let mut inner_mult = MultBuilder::default();
        for (term_index, term) in product.iter().enumerate() {
            if derivative_index == term_index {
                inner_mult.mult(derivative(term, with)?);
            } else {
                inner_mult.mult(term.clone());
            }
        }

        outer_sum.add(inner_mult.into());
    }

    Ok(outer_sum.into())
}

/// Differentiates `base^exp`, choosing the power rule, the exponential rule, or the general rule
/// depending on which of the two sides depend on `with`.
fn power_rule(f: &Expr, base: &Expr, exp: &Expr, with: &str) -> Result<Expr, SymbolicDerivativeError> {
    let mut mult = MultBuilder::default();

    if !exp.has_symbol(with) {
        // d/dx u^n = n * u^(n - 1) * u'
        let reduced = match exp.as_number() {
            Some(num) => Expr::Primary(Primary::Number(num.clone() - 1)),
            None => exp.clone() - Expr::number(1),
        };
        mult.mult(exp.clone());
        if reduced.is_one() {
            mult.mult(base.clone());
        } else {
            mult.mult(base.clone().pow(reduced));
        }
        mult.mult(derivative(base, with)?);
    } else if !base.has_symbol(with) {
        // d/dx a^v = a^v * ln(a) * v'
        mult.mult(f.clone());
        mult.mult(function::ln(base.clone()));
        mult.mult(derivative(exp, with)?);
    } else {
        // d/dx u^v = u^v * (v' * ln(u) + v * u' / u)
        let mut sum = SumBuilder::default();

        let mut log_term = MultBuilder::default();
        log_term.mult(derivative(exp, with)?);
        log_term.mult(function::ln(base.clone()));
        sum.add(log_term.into());

        let mut base_term = MultBuilder::default();
        base_term.mult(exp.clone());
        base_term.mult(derivative(base, with)?);
        base_term.mult(base.clone().pow(Expr::number(-1)));
        sum.add(base_term.into());

        mult.mult(f.clone());
        mult.mult(sum.into());
    }

    Ok(mult.into())
}

/// The derivative of a call to a user-defined function is unknown, so it is left unevaluated.
///
/// If none of the arguments change with respect to `with`, the call is constant and the
/// derivative is zero. An argument whose derivative cannot be computed is assumed to change.
fn named_derivative(call: &Expr, args: &[Expr], with: &str) -> Expr {
    let constant = args.iter()
        .all(|arg| derivative(arg, with).is_ok_and(|d| d.is_zero()));
    if constant {
        Expr::number(0)
    } else {
        Expr::Derivative(Derivative::new(call.clone(), with, 1))
    }
}

/// An error that can occur while computing a derivative.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolicDerivativeError {
    /// The function may be differentiable, but we do not support symbolically computing it yet.
    Unsupported(Func),

    /// The provided sub-expression is not differentiable, such as a builtin function called with
    /// the wrong number of arguments.
    Undifferentiable(Expr),
}

impl fmt::Display for SymbolicDerivativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported(func) => write!(f, "cannot differentiate the `{}` function", func.name()),
            Self::Undifferentiable(expr) => write!(f, "`{}` is not differentiable", expr),
        }
    }
}

impl std::error::Error for SymbolicDerivativeError {}

/// Computes the derivative of the given expression with respect to the variable `with`. Returns
/// [`Err`] if the derivative could not be symbolically computed.
///
/// Matrices are differentiated element-wise.
pub fn derivative(f: &Expr, with: &str) -> Result<Expr, SymbolicDerivativeError> {
    let expr = match f {
        Expr::Matrix(rows) => {
            return rows.iter()
                .map(|row| row.iter().map(|elem| derivative(elem, with)).collect::<Result<Vec<_>, _>>())
                .collect::<Result<Vec<_>, _>>()
                .map(Expr::Matrix);
        },
        _ if f.is_zero() || !f.has_symbol(with) => Expr::number(0),
        Expr::Primary(Primary::Number(_)) => Expr::number(0),
        Expr::Primary(Primary::Symbol(sym)) => {
            if sym == with {
                Expr::number(1)
            } else {
                Expr::number(0)
            }
        },
        Expr::Primary(Primary::Call(Func::Builtin(builtin), args)) => {
            function::builtin_derivative(f, *builtin, args, with)?
        },
        Expr::Primary(Primary::Call(Func::Named(_), args)) => named_derivative(f, args, with),
        Expr::Add(terms) => sum_rule(terms, with)?,
        Expr::Mul(factors) => product_rule(factors, with)?,
        Expr::Exp(base, exp) => power_rule(f, base, exp, with)?,
        Expr::Derivative(derivative) => Expr::Derivative(derivative.differentiated(with)),
    };

    if expr.is_zero() {
        Ok(Expr::number(0))
    } else {
        Ok(expr)
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_relative_eq;
    use crate::{
        expr::Builtin,
        numerical::{ctxt::Ctxt, eval::eval},
        primitive::float,
    };
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(input: &str) -> Expr {
        input.parse().unwrap()
    }

    /// Evaluates an expression with `x` set to the given value.
    fn eval_x(e: &Expr, x: f64) -> f64 {
        let mut ctxt = Ctxt::default();
        ctxt.add_var("x", float(x));
        eval(e, &ctxt).unwrap().to_f64()
    }

    /// Performs finite difference to approximate the derivative of the provided expression.
    fn finite_difference(e: &Expr, x: f64) -> f64 {
        const DX: f64 = 0.00001;
        (eval_x(e, x + DX) - eval_x(e, x)) / DX
    }

    fn test_for_function(function: &str, points: impl IntoIterator<Item = f64>) {
        let expr = parse(function);
        let symbolic = derivative(&expr, "x").unwrap();

        for point in points {
            let symbolically_computed = eval_x(&symbolic, point);
            let numerically_computed = finite_difference(&expr, point);
            assert_float_relative_eq!(symbolically_computed, numerically_computed, 0.001);
        }
    }

    #[test]
    fn power_rule_polynomial() {
        test_for_function("x^2 + x + 1", [0.5, 1., 2., 5., 8.]);
    }

    #[test]
    fn chain_rule_builtins() {
        test_for_function("sin(x^2) + cos(3x)", [0.3, 1., 2.]);
        test_for_function("sqrt(2x + 1) * ln(x)", [0.5, 1.5, 4.]);
        test_for_function("exp(x) / x", [0.5, 2., 3.]);
        test_for_function("tan(x)", [0.1, 0.7]);
    }

    #[test]
    fn variable_exponents() {
        test_for_function("2^x", [0.5, 1., 3.]);
        test_for_function("x^x", [0.5, 1., 2.]);
    }

    #[test]
    fn constants_fold_to_zero() {
        assert_eq!(derivative(&parse("t - t"), "t").unwrap(), Expr::number(0));
        assert_eq!(derivative(&parse("a * b + 5"), "t").unwrap(), Expr::number(0));
    }

    #[test]
    fn named_call_is_unevaluated() {
        let z = parse("z(t, x)");
        let dz = derivative(&z, "t").unwrap();
        assert_eq!(dz, Expr::Derivative(Derivative::new(z.clone(), "t", 1)));

        let ddz = derivative(&dz, "t").unwrap();
        assert_eq!(ddz, Expr::Derivative(Derivative::new(z, "t", 2)));
    }

    #[test]
    fn named_call_with_constant_arguments() {
        assert_eq!(derivative(&parse("z(t - t)"), "t").unwrap(), Expr::number(0));
        assert_eq!(derivative(&parse("z(x)"), "t").unwrap(), Expr::number(0));
    }

    #[test]
    fn mixed_partials_extend_the_variable_list() {
        let dz = derivative(&parse("z(t, x)"), "t").unwrap();
        let dzx = derivative(&dz, "x").unwrap();
        let Expr::Derivative(d) = dzx else {
            panic!("expected a derivative, got {dzx:?}");
        };
        assert_eq!(d.vars, vec![("t".to_string(), 1), ("x".to_string(), 1)]);
    }

    #[test]
    fn product_with_named_call() {
        let expr = parse("r(t) * sin(t)");
        let d = derivative(&expr, "t").unwrap();
        assert_eq!(d, Expr::Add(vec![
            Expr::Mul(vec![
                Expr::Derivative(Derivative::new(parse("r(t)"), "t", 1)),
                parse("sin(t)"),
            ]),
            Expr::Mul(vec![parse("r(t)"), parse("cos(t)")]),
        ]));
    }

    #[test]
    fn matrices_elementwise() {
        let m = Expr::Matrix(vec![vec![parse("t^2"), parse("a")]]);
        let d = derivative(&m, "t").unwrap();
        assert_eq!(d, Expr::Matrix(vec![vec![
            Expr::Mul(vec![Expr::number(2), Expr::symbol("t")]),
            Expr::number(0),
        ]]));
    }

    #[test]
    fn unsupported_builtins() {
        assert_eq!(
            derivative(&parse("abs(t)"), "t"),
            Err(SymbolicDerivativeError::Unsupported(Func::Builtin(Builtin::Abs))),
        );
    }
}
