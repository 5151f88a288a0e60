//! Formatting of [`Expr`]s, both as plain text ([`Display`](std::fmt::Display)) and as LaTeX
//! ([`Latex`]).
//!
//! Plain text follows the conventions of common computer algebra systems: `2*x**2 - y/z`,
//! `Derivative(z(t), t)`, `Matrix([[a, b]])`. LaTeX output is meant to be placed between `$$`
//! delimiters in a markdown document.

mod latex;
mod plain;
mod symbol;

pub use symbol::latex_symbol;

use crate::expr::{Expr, Primary};
use std::fmt::{Display, Formatter, Result};

/// A trait for types that can be formatted as LaTeX.
pub trait Latex {
    /// Format the value as LaTeX.
    fn fmt_latex(&self, f: &mut Formatter) -> Result;

    /// Wraps the value in a [`LatexFormatter`], which implements [`Display`].
    fn as_display(&self) -> LatexFormatter<'_, Self> {
        LatexFormatter(self)
    }
}

/// A wrapper type that implements [`Display`] for any type that implements [`Latex`].
pub struct LatexFormatter<'a, T: ?Sized>(&'a T);

impl<T: ?Sized> Display for LatexFormatter<'_, T>
where
    T: Latex,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        self.0.fmt_latex(f)
    }
}

/// A product split into its sign, numerator and denominator, the way it is written out.
///
/// Numeric factors of `1` are dropped and a `-1` only flips the sign. Powers with a negative
/// numeric exponent move to the denominator with the exponent negated.
struct Fraction {
    negative: bool,
    numer: Vec<Expr>,
    denom: Vec<Expr>,
}

impl Fraction {
    fn new(factors: &[Expr]) -> Self {
        let mut fraction = Self {
            negative: false,
            numer: Vec::new(),
            denom: Vec::new(),
        };

        for factor in factors {
            match factor {
                Expr::Primary(Primary::Number(num)) if *num < 0 => {
                    fraction.negative = !fraction.negative;
                    if *num != -1 {
                        fraction.numer.push(Expr::Primary(Primary::Number(-num.clone())));
                    }
                },
                Expr::Primary(Primary::Number(num)) if *num == 1 => {},
                Expr::Exp(base, exp) => match exp.as_number() {
                    Some(num) if *num == -1 => fraction.denom.push((**base).clone()),
                    Some(num) if *num < 0 => fraction.denom.push(
                        (**base).clone().pow(Expr::Primary(Primary::Number(-num.clone())))
                    ),
                    _ => fraction.numer.push(factor.clone()),
                },
                _ => fraction.numer.push(factor.clone()),
            }
        }

        fraction
    }
}

/// If the term would be written with a leading minus sign, returns the term without it.
fn negated_term(term: &Expr) -> Option<Expr> {
    match term {
        Expr::Primary(Primary::Number(num)) if *num < 0 => {
            Some(Expr::Primary(Primary::Number(-num.clone())))
        },
        Expr::Mul(factors) if Fraction::new(factors).negative => Some(-term.clone()),
        _ => None,
    }
}

/// Returns true if the expression is a power with a negative numeric exponent, which is written
/// as a fraction.
fn is_reciprocal(expr: &Expr) -> bool {
    matches!(expr, Expr::Exp(_, exp) if exp.as_number().map_or(false, |num| *num < 0))
}

/// Returns true if the expression is a power of one half, which is written as a square root.
fn is_sqrt(exp: &Expr) -> bool {
    exp.as_number().map_or(false, |num| *num == 0.5)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::expr::{Derivative, Equation};

    fn parse(input: &str) -> Expr {
        input.parse().unwrap()
    }

    fn plain(input: &str) -> String {
        parse(input).to_string()
    }

    fn latex(input: &str) -> String {
        parse(input).as_display().to_string()
    }

    #[test]
    fn plain_sums_and_products() {
        assert_eq!(plain("2x^2 + 3x + 1"), "2*x**2 + 3*x + 1");
        assert_eq!(plain("x - 2y"), "x - 2*y");
        assert_eq!(plain("-x + y"), "-x + y");
        assert_eq!(plain("a (b + c)"), "a*(b + c)");
        assert_eq!(plain("0.5 x"), "0.5*x");
    }

    #[test]
    fn plain_fractions() {
        assert_eq!(plain("x / y"), "x/y");
        assert_eq!(plain("1 / (x y)"), "1/(x*y)");
        assert_eq!(plain("mu / r^2"), "mu/r**2");
        assert_eq!(plain("(a + b) / (c + d)"), "(a + b)/(c + d)");
    }

    #[test]
    fn plain_powers() {
        assert_eq!(plain("(x + 1)^2"), "(x + 1)**2");
        assert_eq!(plain("x^(2t)"), "x**(2*t)");
        assert_eq!(plain("x^0.5"), "sqrt(x)");
        assert_eq!(plain("(-2)^x"), "(-2)**x");
    }

    #[test]
    fn plain_calls_and_derivatives() {
        assert_eq!(plain("g(x, y) * cos(x)"), "g(x, y)*cos(x)");
        assert_eq!(plain("log(x) + abs(y)"), "log(x) + Abs(y)");
        assert_eq!(plain("diff(z(t), t, 2)"), "Derivative(z(t), (t, 2))");
        assert_eq!(
            Expr::Derivative(Derivative::new(parse("z(t, x)"), "t", 1).differentiated("x")).to_string(),
            "Derivative(z(t, x), t, x)",
        );
    }

    #[test]
    fn plain_matrix_and_equation() {
        assert_eq!(plain("[[a, b], [c, d]]"), "Matrix([[a, b], [c, d]])");
        assert_eq!(Equation::new(parse("y"), parse("m x + b")).to_string(), "y = m*x + b");
    }

    #[test]
    fn latex_symbols() {
        assert_eq!(latex("mu"), "\\mu");
        assert_eq!(latex("r_o"), "r_{o}");
        assert_eq!(latex("Delta_v"), "\\Delta_{v}");
        assert_eq!(latex("alpha_12"), "\\alpha_{12}");
        assert_eq!(Expr::symbol("\\dot{z}").as_display().to_string(), "\\dot{z}");
        assert_eq!(Expr::symbol("r{_0}").as_display().to_string(), "r{_0}");
    }

    #[test]
    fn latex_fractions_and_roots() {
        assert_eq!(latex("mu / r^2"), "\\frac{\\mu}{r^{2}}");
        assert_eq!(latex("sqrt(mu / r)"), "\\sqrt{\\frac{\\mu}{r}}");
        assert_eq!(latex("-1 / x"), "- \\frac{1}{x}");
        assert_eq!(latex("x^0.5"), "\\sqrt{x}");
    }

    #[test]
    fn latex_sums_and_products() {
        assert_eq!(latex("2x^2 - 3x + 1"), "2 x^{2} - 3 x + 1");
        assert_eq!(latex("(x + 1)^2"), "\\left(x + 1\\right)^{2}");
        assert_eq!(latex("2 * 0.5^x"), "2 \\cdot 0.5^{x}");
    }

    #[test]
    fn latex_calls() {
        assert_eq!(latex("sin(x)"), "\\sin{\\left(x \\right)}");
        assert_eq!(latex("exp(2t)"), "e^{2 t}");
        assert_eq!(latex("g(x, y)"), "g{\\left(x,y \\right)}");
        assert_eq!(latex("abs(x)"), "\\left|{x}\\right|");
    }

    #[test]
    fn latex_derivatives() {
        assert_eq!(latex("diff(z(t), t)"), "\\frac{d}{d t} z{\\left(t \\right)}");
        assert_eq!(latex("diff(z(t), t, 2)"), "\\frac{d^{2}}{d t^{2}} z{\\left(t \\right)}");
        assert_eq!(
            latex("diff(z(t, x), t)"),
            "\\frac{\\partial}{\\partial t} z{\\left(t,x \\right)}",
        );
    }

    #[test]
    fn latex_matrix_and_equation() {
        assert_eq!(
            latex("[[a, b], [c, d]]"),
            "\\left[\\begin{matrix}a & b\\\\c & d\\end{matrix}\\right]",
        );
        let equation = Equation::new(parse("F"), parse("m a"));
        assert_eq!(equation.as_display().to_string(), "F = m a");
    }
}
