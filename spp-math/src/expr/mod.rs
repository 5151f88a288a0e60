//! A representation of mathematical expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](spp_parser::parser::ast::expr::Expr) type from `spp_parser` is a recursive
//! `enum` that mirrors the source text. It's convenient for parsing, but not so much for
//! manipulation.
//!
//! This module defines a separate [`Expr`] that **flattens** sums and products into lists of
//! terms and factors, and carries the two node kinds that only exist after manipulation:
//! unevaluated [`Derivative`]s and [`Expr::Matrix`].
//!
//! # Strict equality
//!
//! The [`PartialEq`] and [`Eq`] implementations for [`Expr`] implement **strict equality**, not
//! semantic equality. Two expressions are strictly equal if:
//!
//! - They are the same type of expression (i.e. both [`Expr::Primary`], both [`Expr::Add`], etc.).
//! - If both are [`Expr::Primary`], both expressions must have strictly equal values. Function
//! arguments are compared in order.
//! - If both are [`Expr::Add`] or [`Expr::Mul`], both expressions must have strictly equal terms /
//! factors, in any order.
//! - If both are [`Expr::Exp`], both expressions must have strictly equal base and exponent.
//! - If both are [`Expr::Derivative`], both must differentiate strictly equal operands against the
//! same variables, with the same order for each variable. The variables are kept sorted by name,
//! so `d/dx d/dt z(t, x)` and `d/dt d/dx z(t, x)` are strictly equal.
//! - If both are [`Expr::Matrix`], both must have the same shape and strictly equal elements.
//!
//! `x + y` and `y + x` are strictly equal; `x^2 + 2x + 1` and `(x + 1)^2` are not. Strict equality
//! is what substitution uses to find the subtrees to replace.

mod func;
mod iter;

pub use func::{Builtin, Func};
pub use iter::ExprIter;

use crate::{derivative::{derivative, SymbolicDerivativeError}, primitive::float};
use rug::{ops::NegAssign, Assign, Float};
use std::{collections::BTreeSet, ops::{Add, Div, Mul, Neg, Sub}};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single term / factor, such as a number, variable, or function call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Primary {
    /// A number, such as `2` or `0.5`.
    Number(Float),

    /// A variable, such as `x` or `\mu`.
    Symbol(String),

    /// A function call, such as `sin(x)` or `z(t, x)`.
    Call(Func, Vec<Expr>),
}

/// [`Eq`] is implemented manually to allow comparing [`Primary::Number`]s. This module **must
/// never** produce non-normal [`Float`]s (such as `NaN`)! Report any bugs that cause this to
/// happen.
impl Eq for Primary {}

/// An unevaluated derivative of an expression, such as `d^2/dt^2 z(t)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Derivative {
    /// The expression being differentiated.
    pub expr: Box<Expr>,

    /// The variables the expression is differentiated against, each with the order of
    /// differentiation for that variable. Sorted by variable name.
    pub vars: Vec<(String, u32)>,
}

impl Derivative {
    /// Creates the derivative of `expr` of the given order with respect to a single variable.
    pub fn new(expr: Expr, var: impl Into<String>, order: u32) -> Self {
        Self {
            expr: Box::new(expr),
            vars: vec![(var.into(), order)],
        }
    }

    /// Returns the total order of the derivative, across all variables.
    pub fn order(&self) -> u32 {
        self.vars.iter().map(|(_, order)| order).sum()
    }

    /// Returns this derivative differentiated once more with respect to `var`.
    pub fn differentiated(&self, var: &str) -> Self {
        let mut vars = self.vars.clone();
        match vars.binary_search_by(|(name, _)| name.as_str().cmp(var)) {
            Ok(i) => vars[i].1 += 1,
            Err(i) => vars.insert(i, (var.to_string(), 1)),
        }

        Self {
            expr: self.expr.clone(),
            vars,
        }
    }
}

/// A mathematical expression with information about its terms and factors.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<Expr>),

    /// Multiple factors multiplied together.
    Mul(Vec<Expr>),

    /// An expression raised to a power.
    Exp(Box<Expr>, Box<Expr>),

    /// An unevaluated derivative.
    Derivative(Derivative),

    /// A matrix, stored as a list of rows.
    Matrix(Vec<Vec<Expr>>),
}

impl Expr {
    /// Creates a number.
    pub fn number<T>(n: T) -> Self
    where
        Float: Assign<T>,
    {
        Self::Primary(Primary::Number(float(n)))
    }

    /// Creates a symbol with the given name.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Primary(Primary::Symbol(name.into()))
    }

    /// Creates a function call. Builtin names such as `sin` produce a builtin call; any other name
    /// produces a call to a user-defined function.
    pub fn call(name: &str, args: Vec<Expr>) -> Self {
        Self::Primary(Primary::Call(Func::from_name(name), args))
    }

    /// Creates a call to a user-defined function, even if the name matches a builtin.
    pub fn named(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Primary(Primary::Call(Func::Named(name.into()), args))
    }

    /// Raises this expression to the given power. No simplification is done.
    pub fn pow(self, exp: Expr) -> Self {
        Self::Exp(Box::new(self), Box::new(exp))
    }

    /// If the expression is a [`Primary::Number`], returns a reference to the contained number.
    pub fn as_number(&self) -> Option<&Float> {
        match self {
            Self::Primary(Primary::Number(num)) => Some(num),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Symbol`], returns a reference to the contained symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// If the expression is a call to a user-defined function, returns its name and arguments.
    pub fn as_named_call(&self) -> Option<(&str, &[Expr])> {
        match self {
            Self::Primary(Primary::Call(Func::Named(name), args)) => Some((name, args)),
            _ => None,
        }
    }

    /// Returns true if the expression is a call to a user-defined function.
    pub fn is_named_call(&self) -> bool {
        self.as_named_call().is_some()
    }

    /// Returns true if the expression is identically zero.
    ///
    /// This is a structural test: a number equal to zero, a sum of zeros, a product with a zero
    /// factor, zero raised to a nonzero power, or a matrix of zeros. It never simplifies, so
    /// `x - x` is not considered zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Primary(Primary::Number(num)) => num.is_zero(),
            Self::Primary(_) => false,
            Self::Add(terms) => terms.iter().all(Self::is_zero),
            Self::Mul(factors) => factors.iter().any(Self::is_zero),
            Self::Exp(base, exp) => base.is_zero() && !exp.is_zero(),
            Self::Derivative(derivative) => derivative.expr.is_zero(),
            Self::Matrix(rows) => rows.iter().flatten().all(Self::is_zero),
        }
    }

    /// Returns true if the expression is identically one.
    pub(crate) fn is_one(&self) -> bool {
        match self {
            Self::Primary(Primary::Number(num)) => *num == 1,
            Self::Mul(factors) => factors.iter().all(Self::is_one),
            Self::Exp(base, exp) => exp.is_zero() || base.is_one(),
            Self::Add(terms) => terms.len() == 1 && terms[0].is_one(),
            _ => false,
        }
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`Expr::Add`] with zero / one term, or an [`Expr::Mul`]
    /// with zero / one factor. This function checks for these cases and simplifies the expression
    /// into the single term / factor, or an [`Expr::Primary`] containing the number 0 or 1.
    pub(crate) fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => {
                if terms.is_empty() {
                    Self::number(0)
                } else if terms.len() == 1 {
                    terms.remove(0)
                } else {
                    Self::Add(terms)
                }
            },
            Self::Mul(mut factors) => {
                if factors.is_empty() {
                    Self::number(1)
                } else if factors.len() == 1 {
                    factors.remove(0)
                } else {
                    Self::Mul(factors)
                }
            },
            _ => self,
        }
    }

    /// Returns the direct children of this expression, in order.
    ///
    /// The children of a function call are its arguments, the child of a derivative is its
    /// operand, and the children of a matrix are its elements in row-major order.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Self::Primary(Primary::Call(_, args)) => args.iter().collect(),
            Self::Primary(_) => Vec::new(),
            Self::Add(exprs) | Self::Mul(exprs) => exprs.iter().collect(),
            Self::Exp(base, exp) => vec![&**base, &**exp],
            Self::Derivative(derivative) => vec![&*derivative.expr],
            Self::Matrix(rows) => rows.iter().flatten().collect(),
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Returns the names of all symbols that appear in the expression, deduplicated and sorted.
    pub fn free_symbols(&self) -> BTreeSet<&str> {
        self.post_order_iter()
            .filter_map(Self::as_symbol)
            .collect()
    }

    /// Returns true if a symbol with the given name appears in the expression.
    pub fn has_symbol(&self, name: &str) -> bool {
        self.post_order_iter().any(|expr| expr.as_symbol() == Some(name))
    }

    /// Returns every distinct call to a user-defined function in the expression, in post-order
    /// (inner calls before the calls containing them). Duplicates are detected with strict
    /// equality.
    pub fn named_calls(&self) -> Vec<&Expr> {
        let mut calls: Vec<&Expr> = Vec::new();
        for expr in self.post_order_iter() {
            if expr.is_named_call() && !calls.contains(&expr) {
                calls.push(expr);
            }
        }
        calls
    }

    /// Rebuilds the expression top-down. `f` is called on every node before its children; if it
    /// returns `Some`, the node is replaced and its children are not visited. Otherwise, the node
    /// is rebuilt from its mapped children.
    ///
    /// The original expression is never modified.
    pub fn map<F>(&self, f: &mut F) -> Expr
    where
        F: FnMut(&Expr) -> Option<Expr>,
    {
        if let Some(replacement) = f(self) {
            return replacement;
        }

        match self {
            Self::Primary(Primary::Call(func, args)) => Self::Primary(Primary::Call(
                func.clone(),
                args.iter().map(|arg| arg.map(f)).collect(),
            )),
            Self::Primary(primary) => Self::Primary(primary.clone()),
            Self::Add(terms) => Self::Add(terms.iter().map(|term| term.map(f)).collect()),
            Self::Mul(factors) => Self::Mul(factors.iter().map(|factor| factor.map(f)).collect()),
            Self::Exp(base, exp) => Self::Exp(Box::new(base.map(f)), Box::new(exp.map(f))),
            Self::Derivative(derivative) => Self::Derivative(Derivative {
                expr: Box::new(derivative.expr.map(f)),
                vars: derivative.vars.clone(),
            }),
            Self::Matrix(rows) => Self::Matrix(
                rows.iter()
                    .map(|row| row.iter().map(|elem| elem.map(f)).collect())
                    .collect(),
            ),
        }
    }

    /// Replaces every subtree strictly equal to `old` with `new`, returning a new expression.
    ///
    /// Replacement happens top-down, so a replaced subtree is not searched again.
    pub fn subs(&self, old: &Expr, new: &Expr) -> Expr {
        self.map(&mut |expr| (expr == old).then(|| new.clone()))
    }

    /// Computes the derivative of this expression with respect to `var`.
    pub fn diff(&self, var: &str) -> Result<Expr, SymbolicDerivativeError> {
        derivative(self, var)
    }
}

/// Returns true if `lhs` and `rhs` contain the same expressions the same number of times.
fn same_multiset(lhs: &[Expr], rhs: &[Expr]) -> bool {
    let count = |list: &[Expr], target: &Expr| list.iter().filter(|expr| *expr == target).count();
    lhs.len() == rhs.len()
        && lhs.iter().all(|expr| count(lhs, expr) == count(rhs, expr))
}

/// Checks if two expressions are **strictly** equal.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                same_multiset(lhs, rhs)
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            (Self::Derivative(lhs), Self::Derivative(rhs)) => lhs == rhs,
            (Self::Matrix(lhs), Self::Matrix(rhs)) => lhs == rhs,
            _ => false,
        }
    }
}

/// Adds two [`Expr`]s together. No simplification is done, except that two numbers are added
/// together, and sums are combined in one list of terms (flattening).
impl Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Primary(Primary::Number(lhs)), Self::Primary(Primary::Number(rhs))) => {
                Self::Primary(Primary::Number(lhs + rhs))
            },
            (Self::Add(mut terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
                Self::Add(terms)
            },
            (Self::Add(mut terms), other) => {
                terms.push(other);
                Self::Add(terms)
            },
            (other, Self::Add(mut terms)) => {
                terms.insert(0, other);
                Self::Add(terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

/// Subtracts two [`Expr`]s, as `lhs + -rhs`.
impl Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + -rhs
    }
}

/// Multiplies two [`Expr`]s together. No simplification is done, except that two numbers are
/// multiplied together, and products are combined in one list of factors (flattening).
impl Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Primary(Primary::Number(lhs)), Self::Primary(Primary::Number(rhs))) => {
                Self::Primary(Primary::Number(lhs * rhs))
            },
            (Self::Mul(mut factors), Self::Mul(rhs_factors)) => {
                factors.extend(rhs_factors);
                Self::Mul(factors)
            },
            (Self::Mul(mut factors), other) => {
                factors.push(other);
                Self::Mul(factors)
            },
            (other, Self::Mul(mut factors)) => {
                factors.insert(0, other);
                Self::Mul(factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

/// Divides two [`Expr`]s, as `lhs * rhs^-1`. Two numbers are divided directly if the divisor is
/// nonzero.
impl Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Primary(Primary::Number(lhs)), Self::Primary(Primary::Number(rhs)))
                if !rhs.is_zero() => Self::Primary(Primary::Number(lhs / rhs)),
            (lhs, Self::Exp(base, exp)) if exp.as_number().is_some() => lhs * Self::Exp(base, Box::new(-*exp)),
            (lhs, rhs) => {
                let recip = rhs.pow(Self::number(-1));
                if lhs.is_one() {
                    recip
                } else {
                    lhs * recip
                }
            },
        }
    }
}

/// Multiplies this expression by -1. No simplification is done, except for the case where the
/// expression is a number or a product with a leading number, in which case that number is
/// negated.
impl Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Number(num)) => Self::Primary(Primary::Number(-num)),
            Self::Mul(mut factors) => match factors.first_mut() {
                Some(Self::Primary(Primary::Number(num))) => {
                    num.neg_assign();
                    Self::Mul(factors)
                },
                _ => Self::number(-1) * Self::Mul(factors),
            },
            expr => Self::number(-1) * expr,
        }
    }
}

/// An equation `lhs = rhs` between two expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Equation {
    /// The left-hand side of the equation.
    pub lhs: Expr,

    /// The right-hand side of the equation.
    pub rhs: Expr,
}

impl Equation {
    /// Creates a new equation.
    pub fn new(lhs: Expr, rhs: Expr) -> Self {
        Self { lhs, rhs }
    }

    /// Returns the names of all symbols on either side of the equation.
    pub fn free_symbols(&self) -> BTreeSet<&str> {
        let mut symbols = self.lhs.free_symbols();
        symbols.extend(self.rhs.free_symbols());
        symbols
    }

    /// Applies `f` to both sides of the equation.
    pub fn map_sides(&self, mut f: impl FnMut(&Expr) -> Expr) -> Self {
        Self {
            lhs: f(&self.lhs),
            rhs: f(&self.rhs),
        }
    }
}

/// NOTE: strict equality allows different orderings of terms and factors, but
/// `pretty_assertions` doesn't care about order. If a test fails, the diff may show terms in a
/// different order than the ones that actually differ.
#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(input: &str) -> Expr {
        input.parse().unwrap()
    }

    #[test]
    fn strict_equality() {
        let a = parse("2(x + (y - 5))");
        let b = parse("(y - 5 + x) * 2");
        assert_eq!(a, b);
    }

    #[test]
    fn strict_equality_is_not_semantic() {
        let a = parse("2(x + (y - 5))");
        let b = parse("2x + 2y - 10");
        assert_ne!(a, b);
    }

    #[test]
    fn call_arguments_are_ordered() {
        assert_ne!(parse("g(x, t)"), parse("g(t, x)"));
        assert_eq!(parse("g(x) * cos(t)"), parse("cos(t) * g(x)"));
    }

    #[test]
    fn multiset_equality_counts_duplicates() {
        let a = Expr::Add(vec![Expr::symbol("x"), Expr::symbol("x"), Expr::symbol("y")]);
        let b = Expr::Add(vec![Expr::symbol("x"), Expr::symbol("y"), Expr::symbol("y")]);
        assert_ne!(a, b);
    }

    #[test]
    fn flattening() {
        assert_eq!(parse("x + (y + z)"), Expr::Add(vec![
            Expr::symbol("x"),
            Expr::symbol("y"),
            Expr::symbol("z"),
        ]));
        assert_eq!(parse("2 * 3 * x"), Expr::Mul(vec![
            Expr::number(6),
            Expr::symbol("x"),
        ]));
    }

    #[test]
    fn free_symbols_include_call_arguments() {
        let expr = parse("g(x, y, t) * cos(x) + mu");
        let symbols = expr.free_symbols().into_iter().collect::<Vec<_>>();
        assert_eq!(symbols, vec!["mu", "t", "x", "y"]);
    }

    #[test]
    fn named_calls_are_deduplicated() {
        let expr = parse("z(t) * z(t) + sin(z(t)) + w(x)");
        let calls = expr.named_calls();
        assert_eq!(calls, vec![&parse("z(t)"), &parse("w(x)")]);
    }

    #[test]
    fn zero_test() {
        assert!(Expr::number(0).is_zero());
        assert!(parse("0 * x").is_zero());
        assert!(Expr::Add(vec![Expr::number(0), Expr::number(0)]).is_zero());
        assert!(!parse("x - x").is_zero());
        assert!(!parse("0^0").is_zero());
    }

    #[test]
    fn subs_replaces_every_occurrence() {
        let expr = parse("z(t) + sin(z(t)) * y");
        let replaced = expr.subs(&parse("z(t)"), &Expr::symbol("z"));
        assert_eq!(replaced, parse("z + sin(z) * y"));
        // the input is left untouched
        assert_eq!(expr, parse("z(t) + sin(z(t)) * y"));
    }

    #[test]
    fn subs_inside_derivative() {
        let expr = Expr::Derivative(Derivative::new(parse("z(t) + a"), "t", 1));
        let replaced = expr.subs(&Expr::symbol("a"), &Expr::number(2));
        assert_eq!(replaced, Expr::Derivative(Derivative::new(parse("z(t) + 2"), "t", 1)));
    }

    #[test]
    fn derivative_order() {
        let d = Derivative::new(parse("z(t, x)"), "t", 1);
        let dd = d.differentiated("t").differentiated("x");
        assert_eq!(dd.vars, vec![("t".to_string(), 2), ("x".to_string(), 1)]);
        assert_eq!(dd.order(), 3);
    }

    #[test]
    fn mixed_partials_in_any_order() {
        let xt = parse("diff(diff(z(t, x), x), t)");
        let tx = parse("diff(diff(z(t, x), t), x)");
        assert_eq!(xt, tx);

        let Expr::Derivative(d) = &xt else {
            panic!("expected a derivative, got {xt:?}");
        };
        assert_eq!(d.vars, vec![("t".to_string(), 1), ("x".to_string(), 1)]);

        let expr = xt.clone() + Expr::symbol("y");
        assert_eq!(expr.subs(&tx, &Expr::symbol("w")), parse("w + y"));
    }

    #[test]
    fn negation() {
        assert_eq!(-Expr::number(2), Expr::number(-2));
        assert_eq!(-parse("2x"), Expr::Mul(vec![Expr::number(-2), Expr::symbol("x")]));
        assert_eq!(-Expr::symbol("x"), Expr::Mul(vec![Expr::number(-1), Expr::symbol("x")]));
    }

    #[test]
    fn division() {
        assert_eq!(Expr::number(1) / Expr::number(4), Expr::number(0.25));
        assert_eq!(
            Expr::symbol("x") / Expr::symbol("y"),
            Expr::Mul(vec![Expr::symbol("x"), Expr::symbol("y").pow(Expr::number(-1))]),
        );
        assert_eq!(Expr::number(1) / Expr::symbol("y"), Expr::symbol("y").pow(Expr::number(-1)));
    }

    #[test]
    fn equation_symbols() {
        let equation = Equation::new(parse("y"), parse("a x + b"));
        let symbols = equation.free_symbols().into_iter().collect::<Vec<_>>();
        assert_eq!(symbols, vec!["a", "b", "x", "y"]);
    }
}
