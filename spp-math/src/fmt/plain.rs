use crate::expr::{Derivative, Equation, Expr, Primary};
use rug::Float;
use std::fmt::{Display, Formatter, Result};
use super::{is_reciprocal, is_sqrt, negated_term, Fraction};

/// Writes a number, without a fractional part if it is an integer.
pub(super) fn fmt_number(f: &mut Formatter, num: &Float) -> Result {
    match num.to_integer() {
        Some(int) if num.is_integer() => write!(f, "{}", int),
        _ => write!(f, "{}", num.to_f64()),
    }
}

/// Writes a comma-separated list.
fn fmt_list<T: Display>(f: &mut Formatter, items: &[T]) -> Result {
    let mut iter = items.iter();
    if let Some(item) = iter.next() {
        write!(f, "{}", item)?;
        for item in iter {
            write!(f, ", {}", item)?;
        }
    }
    Ok(())
}

/// Writes the expression, wrapped in parentheses if `paren` is true.
fn fmt_paren(f: &mut Formatter, expr: &Expr, paren: bool) -> Result {
    if paren {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

/// Writes a product as `a*b/(c*d)`.
fn fmt_product(f: &mut Formatter, factors: &[Expr]) -> Result {
    let fraction = Fraction::new(factors);
    if fraction.negative {
        write!(f, "-")?;
    }

    if fraction.numer.is_empty() {
        write!(f, "1")?;
    } else {
        let mut iter = fraction.numer.iter();
        if let Some(factor) = iter.next() {
            fmt_paren(f, factor, matches!(factor, Expr::Add(_)))?;
            for factor in iter {
                write!(f, "*")?;
                fmt_paren(f, factor, matches!(factor, Expr::Add(_)))?;
            }
        }
    }

    match fraction.denom.as_slice() {
        [] => Ok(()),
        [factor] => {
            write!(f, "/")?;
            fmt_paren(f, factor, matches!(factor, Expr::Add(_) | Expr::Mul(_)))
        },
        denom => {
            write!(f, "/(")?;
            fmt_product(f, denom)?;
            write!(f, ")")
        },
    }
}

impl Display for Primary {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Self::Number(num) => fmt_number(f, num),
            Self::Symbol(sym) => write!(f, "{}", sym),
            Self::Call(func, args) => {
                write!(f, "{}(", func.name())?;
                fmt_list(f, args)?;
                write!(f, ")")
            },
        }
    }
}

impl Display for Derivative {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "Derivative({}", self.expr)?;
        for (var, order) in &self.vars {
            if *order == 1 {
                write!(f, ", {}", var)?;
            } else {
                write!(f, ", ({}, {})", var, order)?;
            }
        }
        write!(f, ")")
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Add(terms) => {
                let mut iter = terms.iter();
                if let Some(term) = iter.next() {
                    write!(f, "{}", term)?;
                    for term in iter {
                        match negated_term(term) {
                            Some(positive) => write!(f, " - {}", positive)?,
                            None => write!(f, " + {}", term)?,
                        }
                    }
                }
                Ok(())
            },
            Self::Mul(factors) => fmt_product(f, factors),
            Self::Exp(..) if is_reciprocal(self) => fmt_product(f, std::slice::from_ref(self)),
            Self::Exp(base, exp) if is_sqrt(exp) => write!(f, "sqrt({})", base),
            Self::Exp(base, exp) => {
                let negative_base = base.as_number().map_or(false, |num| *num < 0);
                fmt_paren(f, base, negative_base || matches!(**base, Self::Add(_) | Self::Mul(_) | Self::Exp(..)))?;
                write!(f, "**")?;
                let negative_exp = exp.as_number().map_or(false, |num| *num < 0);
                fmt_paren(f, exp, negative_exp || matches!(**exp, Self::Add(_) | Self::Mul(_) | Self::Exp(..)))
            },
            Self::Derivative(derivative) => write!(f, "{}", derivative),
            Self::Matrix(rows) => {
                write!(f, "Matrix([")?;
                let mut iter = rows.iter();
                if let Some(row) = iter.next() {
                    write!(f, "[")?;
                    fmt_list(f, row)?;
                    write!(f, "]")?;
                    for row in iter {
                        write!(f, ", [")?;
                        fmt_list(f, row)?;
                        write!(f, "]")?;
                    }
                }
                write!(f, "])")
            },
        }
    }
}

impl Display for Equation {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{} = {}", self.lhs, self.rhs)
    }
}
