use crate::expr::{Builtin, Derivative, Equation, Expr, Func, Primary};
use std::fmt::{Formatter, Result};
use super::{is_reciprocal, is_sqrt, latex_symbol, negated_term, plain::fmt_number, Fraction, Latex};

/// Writes the expression, wrapped in `\left(` and `\right)` if `paren` is true.
fn fmt_paren(f: &mut Formatter, expr: &Expr, paren: bool) -> Result {
    if paren {
        write!(f, "\\left(")?;
        expr.fmt_latex(f)?;
        write!(f, "\\right)")
    } else {
        expr.fmt_latex(f)
    }
}

/// Writes the numerator or denominator of a fraction. Factors are separated by a space, or by
/// `\cdot` if the next factor starts with a digit.
fn fmt_factors(f: &mut Formatter, factors: &[Expr]) -> Result {
    if factors.is_empty() {
        return write!(f, "1");
    }

    let mut first = true;
    for factor in factors {
        let paren = matches!(factor, Expr::Add(_));
        let rendered = if paren {
            format!("\\left({}\\right)", factor.as_display())
        } else {
            factor.as_display().to_string()
        };

        if !first {
            if rendered.starts_with(|c: char| c.is_ascii_digit()) {
                write!(f, " \\cdot ")?;
            } else {
                write!(f, " ")?;
            }
        }
        write!(f, "{}", rendered)?;
        first = false;
    }
    Ok(())
}

/// Writes a product, using `\frac` if any factor belongs in the denominator.
fn fmt_product(f: &mut Formatter, factors: &[Expr]) -> Result {
    let fraction = Fraction::new(factors);
    if fraction.negative {
        write!(f, "- ")?;
    }

    if fraction.denom.is_empty() {
        fmt_factors(f, &fraction.numer)
    } else {
        write!(f, "\\frac{{")?;
        fmt_factors(f, &fraction.numer)?;
        write!(f, "}}{{")?;
        fmt_factors(f, &fraction.denom)?;
        write!(f, "}}")
    }
}

/// Writes the arguments of a function call, separated by commas.
fn fmt_args(f: &mut Formatter, args: &[Expr]) -> Result {
    let mut iter = args.iter();
    if let Some(arg) = iter.next() {
        arg.fmt_latex(f)?;
        for arg in iter {
            write!(f, ",")?;
            arg.fmt_latex(f)?;
        }
    }
    Ok(())
}

/// Writes a call to a builtin function.
fn fmt_builtin(f: &mut Formatter, builtin: Builtin, args: &[Expr]) -> Result {
    match builtin {
        Builtin::Sqrt => {
            write!(f, "\\sqrt{{")?;
            fmt_args(f, args)?;
            write!(f, "}}")
        },
        Builtin::Exp => {
            write!(f, "e^{{")?;
            fmt_args(f, args)?;
            write!(f, "}}")
        },
        Builtin::Abs => {
            write!(f, "\\left|{{")?;
            fmt_args(f, args)?;
            write!(f, "}}\\right|")
        },
        Builtin::Re | Builtin::Im => {
            write!(f, "\\operatorname{{{}}}{{\\left(", builtin.name())?;
            fmt_args(f, args)?;
            write!(f, "\\right)}}")
        },
        Builtin::Sin | Builtin::Cos | Builtin::Tan | Builtin::Ln => {
            write!(f, "\\{}{{\\left(", builtin.name())?;
            fmt_args(f, args)?;
            write!(f, " \\right)}}")
        },
    }
}

impl Latex for Primary {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        match self {
            Self::Number(num) => fmt_number(f, num),
            Self::Symbol(sym) => write!(f, "{}", latex_symbol(sym)),
            Self::Call(Func::Builtin(builtin), args) => fmt_builtin(f, *builtin, args),
            Self::Call(Func::Named(name), args) => {
                write!(f, "{}{{\\left(", latex_symbol(name))?;
                fmt_args(f, args)?;
                write!(f, " \\right)}}")
            },
        }
    }
}

/// Writes `\frac{d^{n}}{d t^{n}}` for ordinary derivatives, or `\frac{\partial^{n}}{\partial
/// t^{a} \partial x^{b}}` when the operand depends on more than one symbol.
impl Latex for Derivative {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        let partial = self.expr.free_symbols().len() > 1 || self.vars.len() > 1;
        let d = if partial { "\\partial" } else { "d" };
        let order = self.order();

        if order == 1 {
            write!(f, "\\frac{{{}}}{{", d)?;
        } else {
            write!(f, "\\frac{{{}^{{{}}}}}{{", d, order)?;
        }
        for (i, (var, var_order)) in self.vars.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{} {}", d, latex_symbol(var))?;
            if *var_order != 1 {
                write!(f, "^{{{}}}", var_order)?;
            }
        }
        write!(f, "}} ")?;

        fmt_paren(f, &self.expr, matches!(*self.expr, Expr::Add(_) | Expr::Mul(_)))
    }
}

impl Latex for Expr {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        match self {
            Self::Primary(primary) => primary.fmt_latex(f),
            Self::Add(terms) => {
                let mut iter = terms.iter();
                if let Some(term) = iter.next() {
                    term.fmt_latex(f)?;
                    for term in iter {
                        match negated_term(term) {
                            Some(positive) => {
                                write!(f, " - ")?;
                                positive.fmt_latex(f)?;
                            },
                            None => {
                                write!(f, " + ")?;
                                term.fmt_latex(f)?;
                            },
                        }
                    }
                }
                Ok(())
            },
            Self::Mul(factors) => fmt_product(f, factors),
            Self::Exp(..) if is_reciprocal(self) => fmt_product(f, std::slice::from_ref(self)),
            Self::Exp(base, exp) if is_sqrt(exp) => {
                write!(f, "\\sqrt{{")?;
                base.fmt_latex(f)?;
                write!(f, "}}")
            },
            Self::Exp(base, exp) => {
                let negative_base = base.as_number().map_or(false, |num| *num < 0);
                fmt_paren(
                    f,
                    base,
                    negative_base
                        || matches!(**base, Self::Add(_) | Self::Mul(_) | Self::Exp(..) | Self::Derivative(_)),
                )?;
                write!(f, "^{{")?;
                exp.fmt_latex(f)?;
                write!(f, "}}")
            },
            Self::Derivative(derivative) => derivative.fmt_latex(f),
            Self::Matrix(rows) => {
                write!(f, "\\left[\\begin{{matrix}}")?;
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        write!(f, "\\\\")?;
                    }
                    for (j, elem) in row.iter().enumerate() {
                        if j > 0 {
                            write!(f, " & ")?;
                        }
                        elem.fmt_latex(f)?;
                    }
                }
                write!(f, "\\end{{matrix}}\\right]")
            },
        }
    }
}

impl Latex for Equation {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        self.lhs.fmt_latex(f)?;
        write!(f, " = ")?;
        self.rhs.fmt_latex(f)
    }
}
