//! Cosmetic rewriting of expressions for display.
//!
//! Equations describing a physical system are usually written in terms of functions of time,
//! such as `r(t)` or `theta(t)`. Printing them as-is produces noisy output full of argument lists
//! and `d/dt` operators. [`clean`] rewrites such an expression into the form found on paper:
//!
//! 1. [`dot_time_derivatives`]: `Derivative(r(t), (t, 2))` becomes `\ddot{r}`,
//! `Derivative(r(t), t)` becomes `\dot{r}`, and `r(t)` becomes `r`. An application that also
//! takes a boundary time is named after it, so `r(t, t_0)` becomes `r{_0}`.
//! 2. [`rename_boundary_calls`]: `r(t_0)` becomes `r{_0}` and `r(t_f)` becomes `r{_f}`.
//! 3. [`suppress_arguments`]: the remaining applications of user-defined functions lose the
//! arguments not in the keep-set.
//!
//! Every stage is pure: the input is never modified, and a new expression is returned.
//!
//! ```
//! use spp_math::{clean::{clean, CleanOptions}, Expr};
//!
//! let expr: Expr = "diff(r(t), t, 2) - r(t) diff(theta(t), t)^2".parse().unwrap();
//! let cleaned = clean(&expr, &CleanOptions::default());
//! assert_eq!(cleaned.to_string(), "\\ddot{r} - r*\\dot{theta}**2");
//! ```

mod boundary;
mod dot;
mod suppress;

pub use boundary::rename_boundary_calls;
pub use dot::{apply_rules, dot_time_derivatives, time_rules, RewriteRule};
pub use suppress::suppress_arguments;

use crate::expr::{Equation, Expr, Primary};
use log::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The symbols that stand for time.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeSymbols {
    /// The time variable, `t` by default.
    pub time: String,

    /// The initial time, `t_0` by default.
    pub initial: String,

    /// The final time, `t_f` by default.
    pub final_: String,
}

impl Default for TimeSymbols {
    fn default() -> Self {
        Self::new("t", "t_0", "t_f")
    }
}

impl TimeSymbols {
    /// Creates a new set of time symbols.
    pub fn new(time: impl Into<String>, initial: impl Into<String>, final_: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            initial: initial.into(),
            final_: final_.into(),
        }
    }
}

/// Options for [`clean`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CleanOptions {
    /// The time symbols.
    pub time: TimeSymbols,

    /// The symbols that user-defined function applications keep as arguments. If empty, every
    /// application is written as a bare symbol.
    pub keep: Vec<String>,
}

impl CleanOptions {
    /// Sets the time symbols.
    pub fn with_time(mut self, time: TimeSymbols) -> Self {
        self.time = time;
        self
    }

    /// Sets the symbols to keep as arguments.
    pub fn with_keep<I, S>(mut self, keep: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keep = keep.into_iter().map(Into::into).collect();
        self
    }
}

/// Returns true if the kind of expression is one that [`clean`] is meant for: a function call, a
/// derivative, a sum, a product, or a matrix. Bare symbols, numbers and powers are shown as they
/// are.
pub fn warrants_cleaning(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Primary(Primary::Call(..))
            | Expr::Derivative(_)
            | Expr::Add(_)
            | Expr::Mul(_)
            | Expr::Matrix(_)
    )
}

/// Cleans an expression for display. See the [module-level documentation](self) for the stages.
///
/// Matrices are cleaned element by element.
pub fn clean(expr: &Expr, options: &CleanOptions) -> Expr {
    if let Expr::Matrix(rows) = expr {
        return Expr::Matrix(
            rows.iter()
                .map(|row| row.iter().map(|elem| clean(elem, options)).collect())
                .collect(),
        );
    }

    let keep = options.keep.iter().map(String::as_str).collect::<Vec<_>>();

    let dotted = dot::dot_time_derivatives_named(expr, &options.time.time, |name, args| {
        boundary::boundary_name(name, args, &options.time).unwrap_or_else(|| name.to_string())
    });
    trace!("dotted: {}", dotted);
    let renamed = rename_boundary_calls(&dotted, &options.time);
    trace!("boundary values renamed: {}", renamed);
    let suppressed = suppress_arguments(&renamed, &keep);

    debug!("cleaned `{}` into `{}`", expr, suppressed);
    suppressed
}

/// Cleans both sides of an equation, skipping sides for which [`warrants_cleaning`] is false.
pub fn clean_equation(equation: &Equation, options: &CleanOptions) -> Equation {
    equation.map_sides(|side| {
        if warrants_cleaning(side) {
            clean(side, options)
        } else {
            side.clone()
        }
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(input: &str) -> Expr {
        input.parse().unwrap()
    }

    #[test]
    fn full_pipeline() {
        let expr = parse("diff(r(t), t) + r(t_0) + g(x, y) cos(x)");
        let options = CleanOptions::default().with_keep(["y"]);
        assert_eq!(clean(&expr, &options), Expr::Add(vec![
            Expr::symbol("\\dot{r}"),
            Expr::symbol("r{_0}"),
            parse("g(y) cos(x)"),
        ]));
    }

    #[test]
    fn boundary_time_names_time_dependent_applications() {
        let expr = parse("r(t, t_0) + diff(v(t, t_f), t)");
        assert_eq!(clean(&expr, &CleanOptions::default()), Expr::Add(vec![
            Expr::symbol("r{_0}"),
            Expr::symbol("\\dot{v{_f}}"),
        ]));
    }

    #[test]
    fn default_options_strip_everything() {
        let expr = parse("g(x, y) + h(t_f)");
        assert_eq!(clean(&expr, &CleanOptions::default()), Expr::Add(vec![
            Expr::symbol("g"),
            Expr::symbol("h{_f}"),
        ]));
    }

    #[test]
    fn matrices_element_wise() {
        let expr = parse("[[diff(z(t), t), a], [z(t), 0]]");
        assert_eq!(clean(&expr, &CleanOptions::default()), Expr::Matrix(vec![
            vec![Expr::symbol("\\dot{z}"), Expr::symbol("a")],
            vec![Expr::symbol("z"), Expr::number(0)],
        ]));
    }

    #[test]
    fn which_kinds_are_cleaned() {
        assert!(warrants_cleaning(&parse("z(t)")));
        assert!(warrants_cleaning(&parse("diff(z(t), t)")));
        assert!(warrants_cleaning(&parse("a + b")));
        assert!(warrants_cleaning(&parse("a b")));
        assert!(warrants_cleaning(&parse("[a, b]")));
        assert!(!warrants_cleaning(&parse("x")));
        assert!(!warrants_cleaning(&parse("z(t)^2")));
    }

    #[test]
    fn equation_sides() {
        let equation = Equation::new(parse("z(t)^2"), parse("diff(z(t), t) + 1"));
        let cleaned = clean_equation(&equation, &CleanOptions::default());
        assert_eq!(cleaned.lhs, parse("z(t)^2"));
        assert_eq!(cleaned.rhs, Expr::Add(vec![Expr::symbol("\\dot{z}"), Expr::number(1)]));
    }

    #[test]
    fn clean_is_pure() {
        let expr = parse("g(x, y, t) * diff(z(t), t, 2)");
        let copy = expr.clone();
        let _ = clean(&expr, &CleanOptions::default().with_keep(["x"]));
        assert_eq!(expr, copy);
    }
}
