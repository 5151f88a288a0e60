use spp_math::{Equation, Expr};

/// One side of a displayed equation.
///
/// Anything that can stand on one side of an equal sign converts into a [`Side`]: an [`Expr`], a
/// name (which becomes a symbol), a number, or a whole [`Equation`].
#[derive(Debug, Clone, PartialEq)]
pub enum Side {
    /// A single expression.
    Expr(Expr),

    /// A whole equation.
    Equation(Equation),
}

impl From<Expr> for Side {
    fn from(expr: Expr) -> Self {
        Self::Expr(expr)
    }
}

impl From<&Expr> for Side {
    fn from(expr: &Expr) -> Self {
        Self::Expr(expr.clone())
    }
}

impl From<Equation> for Side {
    fn from(equation: Equation) -> Self {
        Self::Equation(equation)
    }
}

impl From<&Equation> for Side {
    fn from(equation: &Equation) -> Self {
        Self::Equation(equation.clone())
    }
}

impl From<&str> for Side {
    fn from(name: &str) -> Self {
        Self::Expr(Expr::symbol(name))
    }
}

impl From<String> for Side {
    fn from(name: String) -> Self {
        Self::Expr(Expr::symbol(name))
    }
}

impl From<i32> for Side {
    fn from(num: i32) -> Self {
        Self::Expr(Expr::number(num))
    }
}

impl From<f64> for Side {
    fn from(num: f64) -> Self {
        Self::Expr(Expr::number(num))
    }
}
