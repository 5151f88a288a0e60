//! The cost of Hohmann and bi-parabolic transfers between circular orbits.
//!
//! Both costs are normalized by the circular speed of the initial orbit, `sqrt(mu / r_o)`, and
//! written in terms of the orbit ratio `alpha = r_f / r_o`.

use crate::error::Error;
use spp_math::{
    numerical::{eval, Ctxt},
    primitive::float,
    Expr,
};

/// Total velocity change of a Hohmann transfer, divided by `sqrt(mu / r_o)`.
pub const HOHMANN: &str = "sqrt(2 alpha / (alpha + 1)) - 1 + sqrt(1 / alpha) (1 - sqrt(2 / (alpha + 1)))";

/// Total velocity change of a bi-parabolic transfer, divided by `sqrt(mu / r_o)`.
pub const BI_PARABOLIC: &str = "(sqrt(2) - 1) (1 + sqrt(1 / alpha))";

/// Parses one of the fixed expressions used by the paper.
pub fn parse(input: &'static str) -> Result<Expr, Error> {
    input.parse().map_err(|err| Error::Parse { input, err })
}

/// The normalized costs of both transfers.
#[derive(Debug, Clone)]
pub struct Transfer {
    /// The cost of the Hohmann transfer.
    pub hohmann: Expr,

    /// The cost of the bi-parabolic transfer.
    pub bi_parabolic: Expr,
}

impl Transfer {
    /// Parses both cost expressions.
    pub fn new() -> Result<Self, Error> {
        Ok(Self {
            hohmann: parse(HOHMANN)?,
            bi_parabolic: parse(BI_PARABOLIC)?,
        })
    }

    /// Evaluates a cost expression at the given orbit ratio.
    pub fn eval_at(expr: &Expr, alpha: f64) -> Result<f64, Error> {
        let mut ctxt = Ctxt::default();
        ctxt.add_var("alpha", float(alpha));
        Ok(eval(expr, &ctxt)?.to_f64())
    }

    /// Returns the costs of the Hohmann and bi-parabolic transfers at the given orbit ratio.
    pub fn costs(&self, alpha: f64) -> Result<(f64, f64), Error> {
        Ok((Self::eval_at(&self.hohmann, alpha)?, Self::eval_at(&self.bi_parabolic, alpha)?))
    }

    /// Hohmann cost minus bi-parabolic cost.
    pub fn difference(&self, alpha: f64) -> Result<f64, Error> {
        let (hohmann, bi_parabolic) = self.costs(alpha)?;
        Ok(hohmann - bi_parabolic)
    }

    /// Finds the orbit ratio where both transfers cost the same, by bisection on `[lo, hi]`.
    pub fn crossover(&self, lo: f64, hi: f64, tolerance: f64) -> Result<f64, Error> {
        bisection(|alpha| self.difference(alpha), lo, hi, tolerance)
    }
}

/// Finds a root of `f` in `[a, b]` by bisection. `f(a)` and `f(b)` must have opposite signs.
pub fn bisection<F>(f: F, mut a: f64, mut b: f64, tolerance: f64) -> Result<f64, Error>
where
    F: Fn(f64) -> Result<f64, Error>,
{
    if a > b {
        std::mem::swap(&mut a, &mut b);
    }

    let mut fa = f(a)?;
    let fb = f(b)?;
    if fa * fb > 0.0 {
        return Err(Error::NoCrossover { lo: a, hi: b });
    }
    if fa == 0.0 {
        return Ok(a);
    }
    if fb == 0.0 {
        return Ok(b);
    }

    while b - a > tolerance {
        let c = 0.5 * (a + b);
        let fc = f(c)?;
        if fc == 0.0 {
            return Ok(c);
        }
        if fa * fc < 0.0 {
            b = c;
        } else {
            a = c;
            fa = fc;
        }
    }

    Ok(0.5 * (a + b))
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{assert_float_absolute_eq, assert_float_relative_eq};
    use super::*;

    #[test]
    fn same_orbit_costs_nothing() {
        let transfer = Transfer::new().unwrap();
        let (hohmann, bi_parabolic) = transfer.costs(1.0).unwrap();
        assert_float_absolute_eq!(hohmann, 0.0, 1e-12);
        assert_float_relative_eq!(bi_parabolic, 2.0 * (2f64.sqrt() - 1.0));
    }

    #[test]
    fn known_crossover() {
        let transfer = Transfer::new().unwrap();
        let alpha = transfer.crossover(1.0, 40.0, 1e-10).unwrap();
        assert_float_absolute_eq!(alpha, 11.94, 0.01);
    }

    #[test]
    fn bisection_of_polynomial() {
        let root = bisection(|x| Ok(x * x - 2.0), 0.0, 2.0, 1e-12).unwrap();
        assert_float_absolute_eq!(root, 2f64.sqrt(), 1e-10);
    }

    #[test]
    fn bisection_needs_a_sign_change() {
        let err = bisection(|x| Ok(x * x + 1.0), -1.0, 1.0, 1e-6).unwrap_err();
        assert!(matches!(err, Error::NoCrossover { .. }));
    }
}
