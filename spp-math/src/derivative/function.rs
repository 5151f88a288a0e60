//! Symbolic derivatives of the builtin functions, with the chain rule applied.

use crate::expr::{Builtin, Expr, Func, Primary};
use super::{derivative, MultBuilder, SymbolicDerivativeError};

/// Creates a call to a builtin function with a single argument.
fn builtin(func: Builtin, arg: Expr) -> Expr {
    Expr::Primary(Primary::Call(Func::Builtin(func), vec![arg]))
}

/// Creates `ln(arg)`.
pub(super) fn ln(arg: Expr) -> Expr {
    builtin(Builtin::Ln, arg)
}

/// Computes the derivative of a call to a builtin function and performs the chain rule.
pub(super) fn builtin_derivative(
    call: &Expr,
    func: Builtin,
    args: &[Expr],
    with: &str,
) -> Result<Expr, SymbolicDerivativeError> {
    let [arg] = args else {
        return Err(SymbolicDerivativeError::Undifferentiable(call.clone()));
    };

    let outer = match func {
        Builtin::Sin => builtin(Builtin::Cos, arg.clone()),
        Builtin::Cos => -builtin(Builtin::Sin, arg.clone()),
        Builtin::Tan => builtin(Builtin::Cos, arg.clone()).pow(Expr::number(-2)),
        Builtin::Exp => call.clone(),
        Builtin::Ln => arg.clone().pow(Expr::number(-1)),
        Builtin::Sqrt => Expr::number(0.5) * builtin(Builtin::Sqrt, arg.clone()).pow(Expr::number(-1)),
        Builtin::Abs | Builtin::Re | Builtin::Im => {
            return Err(SymbolicDerivativeError::Unsupported(Func::Builtin(func)));
        },
    };

    let mut mult = MultBuilder::default();
    mult.mult(outer);
    mult.mult(derivative(arg, with)?);
    Ok(mult.into())
}
