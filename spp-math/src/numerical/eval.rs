use crate::{
    expr::{Builtin, Expr, Func, Primary},
    primitive::float,
};
use rug::{ops::Pow, Float};
use super::{ctxt::Ctxt, error::EvalError};

/// Evaluates a builtin function at the given value.
fn eval_builtin(func: Builtin, x: Float) -> Float {
    match func {
        Builtin::Sin => x.sin(),
        Builtin::Cos => x.cos(),
        Builtin::Tan => x.tan(),
        Builtin::Exp => x.exp(),
        Builtin::Ln => x.ln(),
        Builtin::Sqrt => x.sqrt(),
        Builtin::Abs => x.abs(),
        Builtin::Re => x,
        Builtin::Im => float(0),
    }
}

/// Numerically evaluates an expression, looking up the value of every symbol in the context.
///
/// Returns an error if a symbol is undefined, the expression contains a user-defined function,
/// a derivative, or a matrix, or if any intermediate result is not a finite real number.
pub fn eval(expr: &Expr, ctxt: &Ctxt) -> Result<Float, EvalError> {
    let value = match expr {
        Expr::Primary(Primary::Number(num)) => num.clone(),
        Expr::Primary(Primary::Symbol(name)) => ctxt.get_var(name)
            .cloned()
            .ok_or_else(|| EvalError::UndefinedVariable {
                name: name.clone(),
                suggestions: ctxt.get_similar_vars(name)
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            })?,
        Expr::Primary(Primary::Call(Func::Builtin(func), args)) => {
            let [arg] = args.as_slice() else {
                return Err(EvalError::WrongArgumentCount { func: *func, given: args.len() });
            };
            eval_builtin(*func, eval(arg, ctxt)?)
        },
        Expr::Primary(Primary::Call(Func::Named(name), _)) => {
            return Err(EvalError::UndefinedFunction(name.clone()));
        },
        Expr::Add(terms) => terms.iter()
            .try_fold(float(0), |acc, term| Ok::<_, EvalError>(acc + eval(term, ctxt)?))?,
        Expr::Mul(factors) => factors.iter()
            .try_fold(float(1), |acc, factor| Ok::<_, EvalError>(acc * eval(factor, ctxt)?))?,
        Expr::Exp(base, exp) => eval(base, ctxt)?.pow(&eval(exp, ctxt)?),
        Expr::Derivative(_) | Expr::Matrix(_) => return Err(EvalError::NotNumeric(expr.clone())),
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::NonFinite(expr.clone()))
    }
}
