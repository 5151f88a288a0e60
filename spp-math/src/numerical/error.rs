use crate::expr::{Builtin, Expr};
use std::fmt;

/// An error that can occur while numerically evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// A symbol has no value in the context.
    UndefinedVariable {
        /// The name of the symbol.
        name: String,

        /// Names in the context that are similar to the undefined one.
        suggestions: Vec<String>,
    },

    /// A user-defined function has no numerical meaning.
    UndefinedFunction(String),

    /// A builtin function was called with the wrong number of arguments.
    WrongArgumentCount {
        /// The function that was called.
        func: Builtin,

        /// The number of arguments that were given.
        given: usize,
    },

    /// The expression has no single numerical value, such as a derivative or a matrix.
    NotNumeric(Expr),

    /// The result is not a finite real number, such as `ln(-1)` or `1 / 0`.
    NonFinite(Expr),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndefinedVariable { name, suggestions } => {
                write!(f, "the variable `{}` is undefined", name)?;
                match suggestions.as_slice() {
                    [] => Ok(()),
                    [one] => write!(f, "; did you mean `{}`?", one),
                    many => write!(f, "; did you mean one of these variables? {}", many.join(", ")),
                }
            },
            Self::UndefinedFunction(name) => {
                write!(f, "the `{}` function has no numerical definition", name)
            },
            Self::WrongArgumentCount { func, given } => write!(
                f,
                "the `{}` function takes {} argument(s); there are {} argument(s) provided here",
                func.name(),
                func.arity(),
                given,
            ),
            Self::NotNumeric(expr) => write!(f, "`{}` cannot be evaluated to a number", expr),
            Self::NonFinite(expr) => write!(f, "`{}` does not evaluate to a finite real number", expr),
        }
    }
}

impl std::error::Error for EvalError {}
