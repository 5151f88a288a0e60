//! Numerical evaluation of [`Expr`](crate::expr::Expr)s, used to tabulate and solve the
//! expressions a document derives.

pub mod ctxt;
pub mod error;
pub mod eval;

pub use ctxt::Ctxt;
pub use error::EvalError;
pub use eval::eval;
