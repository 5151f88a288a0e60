//! Symbolic expressions for the paper printer.
//!
//! This crate provides a small symbolic core, just large enough to support the cosmetic rewriting
//! of equations before they are displayed:
//!
//! - [`expr`]: the [`Expr`] tree, with strict equality, traversal, substitution and arithmetic.
//! - [`convert`]: building an [`Expr`] from the output of [`spp_parser`].
//! - [`derivative`]: symbolic differentiation. Derivatives of user-defined functions are left
//! unevaluated as [`Derivative`] nodes.
//! - [`clean`]: the display rewriter, which turns `Derivative(r(t), t)` into `\dot{r}` and hides
//! function arguments.
//! - [`fmt`]: plain text and LaTeX output.
//! - [`numerical`]: evaluation of expressions to numbers.
//!
//! ```
//! use spp_math::{clean::{clean, CleanOptions}, Expr, Latex};
//!
//! let expr: Expr = "g(x, y) * cos(x) * diff(z(t), t)".parse().unwrap();
//! let cleaned = clean(&expr, &CleanOptions::default().with_keep(["y"]));
//! assert_eq!(cleaned.to_string(), "g(y)*cos(x)*\\dot{z}");
//! assert_eq!(
//!     cleaned.as_display().to_string(),
//!     "g{\\left(y \\right)} \\cos{\\left(x \\right)} \\dot{z}",
//! );
//! ```

pub mod clean;
pub mod consts;
pub mod convert;
pub mod derivative;
pub mod expr;
pub mod fmt;
pub mod numerical;
pub mod primitive;

pub use convert::Statement;
pub use derivative::{derivative, SymbolicDerivativeError};
pub use expr::{Builtin, Derivative, Equation, Expr, Func, Primary};
pub use fmt::Latex;
