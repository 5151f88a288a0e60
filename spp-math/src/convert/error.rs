//! Errors that can occur while converting a parsed expression into an [`Expr`](crate::expr::Expr).

use ariadne::Fmt;
use spp_attrs::ErrorKind;
use spp_error::EXPR;

/// A number literal could not be read.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid number `{}`", self.value),
    labels = ["this number"],
)]
pub struct InvalidNumber {
    /// The text of the literal.
    pub value: String,
}

/// A function was called with the wrong number of arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("wrong number of arguments for the `{}` function", self.name),
    labels = ["this function call", ""],
    help = format!(
        "the `{}` function takes {} argument(s); there are {} argument(s) provided here",
        (&self.name).fg(EXPR),
        self.expected,
        self.given
    )
)]
pub struct WrongArgumentCount {
    /// The name of the function that was called.
    pub name: String,

    /// A description of the number of arguments that were expected.
    pub expected: &'static str,

    /// The number of arguments that were given.
    pub given: usize,
}

/// The variable to differentiate against is not a symbol.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected a variable to differentiate against",
    labels = ["this is not a symbol"],
    help = format!("write the variable name directly, as in {}", "diff(z(t), t)".fg(EXPR)),
)]
pub struct InvalidDerivativeVariable;

/// The order of a derivative is not a non-negative integer.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "invalid derivative order",
    labels = ["this must be a whole number, such as 2"],
)]
pub struct InvalidDerivativeOrder;

/// The derivative could not be computed symbolically.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "could not compute this derivative",
    labels = [self.reason.clone(), String::new()],
)]
pub struct DerivativeFailed {
    /// Why the derivative failed.
    pub reason: String,
}

/// A list was empty, so no matrix can be built from it.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "empty matrix",
    labels = ["add at least one element here"],
)]
pub struct EmptyMatrix;

/// The rows of a matrix have different lengths.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "the rows of this matrix have different lengths",
    labels = [format!("this row has {} element(s)", self.found)],
    help = format!("every row must have {} element(s), like the first row", self.expected),
)]
pub struct RaggedMatrix {
    /// The number of elements in the first row.
    pub expected: usize,

    /// The number of elements in the offending row.
    pub found: usize,
}

/// A list mixes nested lists (rows) and plain elements.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "cannot mix rows and elements in a matrix",
    labels = ["this list"],
    help = format!(
        "write either a column {} or a list of rows {}",
        "[a, b]".fg(EXPR),
        "[[a, b], [c, d]]".fg(EXPR)
    ),
)]
pub struct MixedMatrix;
