//! Tokenizer and parser for the expressions and equations understood by the paper printer.
//!
//! The grammar is intentionally small: numbers, symbols (including LaTeX-style names such as
//! `\mu` or `r_o`), function calls, parentheses, `[...]` lists, unary negation, the binary
//! operators `+ - * / ^`, implicit multiplication (`2x`), and a top-level `lhs = rhs`.
//!
//! ```
//! use spp_parser::parser::{ast::Stmt, Parser};
//!
//! let stmt = Parser::new("a = 2x + sin(t)").try_parse_full::<Stmt>().unwrap();
//! assert!(matches!(stmt, Stmt::Equation(_)));
//! ```

pub mod parser;
pub mod tokenizer;
