use crate::{
    parser::{
        ast::{call::parse_delimited, expr::Expr},
        error::{kind, Error},
        token::{CloseSquare, OpenSquare},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A list of expressions, such as `[x, y]`. Nested lists describe the rows of a matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct List {
    /// The values in the list.
    pub values: Vec<Expr>,

    /// The region of the source code that this list was parsed from.
    pub span: Range<usize>,
}

impl List {
    /// Returns the span of the list.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for List {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open_square = input.try_parse::<OpenSquare>()?;
        let values = parse_delimited(input, TokenKind::CloseSquare)?;
        let close_square = input.try_parse::<CloseSquare>()
            .map_err(|_| Error::new(vec![open_square.span.clone()], kind::UnclosedBracket))?;

        Ok(Self {
            values,
            span: open_square.span.start..close_square.span.end,
        })
    }
}
