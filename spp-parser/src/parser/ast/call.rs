use crate::{
    parser::{
        ast::{expr::Expr, literal::LitSym},
        error::{kind, Error},
        token::{CloseParen, Comma, OpenParen},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parses comma-separated expressions until the closing token is found. The closing token itself
/// is not consumed.
pub(crate) fn parse_delimited(input: &mut Parser, close: TokenKind) -> Result<Vec<Expr>, Error> {
    let mut values = Vec::new();
    if input.peek_kind() == Some(close) {
        return Ok(values);
    }

    loop {
        values.push(input.try_parse::<Expr>()?);
        if input.try_parse::<Comma>().is_err() {
            break;
        }
    }

    Ok(values)
}

/// A function call, such as `g(x, y, t)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// The name of the function being called.
    pub name: LitSym,

    /// The arguments passed to the function.
    pub args: Vec<Expr>,

    /// The region of the source code that this call was parsed from.
    pub span: Range<usize>,

    /// The span of the parentheses that surround the arguments.
    pub paren_span: Range<usize>,
}

impl Call {
    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns a span spanning the outer parentheses of the call, for use in error messages.
    pub fn outer_span(&self) -> [Range<usize>; 2] {
        [
            self.name.span.start..self.paren_span.start + 1,
            self.paren_span.end - 1..self.paren_span.end,
        ]
    }
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<LitSym>()?;
        let open_paren = input.try_parse::<OpenParen>()?;
        let args = parse_delimited(input, TokenKind::CloseParen)?;
        let close_paren = input.try_parse::<CloseParen>()
            .map_err(|_| Error::new(
                vec![name.span.start..open_paren.span.end],
                kind::UnclosedParenthesis { opening: true },
            ))?;

        let span = name.span.start..close_paren.span.end;
        Ok(Self {
            name,
            args,
            span,
            paren_span: open_paren.span.start..close_paren.span.end,
        })
    }
}
