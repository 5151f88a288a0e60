use crate::{
    parser::{
        error::{kind, Error},
        token::{Float, Int, Name},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A numeric literal, such as `2` or `0.5`, stored as the exact text it was written as.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitNum {
    /// The value of the literal as a string.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitNum {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        if let Ok(int) = input.try_parse::<Int>() {
            return Ok(Self { value: int.lexeme, span: int.span });
        }

        input.try_parse::<Float>()
            .map(|float| Self { value: float.lexeme, span: float.span })
    }
}

/// A symbol name, such as `x`, `r_o`, or `\mu`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitSym {
    /// The name of the symbol, including a leading backslash if one was written.
    pub name: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitSym {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        input.try_parse::<Name>()
            .map(|name| Self { name: name.lexeme, span: name.span })
    }
}

/// A literal value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Literal {
    /// A number literal.
    Number(LitNum),

    /// A symbol.
    Symbol(LitSym),
}

impl Literal {
    /// Returns the span of the literal.
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Number(num) => num.span.clone(),
            Literal::Symbol(sym) => sym.span.clone(),
        }
    }
}

impl Parse for Literal {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        if let Ok(sym) = input.try_parse::<LitSym>() {
            return Ok(Self::Symbol(sym));
        }
        if let Ok(num) = input.try_parse::<LitNum>() {
            return Ok(Self::Number(num));
        }

        let token = input.next_token()?;
        Err(Error::new(vec![token.span], kind::UnexpectedToken {
            expected: &[TokenKind::Name, TokenKind::Int, TokenKind::Float],
            found: token.kind,
        }))
    }
}
