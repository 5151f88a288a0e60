pub mod ast;
pub mod error;
pub mod token;

use error::{kind, Error};
use spp_error::ErrorKind;
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// The precedence of an operator, from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Used to parse an expression where any operator is allowed.
    Any,

    /// `+` and `-`.
    Term,

    /// `*`, `/`, and implicit multiplication.
    Factor,

    /// Unary negation.
    Neg,

    /// `^`.
    Exp,
}

impl Precedence {
    /// Returns the next higher precedence, used for the right-hand side of left-associative
    /// operators.
    pub fn next(self) -> Self {
        match self {
            Self::Any => Self::Term,
            Self::Term => Self::Factor,
            Self::Factor => Self::Neg,
            Self::Neg | Self::Exp => Self::Exp,
        }
    }
}

/// The associativity of a binary or unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// The operator is left-associative: `a - b - c == (a - b) - c`.
    Left,

    /// The operator is right-associative: `a ^ b ^ c == a ^ (b ^ c)`.
    Right,
}

/// A high-level parser for expressions and equations. This is the type to use to parse an
/// arbitrary piece of input into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the next non-whitespace token, or the end of the source code if there
    /// are no more tokens.
    pub fn span(&self) -> Range<usize> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.is_whitespace())
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the kind of the next non-whitespace token without moving the cursor. Returns
    /// [`None`] if there are no more tokens.
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.peek_nth_kind(0)
    }

    /// Returns the kind of the `n`th next non-whitespace token without moving the cursor.
    pub fn peek_nth_kind(&self, n: usize) -> Option<TokenKind> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .filter(|token| !token.is_whitespace())
            .nth(n)
            .map(|token| token.kind)
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if !token.is_whitespace() {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(self.error(kind::UnexpectedEof))
    }

    /// Speculatively parses a value from the given stream of tokens. If parsing is successful,
    /// the stream is advanced past the consumed tokens and the parsed value is returned.
    /// Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        let start = self.cursor;
        match T::parse(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Parses a value from the stream of tokens, then checks that all of the input was consumed.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = self.try_parse::<T>()?;

        match self.peek_kind() {
            None => Ok(value),
            Some(TokenKind::CloseParen) => Err(self.error(kind::UnclosedParenthesis { opening: false })),
            Some(_) => {
                let span = self.span().start..self.eof_span().end;
                Err(Error::new(vec![span], kind::ExpectedEof))
            },
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// This function should be used by private parsing functions. Prefer [`Parser::try_parse`]
    /// to backtrack on failure.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use ast::{
        binary::Binary,
        call::Call,
        expr::Expr,
        literal::{LitNum, LitSym, Literal},
        list::List,
        paren::Paren,
        stmt::{Equation, Stmt},
        unary::Unary,
    };
    use token::op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind};

    fn sym(name: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Symbol(LitSym { name: name.to_string(), span }))
    }

    fn num(value: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Number(LitNum { value: value.to_string(), span }))
    }

    fn bin(lhs: Expr, kind: BinOpKind, implicit: bool, op_span: Range<usize>, rhs: Expr) -> Expr {
        let span = lhs.span().start..rhs.span().end;
        Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op: BinOp { kind, implicit, span: op_span },
            rhs: Box::new(rhs),
            span,
        })
    }

    #[test]
    fn literal_int() {
        let expr = Parser::new("16").try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, num("16", 0..2));
    }

    #[test]
    fn precedence() {
        let expr = Parser::new("1 + 2 * x").try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, bin(
            num("1", 0..1),
            BinOpKind::Add,
            false,
            2..3,
            bin(num("2", 4..5), BinOpKind::Mul, false, 6..7, sym("x", 8..9)),
        ));
    }

    #[test]
    fn left_associative() {
        let expr = Parser::new("a-b-c").try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, bin(
            bin(sym("a", 0..1), BinOpKind::Sub, false, 1..2, sym("b", 2..3)),
            BinOpKind::Sub,
            false,
            3..4,
            sym("c", 4..5),
        ));
    }

    #[test]
    fn right_associative_exp() {
        let expr = Parser::new("a^b^c").try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, bin(
            sym("a", 0..1),
            BinOpKind::Exp,
            false,
            1..2,
            bin(sym("b", 2..3), BinOpKind::Exp, false, 3..4, sym("c", 4..5)),
        ));
    }

    #[test]
    fn implicit_multiplication() {
        let expr = Parser::new("2x^2").try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, bin(
            num("2", 0..1),
            BinOpKind::Mul,
            true,
            1..1,
            bin(sym("x", 1..2), BinOpKind::Exp, false, 2..3, num("2", 3..4)),
        ));
    }

    #[test]
    fn negation_binds_looser_than_exp() {
        let expr = Parser::new("-x^2").try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, Expr::Unary(Unary {
            operand: Box::new(bin(sym("x", 1..2), BinOpKind::Exp, false, 2..3, num("2", 3..4))),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            span: 0..4,
        }));
    }

    #[test]
    fn call_with_args() {
        let expr = Parser::new("g(x, y)").try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, Expr::Call(Call {
            name: LitSym { name: "g".to_string(), span: 0..1 },
            args: vec![sym("x", 2..3), sym("y", 5..6)],
            span: 0..7,
            paren_span: 1..7,
        }));
    }

    #[test]
    fn paren_and_list() {
        let expr = Parser::new("[(a), 1.5]").try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, Expr::List(List {
            values: vec![
                Expr::Paren(Paren { expr: Box::new(sym("a", 2..3)), span: 1..4 }),
                num("1.5", 6..9),
            ],
            span: 0..10,
        }));
    }

    #[test]
    fn equation() {
        let stmt = Parser::new("y = x").try_parse_full::<Stmt>().unwrap();
        assert_eq!(stmt, Stmt::Equation(Equation {
            lhs: sym("y", 0..1),
            rhs: sym("x", 4..5),
            span: 0..5,
        }));
    }

    #[test]
    fn unclosed_paren() {
        let err = Parser::new("sin(x").try_parse_full::<Expr>().unwrap_err();
        assert_eq!(err.spans, vec![0..4]);
    }

    #[test]
    fn extra_close_paren() {
        let err = Parser::new("x)").try_parse_full::<Expr>().unwrap_err();
        assert_eq!(err.spans, vec![1..2]);
    }

    #[test]
    fn trailing_garbage() {
        let err = Parser::new("x + 1 $ 2").try_parse_full::<Expr>().unwrap_err();
        assert_eq!(err.spans, vec![6..9]);
    }

    #[test]
    fn unexpected_eof() {
        let err = Parser::new("x +").try_parse_full::<Expr>().unwrap_err();
        assert_eq!(err.spans, vec![3..3]);
    }

    /// Compares with [`Eq`], not only [`PartialEq`].
    fn total_eq<T: Eq>(lhs: &T, rhs: &T) -> bool {
        lhs == rhs
    }

    #[test]
    fn trees_with_operators_are_eq() {
        let a = Parser::new("-x + y").try_parse_full::<Expr>().unwrap();
        let b = Parser::new("-x + y").try_parse_full::<Expr>().unwrap();
        let c = Parser::new("-x - y").try_parse_full::<Expr>().unwrap();
        assert!(total_eq(&a, &b));
        assert!(!total_eq(&a, &c));
        assert!(total_eq(
            &UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            &UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
        ));
        assert!(total_eq(
            &BinOp { kind: BinOpKind::Add, implicit: false, span: 3..4 },
            &BinOp { kind: BinOpKind::Add, implicit: false, span: 3..4 },
        ));
    }
}
