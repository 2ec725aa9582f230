pub mod ast;
pub mod error;
pub mod token;

use error::{Error, ExpectedEof, UnclosedParenthesis, UnexpectedEof};
use calx_error::ErrorKind;
use crate::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// Attempts to parse a value from the given stream of tokens, using multiple parsing expressions
/// in order. The first expression that succeeds is returned from the enclosing function.
///
/// A fatal error from any expression is also returned immediately, short-circuiting the
/// remaining attempts. If every expression fails with a non-fatal error, the macro evaluates to
/// the error of the last attempt.
#[macro_export]
macro_rules! try_parse_catch_fatal {
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut err = match $first {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if err.fatal {
            return Err(err);
        }
        $(
            err = match $rest {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };
            if err.fatal {
                return Err(err);
            }
        )+
        err
    }};
}

/// A high-level parser for algebraic expressions. This is the type to use to parse an arbitrary
/// piece of source into an abstract syntax tree.
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

    /// Creates a fatal error that points at the current token, or the end of the source code if
    /// the cursor is at the end of the stream.
    pub fn error_fatal(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new_fatal(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the previous token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the beginning of the stream.
    pub fn prev_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor.checked_sub(1)?)
    }

    /// Returns the current token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the end of the stream.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Advances the cursor past any whitespace tokens.
    pub fn advance_past_whitespace(&mut self) {
        while let Some(token) = self.current_token() {
            if !token.is_whitespace() {
                break;
            }
            self.cursor += 1;
        }
    }

    /// Returns the kind of the next non-whitespace token without moving the cursor.
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.tokens[self.cursor..]
            .iter()
            .find(|token| !token.is_whitespace())
            .map(|token| token.kind)
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        self.advance_past_whitespace();
        match self.tokens.get(self.cursor) {
            Some(token) => {
                self.cursor += 1;
                // cloning is cheap: only Range<_> is cloned
                Ok(token.clone())
            },
            None => Err(self.error(UnexpectedEof)),
        }
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse<'source>>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        let result = f(self);
        if result.is_err() {
            self.cursor = start;
        }
        result
    }

    /// Speculatively parses a value from the given stream of tokens, with a validation predicate.
    /// The value must parse successfully, **and** the predicate must return [`Ok`] for this
    /// function to return successfully.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_then<T: Parse<'source>, F>(&mut self, predicate: F) -> Result<T, Error>
    where
        F: FnOnce(&T, &Parser<'source>) -> Result<(), Error>,
    {
        self.try_parse_with_fn(|input| {
            let value = T::parse(input)?;
            predicate(&value, input)?;
            Ok(value)
        })
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned.
    pub fn try_parse_full<T: Parse<'source>>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        self.advance_past_whitespace();
        match self.current_token() {
            None => Ok(value),
            Some(token) if token.kind == TokenKind::CloseParen => {
                Err(self.error(UnclosedParenthesis { opening: false }))
            },
            Some(_) => {
                let span = self.span().start..self.eof_span().end;
                Err(Error::new(vec![span], ExpectedEof))
            },
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse<'source>: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// This function should be used by consumers of the library.
    fn parse(input: &mut Parser<'source>) -> Result<Self, Error>;
}

/// The associativity of a binary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// `a op b op c` is evaluated as `a op (b op c)`.
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors. Implicit
    /// multiplication shares this precedence.
    Factor,

    /// Precedence of unary subtraction (`-`).
    Neg,

    /// Precedence of exponentiation (`^`).
    Exp,
}

impl PartialOrd for Precedence {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Precedence {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (*self as u8).cmp(&(*other as u8))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use ast::{
        binary::Binary,
        call::{Call, FuncName},
        expr::Expr,
        literal::{Literal, LitNum, LitSym},
        log::Log,
        paren::Paren,
        unary::Unary,
    };
    use token::op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind};

    fn num(value: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Number(LitNum { value: value.to_string(), span }))
    }

    fn sym(name: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Symbol(LitSym { name: name.to_string(), span }))
    }

    fn bin(lhs: Expr, kind: BinOpKind, op_span: Range<usize>, rhs: Expr, implicit: bool) -> Expr {
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
        let mut parser = Parser::new("16");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, num("16", 0..2));
    }

    #[test]
    fn literal_float_with_separators() {
        let mut parser = Parser::new("1_000.25");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, num("1000.25", 0..8));
    }

    #[test]
    fn precedence_climbing() {
        let mut parser = Parser::new("1 + 2 * 3");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, bin(
            num("1", 0..1),
            BinOpKind::Add,
            2..3,
            bin(num("2", 4..5), BinOpKind::Mul, 6..7, num("3", 8..9), false),
            false,
        ));
    }

    #[test]
    fn exponent_is_right_associative() {
        let mut parser = Parser::new("2^3^4");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, bin(
            num("2", 0..1),
            BinOpKind::Exp,
            1..2,
            bin(num("3", 2..3), BinOpKind::Exp, 3..4, num("4", 4..5), false),
            false,
        ));
    }

    #[test]
    fn negation_binds_looser_than_exponent() {
        let mut parser = Parser::new("-x^2");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Unary(Unary {
            operand: Box::new(bin(sym("x", 1..2), BinOpKind::Exp, 2..3, num("2", 3..4), false)),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            span: 0..4,
        }));
    }

    #[test]
    fn implicit_multiplication() {
        let mut parser = Parser::new("5(x+2)x");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        let paren = Expr::Paren(Paren {
            expr: Box::new(bin(sym("x", 2..3), BinOpKind::Add, 3..4, num("2", 4..5), false)),
            span: 1..6,
        });
        assert_eq!(expr, bin(
            bin(num("5", 0..1), BinOpKind::Mul, 1..1, paren, true),
            BinOpKind::Mul,
            6..6,
            sym("x", 6..7),
            true,
        ));
    }

    #[test]
    fn implicit_multiplication_after_power() {
        let mut parser = Parser::new("2^3x");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, bin(
            bin(num("2", 0..1), BinOpKind::Exp, 1..2, num("3", 2..3), false),
            BinOpKind::Mul,
            3..3,
            sym("x", 3..4),
            true,
        ));
    }

    #[test]
    fn function_call() {
        let mut parser = Parser::new("3sin(2x)");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        let call = Expr::Call(Call {
            name: FuncName::Sin,
            arg: Box::new(bin(num("2", 5..6), BinOpKind::Mul, 6..6, sym("x", 6..7), true)),
            span: 1..8,
        });
        assert_eq!(expr, bin(num("3", 0..1), BinOpKind::Mul, 1..1, call, true));
    }

    #[test]
    fn log_with_numeric_base() {
        let mut parser = Parser::new("log_2(8)");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Log(Log {
            base: Box::new(num("2", 4..5)),
            arg: Box::new(num("8", 6..7)),
            span: 0..8,
        }));
    }

    #[test]
    fn log_with_expression_base() {
        let mut parser = Parser::new("log_(2*x+3)(y)");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        let Expr::Log(log) = expr else {
            panic!("expected a logarithm, got {:?}", expr);
        };
        assert_eq!(log.base.to_string(), "(2 * x + 3)");
        assert_eq!(*log.arg, sym("y", 12..13));
    }

    #[test]
    fn plain_log_and_ln() {
        let mut parser = Parser::new("log(x) + ln(x)");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr.to_string(), "log(x) + ln(x)");
    }

    #[test]
    fn unknown_function() {
        let mut parser = Parser::new("sine(x)");
        let err = parser.try_parse_full::<Expr>().unwrap_err();

        assert!(err.fatal);
        assert_eq!(err.spans, vec![0..4]);
        let report = strip_ansi_escapes::strip_str(err.report_to_string("input", "sine(x)").unwrap());
        assert!(report.contains("unknown function `sine`"));
        assert!(report.contains("sin"));
    }

    #[test]
    fn malformed_number() {
        let mut parser = Parser::new("2 + 3.");
        let err = parser.try_parse_full::<Expr>().unwrap_err();

        assert!(err.fatal);
        assert_eq!(err.spans, vec![4..6]);
    }

    #[test]
    fn unclosed_parenthesis() {
        let mut parser = Parser::new("(x + 1");
        let err = parser.try_parse_full::<Expr>().unwrap_err();

        assert!(err.fatal);
        assert_eq!(err.spans, vec![0..1]);
    }

    #[test]
    fn unopened_parenthesis() {
        let mut parser = Parser::new("x + 1)");
        let err = parser.try_parse_full::<Expr>().unwrap_err();

        assert_eq!(err.spans, vec![5..6]);
    }

    #[test]
    fn trailing_operator() {
        let mut parser = Parser::new("x +");
        assert!(parser.try_parse_full::<Expr>().is_err());
    }

    #[test]
    fn unexpected_symbol() {
        let mut parser = Parser::new("x $ y");
        let err = parser.try_parse_full::<Expr>().unwrap_err();

        assert_eq!(err.spans, vec![2..5]);
    }
}
