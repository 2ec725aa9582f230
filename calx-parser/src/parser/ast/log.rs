use crate::{
    parser::{
        ast::{expr::Expr, literal::{LitNum, LitSym, Literal}, paren::Paren},
        error::{Error, NonFatal, UnexpectedToken},
        token::Underscore,
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Consumes the next token and builds a fatal error describing it as unexpected.
fn unexpected(input: &mut Parser, expected: &'static [TokenKind]) -> Error {
    match input.next_token() {
        Ok(token) => Error::new_fatal(vec![token.span], UnexpectedToken {
            expected,
            found: token.kind,
        }),
        Err(mut err) => {
            err.fatal = true;
            err
        },
    }
}

/// A logarithm with an explicit base, such as `log_2(8)` or `log_(x+1)(y)`.
///
/// The base is either a number, a symbol, or a parenthesized expression. Logarithms without a
/// base (`log(x)` and `ln(x)`) are parsed as a [`Call`](super::call::Call).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Log {
    /// The base of the logarithm.
    pub base: Box<Expr>,

    /// The argument of the logarithm.
    pub arg: Box<Expr>,

    /// The region of the source code that this logarithm was parsed from.
    pub span: Range<usize>,
}

impl Log {
    /// Returns the span of the logarithm.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses the base of the logarithm, following the `_`.
    fn parse_base(input: &mut Parser) -> Result<Expr, Error> {
        match input.try_parse::<Paren>() {
            Ok(paren) => return Ok(Expr::Paren(paren)),
            Err(err) if err.fatal => return Err(err),
            Err(_) => (),
        }

        match input.peek_kind() {
            Some(TokenKind::Int | TokenKind::Float | TokenKind::MalformedNumber) => {
                input.try_parse::<LitNum>().map(|num| Expr::Literal(Literal::Number(num)))
            },
            Some(TokenKind::Name) => {
                input.try_parse::<LitSym>().map(|sym| Expr::Literal(Literal::Symbol(sym)))
            },
            _ => Err(unexpected(input, &[
                TokenKind::Int,
                TokenKind::Float,
                TokenKind::Name,
                TokenKind::OpenParen,
            ])),
        }
    }
}

impl<'source> Parse<'source> for Log {
    fn parse(input: &mut Parser<'source>) -> Result<Self, Error> {
        let name = input.try_parse::<LitSym>()?;
        if name.name != "log" {
            return Err(input.error(NonFatal));
        }
        input.try_parse::<Underscore>()?;

        // from here on, the input is definitely a logarithm
        let base = Self::parse_base(input)?;
        if input.peek_kind() != Some(TokenKind::OpenParen) {
            return Err(unexpected(input, &[TokenKind::OpenParen]));
        }
        let (arg, paren_span) = Paren::parse_delimited(input)?;

        Ok(Self {
            base: Box::new(base),
            arg: Box::new(arg),
            span: name.span.start..paren_span.end,
        })
    }
}

impl fmt::Display for Log {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "log_{}({})", self.base, self.arg)
    }
}
