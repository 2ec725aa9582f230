use crate::{
    parser::{
        error::{Error, MalformedNumber, UnexpectedToken},
        token::Name,
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
    try_parse_catch_fatal,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A number literal, such as `16` or `3.25`.
///
/// The value is kept as a string of decimal digits (with digit separators removed) so that it can
/// be converted into an exact rational number by the consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitNum {
    /// The digits of the number, with an optional decimal point.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl<'source> Parse<'source> for LitNum {
    fn parse(input: &mut Parser<'source>) -> Result<Self, Error> {
        let token = input.next_token()?;
        match token.kind {
            TokenKind::Int | TokenKind::Float => Ok(Self {
                value: token.lexeme.replace('_', ""),
                span: token.span,
            }),
            TokenKind::MalformedNumber => Err(Error::new_fatal(vec![token.span], MalformedNumber {
                lexeme: token.lexeme.to_owned(),
            })),
            _ => Err(Error::new(vec![token.span], UnexpectedToken {
                expected: &[TokenKind::Int, TokenKind::Float],
                found: token.kind,
            })),
        }
    }
}

impl fmt::Display for LitNum {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A symbol / identifier literal, such as `x` or `pi`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitSym {
    /// The name of the symbol.
    pub name: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl<'source> Parse<'source> for LitSym {
    fn parse(input: &mut Parser<'source>) -> Result<Self, Error> {
        input.try_parse::<Name>().map(|name| Self {
            name: name.lexeme.to_owned(),
            span: name.span,
        })
    }
}

impl fmt::Display for LitSym {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Represents a literal value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Literal {
    /// A number literal.
    Number(LitNum),

    /// A symbol / identifier literal.
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

impl<'source> Parse<'source> for Literal {
    fn parse(input: &mut Parser<'source>) -> Result<Self, Error> {
        let err = try_parse_catch_fatal!(
            input.try_parse::<LitNum>().map(Literal::Number),
            input.try_parse::<LitSym>().map(Literal::Symbol),
        );
        Err(err)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Number(num) => num.fmt(f),
            Literal::Symbol(sym) => sym.fmt(f),
        }
    }
}
