use crate::{
    parser::{
        ast::{
            binary::Binary,
            call::Call,
            literal::Literal,
            log::Log,
            paren::Paren,
            unary::Unary,
        },
        error::Error,
        Parse,
        Parser,
        Precedence,
    },
    try_parse_catch_fatal,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents a general expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    Literal(Literal),
    Paren(Paren),
    Call(Call),
    Log(Log),
    Unary(Unary),
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Call(call) => call.span(),
            Expr::Log(log) => log.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
        }
    }

    /// If this expression is an [`Expr::Paren`], returns the innermost expression in the
    /// parenthesized expression. Otherwise, returns `self`.
    pub fn innermost(&self) -> &Expr {
        let mut inner = self;
        while let Expr::Paren(paren) = inner {
            inner = &paren.expr;
        }
        inner
    }
}

impl<'source> Parse<'source> for Expr {
    fn parse(input: &mut Parser<'source>) -> Result<Self, Error> {
        let lhs = Unary::parse_or_lower(input)?;
        Ok(Binary::parse_expr(input, lhs, Precedence::Any)?.0)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal(literal) => literal.fmt(f),
            Expr::Paren(paren) => paren.fmt(f),
            Expr::Call(call) => call.fmt(f),
            Expr::Log(log) => log.fmt(f),
            Expr::Unary(unary) => unary.fmt(f),
            Expr::Binary(binary) => binary.fmt(f),
        }
    }
}

/// Represents a primary expression: one that can be parsed without considering any operators.
/// Primary expressions are the operands of unary and binary expressions, and the targets of
/// implicit multiplication.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Primary {
    Literal(Literal),
    Paren(Paren),
    Call(Call),
    Log(Log),
}

impl Primary {
    /// Returns the span of the primary expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Primary::Literal(literal) => literal.span(),
            Primary::Paren(paren) => paren.span(),
            Primary::Call(call) => call.span(),
            Primary::Log(log) => log.span(),
        }
    }
}

impl<'source> Parse<'source> for Primary {
    fn parse(input: &mut Parser<'source>) -> Result<Self, Error> {
        // order matters: `log_2(x)` and `sin(x)` both start with a name that would otherwise be
        // parsed as a symbol
        let err = try_parse_catch_fatal!(
            input.try_parse::<Log>().map(Primary::Log),
            input.try_parse::<Call>().map(Primary::Call),
            input.try_parse::<Literal>().map(Primary::Literal),
            input.try_parse::<Paren>().map(Primary::Paren),
        );
        Err(err)
    }
}

impl From<Primary> for Expr {
    fn from(primary: Primary) -> Self {
        match primary {
            Primary::Literal(literal) => Self::Literal(literal),
            Primary::Paren(paren) => Self::Paren(paren),
            Primary::Call(call) => Self::Call(call),
            Primary::Log(log) => Self::Log(log),
        }
    }
}
