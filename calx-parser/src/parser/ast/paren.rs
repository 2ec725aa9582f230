use crate::{
    parser::{
        ast::expr::Expr,
        error::{EmptyParenthesis, Error, UnclosedParenthesis},
        token::{CloseParen, OpenParen},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parenthesized expression. A [`Paren`] can only contain a single expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this [`Paren`] was parsed from.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the span of the parenthesized expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the innermost expression in the parenthesized expression, consuming the [`Paren`].
    pub fn into_innermost(self) -> Expr {
        let mut inner = self.expr;
        while let Expr::Paren(paren) = *inner {
            inner = paren.expr;
        }
        *inner
    }

    /// Parses the parenthesized part of a construct that requires one, such as the argument list
    /// of a function call. Once the opening parenthesis is found, any error is fatal.
    pub(crate) fn parse_delimited(input: &mut Parser) -> Result<(Expr, Range<usize>), Error> {
        let open_paren = input.try_parse::<OpenParen>()?;

        if input.peek_kind() == Some(TokenKind::CloseParen) {
            let mut err = input.error_fatal(EmptyParenthesis);
            err.spans = vec![open_paren.span.start..input.span().end];
            return Err(err);
        }

        let expr = input.try_parse::<Expr>().map_err(|mut err| {
            err.fatal = true;
            err
        })?;
        let close_paren = input.try_parse::<CloseParen>().map_err(|_| {
            Error::new_fatal(vec![open_paren.span.clone()], UnclosedParenthesis { opening: true })
        })?;

        Ok((expr, open_paren.span.start..close_paren.span.end))
    }
}

impl<'source> Parse<'source> for Paren {
    fn parse(input: &mut Parser<'source>) -> Result<Self, Error> {
        let (expr, span) = Self::parse_delimited(input)?;
        Ok(Self {
            expr: Box::new(expr),
            span,
        })
    }
}

impl fmt::Display for Paren {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})", self.expr)
    }
}
