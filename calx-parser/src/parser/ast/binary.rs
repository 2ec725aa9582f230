use crate::parser::{
    ast::{expr::{Expr, Primary}, unary::Unary},
    error::{Error, NonFatal},
    token::op::{BinOp, BinOpKind},
    Associativity,
    Parser,
    Precedence,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary operator, or the implicit multiplication between two adjacent expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BinOpExt {
    /// A binary operator written in the source, such as `+` or `*`.
    Op(BinOp),

    /// Implicit multiplication, such as `2x` or `3(x + 1)`.
    ///
    /// This is not a real operator, but it is treated as one for the purposes of parsing.
    ImplicitMultiplication,
}

impl BinOpExt {
    /// Returns the precedence of the binary operator.
    fn precedence(&self) -> Precedence {
        match self {
            BinOpExt::Op(op) => op.precedence(),
            BinOpExt::ImplicitMultiplication => Precedence::Factor,
        }
    }
}

impl From<BinOp> for BinOpExt {
    fn from(op: BinOp) -> Self {
        BinOpExt::Op(op)
    }
}

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// After parsing the left-hand side, the operator, and the right-hand side of a potential
    /// binary expression, parse ahead to see if the right-hand side is incomplete.
    ///
    /// In `1 + 2 * 3`, the first pass yields `1`, `+` and `2`. The `*` following `2` binds
    /// tighter than `+`, so `2 * 3` is parsed first (by calling back into [`Self::parse_expr`]
    /// with `2` as the left-hand side) and becomes the right-hand side of `1 + ...`. In
    /// `3 * 2 + 1`, the `+` binds looser, so `3 * 2` is built here and [`Self::parse_expr`]
    /// picks up `+ 1` afterwards.
    ///
    /// When no operator follows the right-hand side, an implicit multiplication is assumed if
    /// the current operator binds looser than multiplication. Since this conjures an operator out
    /// of nothing, the loop stops as soon as [`Self::parse_expr`] reports that it consumed
    /// nothing.
    fn complete_rhs(input: &mut Parser, lhs: Expr, op: BinOpExt, mut rhs: Expr) -> Result<Expr, Error> {
        let precedence = op.precedence();

        loop {
            // clone the input stream to emulate peeking
            let mut input_ahead = input.clone();
            if let Ok(next_op) = input_ahead.try_parse::<BinOp>() {
                let binds_tighter = next_op.precedence() > precedence
                    || (next_op.precedence() == precedence
                        && next_op.associativity() == Associativity::Right);
                if binds_tighter {
                    rhs = Self::parse_expr(input, rhs, next_op.precedence())?.0;
                } else {
                    // `1 * 2 + 3` or `1 * 2 * 3`: let `lhs` become `1 * 2` and leave the
                    // operator for the caller
                    break;
                }
            } else {
                if precedence >= Precedence::Factor {
                    break;
                }

                let (expr, changed) = Self::parse_expr(input, rhs, Precedence::Factor)?;
                rhs = expr;
                if !changed {
                    break;
                }
            }
        }

        let span = lhs.span().start..rhs.span().end;
        let op = match op {
            BinOpExt::Op(op) => op,
            BinOpExt::ImplicitMultiplication => BinOp {
                kind: BinOpKind::Mul,
                implicit: true,
                span: lhs.span().end..rhs.span().start,
            },
        };
        Ok(Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
            span,
        }))
    }

    /// After parsing the left-hand side of a potential binary expression, parse ahead to see if
    /// there is a binary operator (of at least the given precedence) and a right-hand side.
    ///
    /// The returned boolean is `true` if anything was consumed; see [`Self::complete_rhs`].
    pub fn parse_expr(
        input: &mut Parser,
        mut lhs: Expr,
        precedence: Precedence,
    ) -> Result<(Expr, bool), Error> {
        let mut changed = false;
        loop {
            let op = input.try_parse_then::<BinOp, _>(|op, input| {
                if op.precedence() >= precedence {
                    Ok(())
                } else {
                    Err(input.error(NonFatal))
                }
            });

            if let Ok(op) = op {
                let rhs = Unary::parse_or_lower(input)?;
                lhs = Self::complete_rhs(input, lhs, op.into(), rhs)?;
            } else if Precedence::Factor >= precedence {
                // implicit multiplication only applies to primary expressions; a leading `-`
                // is always subtraction
                let rhs = match input.try_parse::<Primary>() {
                    Ok(rhs) => rhs,
                    Err(err) if err.fatal => return Err(err),
                    Err(_) => break,
                };
                lhs = Self::complete_rhs(input, lhs, BinOpExt::ImplicitMultiplication, rhs.into())?;
            } else {
                break;
            }

            changed = true;
        }

        Ok((lhs, changed))
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.lhs.fmt(f)?;
        self.op.fmt(f)?;
        self.rhs.fmt(f)
    }
}
