//! A representation of mathematical expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](calx_parser::parser::ast::Expr) type from `calx_parser` mirrors the source code
//! closely: every binary operator is its own node, parentheses are kept, and spans are attached to
//! everything. That is convenient for reporting errors, but not for algebra.
//!
//! The [`Expr`] defined here **flattens** the tree instead. `x + (y + z)` is a single
//! [`Expr::Sum`] with three terms, and `2 * x * y` is a single [`Expr::Product`] with three
//! factors. Subtraction and division do not exist as nodes: `a - b` is `a + (-1)b`, and `a / b` is
//! `a * b^-1`. This puts like terms and common factors at the same level of the tree, which is
//! where the simplifier looks for them.
//!
//! # Equality
//!
//! [`PartialEq`] and [`Hash`] are derived, so two expressions are equal only if they have the
//! same shape, with children in the same order. `x + y` and `y + x` are **not** equal. The
//! simplifier compares terms as multisets where order should not matter.
//!
//! ```
//! use calx_compute::symbolic::{parse_expr, Expr};
//!
//! let expr = parse_expr("x + (y + z)").unwrap();
//! assert_eq!(expr, Expr::Sum(vec![
//!     Expr::variable("x"),
//!     Expr::variable("y"),
//!     Expr::variable("z"),
//! ]));
//! ```

mod fmt;
mod iter;

use calx_parser::parser::{
    ast::{Expr as AstExpr, FuncName, Literal},
    token::op::{BinOpKind, UnaryOpKind},
};
use crate::rational::Rational;
use iter::ExprIter;
use std::{
    collections::BTreeSet,
    ops::{Add, Div, Mul, Neg, Sub},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named mathematical constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Constant {
    /// The ratio of a circle's circumference to its diameter.
    Pi,

    /// Euler's number, the base of the natural logarithm.
    E,
}

impl Constant {
    /// Returns the name of the constant, as it is written in source code.
    pub fn name(self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::E => "e",
        }
    }

    /// Returns the value of the constant.
    pub fn value(self) -> f64 {
        match self {
            Self::Pi => std::f64::consts::PI,
            Self::E => std::f64::consts::E,
        }
    }
}

/// A function that can appear in an [`Expr::Call`].
///
/// Roots and logarithms are not here: they are represented with [`Expr::Power`] and
/// [`Expr::Log`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Csc,
    Sec,
    Cot,
    Arcsin,
    Arccos,
    Arctan,
}

impl Func {
    /// Returns the name of the function, as it is written in source code.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Csc => "csc",
            Self::Sec => "sec",
            Self::Cot => "cot",
            Self::Arcsin => "arcsin",
            Self::Arccos => "arccos",
            Self::Arctan => "arctan",
        }
    }
}

/// A mathematical expression, flattened into sums of products.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// An exact rational number, such as `2` or `-3/4`.
    Number(Rational),

    /// A named constant, such as `pi`.
    Constant(Constant),

    /// A variable, such as `x`.
    Variable(String),

    /// Terms added together. No term is itself a [`Expr::Sum`].
    Sum(Vec<Expr>),

    /// Factors multiplied together. No factor is itself a [`Expr::Product`].
    Product(Vec<Expr>),

    /// A base raised to an exponent.
    Power(Box<Expr>, Box<Expr>),

    /// The logarithm of an argument (second) to a base (first).
    Log(Box<Expr>, Box<Expr>),

    /// A function applied to an argument.
    Call(Func, Box<Expr>),

    /// The derivative of a variable with respect to another variable, such as `dy/dx`.
    ///
    /// This appears when differentiating an expression that contains variables other than the one
    /// being differentiated with respect to.
    Derivative {
        /// The variable being differentiated.
        main: String,

        /// The variable the derivative is taken with respect to.
        relative_to: String,

        /// The number of times the derivative was taken.
        degree: u32,
    },
}

impl Expr {
    /// Creates a sum of the given terms, flattening any terms that are sums themselves.
    pub fn sum(terms: Vec<Expr>) -> Self {
        Self::Sum(
            terms
                .into_iter()
                .flat_map(|term| match term {
                    Self::Sum(inner) => inner,
                    term => vec![term],
                })
                .collect(),
        )
    }

    /// Creates a product of the given factors, flattening any factors that are products
    /// themselves.
    pub fn product(factors: Vec<Expr>) -> Self {
        Self::Product(
            factors
                .into_iter()
                .flat_map(|factor| match factor {
                    Self::Product(inner) => inner,
                    factor => vec![factor],
                })
                .collect(),
        )
    }

    /// Creates a number expression.
    pub fn number(n: impl Into<Rational>) -> Self {
        Self::Number(n.into())
    }

    /// Creates a variable expression.
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    /// Creates `base^exponent`.
    pub fn power(base: Expr, exponent: Expr) -> Self {
        Self::Power(Box::new(base), Box::new(exponent))
    }

    /// Creates `log_base(argument)`.
    pub fn log(base: Expr, argument: Expr) -> Self {
        Self::Log(Box::new(base), Box::new(argument))
    }

    /// Creates the natural logarithm `ln(argument)`.
    pub fn ln(argument: Expr) -> Self {
        Self::log(Self::Constant(Constant::E), argument)
    }

    /// Creates a call to the given function.
    pub fn call(func: Func, argument: Expr) -> Self {
        Self::Call(func, Box::new(argument))
    }

    /// Returns true if the expression is a [`Expr::Number`].
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// If the expression is a [`Expr::Number`], returns a reference to the contained number.
    pub fn as_number(&self) -> Option<&Rational> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Expr::Number`] equal to the given integer.
    pub fn is_exactly(&self, n: i32) -> bool {
        self.as_number().is_some_and(|number| *number == Rational::from(n))
    }

    /// Returns true if the expression is the number `0`.
    pub fn is_zero(&self) -> bool {
        self.as_number().is_some_and(Rational::is_zero)
    }

    /// Returns true if the expression is the number `1`.
    pub fn is_one(&self) -> bool {
        self.as_number().is_some_and(Rational::is_one)
    }

    /// Returns true if the expression does not depend on any variable.
    pub fn is_constant(&self) -> bool {
        self.post_order_iter()
            .all(|expr| !matches!(expr, Self::Variable(_) | Self::Derivative { .. }))
    }

    /// Returns the names of the variables that occur in the expression, in sorted order.
    ///
    /// The variables of [`Expr::Derivative`] placeholders are not included.
    pub fn variables(&self) -> BTreeSet<String> {
        self.post_order_iter()
            .filter_map(|expr| match expr {
                Self::Variable(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    /// Replaces every occurrence of the variable `var` with `value`.
    ///
    /// The result is flattened, but not simplified.
    pub fn substitute(&self, var: &str, value: &Expr) -> Expr {
        match self {
            Self::Variable(name) if name == var => value.clone(),
            Self::Number(_) | Self::Constant(_) | Self::Variable(_) | Self::Derivative { .. } => {
                self.clone()
            },
            Self::Sum(terms) => Self::sum(
                terms.iter().map(|term| term.substitute(var, value)).collect(),
            ),
            Self::Product(factors) => Self::product(
                factors.iter().map(|factor| factor.substitute(var, value)).collect(),
            ),
            Self::Power(base, exp) => Self::power(
                base.substitute(var, value),
                exp.substitute(var, value),
            ),
            Self::Log(base, arg) => Self::log(
                base.substitute(var, value),
                arg.substitute(var, value),
            ),
            Self::Call(func, arg) => Self::call(*func, arg.substitute(var, value)),
        }
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`Expr::Sum`] with zero / one term, or an
    /// [`Expr::Product`] with zero / one factor. This function checks for these cases and
    /// simplifies the expression into the single term / factor, or the number 0 or 1.
    pub fn downgrade(self) -> Self {
        match self {
            Self::Sum(mut terms) => match terms.len() {
                0 => Self::number(0),
                1 => terms.remove(0),
                _ => Self::Sum(terms),
            },
            Self::Product(mut factors) => match factors.len() {
                0 => Self::number(1),
                1 => factors.remove(0),
                _ => Self::Product(factors),
            },
            _ => self,
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }
}

impl Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        Expr::sum(vec![self, rhs])
    }
}

impl Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Expr {
        self + -rhs
    }
}

impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        Expr::product(vec![self, rhs])
    }
}

impl Div for Expr {
    type Output = Expr;

    fn div(self, rhs: Expr) -> Expr {
        self * Expr::power(rhs, Expr::number(-1))
    }
}

/// Negates the expression. Numbers are negated directly, as is the leading number of a product;
/// anything else is multiplied by `-1`.
impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        match self {
            Self::Number(n) => Self::Number(-n),
            Self::Product(mut factors) => {
                if let Some(Self::Number(n)) = factors.first_mut() {
                    *n = -&*n;
                    Self::Product(factors)
                } else {
                    Self::product(vec![Self::number(-1), Self::Product(factors)])
                }
            },
            expr => Self::product(vec![Self::number(-1), expr]),
        }
    }
}

impl From<AstExpr> for Expr {
    fn from(expr: AstExpr) -> Self {
        match expr {
            AstExpr::Literal(Literal::Number(num)) => {
                // the tokenizer only produces well-formed decimal literals
                Self::Number(Rational::from_decimal_str(&num.value).unwrap_or_default())
            },
            AstExpr::Literal(Literal::Symbol(sym)) => match sym.name.as_str() {
                "pi" => Self::Constant(Constant::Pi),
                "e" => Self::Constant(Constant::E),
                _ => Self::Variable(sym.name),
            },
            AstExpr::Paren(paren) => Self::from(paren.into_innermost()),
            AstExpr::Call(call) => {
                let arg = Self::from(*call.arg);
                match call.name {
                    FuncName::Sin => Self::call(Func::Sin, arg),
                    FuncName::Cos => Self::call(Func::Cos, arg),
                    FuncName::Tan => Self::call(Func::Tan, arg),
                    FuncName::Csc => Self::call(Func::Csc, arg),
                    FuncName::Sec => Self::call(Func::Sec, arg),
                    FuncName::Cot => Self::call(Func::Cot, arg),
                    FuncName::Arcsin => Self::call(Func::Arcsin, arg),
                    FuncName::Arccos => Self::call(Func::Arccos, arg),
                    FuncName::Arctan => Self::call(Func::Arctan, arg),
                    // same shape as parsing `arg^(1/2)` directly
                    FuncName::Sqrt => Self::power(arg, Self::number(1) / Self::number(2)),
                    FuncName::Cbrt => Self::power(arg, Self::number(1) / Self::number(3)),
                    FuncName::Log => Self::log(Self::number(10), arg),
                    FuncName::Ln => Self::ln(arg),
                }
            },
            AstExpr::Log(log) => Self::log(Self::from(*log.base), Self::from(*log.arg)),
            AstExpr::Unary(unary) => match unary.op.kind {
                UnaryOpKind::Neg => -Self::from(*unary.operand),
            },
            AstExpr::Binary(bin) => {
                let lhs = Self::from(*bin.lhs);
                let rhs = Self::from(*bin.rhs);
                match bin.op.kind {
                    BinOpKind::Exp => Self::power(lhs, rhs),
                    BinOpKind::Mul => lhs * rhs,
                    BinOpKind::Div => lhs / rhs,
                    BinOpKind::Add => lhs + rhs,
                    BinOpKind::Sub => lhs - rhs,
                }
            },
        }
    }
}
