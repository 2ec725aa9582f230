//! Algebraic manipulation of expressions.
//!
//! # Expression representation
//!
//! Expressions are represented as a tree of [`Expr`] nodes. Unlike the
//! [`calx_parser::parser::ast::Expr`] produced by the parser, [`Expr`] **flattens** sums and
//! products, and holds its numbers as exact [`Rational`](crate::rational::Rational)s. See the
//! [`expr`] module for details.
//!
//! Use [`parse_expr`] to go straight from source code to an [`Expr`].
//!
//! # Simplification
//!
//! [`simplify()`] reduces an expression to a canonical form: numbers are folded, like terms are
//! combined, common factors are pulled out of sums, and a handful of identities for powers,
//! logarithms and trigonometric functions are applied. [`simplify_with_steps`] also reports which
//! rules were applied, in order.
//!
//! ```
//! use calx_compute::symbolic::{parse_expr, simplify_with_steps, SimplifyOptions, Step};
//!
//! let expr = parse_expr("x + x + 0").unwrap();
//! let (simplified, steps) = simplify_with_steps(&expr, SimplifyOptions::default());
//! assert_eq!(simplified.to_string(), "2x");
//! assert_eq!(steps, vec![Step::AddZero, Step::CombineLikeTerms]);
//! ```
//!
//! # Differentiation
//!
//! [`derivative()`] differentiates an expression with respect to a variable and simplifies the
//! result. Other variables are treated as functions of that variable, and their derivatives are
//! left as [`Expr::Derivative`] placeholders.
//!
//! ```
//! use calx_compute::symbolic::{derivative, parse_expr};
//!
//! let expr = parse_expr("x*x*x").unwrap();
//! assert_eq!(derivative(&expr, "x").to_string(), "3x*x");
//! ```

pub mod derivative;
pub mod eval;
pub mod expr;
pub mod simplify;
pub mod step_collector;

use calx_error::Error;
use calx_parser::parser::{ast::Expr as AstExpr, Parser};

pub use derivative::{derivative, derivative_raw};
pub use eval::EvalError;
pub use expr::{Constant, Expr, Func};
pub use simplify::{simplify, simplify_with, simplify_with_steps, SimplifyOptions, Step};
pub use step_collector::StepCollector;

/// Parses the given source code into an [`Expr`].
///
/// The expression is flattened, but not simplified.
pub fn parse_expr(source: &str) -> Result<Expr, Error> {
    Parser::new(source)
        .try_parse_full::<AstExpr>()
        .map(Expr::from)
}
