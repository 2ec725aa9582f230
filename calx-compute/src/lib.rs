//! Exact symbolic manipulation of algebraic expressions.
//!
//! The main entry points live in [`symbolic`]: parse an expression with
//! [`symbolic::parse_expr`], then [`simplify`](symbolic::simplify()) or differentiate it with
//! [`derivative`](symbolic::derivative()). All numbers are exact [`Rational`](rational::Rational)s;
//! floating point only appears when an expression is [evaluated](symbolic::Expr::evaluate).
//!
//! ```
//! use calx_compute::symbolic::{parse_expr, simplify, SimplifyOptions};
//!
//! let expr = parse_expr("5*x*x + 10*x").unwrap();
//! let simplified = simplify(&expr, SimplifyOptions::default().sort_terms(true));
//! assert_eq!(simplified.to_string(), "5(x+2)x");
//! ```

pub mod primitive;
pub mod rational;
pub mod symbolic;

#[cfg(test)]
mod proptests;
