//! Parser for algebraic expressions.
//!
//! Source text is first split into tokens by the [`tokenizer`], then assembled into an abstract
//! syntax tree by the [`parser`]. The tree keeps the span of every node, so that errors and later
//! stages can point back into the source.
//!
//! ```
//! use calx_parser::parser::{ast::Expr, Parser};
//!
//! let mut parser = Parser::new("3sin(2x) + log_2(8)");
//! let expr = parser.try_parse_full::<Expr>().unwrap();
//! assert_eq!(expr.to_string(), "3sin(2x) + log_2(8)");
//! ```
//!
//! Multiplication between adjacent operands is implicit, as in `2x` or `5(x + 2)`. Parse errors
//! are [`calx_error::Error`]s, which can be rendered into a report with
//! [`calx_error::Error::report_to_stderr`].

pub mod parser;
pub mod tokenizer;
