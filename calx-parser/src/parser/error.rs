//! Error kinds produced while parsing.
//!
//! The error type itself is [`calx_error::Error`], re-exported here as [`Error`].

use ariadne::Fmt;
use calx_attrs::ErrorKind;
use calx_error::{ErrorKind, EXPR};
use crate::tokenizer::TokenKind;

pub use calx_error::Error;

/// An intentionally useless error. This should only be used for non-fatal errors, as it contains
/// no useful information.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "an internal non-fatal error occurred while parsing",
    labels = ["here"],
    help = "you should never see this error; please report this as a bug"
)]
pub struct NonFatal;

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of file",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of file",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = [format!("expected one of: {}", expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
    help = format!("found {:?}", found),
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// A number literal with a dangling decimal point, such as `3.` or `.5`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("malformed number `{}`", lexeme),
    labels = ["this number has no digits on one side of the decimal point"],
    help = format!("write the number with digits on both sides, as in {}", "0.5".fg(EXPR)),
)]
pub struct MalformedNumber {
    /// The lexeme of the malformed number.
    pub lexeme: String,
}

/// A function was called that does not exist.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown function `{}`", name),
    labels = ["this function does not exist"],
    help = if suggestions.is_empty() {
        String::from("to multiply by a parenthesized expression, add a `*` before the parenthesis")
    } else {
        format!("did you mean: {}?", suggestions.iter().map(|s| format!("`{}`", s.fg(EXPR))).collect::<Vec<_>>().join(", "))
    },
)]
pub struct UnknownFunction {
    /// The name of the function that was called.
    pub name: String,

    /// Names of existing functions that are spelled similarly.
    pub suggestions: Vec<&'static str>,
}

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = if *opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

/// There was no expression inside a pair of parentheses.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyParenthesis;
