use crate::{
    parser::{
        ast::{expr::Expr, literal::LitSym, paren::Paren},
        error::{Error, NonFatal, UnknownFunction},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The functions that can be called by name.
///
/// The set of functions is closed; an unknown name followed by a parenthesis is a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FuncName {
    Sin,
    Cos,
    Tan,
    Csc,
    Sec,
    Cot,
    Arcsin,
    Arccos,
    Arctan,
    Sqrt,
    Cbrt,
    Log,
    Ln,
}

impl FuncName {
    /// Every function that can be called.
    pub const ALL: [FuncName; 13] = [
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Csc,
        Self::Sec,
        Self::Cot,
        Self::Arcsin,
        Self::Arccos,
        Self::Arctan,
        Self::Sqrt,
        Self::Cbrt,
        Self::Log,
        Self::Ln,
    ];

    /// Returns the name used to call the function.
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
            Self::Sqrt => "sqrt",
            Self::Cbrt => "cbrt",
            Self::Log => "log",
            Self::Ln => "ln",
        }
    }

    /// Looks up a function by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|func| func.name() == name)
    }

    /// Returns the names of functions that are spelled similarly to the given name, closest
    /// first.
    pub fn suggestions(name: &str) -> Vec<&'static str> {
        let mut candidates = Self::ALL
            .into_iter()
            .map(|func| (levenshtein::levenshtein(name, func.name()), func.name()))
            .filter(|(distance, _)| *distance <= 2)
            .collect::<Vec<_>>();
        candidates.sort();
        candidates.into_iter().map(|(_, name)| name).collect()
    }
}

impl fmt::Display for FuncName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A function call with a single argument, such as `sin(2x)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// The function to call.
    pub name: FuncName,

    /// The argument to the function.
    pub arg: Box<Expr>,

    /// The region of the source code that this function call was parsed from.
    pub span: Range<usize>,
}

impl Call {
    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl<'source> Parse<'source> for Call {
    fn parse(input: &mut Parser<'source>) -> Result<Self, Error> {
        let name = input.try_parse::<LitSym>()?;

        // a name that is not followed by a parenthesis is a plain symbol
        if input.peek_kind() != Some(TokenKind::OpenParen) {
            return Err(input.error(NonFatal));
        }

        let Some(func) = FuncName::from_name(&name.name) else {
            return Err(Error::new_fatal(vec![name.span], UnknownFunction {
                suggestions: FuncName::suggestions(&name.name),
                name: name.name,
            }));
        };

        let (arg, paren_span) = Paren::parse_delimited(input)?;
        Ok(Self {
            name: func,
            arg: Box::new(arg),
            span: name.span.start..paren_span.end,
        })
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({})", self.name, self.arg)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn lookup_by_name() {
        assert_eq!(FuncName::from_name("arctan"), Some(FuncName::Arctan));
        assert_eq!(FuncName::from_name("atan"), None);
    }

    #[test]
    fn suggestions_are_sorted_by_distance() {
        assert_eq!(FuncName::suggestions("cso"), vec!["csc", "cos", "cot"]);
        assert!(FuncName::suggestions("frobnicate").is_empty());
    }
}
