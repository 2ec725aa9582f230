//! Rendering of expressions back into source code.
//!
//! The output uses as few parentheses as possible, has no spaces, and omits the `*` operator
//! wherever the parser would insert an implicit multiplication anyway (`3x`, `5(x+2)x`,
//! `3sin(2x)`). Every rendered expression can be parsed back into the same expression, with the
//! exception of [`Expr::Derivative`] placeholders.

use super::{Constant, Expr, Func};
use crate::rational::Rational;
use std::fmt::{self, Display, Formatter};

impl Display for Constant {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Display for Func {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns true if the number is negative or not an integer, i.e. if it contains a `-` or `/`
/// when rendered.
fn is_compound_number(expr: &Expr) -> bool {
    expr.as_number().is_some_and(|n| n.is_negative() || !n.is_integer())
}

/// Splits a term of a sum into its sign and the rendering of its absolute value, so that the sum
/// can join terms with `+` or `-`.
fn signed_term(term: &Expr) -> (bool, String) {
    match term {
        Expr::Number(n) => (n.is_negative(), n.abs().to_string()),
        Expr::Product(factors) => signed_product(factors),
        term => (false, term.to_string()),
    }
}

/// Joins the parts of one side of a fraction, inserting `*` only where leaving it out would
/// change how the result parses.
fn join_factors(parts: &[String], leading_integer: bool) -> String {
    let mut out = String::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            let starts_word = part.starts_with(|c: char| c.is_alphabetic() || c == '(');
            let after_integer = i == 1 && leading_integer;
            if !(starts_word && (after_integer || out.ends_with(')'))) {
                out.push('*');
            }
        }
        out.push_str(part);
    }
    out
}

/// Renders a product as a fraction. The sign of the numeric coefficient is returned separately.
fn signed_product(factors: &[Expr]) -> (bool, String) {
    let coefficient = factors
        .iter()
        .filter_map(Expr::as_number)
        .fold(Rational::one(), |acc, n| &acc * n);
    let negative = coefficient.is_negative();
    let coefficient = coefficient.abs();

    let mut numerator = Vec::new();
    let mut denominator = Vec::new();
    if *coefficient.denominator() != 1 {
        denominator.push(coefficient.denominator().to_string());
    }
    for factor in factors.iter().filter(|factor| !factor.is_number()) {
        match factor {
            // `0^(-1)` stays in the numerator; in a grouped denominator the `0` would absorb the
            // other factors when parsed
            Expr::Power(base, exp) if exp.is_exactly(-1) && !base.is_zero() => {
                denominator.push(base.factor_string())
            },
            factor => numerator.push(factor.factor_string()),
        }
    }

    let leading_integer = *coefficient.numerator() != 1 || numerator.is_empty();
    if leading_integer {
        numerator.insert(0, coefficient.numerator().to_string());
    }

    let mut out = join_factors(&numerator, leading_integer);
    match denominator.len() {
        0 => (),
        1 => {
            out.push('/');
            out.push_str(&denominator[0]);
        },
        _ => {
            let leading_integer = *coefficient.denominator() != 1;
            out.push_str("/(");
            out.push_str(&join_factors(&denominator, leading_integer));
            out.push(')');
        },
    }

    (negative, out)
}

impl Expr {
    /// Renders the expression as one factor of a product, parenthesizing it if it would otherwise
    /// be split apart by the surrounding factors.
    pub(crate) fn factor_string(&self) -> String {
        if matches!(self, Self::Sum(_) | Self::Product(_)) || is_compound_number(self) {
            format!("({})", self)
        } else {
            self.to_string()
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Constant(c) => write!(f, "{}", c),
            Self::Variable(name) => f.write_str(name),
            Self::Sum(terms) => {
                if terms.is_empty() {
                    return f.write_str("0");
                }
                for (i, term) in terms.iter().enumerate() {
                    let (negative, body) = signed_term(term);
                    if negative {
                        f.write_str("-")?;
                    } else if i > 0 {
                        f.write_str("+")?;
                    }
                    f.write_str(&body)?;
                }
                Ok(())
            },
            Self::Product(factors) => {
                let (negative, body) = signed_product(factors);
                if negative {
                    f.write_str("-")?;
                }
                f.write_str(&body)
            },
            Self::Power(base, exp) => {
                if matches!(**base, Self::Sum(_) | Self::Product(_) | Self::Power(..))
                    || is_compound_number(base)
                {
                    write!(f, "({})", base)?;
                } else {
                    write!(f, "{}", base)?;
                }
                f.write_str("^")?;
                if matches!(**exp, Self::Sum(_) | Self::Product(_)) || is_compound_number(exp) {
                    write!(f, "({})", exp)
                } else {
                    write!(f, "{}", exp)
                }
            },
            Self::Log(base, arg) => match &**base {
                Self::Constant(Constant::E) => write!(f, "ln({})", arg),
                Self::Number(n) if *n == Rational::from(10) => write!(f, "log({})", arg),
                Self::Number(n) if n.is_integer() && n.is_positive() => {
                    write!(f, "log_{}({})", n, arg)
                },
                base => write!(f, "log_({})({})", base, arg),
            },
            Self::Call(func, arg) => write!(f, "{}({})", func, arg),
            Self::Derivative { main, relative_to, degree } => {
                if *degree == 1 {
                    write!(f, "d{}/d{}", main, relative_to)
                } else {
                    write!(f, "d^{}{}/d{}^{}", degree, main, relative_to, degree)
                }
            },
        }
    }
}
