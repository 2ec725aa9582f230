//! Floating-point evaluation of expressions.

use super::expr::{Expr, Func};
use std::fmt;

/// Errors that can occur when evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// The expression contains a variable or derivative placeholder, which has no value. The
    /// offending subexpression is included.
    Unevaluable(Expr),

    /// A division by zero occurred, either through a zero base raised to a negative power, or a
    /// reciprocal trigonometric function of an angle where it is undefined.
    DivisionByZero,

    /// A function was given an argument outside of its real domain.
    Domain {
        /// The name of the function.
        func: &'static str,

        /// The value that was given to the function.
        value: f64,
    },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Unevaluable(expr) => write!(f, "cannot evaluate `{}` to a number", expr),
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::Domain { func, value } => {
                write!(f, "`{}` is not defined for the value {}", func, value)
            },
        }
    }
}

impl std::error::Error for EvalError {}

/// Returns `numerator / denominator`, or [`EvalError::DivisionByZero`] if the denominator is zero.
fn checked_div(numerator: f64, denominator: f64) -> Result<f64, EvalError> {
    if denominator == 0.0 {
        Err(EvalError::DivisionByZero)
    } else {
        Ok(numerator / denominator)
    }
}

impl Expr {
    /// Evaluates the expression to a floating-point number.
    ///
    /// The expression must not contain any variables; substitute values for them first with
    /// [`Expr::substitute`].
    pub fn evaluate(&self) -> Result<f64, EvalError> {
        match self {
            Self::Number(n) => Ok(n.to_f64()),
            Self::Constant(c) => Ok(c.value()),
            Self::Variable(_) | Self::Derivative { .. } => Err(EvalError::Unevaluable(self.clone())),
            Self::Sum(terms) => terms
                .iter()
                .try_fold(0.0, |acc, term| Ok(acc + term.evaluate()?)),
            Self::Product(factors) => factors
                .iter()
                .try_fold(1.0, |acc, factor| Ok(acc * factor.evaluate()?)),
            Self::Power(base, exp) => {
                let base = base.evaluate()?;
                let exp = exp.evaluate()?;
                if base == 0.0 && exp < 0.0 {
                    return Err(EvalError::DivisionByZero);
                }

                let value = base.powf(exp);
                if value.is_nan() {
                    Err(EvalError::Domain { func: "pow", value: base })
                } else {
                    Ok(value)
                }
            },
            Self::Log(base, arg) => {
                let base = base.evaluate()?;
                let arg = arg.evaluate()?;
                if arg <= 0.0 {
                    return Err(EvalError::Domain { func: "log", value: arg });
                }
                if base <= 0.0 || base == 1.0 {
                    return Err(EvalError::Domain { func: "log", value: base });
                }
                Ok(arg.ln() / base.ln())
            },
            Self::Call(func, arg) => {
                let value = arg.evaluate()?;
                match func {
                    Func::Sin => Ok(value.sin()),
                    Func::Cos => Ok(value.cos()),
                    Func::Tan => Ok(value.tan()),
                    Func::Csc => checked_div(1.0, value.sin()),
                    Func::Sec => checked_div(1.0, value.cos()),
                    Func::Cot => checked_div(value.cos(), value.sin()),
                    Func::Arcsin | Func::Arccos if !(-1.0..=1.0).contains(&value) => {
                        Err(EvalError::Domain { func: func.name(), value })
                    },
                    Func::Arcsin => Ok(value.asin()),
                    Func::Arccos => Ok(value.acos()),
                    Func::Arctan => Ok(value.atan()),
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_absolute_error_msg,
        afe_is_absolute_eq,
        assert_float_absolute_eq,
    };
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::symbolic::parse_expr;

    fn eval(source: &str) -> Result<f64, EvalError> {
        parse_expr(source).unwrap().evaluate()
    }

    #[test]
    fn arithmetic() {
        assert_float_absolute_eq!(eval("3 - 4/8 + 2^3").unwrap(), 10.5, 1e-12);
        assert_float_absolute_eq!(eval("-2^2").unwrap(), -4.0, 1e-12);
        assert_float_absolute_eq!(eval("(-2)^3").unwrap(), -8.0, 1e-12);
    }

    #[test]
    fn functions_and_constants() {
        assert_float_absolute_eq!(eval("sin(pi/2)").unwrap(), 1.0, 1e-12);
        assert_float_absolute_eq!(eval("ln(e^2)").unwrap(), 2.0, 1e-12);
        assert_float_absolute_eq!(eval("log_2(8)").unwrap(), 3.0, 1e-12);
        assert_float_absolute_eq!(eval("sqrt(16)").unwrap(), 4.0, 1e-12);
        assert_float_absolute_eq!(eval("arctan(1)").unwrap(), std::f64::consts::FRAC_PI_4, 1e-12);
    }

    #[test]
    fn unevaluable_variable() {
        assert_eq!(eval("2x + 1"), Err(EvalError::Unevaluable(Expr::variable("x"))));
    }

    #[test]
    fn zero_to_negative_power() {
        assert_eq!(eval("0^(-1)"), Err(EvalError::DivisionByZero));
        assert_eq!(eval("1/(2 - 2)"), Err(EvalError::DivisionByZero));
        assert_eq!(eval("csc(0)"), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn domain_errors() {
        assert_eq!(eval("ln(0)"), Err(EvalError::Domain { func: "log", value: 0.0 }));
        assert_eq!(eval("log_1(5)"), Err(EvalError::Domain { func: "log", value: 1.0 }));
        assert_eq!(eval("arcsin(2)"), Err(EvalError::Domain { func: "arcsin", value: 2.0 }));
        assert_eq!(eval("(-8)^(1/3)"), Err(EvalError::Domain { func: "pow", value: -8.0 }));
    }
}
