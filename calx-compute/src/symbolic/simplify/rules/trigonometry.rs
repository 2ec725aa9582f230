//! Simplification rules for trigonometric functions.
//!
//! The trigonometric functions of multiples of `pi/4` are known exactly, and can be written with
//! no more than a square root of 2. Each function has a lookup table of these values, indexed by
//! the number of quarters of `pi` in the angle, from `0` up to (but not including) a full turn.

use crate::rational::Rational;
use crate::symbolic::{
    expr::{Constant, Expr, Func},
    simplify::{self, record, step::Step, NodeKind, SimplifyState},
    step_collector::StepCollector,
};

/// An exact value of a trigonometric function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exact {
    Zero,
    One,
    NegOne,

    /// `2^(1/2)/2`
    HalfRoot2,

    /// `-2^(1/2)/2`
    NegHalfRoot2,

    /// `2^(1/2)`
    Root2,

    /// `-2^(1/2)`
    NegRoot2,

    /// The function is undefined at this angle.
    Undefined,
}

use Exact::*;

const SIN: [Exact; 8] = [Zero, HalfRoot2, One, HalfRoot2, Zero, NegHalfRoot2, NegOne, NegHalfRoot2];
const COS: [Exact; 8] = [One, HalfRoot2, Zero, NegHalfRoot2, NegOne, NegHalfRoot2, Zero, HalfRoot2];
const TAN: [Exact; 8] = [Zero, One, Undefined, NegOne, Zero, One, Undefined, NegOne];
const CSC: [Exact; 8] = [Undefined, Root2, One, Root2, Undefined, NegRoot2, NegOne, NegRoot2];
const SEC: [Exact; 8] = [One, Root2, Undefined, NegRoot2, NegOne, NegRoot2, Undefined, Root2];
const COT: [Exact; 8] = [Undefined, One, Zero, NegOne, Undefined, One, Zero, NegOne];

impl Exact {
    /// Builds the expression for the value, or [`None`] if the value is undefined.
    fn to_expr(self) -> Option<Expr> {
        let root2 = || -> Option<Expr> {
            Some(Expr::power(Expr::number(2), Expr::Number(Rational::new(1, 2).ok()?)))
        };
        Some(match self {
            Zero => Expr::number(0),
            One => Expr::number(1),
            NegOne => Expr::number(-1),
            HalfRoot2 => Expr::Product(vec![Expr::Number(Rational::new(1, 2).ok()?), root2()?]),
            NegHalfRoot2 => Expr::Product(vec![Expr::Number(Rational::new(-1, 2).ok()?), root2()?]),
            Root2 => root2()?,
            NegRoot2 => Expr::Product(vec![Expr::number(-1), root2()?]),
            Undefined => return None,
        })
    }
}

/// Returns the number of quarters of `pi` in the angle, reduced to a single turn, if the angle is
/// a multiple of `pi/4`.
///
/// The angle must be `0`, `pi`, or a number times `pi`.
fn pi_quarters(angle: &Expr) -> Option<usize> {
    let coefficient = match angle {
        Expr::Number(n) if n.is_zero() => Rational::zero(),
        Expr::Constant(Constant::Pi) => Rational::one(),
        Expr::Product(factors) => match factors.as_slice() {
            [Expr::Number(c), Expr::Constant(Constant::Pi)]
            | [Expr::Constant(Constant::Pi), Expr::Number(c)] => c.clone(),
            _ => return None,
        },
        _ => return None,
    };

    let quarters = &coefficient * &Rational::from(4);
    if !quarters.is_integer() {
        return None;
    }
    quarters.checked_rem(&Rational::from(8)).ok()?.numerator().to_usize()
}

/// Evaluates a trigonometric function at a multiple of `pi/4`.
///
/// At angles where the function is undefined, the result is `0` unless domains are strict.
fn special_angle(
    func: Func,
    arg: &Expr,
    state: SimplifyState,
    steps: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    let table = match func {
        Func::Sin => &SIN,
        Func::Cos => &COS,
        Func::Tan => &TAN,
        Func::Csc => &CSC,
        Func::Sec => &SEC,
        Func::Cot => &COT,
        Func::Arcsin | Func::Arccos | Func::Arctan => return None,
    };
    let exact = *table.get(pi_quarters(arg)?)?;

    if exact == Undefined {
        if state.options.strict_domains {
            return None;
        }
        record(steps, Step::TrigUndefined);
        return Some(Expr::number(0));
    }

    let value = exact.to_expr()?;
    record(steps, Step::TrigSpecialAngle);
    Some(value)
}

/// `arcsin(0) = 0`, `arccos(1) = 0`, `arctan(0) = 0`
///
/// Outside of `[-1, 1]`, `arcsin` and `arccos` are undefined, and the result is `0` unless domains
/// are strict.
fn inverse(
    func: Func,
    arg: &Expr,
    state: SimplifyState,
    steps: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    let n = arg.as_number()?;
    match func {
        Func::Arcsin | Func::Arccos if n.abs() > Rational::one() => {
            if state.options.strict_domains {
                return None;
            }
            record(steps, Step::InverseTrigUndefined);
        },
        Func::Arcsin | Func::Arctan if n.is_zero() => record(steps, Step::InverseTrig),
        Func::Arccos if n.is_one() => record(steps, Step::InverseTrig),
        _ => return None,
    }

    Some(Expr::number(0))
}

/// Reduces the function call `func(arg)`.
pub(crate) fn reduce(
    func: Func,
    arg: Expr,
    state: SimplifyState,
    steps: &mut dyn StepCollector<Step>,
) -> Expr {
    let arg = simplify::reduce(arg, state.after(NodeKind::Call), steps);
    let value = match func {
        Func::Arcsin | Func::Arccos | Func::Arctan => inverse(func, &arg, state, steps),
        _ => special_angle(func, &arg, state, steps),
    };
    value.unwrap_or_else(|| Expr::call(func, arg))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::symbolic::{parse_expr, simplify, SimplifyOptions};

    fn simplified(source: &str) -> String {
        simplify(&parse_expr(source).unwrap(), SimplifyOptions::default()).to_string()
    }

    #[test]
    fn angle_index() {
        assert_eq!(pi_quarters(&Expr::number(0)), Some(0));
        assert_eq!(pi_quarters(&Expr::Constant(Constant::Pi)), Some(4));

        let three_halves_pi = parse_expr("3pi/2").unwrap();
        let three_halves_pi = simplify(&three_halves_pi, SimplifyOptions::default());
        assert_eq!(pi_quarters(&three_halves_pi), Some(6));

        let negative = simplify(&parse_expr("-pi/4").unwrap(), SimplifyOptions::default());
        assert_eq!(pi_quarters(&negative), Some(7));

        let sixth = simplify(&parse_expr("pi/6").unwrap(), SimplifyOptions::default());
        assert_eq!(pi_quarters(&sixth), None);
    }

    #[test]
    fn exact_values() {
        assert_eq!(simplified("sin(0)"), "0");
        assert_eq!(simplified("cos(pi)"), "-1");
        assert_eq!(simplified("sin(pi/2)"), "1");
        assert_eq!(simplified("cos(pi/4)"), "2^(1/2)/2");
        assert_eq!(simplified("sin(5pi/4)"), "-2^(1/2)/2");
        assert_eq!(simplified("tan(3pi/4)"), "-1");
        assert_eq!(simplified("sec(pi/4)"), "2^(1/2)");
        assert_eq!(simplified("csc(-pi/4)"), "-2^(1/2)");
        assert_eq!(simplified("cot(pi/2)"), "0");
        assert_eq!(simplified("sin(2pi)"), "0");
    }

    #[test]
    fn undefined_values() {
        assert_eq!(simplified("tan(pi/2)"), "0");
        assert_eq!(simplified("csc(0)"), "0");

        let strict = SimplifyOptions::default().strict_domains(true);
        let expr = parse_expr("tan(pi/2)").unwrap();
        assert_eq!(simplify(&expr, strict).to_string(), "tan(pi/2)");
    }

    #[test]
    fn other_angles_stay() {
        assert_eq!(simplified("sin(pi/6)"), "sin(pi/6)");
        assert_eq!(simplified("cos(x)"), "cos(x)");
    }

    #[test]
    fn inverse_functions() {
        assert_eq!(simplified("arcsin(0)"), "0");
        assert_eq!(simplified("arccos(1)"), "0");
        assert_eq!(simplified("arctan(0)"), "0");
        assert_eq!(simplified("arcsin(2)"), "0");
        assert_eq!(simplified("arctan(2)"), "arctan(2)");

        let strict = SimplifyOptions::default().strict_domains(true);
        let expr = parse_expr("arccos(-3)").unwrap();
        assert_eq!(simplify(&expr, strict).to_string(), "arccos(-3)");
    }
}
