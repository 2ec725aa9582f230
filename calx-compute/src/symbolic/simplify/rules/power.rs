//! Simplification rules for powers.

use crate::rational::Rational;
use crate::symbolic::{
    expr::Expr,
    simplify::{self, record, step::Step, NodeKind, SimplifyState},
    step_collector::StepCollector,
};

/// `a^0 = 1`
///
/// This includes `0^0 = 1`.
fn power_zero(exp: &Expr, steps: &mut dyn StepCollector<Step>) -> Option<Expr> {
    if !exp.is_zero() {
        return None;
    }

    record(steps, Step::PowerZero);
    Some(Expr::number(1))
}

/// `0^a = 0`, as long as `a` is not a negative number.
fn power_zero_left(base: &Expr, exp: &Expr, steps: &mut dyn StepCollector<Step>) -> Option<Expr> {
    if !base.is_zero() || exp.as_number().is_some_and(Rational::is_negative) {
        return None;
    }

    record(steps, Step::PowerZeroLeft);
    Some(Expr::number(0))
}

/// `1^a = 1`
fn power_one_left(base: &Expr, steps: &mut dyn StepCollector<Step>) -> Option<Expr> {
    if !base.is_one() {
        return None;
    }

    record(steps, Step::PowerOneLeft);
    Some(Expr::number(1))
}

/// `a^1 = a`
fn power_one(base: &Expr, exp: &Expr, steps: &mut dyn StepCollector<Step>) -> Option<Expr> {
    if !exp.is_one() {
        return None;
    }

    record(steps, Step::PowerOne);
    Some(base.clone())
}

/// Raises a number to a number, if the result is exact.
///
/// `2^3 = 8`, `(2/3)^-2 = 9/4`
fn fold_numbers(base: &Expr, exp: &Expr, steps: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let value = base.as_number()?.pow(exp.as_number()?).ok()?;
    record(steps, Step::FoldPower);
    Some(Expr::Number(value))
}

/// Reduces the power `base^exp`.
pub(crate) fn reduce(
    base: Expr,
    exp: Expr,
    state: SimplifyState,
    steps: &mut dyn StepCollector<Step>,
) -> Expr {
    let inner = state.after(NodeKind::Power);
    let base = simplify::reduce(base, inner, steps);
    let exp = simplify::reduce(exp, inner, steps);

    power_zero(&exp, steps)
        .or_else(|| power_zero_left(&base, &exp, steps))
        .or_else(|| power_one_left(&base, steps))
        .or_else(|| power_one(&base, &exp, steps))
        .or_else(|| fold_numbers(&base, &exp, steps))
        .unwrap_or_else(|| Expr::power(base, exp))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::symbolic::{parse_expr, simplify, SimplifyOptions};

    fn simplified(source: &str) -> Expr {
        simplify(&parse_expr(source).unwrap(), SimplifyOptions::default())
    }

    #[test]
    fn identities() {
        assert_eq!(simplified("(x+1)^0"), Expr::number(1));
        assert_eq!(simplified("0^0"), Expr::number(1));
        assert_eq!(simplified("0^x"), Expr::number(0));
        assert_eq!(simplified("1^x"), Expr::number(1));
        assert_eq!(simplified("x^(3-2)"), Expr::variable("x"));
    }

    #[test]
    fn zero_to_negative_power_stays() {
        assert_eq!(simplified("0^(-1)").to_string(), "0^(-1)");
    }

    #[test]
    fn exact_powers() {
        assert_eq!(simplified("2^10"), Expr::number(1024));
        assert_eq!(simplified("(2/3)^(-2)").to_string(), "9/4");
    }

    #[test]
    fn inexact_powers_stay() {
        assert_eq!(simplified("sqrt(2)").to_string(), "2^(1/2)");
        assert_eq!(simplified("x^2").to_string(), "x^2");
    }

    #[test]
    fn huge_powers_stay() {
        let expr = simplified("(10^100)^4000000000");
        let Expr::Power(base, exp) = &expr else {
            panic!("expected a power, got {:?}", expr);
        };
        assert_eq!(**base, simplified("10^100"));
        assert!(base.is_number());
        assert_eq!(**exp, Expr::number(4_000_000_000u32));
    }

    #[test]
    fn steps() {
        let expr = parse_expr("x^(2 - 1)").unwrap();
        let (_, steps) = simplify::simplify_with_steps(&expr, SimplifyOptions::default());
        assert_eq!(steps, vec![Step::FoldSum, Step::PowerOne]);
    }
}
