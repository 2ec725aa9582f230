//! Simplification rules for logarithms.

use crate::rational::{exact_log, Rational};
use crate::symbolic::{
    expr::Expr,
    simplify::{self, record, step::Step, NodeKind, SimplifyState},
    step_collector::StepCollector,
};

/// `log_1(a) = 0`
///
/// The logarithm is undefined, so this only applies when domains are not strict.
fn log_one_base(
    base: &Expr,
    state: SimplifyState,
    steps: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    if !base.is_one() || state.options.strict_domains {
        return None;
    }

    record(steps, Step::LogOneBase);
    Some(Expr::number(0))
}

/// `log_b(1) = 0`
fn log_one(arg: &Expr, steps: &mut dyn StepCollector<Step>) -> Option<Expr> {
    if !arg.is_one() {
        return None;
    }

    record(steps, Step::LogOne);
    Some(Expr::number(0))
}

/// `log_b(b) = 1`
fn log_same(base: &Expr, arg: &Expr, steps: &mut dyn StepCollector<Step>) -> Option<Expr> {
    if base != arg {
        return None;
    }

    record(steps, Step::LogSame);
    Some(Expr::number(1))
}

/// Computes the logarithm of a number to a number base, if the result is rational.
///
/// `log_2(8) = 3`, `log_8(4) = 2/3`
fn fold_numbers(base: &Expr, arg: &Expr, steps: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let value = exact_log(arg.as_number()?, base.as_number()?).ok()?;
    record(steps, Step::FoldLog);
    Some(Expr::Number(value))
}

/// `log_b(a) = ln(a)/ln(b)`, if `b` is not constant.
fn change_base(
    base: &Expr,
    arg: &Expr,
    state: SimplifyState,
    steps: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    if base.is_constant() {
        return None;
    }

    record(steps, Step::ChangeLogBase);
    let expanded = Expr::ln(arg.clone()) / Expr::ln(base.clone());
    Some(simplify::reduce(expanded, state, steps))
}

/// `log_b(a^c) = c*log_b(a)`
fn log_power(
    base: &Expr,
    arg: &Expr,
    state: SimplifyState,
    steps: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    let Expr::Power(inner_base, exp) = arg else {
        return None;
    };

    record(steps, Step::LogPower);
    let expanded = (**exp).clone() * Expr::log(base.clone(), (**inner_base).clone());
    Some(simplify::reduce(expanded, state, steps))
}

/// `log_b(a*c) = log_b(a) + log_b(c)`
///
/// Together with [`log_power`], this also expands `log_b(a/c) = log_b(a) - log_b(c)`.
///
/// A product with a negative numeric factor is left alone, since splitting it off would leave
/// the logarithm of a negative number.
fn log_product(
    base: &Expr,
    arg: &Expr,
    state: SimplifyState,
    steps: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    let Expr::Product(factors) = arg else {
        return None;
    };
    if factors.iter().filter_map(Expr::as_number).any(Rational::is_negative) {
        return None;
    }

    record(steps, Step::LogProduct);
    let expanded = Expr::sum(
        factors
            .iter()
            .map(|factor| Expr::log(base.clone(), factor.clone()))
            .collect(),
    );
    Some(simplify::reduce(expanded, state, steps))
}

/// Reduces the logarithm `log_base(arg)`.
pub(crate) fn reduce(
    base: Expr,
    arg: Expr,
    state: SimplifyState,
    steps: &mut dyn StepCollector<Step>,
) -> Expr {
    let inner = state.after(NodeKind::Log);
    let base = simplify::reduce(base, inner, steps);
    let arg = simplify::reduce(arg, inner, steps);

    log_one_base(&base, state, steps)
        .or_else(|| log_one(&arg, steps))
        .or_else(|| log_same(&base, &arg, steps))
        .or_else(|| fold_numbers(&base, &arg, steps))
        .or_else(|| {
            if !state.options.expand_logarithms {
                return None;
            }
            change_base(&base, &arg, state, steps)
                .or_else(|| log_power(&base, &arg, state, steps))
                .or_else(|| log_product(&base, &arg, state, steps))
        })
        .unwrap_or_else(|| Expr::log(base, arg))
}
