//! Reduction of products.

use crate::rational::Rational;
use crate::symbolic::{
    expr::Expr,
    simplify::{self, factor, record, step::Step, NodeKind, SimplifyState},
    step_collector::StepCollector,
};

/// Splices the factors of any products into the list of factors.
fn flatten(factors: Vec<Expr>) -> Vec<Expr> {
    factors
        .into_iter()
        .flat_map(|factor| match factor {
            Expr::Product(inner) => inner,
            factor => vec![factor],
        })
        .collect()
}

/// `0*a = 0`
fn multiply_zero(factors: &[Expr], steps: &mut dyn StepCollector<Step>) -> Option<Expr> {
    if factors.iter().any(Expr::is_zero) {
        record(steps, Step::MultiplyZero);
        Some(Expr::number(0))
    } else {
        None
    }
}

/// `1*a = a`
fn multiply_one(factors: Vec<Expr>, steps: &mut dyn StepCollector<Step>) -> Vec<Expr> {
    let len = factors.len();
    let factors = factors.into_iter().filter(|factor| !factor.is_one()).collect::<Vec<_>>();
    if factors.len() != len {
        record(steps, Step::MultiplyOne);
    }
    factors
}

/// Multiplies all numbers in the product together, placing the result before the other factors.
fn fold_numbers(factors: Vec<Expr>, steps: &mut dyn StepCollector<Step>) -> Vec<Expr> {
    if factors.iter().filter(|factor| factor.is_number()).count() < 2 {
        return factors;
    }

    let (numbers, rest): (Vec<_>, Vec<_>) = factors.into_iter().partition(Expr::is_number);
    let product = numbers
        .iter()
        .filter_map(Expr::as_number)
        .fold(Rational::one(), |acc, n| &acc * n);

    record(steps, Step::FoldProduct);
    if product.is_one() {
        rest
    } else {
        std::iter::once(Expr::Number(product)).chain(rest).collect()
    }
}

/// Reduces a product with the given factors.
pub(crate) fn reduce(
    factors: Vec<Expr>,
    state: SimplifyState,
    steps: &mut dyn StepCollector<Step>,
) -> Expr {
    let inner = state.after(NodeKind::Product);
    let factors = factors
        .into_iter()
        .map(|factor| simplify::reduce(factor, inner, steps))
        .collect::<Vec<_>>();

    let factors = flatten(factors);
    if let Some(zero) = multiply_zero(&factors, steps) {
        return zero;
    }
    let factors = multiply_one(factors, steps);
    let factors = fold_numbers(factors, steps);

    // the parent product will absorb these factors
    if state.parent == Some(NodeKind::Product) {
        return Expr::Product(factors).downgrade();
    }

    factor::reduce_factors(factors, state, steps)
}
