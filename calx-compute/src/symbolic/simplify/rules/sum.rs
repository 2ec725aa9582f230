//! Reduction of sums.

use crate::rational::Rational;
use crate::symbolic::{
    expr::Expr,
    simplify::{self, record, step::Step, term, NodeKind, SimplifyState},
    step_collector::StepCollector,
};

/// Splices the terms of any sums into the list of terms.
fn flatten(terms: Vec<Expr>) -> Vec<Expr> {
    terms
        .into_iter()
        .flat_map(|term| match term {
            Expr::Sum(inner) => inner,
            term => vec![term],
        })
        .collect()
}

/// `0+a = a`
fn add_zero(terms: Vec<Expr>, steps: &mut dyn StepCollector<Step>) -> Vec<Expr> {
    let len = terms.len();
    let terms = terms.into_iter().filter(|term| !term.is_zero()).collect::<Vec<_>>();
    if terms.len() != len {
        record(steps, Step::AddZero);
    }
    terms
}

/// Adds all numbers in the sum together, placing the result after the other terms.
fn fold_numbers(terms: Vec<Expr>, steps: &mut dyn StepCollector<Step>) -> Vec<Expr> {
    if terms.iter().filter(|term| term.is_number()).count() < 2 {
        return terms;
    }

    let (numbers, mut terms): (Vec<_>, Vec<_>) = terms.into_iter().partition(Expr::is_number);
    let total = numbers
        .iter()
        .filter_map(Expr::as_number)
        .fold(Rational::zero(), |acc, n| &acc + n);
    if !total.is_zero() {
        terms.push(Expr::Number(total));
    }

    record(steps, Step::FoldSum);
    terms
}

/// Reduces a sum with the given terms.
pub(crate) fn reduce(
    terms: Vec<Expr>,
    state: SimplifyState,
    steps: &mut dyn StepCollector<Step>,
) -> Expr {
    let inner = state.after(NodeKind::Sum);
    let terms = terms
        .into_iter()
        .map(|term| simplify::reduce(term, inner, steps))
        .collect::<Vec<_>>();

    let terms = flatten(terms);
    let terms = add_zero(terms, steps);
    let terms = fold_numbers(terms, steps);

    // the parent sum will absorb these terms and combine them with its own
    if state.parent == Some(NodeKind::Sum) {
        return Expr::Sum(terms).downgrade();
    }

    term::reduce_terms(terms, state, steps)
}
