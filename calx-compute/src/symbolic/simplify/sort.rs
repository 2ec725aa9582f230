//! Conventional ordering of terms and factors.
//!
//! Terms are ordered by a heuristic "weight", so that longer and more complicated terms come
//! first and constants come last: `5x*x+x-1`. Factors are ordered with the numeric coefficient
//! first, then the numerator, then the denominator.

use crate::symbolic::expr::Expr;
use std::cmp::Reverse;
use super::term::Term;

/// The weight a single factor contributes to its term.
fn factor_weight(factor: &Expr) -> i64 {
    match factor {
        Expr::Number(_) => 5,
        Expr::Variable(_) | Expr::Constant(_) | Expr::Derivative { .. } => 10,
        Expr::Call(..) => 0,
        Expr::Power(..) => 20,
        Expr::Sum(_) => 30,
        Expr::Product(_) => 40,
        Expr::Log(..) => 50,
    }
}

/// The sort key of a term. Heavier terms are placed first.
fn term_key(term: &Term) -> i64 {
    let len = i64::try_from(term.factors.len()).unwrap_or(i64::MAX / 200);
    let mut key = len * 100 + term.factors.iter().map(factor_weight).sum::<i64>();
    if !term.coefficient.is_one() {
        key += 105;
    }
    if term.coefficient.is_negative() {
        key -= 1000;
    }
    key
}

/// Sorts the terms of a sum, heaviest first. Terms of equal weight keep their order.
pub(crate) fn sort_terms(terms: &mut [Term]) {
    terms.sort_by_key(|term| Reverse(term_key(term)));
}

/// Sorts the factors of a product: numbers first, then other factors, then reciprocals. Factors of
/// the same kind are ordered by how they are rendered.
pub(crate) fn sort_factors(factors: &mut [Expr]) {
    factors.sort_by_cached_key(|factor| {
        let rank = match factor {
            Expr::Number(_) => 0,
            Expr::Power(_, exp) if exp.is_exactly(-1) => 2,
            _ => 1,
        };
        (rank, factor.factor_string())
    });
}
