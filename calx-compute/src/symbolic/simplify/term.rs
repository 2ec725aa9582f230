//! Combining like terms of a sum, and factoring out what the terms have in common.
//!
//! Every term of the sum is split into a numeric coefficient and a list of non-numeric factors.
//! Terms whose factors are the same multiset are **like terms**, and are merged by adding their
//! coefficients. What remains is then factored: factors that appear in every term are pulled out
//! of the sum, as is the greatest common divisor of the coefficients when they are all integers.
//!
//! ```text
//! 6xy + 2xxy
//!  = 2xy(3 + x)
//! ```

use crate::primitive::gcd;
use crate::rational::Rational;
use crate::symbolic::{expr::Expr, step_collector::StepCollector};
use rug::Integer;
use std::collections::HashMap;
use super::{factor, record, sort, step::Step, SimplifyOptions, SimplifyState};

/// A term of a sum, split into its numeric coefficient and its other factors.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Term {
    pub coefficient: Rational,
    pub factors: Vec<Expr>,
}

impl Term {
    /// Splits an expression into its coefficient and factors.
    pub fn from_expr(expr: Expr) -> Self {
        match expr {
            Expr::Number(coefficient) => Self { coefficient, factors: Vec::new() },
            Expr::Product(factors) => {
                let (numbers, factors): (Vec<_>, Vec<_>) = factors
                    .into_iter()
                    .partition(Expr::is_number);
                let coefficient = numbers
                    .iter()
                    .filter_map(Expr::as_number)
                    .fold(Rational::one(), |acc, n| &acc * n);
                Self { coefficient, factors }
            },
            expr => Self { coefficient: Rational::one(), factors: vec![expr] },
        }
    }

    /// Returns true if the two terms have the same factors, in any order.
    fn is_like(&self, other: &Self) -> bool {
        self.factors.len() == other.factors.len()
            && counts(&self.factors) == counts(&other.factors)
    }

    /// Returns true if the term is a sum on its own, with a coefficient of `1`.
    fn is_bare_sum(&self) -> bool {
        self.coefficient.is_one() && matches!(self.factors.as_slice(), [Expr::Sum(_)])
    }

    /// Joins the coefficient and factors back into a single expression.
    pub fn into_expr(self, options: SimplifyOptions) -> Expr {
        let Self { coefficient, mut factors } = self;
        if coefficient.is_zero() || factors.is_empty() {
            return Expr::Number(coefficient);
        }

        if options.sort_terms {
            sort::sort_factors(&mut factors);
        }

        if coefficient.is_one() {
            Expr::Product(factors).downgrade()
        } else {
            Expr::Product(std::iter::once(Expr::Number(coefficient)).chain(factors).collect())
        }
    }
}

/// Counts the occurrences of each factor.
fn counts(factors: &[Expr]) -> HashMap<&Expr, usize> {
    let mut counts = HashMap::new();
    for factor in factors {
        *counts.entry(factor).or_insert(0) += 1;
    }
    counts
}

/// Merges like terms by adding their coefficients. Terms whose coefficients become zero are
/// removed.
fn combine_like_terms(terms: Vec<Expr>, steps: &mut dyn StepCollector<Step>) -> Vec<Term> {
    let mut combined: Vec<Term> = Vec::new();
    for term in terms.into_iter().map(Term::from_expr) {
        if term.coefficient.is_zero() {
            continue;
        }

        match combined.iter_mut().find(|other| other.is_like(&term)) {
            Some(other) => {
                other.coefficient = &other.coefficient + &term.coefficient;
                record(steps, Step::CombineLikeTerms);
            },
            None => combined.push(term),
        }
    }

    combined.retain(|term| !term.coefficient.is_zero());
    combined
}

/// Returns the factors that appear in every term, counted with multiplicity, in the order they
/// appear in the first term.
fn common_factors(terms: &[Term]) -> Vec<Expr> {
    let Some((first, rest)) = terms.split_first() else {
        return Vec::new();
    };

    let mut remaining = rest.iter().map(|term| counts(&term.factors)).collect::<Vec<_>>();
    let mut common = Vec::new();
    for factor in &first.factors {
        let in_all = remaining
            .iter()
            .all(|counts| counts.get(factor).is_some_and(|&count| count > 0));
        if !in_all {
            continue;
        }

        for counts in &mut remaining {
            if let Some(count) = counts.get_mut(factor) {
                *count -= 1;
            }
        }
        common.push(factor.clone());
    }

    common
}

/// Removes one occurrence of each of the given factors.
fn remove_factors(factors: &mut Vec<Expr>, common: &[Expr]) {
    for factor in common {
        if let Some(i) = factors.iter().position(|other| other == factor) {
            factors.remove(i);
        }
    }
}

/// Returns the greatest common divisor of the coefficients, if they are all integers and it is
/// not `1`. The divisor is negative if every coefficient is negative.
fn coefficient_gcd(terms: &[Term]) -> Option<Integer> {
    if !terms.iter().all(|term| term.coefficient.is_integer()) {
        return None;
    }

    let divisor = gcd(terms.iter().map(|term| term.coefficient.numerator()));
    let divisor = if terms.iter().all(|term| term.coefficient.is_negative()) {
        -divisor
    } else {
        divisor
    };

    (divisor != 1 && divisor != 0).then_some(divisor)
}

/// Joins the terms back into a sum, sorting them first if requested.
fn into_sum(mut terms: Vec<Term>, options: SimplifyOptions) -> Expr {
    if options.sort_terms {
        sort::sort_terms(&mut terms);
    }
    Expr::Sum(terms.into_iter().map(|term| term.into_expr(options)).collect())
}

/// Splices the terms of any bare sums into the list of terms, and reduces the result again.
fn reduce_flattened(
    terms: Vec<Term>,
    state: SimplifyState,
    steps: &mut dyn StepCollector<Step>,
) -> Expr {
    let options = state.options;
    match Expr::sum(terms.into_iter().map(|term| term.into_expr(options)).collect()) {
        Expr::Sum(terms) => reduce_terms(terms, state, steps),
        other => other,
    }
}

/// Combines like terms in a sum, then factors out common factors and the greatest common divisor
/// of the coefficients.
///
/// The terms must already be reduced.
pub(crate) fn reduce_terms(
    terms: Vec<Expr>,
    state: SimplifyState,
    steps: &mut dyn StepCollector<Step>,
) -> Expr {
    let options = state.options;
    let mut terms = combine_like_terms(terms, steps);
    match terms.len() {
        0 => return Expr::number(0),
        1 => return terms.remove(0).into_expr(options),
        _ => (),
    }

    // merging can leave a sum with coefficient 1, such as `2(x+1) - (x+1)`, whose terms belong in
    // this sum
    if terms.iter().any(Term::is_bare_sum) {
        return reduce_flattened(terms, state, steps);
    }

    let common = common_factors(&terms);
    if !common.is_empty() {
        for term in &mut terms {
            remove_factors(&mut term.factors, &common);
        }
        record(steps, Step::FactorCommon);
    }

    let divisor = coefficient_gcd(&terms);
    if let Some(divisor) = &divisor {
        for term in &mut terms {
            let quotient = Integer::from(term.coefficient.numerator() / divisor);
            term.coefficient = Rational::from(quotient);
        }
        record(steps, Step::FactorCoefficient);
    }

    if divisor.is_none() && common.is_empty() {
        return into_sum(terms, options);
    }

    // the same can happen once the common factors are divided out, as in `2(x+1) + 2y`
    let sum = if terms.iter().any(Term::is_bare_sum) {
        reduce_flattened(terms, state, steps)
    } else {
        into_sum(terms, options)
    };

    let factors = divisor
        .map(|divisor| Expr::Number(Rational::from(divisor)))
        .into_iter()
        .chain(common)
        .chain(std::iter::once(sum))
        .collect();
    factor::reduce_factors(factors, state, steps)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::variable("x")
    }

    fn y() -> Expr {
        Expr::variable("y")
    }

    #[test]
    fn split_coefficient() {
        let term = Term::from_expr(Expr::Product(vec![Expr::number(3), x(), Expr::number(2)]));
        assert_eq!(term, Term { coefficient: Rational::from(6), factors: vec![x()] });

        let term = Term::from_expr(Expr::number(4));
        assert_eq!(term, Term { coefficient: Rational::from(4), factors: vec![] });

        let term = Term::from_expr(y());
        assert_eq!(term, Term { coefficient: Rational::one(), factors: vec![y()] });
    }

    #[test]
    fn like_terms_are_multisets() {
        let a = Term::from_expr(Expr::Product(vec![x(), y(), x()]));
        let b = Term::from_expr(Expr::Product(vec![Expr::number(2), x(), x(), y()]));
        let c = Term::from_expr(Expr::Product(vec![x(), y(), y()]));
        assert!(a.is_like(&b));
        assert!(!a.is_like(&c));
    }

    #[test]
    fn common_with_multiplicity() {
        let terms = vec![
            Term::from_expr(Expr::Product(vec![x(), x(), y()])),
            Term::from_expr(Expr::Product(vec![y(), x()])),
        ];
        assert_eq!(common_factors(&terms), vec![x(), y()]);
    }

    #[test]
    fn gcd_of_coefficients() {
        let terms = vec![
            Term::from_expr(Expr::Product(vec![Expr::number(-4), x()])),
            Term::from_expr(Expr::number(-6)),
        ];
        assert_eq!(coefficient_gcd(&terms), Some(Integer::from(-2)));

        let terms = vec![
            Term::from_expr(Expr::Product(vec![Expr::number(4), x()])),
            Term::from_expr(Expr::number(-6)),
        ];
        assert_eq!(coefficient_gcd(&terms), Some(Integer::from(2)));

        let terms = vec![Term::from_expr(x()), Term::from_expr(Expr::number(6))];
        assert_eq!(coefficient_gcd(&terms), None);
    }

    #[test]
    fn fractional_coefficients_keep_gcd() {
        let terms = vec![
            Term::from_expr(Expr::Product(vec![Expr::Number(Rational::new(1, 2).unwrap()), x()])),
            Term::from_expr(Expr::number(2)),
        ];
        assert_eq!(coefficient_gcd(&terms), None);
    }
}
