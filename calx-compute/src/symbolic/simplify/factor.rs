//! Cancellation of factors in products.
//!
//! A product is viewed as a fraction: a numeric coefficient, the factors in the numerator, and the
//! factors in the denominator (those raised to the power of `-1`). A factor that appears on both
//! sides is cancelled.

use crate::rational::Rational;
use crate::symbolic::{expr::Expr, step_collector::StepCollector};
use super::{record, sort, step::Step, SimplifyState};

/// A product, split into a fraction.
#[derive(Debug, Default)]
struct Factors {
    coefficient: Rational,
    numerator: Vec<Expr>,
    denominator: Vec<Expr>,
}

impl Factors {
    fn new() -> Self {
        Self { coefficient: Rational::one(), ..Default::default() }
    }

    /// Adds a factor to the numerator.
    fn push(&mut self, factor: Expr) {
        match factor {
            Expr::Number(n) => self.coefficient = &self.coefficient * &n,
            Expr::Product(factors) => factors.into_iter().for_each(|factor| self.push(factor)),
            Expr::Power(base, exp) if exp.is_exactly(-1) => self.push_denominator(*base),
            factor => self.numerator.push(factor),
        }
    }

    /// Adds a factor to the denominator.
    fn push_denominator(&mut self, factor: Expr) {
        match factor {
            Expr::Number(n) => match self.coefficient.checked_div(&n) {
                Ok(coefficient) => self.coefficient = coefficient,
                Err(_) => self.denominator.push(Expr::Number(n)),
            },
            Expr::Product(factors) => {
                factors.into_iter().for_each(|factor| self.push_denominator(factor))
            },
            Expr::Power(base, exp) if exp.is_exactly(-1) => self.push(*base),
            factor => self.denominator.push(factor),
        }
    }

    /// `a*b/a = b`
    fn cancel(&mut self, steps: &mut dyn StepCollector<Step>) {
        let mut cancelled = false;
        let mut i = 0;
        while i < self.numerator.len() {
            let position = self.denominator.iter().position(|d| *d == self.numerator[i]);
            match position {
                Some(j) => {
                    self.numerator.remove(i);
                    self.denominator.remove(j);
                    cancelled = true;
                },
                None => i += 1,
            }
        }

        if cancelled {
            record(steps, Step::CancelFactors);
        }
    }

    /// Rebuilds the product.
    fn into_expr(self, sort_factors: bool) -> Expr {
        if self.coefficient.is_zero() {
            return Expr::number(0);
        }
        if self.numerator.is_empty() && self.denominator.is_empty() {
            return Expr::Number(self.coefficient);
        }

        let coefficient = (!self.coefficient.is_one()).then_some(Expr::Number(self.coefficient));
        let mut factors = coefficient
            .into_iter()
            .chain(self.numerator)
            .chain(
                self.denominator
                    .into_iter()
                    .map(|factor| Expr::power(factor, Expr::number(-1))),
            )
            .collect::<Vec<_>>();

        if sort_factors {
            sort::sort_factors(&mut factors);
        }
        Expr::Product(factors).downgrade()
    }
}

/// Cancels factors that appear in both the numerator and denominator of a product.
///
/// The factors must already be reduced.
pub(crate) fn reduce_factors(
    factors: Vec<Expr>,
    state: SimplifyState,
    steps: &mut dyn StepCollector<Step>,
) -> Expr {
    let mut fraction = Factors::new();
    factors.into_iter().for_each(|factor| fraction.push(factor));
    fraction.cancel(steps);
    fraction.into_expr(state.options.sort_terms)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::symbolic::SimplifyOptions;

    fn x() -> Expr {
        Expr::variable("x")
    }

    fn recip(expr: Expr) -> Expr {
        Expr::power(expr, Expr::number(-1))
    }

    fn reduce(factors: Vec<Expr>) -> (Expr, Vec<Step>) {
        let mut steps = Vec::new();
        let state = SimplifyState::new(SimplifyOptions::default());
        let result = reduce_factors(factors, state, &mut steps);
        (result, steps)
    }

    #[test]
    fn numbers_in_denominator_fold() {
        let (result, steps) = reduce(vec![
            Expr::number(6),
            x(),
            recip(Expr::Product(vec![Expr::number(4), Expr::variable("y")])),
        ]);
        assert_eq!(result.to_string(), "3x/(2y)");
        assert_eq!(steps, vec![]);
    }

    #[test]
    fn cancel_once_per_pair() {
        let (result, steps) = reduce(vec![x(), x(), recip(x())]);
        assert_eq!(result, x());
        assert_eq!(steps, vec![Step::CancelFactors]);
    }

    #[test]
    fn reciprocal_of_reciprocal() {
        let (result, _) = reduce(vec![recip(recip(x()))]);
        assert_eq!(result, x());
    }

    #[test]
    fn zero_denominator_stays() {
        let (result, _) = reduce(vec![x(), recip(Expr::number(0))]);
        assert_eq!(result, Expr::Product(vec![x(), recip(Expr::number(0))]));
    }
}
