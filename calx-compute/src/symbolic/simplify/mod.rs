//! Simplification of expressions into a canonical form.
//!
//! Simplification happens in two phases. The tree is first **distributed**, which currently only
//! rebuilds it through the flattening constructors, so that hand-built trees have the same shape
//! as parsed ones. The tree is then **reduced** bottom-up: the children of every node are reduced
//! first, and then the rules for the node's kind are applied to it. The first rule that matches
//! wins.
//!
//! Reduction is aware of the kind of the parent node through [`SimplifyState`]. A sum that is a
//! term of another sum only cleans itself up locally, since its terms are about to be merged into
//! the parent; the expensive work of combining like terms and extracting common factors happens
//! once, at the outermost sum. Products work the same way.
//!
//! Reduction never fails. A rule that does not apply, or that would produce an inexact or
//! undefined number, leaves the node as it is.
//!
//! ```
//! use calx_compute::symbolic::{parse_expr, simplify, SimplifyOptions};
//!
//! let expr = parse_expr("x*y + 2*y*x - 3*x*y + x").unwrap();
//! assert_eq!(simplify(&expr, SimplifyOptions::default()).to_string(), "x");
//! ```

mod factor;
mod rules;
mod sort;
pub mod step;
mod term;

use super::{expr::Expr, step_collector::StepCollector};
use tracing::{debug, trace};

pub use step::Step;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options that control the output of [`simplify`].
///
/// The default options leave every option off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimplifyOptions {
    /// Sort the terms of sums and the factors of products into a conventional order, such as
    /// `5x*x+x-1`.
    pub sort_terms: bool,

    /// Expand logarithms of products and powers into sums of logarithms, and rewrite logarithms
    /// with a non-constant base in terms of the natural logarithm.
    pub expand_logarithms: bool,

    /// Leave expressions that are undefined, such as `log_1(x)` or `tan(pi/2)`, as they are.
    /// Otherwise, they are replaced with `0`.
    pub strict_domains: bool,
}

impl SimplifyOptions {
    /// Sets [`SimplifyOptions::sort_terms`].
    pub fn sort_terms(mut self, sort_terms: bool) -> Self {
        self.sort_terms = sort_terms;
        self
    }

    /// Sets [`SimplifyOptions::expand_logarithms`].
    pub fn expand_logarithms(mut self, expand_logarithms: bool) -> Self {
        self.expand_logarithms = expand_logarithms;
        self
    }

    /// Sets [`SimplifyOptions::strict_domains`].
    pub fn strict_domains(mut self, strict_domains: bool) -> Self {
        self.strict_domains = strict_domains;
        self
    }
}

/// The kinds of nodes that have children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeKind {
    Sum,
    Product,
    Power,
    Log,
    Call,
}

/// The context a node is reduced in.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SimplifyState {
    /// The kind of the immediate parent of the node, or [`None`] at the root.
    pub parent: Option<NodeKind>,

    /// The options given to [`simplify`].
    pub options: SimplifyOptions,
}

impl SimplifyState {
    /// Creates the state for the root of the tree.
    pub fn new(options: SimplifyOptions) -> Self {
        Self { parent: None, options }
    }

    /// Creates the state for the children of a node of the given kind.
    pub fn after(self, kind: NodeKind) -> Self {
        Self { parent: Some(kind), ..self }
    }
}

/// Records that a rule was applied.
pub(crate) fn record(steps: &mut dyn StepCollector<Step>, step: Step) {
    trace!(?step, "applied rule");
    steps.push(step);
}

/// Simplifies the given expression.
pub fn simplify(expr: &Expr, options: SimplifyOptions) -> Expr {
    simplify_with(expr, options, &mut ())
}

/// Simplifies the given expression, returning the steps that were taken along with the result.
pub fn simplify_with_steps(expr: &Expr, options: SimplifyOptions) -> (Expr, Vec<Step>) {
    let mut steps = Vec::new();
    let result = simplify_with(expr, options, &mut steps);
    (result, steps)
}

/// Simplifies the given expression, reporting every applied rule to the given collector.
pub fn simplify_with(
    expr: &Expr,
    options: SimplifyOptions,
    steps: &mut dyn StepCollector<Step>,
) -> Expr {
    debug!(%expr, ?options, "simplifying");
    let result = reduce(distribute(expr), SimplifyState::new(options), steps);
    debug!(%result, "simplified");
    result
}

/// Rebuilds the tree through the flattening constructors.
///
/// TODO: expand products of sums here once there is a rule to collect the resulting powers back
/// into factored form.
fn distribute(expr: &Expr) -> Expr {
    match expr {
        Expr::Sum(terms) => Expr::sum(terms.iter().map(distribute).collect()),
        Expr::Product(factors) => Expr::product(factors.iter().map(distribute).collect()),
        Expr::Power(base, exp) => Expr::power(distribute(base), distribute(exp)),
        Expr::Log(base, arg) => Expr::log(distribute(base), distribute(arg)),
        Expr::Call(func, arg) => Expr::call(*func, distribute(arg)),
        Expr::Number(_) | Expr::Constant(_) | Expr::Variable(_) | Expr::Derivative { .. } => {
            expr.clone()
        },
    }
}

/// Reduces a node, after reducing its children.
pub(crate) fn reduce(expr: Expr, state: SimplifyState, steps: &mut dyn StepCollector<Step>) -> Expr {
    match expr {
        Expr::Sum(terms) => rules::sum::reduce(terms, state, steps),
        Expr::Product(factors) => rules::product::reduce(factors, state, steps),
        Expr::Power(base, exp) => rules::power::reduce(*base, *exp, state, steps),
        Expr::Log(base, arg) => rules::log::reduce(*base, *arg, state, steps),
        Expr::Call(func, arg) => rules::trigonometry::reduce(func, *arg, state, steps),
        leaf => leaf,
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
    use crate::rational::Rational;
    use crate::symbolic::parse_expr;

    fn simplified(source: &str) -> Expr {
        simplify(&parse_expr(source).unwrap(), SimplifyOptions::default())
    }

    fn simplified_sorted(source: &str) -> String {
        let options = SimplifyOptions::default().sort_terms(true);
        simplify(&parse_expr(source).unwrap(), options).to_string()
    }

    #[test]
    fn combine_like_terms() {
        assert_eq!(simplified("3*x*y + 2*x*y").to_string(), "5x*y");
        assert_eq!(simplified("x + x + x"), simplified("3x"));
    }

    #[test]
    fn like_terms_ignore_factor_order() {
        assert_eq!(simplified("x*y + y*x"), simplified("2x*y"));
    }

    #[test]
    fn sorted_polynomial() {
        assert_eq!(simplified_sorted("3 - 4 + x*x - 2*x + 4*x*x + 3*x"), "5x*x+x-1");
    }

    #[test]
    fn sorted_factored_form() {
        assert_eq!(simplified_sorted("5*x*x + 10*x"), "5(x+2)x");
    }

    #[test]
    fn common_sum_factor() {
        assert_eq!(simplified("x*(x+1)+x*(x+1)"), simplified("2*x*(x+1)"));
    }

    #[test]
    fn common_factor_and_gcd() {
        assert_eq!(simplified("6*x*y + 2*x*x*y").to_string(), "2x*y*(3+x)");
    }

    #[test]
    fn negative_gcd() {
        assert_eq!(simplified("-2x - 4").to_string(), "-2(x+2)");
    }

    #[test]
    fn untouched_call() {
        let expr = parse_expr("sin(3/x)").unwrap();
        assert_eq!(simplify(&expr, SimplifyOptions::default()), expr);
    }

    #[test]
    fn log_of_same_base() {
        assert_eq!(simplified("log_(2*x+3)(2*x+3)"), Expr::number(1));
    }

    #[test]
    fn cancel_factors() {
        assert_eq!(simplified("x*y/x"), Expr::variable("y"));
        assert_eq!(simplified("6x/(4x)").to_string(), "3/2");
    }

    #[test]
    fn nested_sums_flatten() {
        assert_eq!(simplified("2(x+1) - (x+1) + x").to_string(), "2x+1");
    }

    #[test]
    fn everything_cancels() {
        assert_eq!(simplified("(3*x)+(2*x)-(1*x+1*x)-3x"), Expr::number(0));
    }

    #[test]
    fn factored_difference() {
        let source = "(3*x)+(2*x)-(1*x+1*x)-(3*3*x)*x";
        let result = simplified(source);
        let expected = parse_expr("3*x*(-3*x+1)").unwrap();
        for point in ["-2.5", "-1", "0", "0.5", "1.25", "4"] {
            let value = Expr::Number(Rational::from_decimal_str(point).unwrap());
            let actual = result.substitute("x", &value).evaluate().unwrap();
            let expected = expected.substitute("x", &value).evaluate().unwrap();
            assert_float_absolute_eq!(actual, expected, 1e-9);
        }
        assert_eq!(result, simplified("3x*(1-3x)"));
    }

    #[test]
    fn division_by_zero_round_trips() {
        let result = simplified("1/2/0/x");
        assert_eq!(result.to_string(), "0^(-1)/(2x)");
        assert_eq!(simplified(&result.to_string()), result);
    }

    #[test]
    fn steps_are_recorded() {
        let expr = parse_expr("0 + 2*x*1 + 3x").unwrap();
        let (result, steps) = simplify_with_steps(&expr, SimplifyOptions::default());
        assert_eq!(result.to_string(), "5x");
        assert_eq!(steps, vec![Step::MultiplyOne, Step::AddZero, Step::CombineLikeTerms]);
    }

    #[test]
    fn options_builder() {
        let options = SimplifyOptions::default().sort_terms(true).strict_domains(true);
        assert!(options.sort_terms);
        assert!(!options.expand_logarithms);
        assert!(options.strict_domains);
    }
}
