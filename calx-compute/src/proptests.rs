//! Property-based tests for simplification.

use crate::rational::Rational;
use crate::symbolic::{parse_expr, simplify, Constant, Expr, Func, SimplifyOptions};
use proptest::prelude::*;

const FUNCS: [Func; 9] = [
    Func::Sin,
    Func::Cos,
    Func::Tan,
    Func::Csc,
    Func::Sec,
    Func::Cot,
    Func::Arcsin,
    Func::Arccos,
    Func::Arctan,
];

// Strategy for generating leaves: small integers and fractions, two variables and the constants
fn arb_leaf() -> impl Strategy<Value = Expr> {
    prop_oneof![
        3 => (-5i32..=5).prop_map(Expr::number),
        1 => (-5i64..=5, 2i64..=4)
            .prop_map(|(n, d)| Expr::Number(Rational::new(n, d).unwrap())),
        2 => Just(Expr::variable("x")),
        2 => Just(Expr::variable("y")),
        1 => Just(Expr::Constant(Constant::Pi)),
        1 => Just(Expr::Constant(Constant::E)),
    ]
}

// Strategy for generating exponents. Exponents are kept small so that folded numbers stay small
// enough to factor.
fn arb_exponent() -> impl Strategy<Value = Expr> {
    prop_oneof![
        3 => (-1i32..=3).prop_map(Expr::number),
        1 => prop::sample::select(vec![(1, 2), (-1, 2), (2, 3)])
            .prop_map(|(n, d)| Expr::Number(Rational::new(n, d).unwrap())),
        1 => Just(Expr::variable("x")),
        1 => Just(Expr::variable("y")),
    ]
}

// Strategy for generating flattened expressions of bounded depth
fn arb_expr() -> impl Strategy<Value = Expr> {
    arb_leaf().prop_recursive(4, 24, 3, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 2..=3).prop_map(Expr::sum),
            prop::collection::vec(inner.clone(), 2..=3).prop_map(Expr::product),
            (inner.clone(), inner.clone()).prop_map(|(lhs, rhs)| lhs / rhs),
            (inner.clone(), arb_exponent()).prop_map(|(base, exp)| Expr::power(base, exp)),
            (inner.clone(), inner.clone()).prop_map(|(base, arg)| Expr::log(base, arg)),
            inner.clone().prop_map(Expr::ln),
            (prop::sample::select(FUNCS.to_vec()), inner.clone())
                .prop_map(|(func, arg)| Expr::call(func, arg)),
            // multiples of pi hit the exact trigonometric values
            (prop::sample::select(FUNCS[..6].to_vec()), -8i64..=8).prop_map(|(func, quarters)| {
                let angle = Expr::Number(Rational::new(quarters, 4).unwrap());
                Expr::call(func, Expr::product(vec![angle, Expr::Constant(Constant::Pi)]))
            }),
        ]
    })
}

fn options() -> impl Strategy<Value = SimplifyOptions> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(sort, expand, strict)| {
        SimplifyOptions::default()
            .sort_terms(sort)
            .expand_logarithms(expand)
            .strict_domains(strict)
    })
}

/// Returns true if no sum is a direct child of a sum, and no product a direct child of a product.
fn is_flat(expr: &Expr) -> bool {
    expr.post_order_iter().all(|node| match node {
        Expr::Sum(terms) => !terms.iter().any(|term| matches!(term, Expr::Sum(_))),
        Expr::Product(factors) => !factors.iter().any(|factor| matches!(factor, Expr::Product(_))),
        _ => true,
    })
}

/// Returns true if every number in the expression is in lowest terms with a positive denominator.
fn is_reduced(expr: &Expr) -> bool {
    expr.post_order_iter().filter_map(Expr::as_number).all(|n: &Rational| {
        *n.denominator() > 0 && n.numerator().clone().gcd(n.denominator()) == 1
    })
}

/// Substitutes fixed non-zero values for the variables.
fn at_point(expr: &Expr) -> Expr {
    let x = Expr::Number(Rational::new(3, 2).unwrap());
    let y = Expr::Number(Rational::new(-7, 10).unwrap());
    expr.substitute("x", &x).substitute("y", &y)
}

/// The largest magnitude of any subexpression, which bounds the rounding error of evaluating the
/// whole expression.
fn magnitude(expr: &Expr) -> f64 {
    expr.post_order_iter()
        .filter_map(|node| node.evaluate().ok())
        .fold(1.0, |acc: f64, value| acc.max(value.abs()))
}

proptest! {
    #[test]
    fn simplify_idempotent(expr in arb_expr(), options in options()) {
        let once = simplify(&expr, options);
        let twice = simplify(&once, options);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn simplify_stays_flat(expr in arb_expr(), options in options()) {
        let simplified = simplify(&expr, options);
        prop_assert!(is_flat(&simplified), "not flat: {:?}", simplified);
    }

    #[test]
    fn simplify_keeps_rationals_reduced(expr in arb_expr(), options in options()) {
        let simplified = simplify(&expr, options);
        prop_assert!(is_reduced(&simplified));
    }

    // expanding logarithms assumes positive arguments, so it is left out here
    #[test]
    fn simplify_preserves_value(expr in arb_expr(), options in options()) {
        let substituted = at_point(&expr);
        let scale = magnitude(&substituted);
        let before = match substituted.evaluate() {
            Ok(value) if scale < 1e6 => value,
            _ => return Ok(()),
        };
        let simplified = simplify(&expr, options.expand_logarithms(false));
        let after = at_point(&simplified).evaluate();
        prop_assert!(after.is_ok(), "`{}` could not be evaluated: {:?}", simplified, after);

        let after = after.unwrap();
        let tolerance = 1e-6 * scale;
        prop_assert!(
            (before - after).abs() <= tolerance,
            "`{}` = {} but `{}` = {}", expr, before, simplified, after,
        );
    }

    #[test]
    fn render_round_trip(expr in arb_expr(), options in options()) {
        let simplified = simplify(&expr, options);
        let rendered = simplified.to_string();
        let parsed = parse_expr(&rendered);
        prop_assert!(parsed.is_ok(), "`{}` does not parse", rendered);

        let reparsed = simplify(&parsed.unwrap(), options);
        prop_assert_eq!(reparsed, simplified);
    }
}
