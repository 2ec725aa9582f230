//! Symbolic differentiation.
//!
//! The rules here produce a raw derivative that is only cleaned up by the `MultBuilder` and
//! `SumBuilder` helpers. [`derivative`] then passes it through [`simplify`].

mod function;

use crate::rational::Rational;
use super::{
    expr::{Constant, Expr},
    simplify::{simplify, SimplifyOptions},
};
use tracing::debug;

/// Returns `true` if the given [`Expr`] is "clearly" zero. This is intended to clean up the raw
/// derivative and is not mathematically rigorous.
fn is_trivially_zero(expr: &Expr) -> bool {
    match expr {
        Expr::Number(n) => n.is_zero(),
        Expr::Sum(terms) => terms.iter().all(is_trivially_zero),
        Expr::Product(factors) => factors.iter().any(is_trivially_zero),
        Expr::Power(base, exp) => {
            is_trivially_zero(base) && exp.as_number().is_some_and(Rational::is_positive)
        },
        _ => false,
    }
}

/// Returns `true` if the given [`Expr`] is "clearly" one. This is intended to clean up the raw
/// derivative and is not mathematically rigorous.
fn is_trivially_one(expr: &Expr) -> bool {
    match expr {
        Expr::Number(n) => n.is_one(),
        Expr::Product(factors) => factors.iter().all(is_trivially_one),
        Expr::Power(base, exp) => exp.is_zero() || is_trivially_one(base),
        Expr::Sum(terms) => terms.len() == 1 && is_trivially_one(&terms[0]),
        _ => false,
    }
}

/// Helper struct to build a product of expressions while applying basic simplification rules. If
/// any of the expressions are zero, the product is reduced to zero.
#[derive(Default)]
struct MultBuilder(Vec<Expr>);

impl From<MultBuilder> for Expr {
    fn from(value: MultBuilder) -> Self {
        Expr::product(value.0).downgrade()
    }
}

impl MultBuilder {
    fn mult(&mut self, expr: Expr) {
        if self.0.first().is_some_and(is_trivially_zero) {
            return;
        }
        if is_trivially_zero(&expr) {
            self.0 = vec![Expr::number(0)];
            return;
        }

        if !is_trivially_one(&expr) {
            self.0.push(expr);
        }
    }
}

/// Helper struct to build a summation of expressions while applying basic simplification rules.
/// Only non-zero expressions are added to the sum.
#[derive(Default)]
struct SumBuilder(Vec<Expr>);

impl From<SumBuilder> for Expr {
    fn from(value: SumBuilder) -> Self {
        Expr::sum(value.0).downgrade()
    }
}

impl SumBuilder {
    fn add(&mut self, expr: Expr) {
        if !is_trivially_zero(&expr) {
            self.0.push(expr);
        }
    }
}

/// `(f + g)' = f' + g'`
fn sum_rule(terms: &[Expr], var: &str) -> Expr {
    let mut sum = SumBuilder::default();
    for term in terms {
        sum.add(derivative_raw(term, var));
    }
    sum.into()
}

/// `(f * g * h)' = f' * g * h + f * g' * h + f * g * h'`
fn product_rule(factors: &[Expr], var: &str) -> Expr {
    let mut outer_sum = SumBuilder::default();
    for derivative_index in 0..factors.len() {
        let mut inner_mult = MultBuilder::default();
        for (factor_index, factor) in factors.iter().enumerate() {
            if factor_index == derivative_index {
                inner_mult.mult(derivative_raw(factor, var));
            } else {
                inner_mult.mult(factor.clone());
            }
        }
        outer_sum.add(inner_mult.into());
    }
    outer_sum.into()
}

/// Derivative of `base^exp`.
fn power_rule(base: &Expr, exp: &Expr, var: &str) -> Expr {
    let mut product = MultBuilder::default();

    if exp.is_constant() {
        // (b^e)' = e * b^(e-1) * b'
        let reduced = match exp.as_number() {
            Some(n) => Expr::Number(n - &Rational::one()),
            None => exp.clone() - Expr::number(1),
        };
        product.mult(exp.clone());
        product.mult(Expr::power(base.clone(), reduced));
        product.mult(derivative_raw(base, var));
    } else if base.is_constant() {
        // (b^e)' = b^e * ln(b) * e'
        product.mult(Expr::power(base.clone(), exp.clone()));
        product.mult(natural_log(base));
        product.mult(derivative_raw(exp, var));
    } else {
        // (b^e)' = b^e * (e' * ln(b) + e * b' / b)
        let mut from_exp = MultBuilder::default();
        from_exp.mult(derivative_raw(exp, var));
        from_exp.mult(natural_log(base));

        let mut from_base = MultBuilder::default();
        from_base.mult(exp.clone());
        from_base.mult(derivative_raw(base, var));
        from_base.mult(Expr::power(base.clone(), Expr::number(-1)));

        let mut sum = SumBuilder::default();
        sum.add(from_exp.into());
        sum.add(from_base.into());

        product.mult(Expr::power(base.clone(), exp.clone()));
        product.mult(sum.into());
    }

    product.into()
}

/// Derivative of `log_base(arg)`.
fn log_rule(base: &Expr, arg: &Expr, var: &str) -> Expr {
    if !base.is_constant() {
        // log_b(a) = ln(a) / ln(b)
        let quotient = Expr::ln(arg.clone()) / Expr::ln(base.clone());
        return derivative_raw(&quotient, var);
    }

    // (log_b(a))' = a' / (a * ln(b))
    let mut product = MultBuilder::default();
    product.mult(derivative_raw(arg, var));
    product.mult(Expr::power(arg.clone(), Expr::number(-1)));
    if *base != Expr::Constant(Constant::E) {
        product.mult(Expr::power(Expr::ln(base.clone()), Expr::number(-1)));
    }
    product.into()
}

/// `ln(expr)`, leaving out `ln(e)`.
fn natural_log(expr: &Expr) -> Expr {
    if *expr == Expr::Constant(Constant::E) {
        Expr::number(1)
    } else {
        Expr::ln(expr.clone())
    }
}

/// Computes the derivative of the given expression with respect to `var`, without simplifying
/// the result.
///
/// Variables other than `var` are treated as functions of `var`. Their derivatives are
/// represented with [`Expr::Derivative`].
pub fn derivative_raw(expr: &Expr, var: &str) -> Expr {
    if is_trivially_zero(expr) {
        return Expr::number(0);
    }

    match expr {
        Expr::Number(_) | Expr::Constant(_) => Expr::number(0),
        Expr::Variable(name) if name == var => Expr::number(1),
        Expr::Variable(name) => Expr::Derivative {
            main: name.clone(),
            relative_to: var.to_string(),
            degree: 1,
        },
        Expr::Derivative { main, relative_to, degree } if relative_to == var => {
            Expr::Derivative {
                main: main.clone(),
                relative_to: relative_to.clone(),
                degree: degree.saturating_add(1),
            }
        },
        // the placeholder does not depend on any other variable
        Expr::Derivative { .. } => Expr::number(0),
        Expr::Sum(terms) => sum_rule(terms, var),
        Expr::Product(factors) => product_rule(factors, var),
        Expr::Power(base, exp) => power_rule(base, exp, var),
        Expr::Log(base, arg) => log_rule(base, arg, var),
        Expr::Call(func, arg) => function::chain_rule(*func, arg, var),
    }
}

/// Computes the derivative of the given expression with respect to `var`, and simplifies it with
/// the default [`SimplifyOptions`].
pub fn derivative(expr: &Expr, var: &str) -> Expr {
    debug!(%expr, var, "differentiating");
    let result = simplify(&derivative_raw(expr, var), SimplifyOptions::default());
    debug!(%result, "differentiated");
    result
}
