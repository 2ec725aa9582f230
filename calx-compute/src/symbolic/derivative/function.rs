//! Symbolic derivatives of the functions in [`Func`].

use crate::symbolic::expr::{Expr, Func};
use super::{derivative_raw, MultBuilder};

/// `(1 - u^2)^(-1/2)`
fn inverse_sqrt_one_minus_square(u: &Expr) -> Expr {
    let radicand = Expr::number(1) - Expr::power(u.clone(), Expr::number(2));
    Expr::power(radicand, Expr::number(-1) / Expr::number(2))
}

/// Computes the derivative of `func(arg)` and applies the chain rule.
pub(super) fn chain_rule(func: Func, arg: &Expr, var: &str) -> Expr {
    let mut mult_group = MultBuilder::default();
    mult_group.mult(derivative_raw(arg, var));

    let u = || arg.clone();
    match func {
        Func::Sin => mult_group.mult(Expr::call(Func::Cos, u())),
        Func::Cos => {
            mult_group.mult(Expr::number(-1));
            mult_group.mult(Expr::call(Func::Sin, u()));
        },
        Func::Tan => {
            mult_group.mult(Expr::power(Expr::call(Func::Sec, u()), Expr::number(2)));
        },
        Func::Csc => {
            mult_group.mult(Expr::number(-1));
            mult_group.mult(Expr::call(Func::Csc, u()));
            mult_group.mult(Expr::call(Func::Cot, u()));
        },
        Func::Sec => {
            mult_group.mult(Expr::call(Func::Sec, u()));
            mult_group.mult(Expr::call(Func::Tan, u()));
        },
        Func::Cot => {
            mult_group.mult(Expr::number(-1));
            mult_group.mult(Expr::power(Expr::call(Func::Csc, u()), Expr::number(2)));
        },
        Func::Arcsin => mult_group.mult(inverse_sqrt_one_minus_square(arg)),
        Func::Arccos => {
            mult_group.mult(Expr::number(-1));
            mult_group.mult(inverse_sqrt_one_minus_square(arg));
        },
        Func::Arctan => {
            let denominator = Expr::number(1) + Expr::power(u(), Expr::number(2));
            mult_group.mult(Expr::power(denominator, Expr::number(-1)));
        },
    }

    mult_group.into()
}
