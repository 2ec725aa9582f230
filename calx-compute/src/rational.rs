//! Exact rational numbers.
//!
//! A [`Rational`] is always stored in lowest terms, with a positive denominator. Every
//! constructor and arithmetic operation re-establishes this, so two equal numbers are always
//! structurally equal (and hash identically).

use crate::primitive::{int, prime_factorization};
use rug::{ops::Pow, Integer};
use std::{
    cmp::Ordering,
    collections::{BTreeMap, BTreeSet},
    fmt,
    ops::{Add, Mul, Neg, Sub},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The largest result of [`Rational::pow`], in bits, that is computed exactly.
const MAX_POW_BITS: u64 = 1 << 20;

/// Errors that can occur during exact rational arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RationalError {
    /// The operation would divide by zero.
    DivisionByZero,

    /// The result exists, but is not a rational number, such as `2^(1/2)` or `log_2(5)`.
    Inexact,
}

impl fmt::Display for RationalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::Inexact => write!(f, "the result is not a rational number"),
        }
    }
}

impl std::error::Error for RationalError {}

/// An exact fraction of two [`Integer`]s.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rational {
    numerator: Integer,
    denominator: Integer,
}

impl Rational {
    /// Creates a new rational number `numerator / denominator`, reduced to lowest terms.
    ///
    /// Returns [`RationalError::DivisionByZero`] if the denominator is zero.
    pub fn new(
        numerator: impl Into<Integer>,
        denominator: impl Into<Integer>,
    ) -> Result<Self, RationalError> {
        let denominator = denominator.into();
        if denominator == 0 {
            return Err(RationalError::DivisionByZero);
        }
        Ok(Self::reduced(numerator.into(), denominator))
    }

    /// Creates a rational number with a denominator of `1`.
    pub fn from_integer(n: impl Into<Integer>) -> Self {
        Self {
            numerator: n.into(),
            denominator: int(1),
        }
    }

    /// The rational number `0`.
    pub fn zero() -> Self {
        Self::from_integer(0)
    }

    /// The rational number `1`.
    pub fn one() -> Self {
        Self::from_integer(1)
    }

    /// Builds a rational number from a non-zero denominator, normalizing the sign and dividing
    /// out the greatest common divisor.
    fn reduced(mut numerator: Integer, mut denominator: Integer) -> Self {
        if denominator < 0 {
            numerator = -numerator;
            denominator = -denominator;
        }

        let gcd = int(numerator.gcd_ref(&denominator));
        if gcd > 1 {
            numerator.div_exact_mut(&gcd);
            denominator.div_exact_mut(&gcd);
        }

        Self { numerator, denominator }
    }

    /// Parses a decimal literal such as `16`, `3.25` or `.5` into an exact rational number.
    /// Digit separators (`_`) are ignored.
    ///
    /// Returns [`None`] if the string is not a decimal literal.
    pub fn from_decimal_str(s: &str) -> Option<Self> {
        let s = s.replace('_', "");
        let (whole, fraction) = s.split_once('.').unwrap_or((&s, ""));
        if whole.is_empty() && fraction.is_empty() {
            return None;
        }

        let numerator = Integer::from_str_radix(&format!("{}{}", whole, fraction), 10).ok()?;
        let denominator = int(10).pow(u32::try_from(fraction.len()).ok()?);
        Some(Self::reduced(numerator, denominator))
    }

    /// Returns the numerator of the fraction. The sign of the number is carried here.
    pub fn numerator(&self) -> &Integer {
        &self.numerator
    }

    /// Returns the denominator of the fraction, which is always positive.
    pub fn denominator(&self) -> &Integer {
        &self.denominator
    }

    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    pub fn is_one(&self) -> bool {
        self.numerator == 1 && self.denominator == 1
    }

    pub fn is_integer(&self) -> bool {
        self.denominator == 1
    }

    pub fn is_negative(&self) -> bool {
        self.numerator < 0
    }

    pub fn is_positive(&self) -> bool {
        self.numerator > 0
    }

    /// Returns the absolute value of the number.
    pub fn abs(&self) -> Self {
        Self {
            numerator: int(self.numerator.abs_ref()),
            denominator: self.denominator.clone(),
        }
    }

    /// Returns `1 / self`.
    pub fn recip(&self) -> Result<Self, RationalError> {
        Self::new(self.denominator.clone(), self.numerator.clone())
    }

    /// Divides `self` by `other`, returning [`RationalError::DivisionByZero`] if `other` is zero.
    pub fn checked_div(&self, other: &Self) -> Result<Self, RationalError> {
        if other.is_zero() {
            return Err(RationalError::DivisionByZero);
        }
        Ok(Self::reduced(
            int(&self.numerator * &other.denominator),
            int(&self.denominator * &other.numerator),
        ))
    }

    /// Returns the remainder of flooring division, which has the sign of `other`.
    pub fn checked_rem(&self, other: &Self) -> Result<Self, RationalError> {
        let quotient = Self::from_integer(self.checked_div(other)?.to_integer());
        Ok(self - &(other * &quotient))
    }

    /// Raises `self` to the given power.
    ///
    /// The result is exact only for integer exponents; any other exponent (or one that does not
    /// fit in a machine word) returns [`RationalError::Inexact`], as does a result too large to
    /// hold in memory. Raising zero to a negative power returns
    /// [`RationalError::DivisionByZero`].
    pub fn pow(&self, exponent: &Self) -> Result<Self, RationalError> {
        if !exponent.is_integer() {
            return Err(RationalError::Inexact);
        }
        let magnitude = int(exponent.numerator.abs_ref())
            .to_u32()
            .ok_or(RationalError::Inexact)?;

        let base = if exponent.is_negative() {
            self.recip()?
        } else {
            self.clone()
        };

        // `n^k` has at least `(bits(n) - 1) * k` bits
        let bits = base.numerator.significant_bits().max(base.denominator.significant_bits());
        if u64::from(bits.saturating_sub(1)) * u64::from(magnitude) > MAX_POW_BITS {
            return Err(RationalError::Inexact);
        }

        // powers of coprime integers stay coprime
        Ok(Self {
            numerator: base.numerator.pow(magnitude),
            denominator: base.denominator.pow(magnitude),
        })
    }

    /// Converts the number to the nearest [`f64`].
    pub fn to_f64(&self) -> f64 {
        rug::Rational::from((&self.numerator, &self.denominator)).to_f64()
    }

    /// Returns the largest integer less than or equal to the number.
    pub fn to_integer(&self) -> Integer {
        let (quotient, _) = self.numerator.clone().div_rem_floor(self.denominator.clone());
        quotient
    }
}

/// Maps every prime in the factorization of the numerator or denominator to its exponent in the
/// numerator minus its exponent in the denominator.
fn exponent_differences(value: &Rational) -> BTreeMap<Integer, i64> {
    let mut exponents = prime_factorization(value.numerator())
        .into_iter()
        .map(|(prime, exp)| (prime, i64::from(exp)))
        .collect::<BTreeMap<_, _>>();
    for (prime, exp) in prime_factorization(value.denominator()) {
        *exponents.entry(prime).or_insert(0) -= i64::from(exp);
    }
    exponents
}

/// Computes `log_base(argument)` exactly, if the result is rational.
///
/// Both numbers are factored into primes. The logarithm is rational exactly when, for every
/// prime, the ratio of its exponent in `argument` to its exponent in `base` is the same; that
/// ratio is the result. For example, `log_8(4) = 2/3`, since `4 = 2^2` and `8 = 2^3`.
///
/// Returns [`RationalError::Inexact`] if the logarithm is irrational, or if it is undefined
/// (a non-positive argument or base, or a base of `1`).
pub fn exact_log(argument: &Rational, base: &Rational) -> Result<Rational, RationalError> {
    if !argument.is_positive() || !base.is_positive() || base.is_one() {
        return Err(RationalError::Inexact);
    }
    if argument.is_one() {
        return Ok(Rational::zero());
    }

    let argument_exps = exponent_differences(argument);
    let base_exps = exponent_differences(base);
    let primes = argument_exps.keys().chain(base_exps.keys()).collect::<BTreeSet<_>>();

    let mut ratio: Option<Rational> = None;
    for prime in primes {
        let arg_exp = argument_exps.get(prime).copied().unwrap_or(0);
        let base_exp = base_exps.get(prime).copied().unwrap_or(0);
        if base_exp == 0 {
            if arg_exp != 0 {
                return Err(RationalError::Inexact);
            }
            continue;
        }

        let current = Rational::new(arg_exp, base_exp)?;
        match &ratio {
            Some(ratio) if *ratio != current => return Err(RationalError::Inexact),
            Some(_) => (),
            None => ratio = Some(current),
        }
    }

    ratio.ok_or(RationalError::Inexact)
}

impl Add<&Rational> for &Rational {
    type Output = Rational;

    fn add(self, rhs: &Rational) -> Rational {
        Rational::reduced(
            int(&self.numerator * &rhs.denominator) + int(&rhs.numerator * &self.denominator),
            int(&self.denominator * &rhs.denominator),
        )
    }
}

impl Sub<&Rational> for &Rational {
    type Output = Rational;

    fn sub(self, rhs: &Rational) -> Rational {
        Rational::reduced(
            int(&self.numerator * &rhs.denominator) - int(&rhs.numerator * &self.denominator),
            int(&self.denominator * &rhs.denominator),
        )
    }
}

impl Mul<&Rational> for &Rational {
    type Output = Rational;

    fn mul(self, rhs: &Rational) -> Rational {
        Rational::reduced(
            int(&self.numerator * &rhs.numerator),
            int(&self.denominator * &rhs.denominator),
        )
    }
}

/// Implements the owned forms of a binary operator in terms of the borrowed form.
macro_rules! forward_owned_binop {
    ($($trait:ident $method:ident),* $(,)?) => {
        $(
            impl $trait for Rational {
                type Output = Rational;

                fn $method(self, rhs: Rational) -> Rational {
                    (&self).$method(&rhs)
                }
            }

            impl $trait<&Rational> for Rational {
                type Output = Rational;

                fn $method(self, rhs: &Rational) -> Rational {
                    (&self).$method(rhs)
                }
            }
        )*
    };
}

forward_owned_binop!(Add add, Sub sub, Mul mul);

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational {
            numerator: int(-&self.numerator),
            denominator: self.denominator.clone(),
        }
    }
}

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational {
            numerator: -self.numerator,
            denominator: self.denominator,
        }
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        int(&self.numerator * &other.denominator).cmp(&int(&other.numerator * &self.denominator))
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<Integer> for Rational {
    fn from(n: Integer) -> Self {
        Self::from_integer(n)
    }
}

impl From<i32> for Rational {
    fn from(n: i32) -> Self {
        Self::from_integer(n)
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from_integer(n)
    }
}

impl From<u32> for Rational {
    fn from(n: u32) -> Self {
        Self::from_integer(n)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn rat(numerator: i64, denominator: i64) -> Rational {
        Rational::new(numerator, denominator).unwrap()
    }

    #[test]
    fn reduce_on_construction() {
        let r = rat(1000, 4000);
        assert_eq!(*r.numerator(), 1);
        assert_eq!(*r.denominator(), 4);
    }

    #[test]
    fn sign_lives_in_numerator() {
        let r = rat(6, -4);
        assert_eq!(*r.numerator(), -3);
        assert_eq!(*r.denominator(), 2);
        assert_eq!(rat(-2, -4), rat(1, 2));
        assert_eq!(rat(0, -7), Rational::zero());
    }

    #[test]
    fn zero_denominator() {
        assert_eq!(Rational::new(1, 0), Err(RationalError::DivisionByZero));
        assert_eq!(rat(1, 2).checked_div(&Rational::zero()), Err(RationalError::DivisionByZero));
        assert_eq!(Rational::zero().recip(), Err(RationalError::DivisionByZero));
    }

    #[test]
    fn arithmetic() {
        assert_eq!(rat(1, 2) + rat(1, 3), rat(5, 6));
        assert_eq!(rat(1, 2) - rat(3, 4), rat(-1, 4));
        assert_eq!(rat(2, 3) * rat(9, 4), rat(3, 2));
        assert_eq!(rat(2, 3).checked_div(&rat(4, 9)), Ok(rat(3, 2)));
        assert_eq!(-rat(2, 3), rat(-2, 3));
        assert_eq!(rat(-7, 3).abs(), rat(7, 3));
    }

    #[test]
    fn remainder_follows_divisor_sign() {
        assert_eq!(rat(7, 1).checked_rem(&rat(3, 1)), Ok(rat(1, 1)));
        assert_eq!(rat(-7, 1).checked_rem(&rat(3, 1)), Ok(rat(2, 1)));
        assert_eq!(rat(7, 2).checked_rem(&rat(1, 1)), Ok(rat(1, 2)));
    }

    #[test]
    fn floor_and_float() {
        assert_eq!(rat(7, 2).to_integer(), 3);
        assert_eq!(rat(-7, 2).to_integer(), -4);
        assert_eq!(rat(3, 4).to_f64(), 0.75);
    }

    #[test]
    fn ordering() {
        assert!(rat(1, 3) < rat(1, 2));
        assert!(rat(-1, 2) < rat(-1, 3));
        assert_eq!(rat(2, 4).cmp(&rat(1, 2)), Ordering::Equal);
    }

    #[test]
    fn integer_powers() {
        assert_eq!(rat(2, 3).pow(&rat(3, 1)), Ok(rat(8, 27)));
        assert_eq!(rat(2, 3).pow(&rat(-2, 1)), Ok(rat(9, 4)));
        assert_eq!(rat(-2, 1).pow(&rat(-1, 1)), Ok(rat(-1, 2)));
        assert_eq!(rat(5, 1).pow(&Rational::zero()), Ok(Rational::one()));
    }

    #[test]
    fn inexact_powers() {
        assert_eq!(rat(4, 1).pow(&rat(1, 2)), Err(RationalError::Inexact));
        assert_eq!(Rational::zero().pow(&rat(-1, 1)), Err(RationalError::DivisionByZero));
    }

    #[test]
    fn oversized_powers() {
        let googol = Rational::from_integer(int(10).pow(100u32));
        assert_eq!(googol.pow(&rat(4_000_000_000, 1)), Err(RationalError::Inexact));
        let tiny = googol.recip().unwrap();
        assert_eq!(tiny.pow(&rat(-4_000_000_000, 1)), Err(RationalError::Inexact));

        assert_eq!(rat(-1, 1).pow(&rat(4_000_000_001, 1)), Ok(rat(-1, 1)));
        let expected = Rational::from_integer(int(2).pow(1000u32));
        assert_eq!(rat(2, 1).pow(&rat(1000, 1)), Ok(expected));
    }

    #[test]
    fn decimal_literals() {
        assert_eq!(Rational::from_decimal_str("16"), Some(rat(16, 1)));
        assert_eq!(Rational::from_decimal_str("3.25"), Some(rat(13, 4)));
        assert_eq!(Rational::from_decimal_str("1_000.5"), Some(rat(2001, 2)));
        assert_eq!(Rational::from_decimal_str(".5"), Some(rat(1, 2)));
        assert_eq!(Rational::from_decimal_str("."), None);
        assert_eq!(Rational::from_decimal_str("x"), None);
    }

    #[test]
    fn display() {
        assert_eq!(rat(4, 2).to_string(), "2");
        assert_eq!(rat(-3, 6).to_string(), "-1/2");
    }

    #[test]
    fn exact_logarithms() {
        assert_eq!(exact_log(&rat(100, 1), &rat(10, 1)), Ok(rat(2, 1)));
        assert_eq!(exact_log(&rat(4, 1), &rat(8, 1)), Ok(rat(2, 3)));
        assert_eq!(exact_log(&rat(1, 8), &rat(2, 1)), Ok(rat(-3, 1)));
        assert_eq!(exact_log(&rat(9, 4), &rat(2, 3)), Ok(rat(-2, 1)));
        assert_eq!(exact_log(&rat(1, 1), &rat(7, 1)), Ok(Rational::zero()));
    }

    #[test]
    fn inexact_logarithms() {
        assert_eq!(exact_log(&rat(5, 1), &rat(2, 1)), Err(RationalError::Inexact));
        assert_eq!(exact_log(&rat(12, 1), &rat(2, 1)), Err(RationalError::Inexact));
        assert_eq!(exact_log(&rat(8, 1), &rat(1, 1)), Err(RationalError::Inexact));
        assert_eq!(exact_log(&rat(-8, 1), &rat(2, 1)), Err(RationalError::Inexact));
        assert_eq!(exact_log(&Rational::zero(), &rat(2, 1)), Err(RationalError::Inexact));
    }
}
