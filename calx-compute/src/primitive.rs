//! Functions to construct and factor [`Integer`]s.

use rug::Integer;
use std::collections::BTreeMap;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Returns the prime factorization of the given positive integer, as a map from each prime to its
/// exponent. `1` (and anything less) has an empty factorization.
///
/// This is trial division up to the square root of `n`, so it is slow for integers with large
/// prime factors.
pub fn prime_factorization(n: &Integer) -> BTreeMap<Integer, u32> {
    let mut factors = BTreeMap::new();
    if *n <= 1 {
        return factors;
    }

    let mut n = n.clone();
    let mut i = int(2);
    while int(i.square_ref()) <= n {
        while n.is_divisible(&i) {
            *factors.entry(i.clone()).or_insert(0) += 1;
            n.div_exact_mut(&i);
        }
        i += 1;
    }

    // whatever remains has no factor below its square root
    if n > 1 {
        *factors.entry(n).or_insert(0) += 1;
    }

    factors
}

/// Returns the greatest common divisor of the absolute values of the given integers, or `0` if
/// there are none.
pub fn gcd<'a>(values: impl IntoIterator<Item = &'a Integer>) -> Integer {
    values.into_iter().fold(int(0), |acc, value| acc.gcd(value))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn factor_composite() {
        let factors = prime_factorization(&int(360));
        assert_eq!(factors, BTreeMap::from([(int(2), 3), (int(3), 2), (int(5), 1)]));
    }

    #[test]
    fn factor_prime() {
        let factors = prime_factorization(&int(97));
        assert_eq!(factors, BTreeMap::from([(int(97), 1)]));
    }

    #[test]
    fn factor_one() {
        assert!(prime_factorization(&int(1)).is_empty());
    }

    #[test]
    fn gcd_of_many() {
        assert_eq!(gcd(&[int(12), int(-18), int(30)]), 6);
        assert_eq!(gcd(std::iter::empty()), 0);
    }
}
