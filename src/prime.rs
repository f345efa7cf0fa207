//! Primality helpers used to size the bucket array

/// Outcome of a primality test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primality {
    /// The number has no divisors other than one and itself
    Prime,
    /// The number has a divisor in `2..=sqrt(x)`
    NotPrime,
    /// Primality is not defined for numbers below two
    Undefined,
}

/// Tests `x` for primality by trial division.
///
/// Only odd divisors up to and including the integer square root are tried, and the
/// bound is checked as `i * i <= x` so perfect squares such as 9 or 25 are rejected.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn is_prime(x: usize) -> Primality {
    if x < 2 {
        return Primality::Undefined;
    }
    if x == 2 {
        return Primality::Prime;
    }
    if x % 2 == 0 {
        return Primality::NotPrime;
    }

    let mut divisor: usize = 3;
    while divisor.checked_mul(divisor).is_some_and(|square| square <= x) {
        if x % divisor == 0 {
            return Primality::NotPrime;
        }
        divisor += 2;
    }
    Primality::Prime
}

/// Returns the smallest prime greater than or equal to `x`.
///
/// Returns `None` when no prime at or above `x` fits in a `usize`.
#[must_use]
pub fn next_prime(x: usize) -> Option<usize> {
    (x.max(2)..=usize::MAX).find(|&candidate| is_prime(candidate) == Primality::Prime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_below_two() {
        assert_eq!(is_prime(0), Primality::Undefined);
        assert_eq!(is_prime(1), Primality::Undefined);
    }

    #[test]
    fn test_small_numbers() {
        assert_eq!(is_prime(2), Primality::Prime);
        assert_eq!(is_prime(3), Primality::Prime);
        assert_eq!(is_prime(4), Primality::NotPrime);
        assert_eq!(is_prime(50), Primality::NotPrime);
        assert_eq!(is_prime(53), Primality::Prime);
        assert_eq!(is_prime(101), Primality::Prime);
    }

    #[test]
    fn test_perfect_squares_are_not_prime() {
        for root in [3_usize, 5, 7, 11, 13, 97] {
            assert_eq!(is_prime(root * root), Primality::NotPrime, "{} squared", root);
        }
    }

    #[test]
    fn test_agrees_with_naive_check() {
        let naive = |x: usize| (2..x).all(|d| x % d != 0);
        for x in 2..2_000 {
            let expected = if naive(x) { Primality::Prime } else { Primality::NotPrime };
            assert_eq!(is_prime(x), expected, "x = {}", x);
        }
    }

    #[test]
    fn test_next_prime() {
        assert_eq!(next_prime(0), Some(2));
        assert_eq!(next_prime(2), Some(2));
        assert_eq!(next_prime(25), Some(29));
        assert_eq!(next_prime(50), Some(53));
        assert_eq!(next_prime(53), Some(53));
        assert_eq!(next_prime(100), Some(101));
        assert_eq!(next_prime(200), Some(211));
    }
}
