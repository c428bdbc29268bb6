//! Primality check behind `GET /prime/{number}`.
//!
//! Values that fit in `u64` use deterministic Miller–Rabin. Larger values are
//! handled with `BigUint`: trial division by small primes, then Miller–Rabin
//! over a fixed witness set (a strong probable-prime test).

use std::fmt;

use num_bigint::BigUint;
use thiserror::Error;

/// Witnesses that make Miller–Rabin exact for every `u64`.
const U64_WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Witnesses for values above `u64::MAX`.
const BIG_WITNESSES: [u32; 20] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71,
];

const SMALL_PRIMES: [u32; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97,
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrimeError {
    #[error("Number has {digits} digits, at most {max} are supported")]
    TooManyDigits { digits: usize, max: usize },
}

/// Outcome of checking a raw path segment.
///
/// Non-numeric input is an ordinary result, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimeCheck {
    Prime(BigUint),
    NotPrime(BigUint),
    NotANumber(String),
}

impl PrimeCheck {
    /// Accepts ASCII decimal digits only: no sign, no whitespace.
    ///
    /// # Errors
    ///
    /// [`PrimeError::TooManyDigits`] when the value, without leading zeros,
    /// is longer than `max_digits`.
    pub fn evaluate(input: &str, max_digits: usize) -> Result<Self, PrimeError> {
        if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(Self::NotANumber(input.to_string()));
        }

        let digits = input.trim_start_matches('0').len();
        if digits > max_digits {
            return Err(PrimeError::TooManyDigits {
                digits,
                max: max_digits,
            });
        }

        if let Ok(n) = input.parse::<u64>() {
            let value = BigUint::from(n);
            return Ok(if is_prime(n) {
                Self::Prime(value)
            } else {
                Self::NotPrime(value)
            });
        }

        let Ok(n) = input.parse::<BigUint>() else {
            return Ok(Self::NotANumber(input.to_string()));
        };

        Ok(if is_probable_prime_big(&n) {
            Self::Prime(n)
        } else {
            Self::NotPrime(n)
        })
    }
}

impl fmt::Display for PrimeCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prime(n) => write!(f, "Number {n} is a prime!"),
            Self::NotPrime(n) => write!(f, "Number {n} is not a prime!"),
            Self::NotANumber(raw) => write!(f, "String {raw} is not a valid number!"),
        }
    }
}

/// Deterministic Miller–Rabin for `u64`.
#[must_use]
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }

    for p in U64_WITNESSES {
        if n % p == 0 {
            return n == p;
        }
    }

    let s = (n - 1).trailing_zeros();
    let d = (n - 1) >> s;

    U64_WITNESSES
        .iter()
        .all(|&a| passes_round_u64(a, d, s, n))
}

fn passes_round_u64(a: u64, d: u64, s: u32, n: u64) -> bool {
    let mut x = pow_mod(a, d, n);
    if x == 1 || x == n - 1 {
        return true;
    }

    for _ in 1..s {
        x = mul_mod(x, x, n);
        if x == n - 1 {
            return true;
        }
    }
    false
}

#[allow(clippy::cast_possible_truncation)]
fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    // result < m, so the narrowing is lossless
    ((u128::from(a) * u128::from(b)) % u128::from(m)) as u64
}

fn pow_mod(mut base: u64, mut exp: u64, m: u64) -> u64 {
    let mut result = 1;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, m);
        }
        base = mul_mod(base, base, m);
        exp >>= 1;
    }
    result
}

/// Strong probable-prime test for values above `u64::MAX`.
fn is_probable_prime_big(n: &BigUint) -> bool {
    let zero = BigUint::from(0u32);
    let one = BigUint::from(1u32);
    let two = BigUint::from(2u32);

    if *n < two {
        return false;
    }

    for p in SMALL_PRIMES {
        let p = BigUint::from(p);
        if n % &p == zero {
            return *n == p;
        }
    }

    let n_minus_one = n - &one;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    'witness: for a in BIG_WITNESSES {
        let mut x = BigUint::from(a).modpow(&d, n);
        if x == one || x == n_minus_one {
            continue;
        }

        for _ in 1..s {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX_DIGITS: usize = 1000;

    fn message(input: &str) -> String {
        PrimeCheck::evaluate(input, MAX_DIGITS).unwrap().to_string()
    }

    #[test]
    fn test_is_prime() {
        assert!(!is_prime(0));
        assert!(!is_prime(1));
        assert!(is_prime(2));
        assert!(is_prime(3));
        assert!(!is_prime(4));
        assert!(is_prime(17));
        assert!(!is_prime(25));
        assert!(!is_prime(49));
        assert!(!is_prime(100));
        assert!(is_prime(7919));
        assert!(!is_prime(7917));
        assert!(is_prime(1_000_000_007));
        assert!(!is_prime(1_000_000_007 * 3));
        // Strong pseudoprime to bases 2, 3, 5 and 7
        assert!(!is_prime(3_215_031_751));
    }

    #[test]
    fn test_is_prime_at_u64_boundary() {
        assert!(is_prime(18_446_744_073_709_551_557));
        assert!(!is_prime(u64::MAX));
        assert!(!is_prime(18_446_744_073_709_551_559));
    }

    #[test]
    fn test_is_prime_matches_naive() {
        for n in 0..5000u64 {
            let naive = n >= 2 && (2..n).all(|d| n % d != 0);
            assert_eq!(is_prime(n), naive, "mismatch for {n}");
        }
    }

    #[test]
    fn test_big_values() {
        // 2^89 - 1 and 2^127 - 1 are Mersenne primes
        let m89 = (BigUint::from(1u32) << 89u32) - 1u32;
        let m127 = (BigUint::from(1u32) << 127u32) - 1u32;
        assert!(is_probable_prime_big(&m89));
        assert!(is_probable_prime_big(&m127));
        // Product of two primes above 2^32, no small factors
        let semiprime = BigUint::from(4_294_967_311u64) * BigUint::from(4_294_967_357u64);
        assert!(!is_probable_prime_big(&semiprime));
        assert!(!is_probable_prime_big(&(&m89 * &m127)));
    }

    #[test]
    fn test_evaluate_messages() {
        assert_eq!(message("17"), "Number 17 is a prime!");
        assert_eq!(message("100"), "Number 100 is not a prime!");
        assert_eq!(message("1"), "Number 1 is not a prime!");
        assert_eq!(message("abc"), "String abc is not a valid number!");
    }

    #[test]
    fn test_evaluate_beyond_u64() {
        assert_eq!(
            message("99999999999999999999999"),
            "Number 99999999999999999999999 is not a prime!"
        );
        assert_eq!(
            message("170141183460469231731687303715884105727"),
            "Number 170141183460469231731687303715884105727 is a prime!"
        );
    }

    #[test]
    fn test_evaluate_edge_inputs() {
        assert_eq!(
            PrimeCheck::evaluate("007", MAX_DIGITS),
            Ok(PrimeCheck::Prime(BigUint::from(7u32)))
        );
        assert_eq!(message("000"), "Number 0 is not a prime!");
        assert_eq!(
            PrimeCheck::evaluate("", MAX_DIGITS),
            Ok(PrimeCheck::NotANumber(String::new()))
        );
        for raw in ["-7", "+7", " 7", "7.0", "1e3"] {
            assert_eq!(
                PrimeCheck::evaluate(raw, MAX_DIGITS),
                Ok(PrimeCheck::NotANumber(raw.to_string()))
            );
        }
    }

    #[test]
    fn test_evaluate_digit_limit() {
        assert_eq!(
            PrimeCheck::evaluate("123456", 5),
            Err(PrimeError::TooManyDigits { digits: 6, max: 5 })
        );
        // Leading zeros do not count
        assert!(PrimeCheck::evaluate("0000012345", 5).is_ok());
        // Non-numeric input is never rejected for length
        assert!(PrimeCheck::evaluate(&"x".repeat(50), 5).is_ok());
    }
}
