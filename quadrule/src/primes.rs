//! Prime numbers for the Weyl and Haber multipliers.

/// The default multiplier table uses the primes below this bound, which
/// gives 1000 dimensions.
pub const DEFAULT_PRIME_BOUND: usize = 7920;

/// Returns all primes strictly below `limit`.
pub fn primes_below(limit: usize) -> Vec<usize> {
    if limit < 3 {
        return Vec::new();
    }
    let mut is_prime = vec![true; limit];
    is_prime[0] = false;
    is_prime[1] = false;
    let mut p = 2;
    while p * p < limit {
        if is_prime[p] {
            for multiple in (p * p..limit).step_by(p) {
                is_prime[multiple] = false;
            }
        }
        p += 1;
    }
    is_prime
        .iter()
        .enumerate()
        .filter_map(|(k, &prime)| prime.then_some(k))
        .collect()
}

/// Returns the first `count` primes, sieving past the default bound when
/// more are needed.
pub fn first_primes(count: usize) -> Vec<usize> {
    let mut limit = DEFAULT_PRIME_BOUND;
    loop {
        let mut primes = primes_below(limit);
        if primes.len() >= count {
            primes.truncate(count);
            return primes;
        }
        limit *= 2;
    }
}

/// Square roots of the first `dim` primes.
pub fn sqrt_prime_multipliers(dim: usize) -> Vec<f64> {
    first_primes(dim)
        .into_iter()
        .map(|p| (p as f64).sqrt())
        .collect()
}
