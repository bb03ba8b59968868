/// Returns `true` if `n` is prime.
///
/// Trial division by odd numbers up to `sqrt(n)`. Table sizes stay small
/// enough that this never shows up next to the rehash it precedes.
pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }

    let mut divisor = 3usize;
    while divisor <= n / divisor {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

/// Returns the smallest prime greater than or equal to `n`, or `None` if
/// there is no such prime below `usize::MAX`.
///
/// # Examples
///
/// ```rust
/// # use prime_probe::prime::next_prime;
/// #
/// assert_eq!(next_prime(53), Some(53));
/// assert_eq!(next_prime(106), Some(107));
/// assert_eq!(next_prime(0), Some(2));
/// assert_eq!(next_prime(usize::MAX), None);
/// ```
pub fn next_prime(n: usize) -> Option<usize> {
    let mut candidate = n.max(2);
    while !is_prime(candidate) {
        candidate = candidate.checked_add(1)?;
    }
    Some(candidate)
}
