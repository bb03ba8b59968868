use core::iter::FusedIterator;

/// Coefficient of the hash that picks the first slot.
pub const HASH_A: u64 = 151;

/// Coefficient of the hash that picks the probe step.
pub const HASH_B: u64 = 163;

/// Polynomial string hash over the bytes of `key`.
///
/// Computes `hash = (hash * coefficient + byte) mod modulus` for each byte in
/// order, starting from zero. The result is always below `modulus`.
///
/// # Panics
///
/// Panics if `modulus` is zero.
///
/// # Examples
///
/// ```rust
/// # use prime_probe::probe::hash;
/// #
/// assert_eq!(hash("", 151, 53), 0);
/// assert_eq!(hash("a", 151, 53), 97 % 53);
/// assert_eq!(hash("ab", 151, 53), (97 * 151 + 98) % 53);
/// ```
pub fn hash(key: &str, coefficient: u64, modulus: usize) -> usize {
    assert!(modulus != 0, "hash modulus must be non-zero");

    // `hash < modulus`, so the step stays in u64 while this bound holds.
    let fits_u64 = (modulus as u64)
        .checked_mul(coefficient)
        .and_then(|bound| bound.checked_add(u8::MAX as u64 + 1))
        .is_some();
    if !fits_u64 {
        return hash_wide(key, coefficient, modulus);
    }

    let modulus = modulus as u64;
    key.bytes()
        .fold(0u64, |hash, byte| (hash * coefficient + byte as u64) % modulus) as usize
}

#[cold]
fn hash_wide(key: &str, coefficient: u64, modulus: usize) -> usize {
    let modulus = modulus as u128;
    let coefficient = coefficient as u128;
    key.bytes().fold(0u128, |hash, byte| {
        (hash * coefficient + byte as u128) % modulus
    }) as usize
}

#[inline(always)]
fn step_size(hash_b: usize, num_buckets: usize) -> usize {
    let step = (hash_b + 1) % num_buckets;
    // `hash_b + 1 == num_buckets` would pin every attempt to the first slot.
    if step == 0 { 1 } else { step }
}

/// Returns the slot probed by `attempt` for `key` in a table of
/// `num_buckets` slots.
///
/// `index = (hash_a + attempt * (hash_b + 1)) mod num_buckets`, where
/// `hash_a` and `hash_b` are [`hash`] with [`HASH_A`] and [`HASH_B`]. A step
/// that is a multiple of `num_buckets` is replaced by a step of one.
///
/// # Panics
///
/// Panics if `num_buckets` is zero.
pub fn probe(key: &str, num_buckets: usize, attempt: usize) -> usize {
    let start = hash(key, HASH_A, num_buckets);
    let step = step_size(hash(key, HASH_B, num_buckets), num_buckets);
    ((start as u128 + attempt as u128 * step as u128) % num_buckets as u128) as usize
}

/// The probe sequence of a key, as an iterator over slot indices.
///
/// Yields the same indices as [`probe`] for attempts `0, 1, 2, ...`, but
/// hashes the key only once. The sequence stops after `num_buckets` attempts:
/// with a prime `num_buckets` that is exactly one visit to every slot.
#[derive(Debug, Clone)]
pub struct ProbeSeq {
    index: usize,
    step: usize,
    num_buckets: usize,
    remaining: usize,
}

impl ProbeSeq {
    /// Starts the probe sequence of `key` over `num_buckets` slots.
    ///
    /// An empty table yields an empty sequence.
    pub fn new(key: &str, num_buckets: usize) -> Self {
        if num_buckets == 0 {
            return Self {
                index: 0,
                step: 0,
                num_buckets: 0,
                remaining: 0,
            };
        }

        Self {
            index: hash(key, HASH_A, num_buckets),
            step: step_size(hash(key, HASH_B, num_buckets), num_buckets),
            num_buckets,
            remaining: num_buckets,
        }
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let index = self.index;
        // Both terms are below `num_buckets`, so one subtraction wraps.
        let next = self.index + self.step;
        self.index = if next >= self.num_buckets {
            next - self.num_buckets
        } else {
            next
        };
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ProbeSeq {}

impl FusedIterator for ProbeSeq {}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::prime::next_prime;

    #[test]
    fn hash_matches_reference_fold() {
        let key = "occupation";
        let mut expected = 0u64;
        for b in key.bytes() {
            expected = (expected * 151 + b as u64) % 53;
        }
        assert_eq!(hash(key, HASH_A, 53), expected as usize);
    }

    #[test]
    fn hash_is_below_modulus() {
        for key in ["", "a", "name", "a much longer key with spaces", "ключ"] {
            for m in [1usize, 2, 53, 107, 7919] {
                assert!(hash(key, HASH_A, m) < m);
                assert!(hash(key, HASH_B, m) < m);
            }
        }
    }

    #[test]
    fn hash_uses_unsigned_bytes() {
        // 'é' is 0xC3 0xA9 in UTF-8; both bytes are above 127.
        let expected = (0xC3 * 151 + 0xA9) % 1009;
        assert_eq!(hash("é", 151, 1009), expected);
    }

    fn wide_fold(key: &str, coefficient: u64, modulus: usize) -> usize {
        let mut expected = 0u128;
        for b in key.bytes() {
            expected = (expected * coefficient as u128 + b as u128) % modulus as u128;
        }
        expected as usize
    }

    #[test]
    fn narrow_and_wide_hashes_agree() {
        for key in ["", "name", "a much longer key with spaces", "ключ"] {
            for m in [1usize, 53, 7919, 1 << 20] {
                assert_eq!(hash(key, HASH_A, m), hash_wide(key, HASH_A, m));
                assert_eq!(hash(key, HASH_B, m), hash_wide(key, HASH_B, m));
            }
        }
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn hash_handles_moduli_near_u64_max() {
        for m in [1usize << 56, 1 << 60, usize::MAX - 58] {
            for key in ["name", "a much longer key with spaces"] {
                assert_eq!(hash(key, HASH_A, m), wide_fold(key, HASH_A, m));
                assert_eq!(hash(key, HASH_B, m), wide_fold(key, HASH_B, m));
            }
        }
    }

    #[test]
    #[should_panic]
    fn hash_rejects_zero_modulus() {
        hash("key", HASH_A, 0);
    }

    #[test]
    fn sequence_matches_probe() {
        for key in ["name", "age", "key17", ""] {
            let n = 53;
            let seq: Vec<usize> = ProbeSeq::new(key, n).collect();
            let direct: Vec<usize> = (0..n).map(|attempt| probe(key, n, attempt)).collect();
            assert_eq!(seq, direct, "{}", key);
        }
    }

    #[test]
    fn sequence_visits_every_slot_once() {
        for n in [2usize, 3, 53, 107, next_prime(1000).unwrap()] {
            for key in ["name", "age", "country", "key0", "key19"] {
                let mut seen = vec![false; n];
                for index in ProbeSeq::new(key, n) {
                    assert!(!seen[index], "{} revisited {} in {}", key, index, n);
                    seen[index] = true;
                }
                assert!(seen.iter().all(|&s| s), "{} missed slots in {}", key, n);
            }
        }
    }

    #[test]
    fn zero_step_is_forced_to_one() {
        // Find a key whose second hash is `n - 1`, so the raw step is `n`.
        let n = 53;
        let key = (0..10_000)
            .map(|i| alloc::format!("k{}", i))
            .find(|k| hash(k, HASH_B, n) == n - 1)
            .expect("some key lands on the last residue");

        let start = hash(&key, HASH_A, n);
        assert_eq!(probe(&key, n, 0), start);
        assert_eq!(probe(&key, n, 1), (start + 1) % n);
        assert_eq!(ProbeSeq::new(&key, n).collect::<Vec<_>>().len(), n);
    }

    #[test]
    fn empty_table_has_empty_sequence() {
        assert_eq!(ProbeSeq::new("key", 0).count(), 0);
    }

    #[test]
    fn single_slot_sequence() {
        assert_eq!(ProbeSeq::new("key", 1).collect::<Vec<_>>(), [0]);
    }
}
