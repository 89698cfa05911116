use crate::modulus::prime::Prime;
use primality_test::is_prime;

/// Generates NTT-friendly primes (q = 1 mod nth_root) downstream of a
/// requested bit size.
pub struct NTTFriendlyPrimesGenerator {
    size: f64,
    prev_prime: u64,
    nth_root: u64,
}

impl NTTFriendlyPrimesGenerator {
    pub fn new(bit_size: u64, nth_root: u64) -> Self {
        assert!(
            nth_root.is_power_of_two(),
            "invalid argument: nth_root = {} is not a power of two",
            nth_root
        );
        assert!(
            bit_size >= 3 && bit_size <= 61,
            "invalid argument: bit_size = {} out of [3, 61]",
            bit_size
        );
        let first: u64 = (1u64 << bit_size) + 1;
        Self {
            size: bit_size as f64,
            prev_prime: first,
            nth_root,
        }
    }

    pub fn next_downstream_primes(&mut self, k: usize) -> Vec<Prime<u64>> {
        (0..k).map(|_| self.next_downstream_prime()).collect()
    }

    /// Returns the next prime = 1 mod nth_root below the previously
    /// returned one. Panics when the candidates leave the bit size.
    pub fn next_downstream_prime(&mut self) -> Prime<u64> {
        loop {
            if self.prev_prime < self.nth_root
                || self.size - (self.prev_prime as f64).log2() >= 0.5
            {
                panic!(
                    "prime list for downstream primes of bit-size {} is exhausted",
                    self.size
                );
            }
            self.prev_prime -= self.nth_root;
            if is_prime(self.prev_prime) {
                return Prime::new_unchecked(self.prev_prime);
            }
        }
    }
}
