use crate::modulus::barrett::BarrettPrecomp;
use primality_test::is_prime;
use prime_factorization::Factorization;

/// Prime modulus with its reduction precomputations and the distinct
/// prime factors of q-1 (used to locate primitive roots).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prime<O> {
    pub q: O,
    pub two_q: O,
    pub four_q: O,
    /// distinct factors of q-1
    pub factors: Vec<O>,
    pub barrett: BarrettPrecomp<O>,
    pub phi: O,
}

impl Prime<u64> {
    /// Returns a new instance of Prime<u64>.
    /// Panics if q is not a prime > 2.
    pub fn new(q: u64) -> Self {
        assert!(is_prime(q) && q > 2, "invalid modulus: q = {} is not an odd prime", q);
        Self::new_unchecked(q)
    }

    /// Returns a new instance of Prime<u64>.
    /// Does not check that q is a prime > 2.
    pub fn new_unchecked(q: u64) -> Self {
        let factors: Vec<u64> = Factorization::run(q - 1)
            .prime_factor_repr()
            .iter()
            .map(|factor| factor.0)
            .collect();
        Self {
            q,
            two_q: q << 1,
            four_q: q << 2,
            factors,
            barrett: BarrettPrecomp::new(q),
            phi: q - 1,
        }
    }

    pub fn q(&self) -> u64 {
        self.q
    }

    /// Returns a * b mod q.
    #[inline(always)]
    pub fn mul_mod(&self, a: u64, b: u64) -> u64 {
        ((a as u128 * b as u128) % self.q as u128) as u64
    }

    /// Returns x^exponent mod q.
    pub fn pow(&self, x: u64, exponent: u64) -> u64 {
        let mut y: u64 = 1;
        let mut x: u64 = x % self.q;
        let mut i: u64 = exponent;
        while i > 0 {
            if i & 1 == 1 {
                y = self.mul_mod(y, x);
            }
            x = self.mul_mod(x, x);
            i >>= 1;
        }
        y
    }

    /// Returns x^-1 mod q.
    /// User must ensure that x is not divisible by q.
    pub fn inv(&self, x: u64) -> u64 {
        self.pow(x, self.phi - 1)
    }

    /// Returns the smallest primitive root of q.
    pub fn primitive_root(&self) -> u64 {
        let mut candidate: u64 = 1;
        loop {
            candidate += 1;
            assert!(
                candidate < self.q,
                "failed to find a primitive root for q = {}",
                self.q
            );
            if self
                .factors
                .iter()
                .all(|&factor| self.pow(candidate, self.phi / factor) != 1)
            {
                return candidate;
            }
        }
    }

    /// Returns an nth primitive root of unity mod q.
    /// Panics if q != 1 mod nth_root.
    pub fn primitive_nth_root(&self, nth_root: u64) -> u64 {
        assert!(
            nth_root.is_power_of_two(),
            "invalid argument: nth_root = {} is not a power of two",
            nth_root
        );
        assert!(
            self.q % nth_root == 1,
            "invalid prime: q = {} != 1 mod nth_root = {}",
            self.q,
            nth_root
        );
        let psi: u64 = self.pow(self.primitive_root(), self.phi / nth_root);
        assert!(
            self.pow(psi, nth_root) == 1,
            "invalid nth primitive root: psi^nth_root != 1 mod q"
        );
        assert!(
            self.pow(psi, nth_root >> 1) == self.q - 1,
            "invalid nth primitive root: psi^(nth_root/2) != -1 mod q"
        );
        psi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pow_inv() {
        let prime: Prime<u64> = Prime::new(65537);
        assert_eq!(prime.pow(3, 4), 81);
        let x: u64 = 12345;
        assert_eq!(prime.mul_mod(x, prime.inv(x)), 1);
    }

    #[test]
    fn test_primitive_nth_root() {
        let prime: Prime<u64> = Prime::new(65537);
        let psi: u64 = prime.primitive_nth_root(64);
        assert_eq!(prime.pow(psi, 64), 1);
        assert_eq!(prime.pow(psi, 32), prime.q - 1);
    }
}
