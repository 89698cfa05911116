use crate::poly::PolyRNS;
use crate::ring::{Ring, RingRNS};
use itertools::izip;

impl RingRNS<u64> {
    pub fn new(n: usize, moduli: Vec<u64>) -> Self {
        assert!(!moduli.is_empty(), "moduli cannot be empty");
        RingRNS(moduli.into_iter().map(|q| Ring::new(n, q)).collect())
    }

    pub fn ntt_inplace(&self, a: &mut PolyRNS<u64>) {
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.ntt_inplace(a.at_mut(i)));
    }

    pub fn intt_inplace(&self, a: &mut PolyRNS<u64>) {
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.intt_inplace(a.at_mut(i)));
    }
}

impl RingRNS<u64> {
    /// Assigns a + b to c.
    #[inline(always)]
    pub fn add(&self, a: &PolyRNS<u64>, b: &PolyRNS<u64>, c: &mut PolyRNS<u64>) {
        debug_assert!(a.level() >= self.level(), "a.level() = {} < self.level() = {}", a.level(), self.level());
        debug_assert!(b.level() >= self.level(), "b.level() = {} < self.level() = {}", b.level(), self.level());
        debug_assert!(c.level() >= self.level(), "c.level() = {} < self.level() = {}", c.level(), self.level());
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.add(a.at(i), b.at(i), c.at_mut(i)));
    }

    /// Assigns a + b to b.
    #[inline(always)]
    pub fn add_inplace(&self, a: &PolyRNS<u64>, b: &mut PolyRNS<u64>) {
        debug_assert!(a.level() >= self.level(), "a.level() = {} < self.level() = {}", a.level(), self.level());
        debug_assert!(b.level() >= self.level(), "b.level() = {} < self.level() = {}", b.level(), self.level());
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.add_inplace(a.at(i), b.at_mut(i)));
    }

    /// Assigns b - a to b.
    #[inline(always)]
    pub fn sub_inplace(&self, a: &PolyRNS<u64>, b: &mut PolyRNS<u64>) {
        debug_assert!(a.level() >= self.level(), "a.level() = {} < self.level() = {}", a.level(), self.level());
        debug_assert!(b.level() >= self.level(), "b.level() = {} < self.level() = {}", b.level(), self.level());
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.sub_inplace(a.at(i), b.at_mut(i)));
    }

    /// Assigns -a to a.
    #[inline(always)]
    pub fn neg_inplace(&self, a: &mut PolyRNS<u64>) {
        debug_assert!(a.level() >= self.level(), "a.level() = {} < self.level() = {}", a.level(), self.level());
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.neg_inplace(a.at_mut(i)));
    }

    /// Assigns a * b to c (evaluation representation).
    #[inline(always)]
    pub fn mul(&self, a: &PolyRNS<u64>, b: &PolyRNS<u64>, c: &mut PolyRNS<u64>) {
        debug_assert!(a.level() >= self.level(), "a.level() = {} < self.level() = {}", a.level(), self.level());
        debug_assert!(b.level() >= self.level(), "b.level() = {} < self.level() = {}", b.level(), self.level());
        debug_assert!(c.level() >= self.level(), "c.level() = {} < self.level() = {}", c.level(), self.level());
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.mul(a.at(i), b.at(i), c.at_mut(i)));
    }

    /// Assigns a * b + c to c (evaluation representation).
    #[inline(always)]
    pub fn mul_add_inplace(&self, a: &PolyRNS<u64>, b: &PolyRNS<u64>, c: &mut PolyRNS<u64>) {
        debug_assert!(a.level() >= self.level(), "a.level() = {} < self.level() = {}", a.level(), self.level());
        debug_assert!(b.level() >= self.level(), "b.level() = {} < self.level() = {}", b.level(), self.level());
        debug_assert!(c.level() >= self.level(), "c.level() = {} < self.level() = {}", c.level(), self.level());
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.mul_add_inplace(a.at(i), b.at(i), c.at_mut(i)));
    }

    /// Assigns a * b to c.
    #[inline(always)]
    pub fn mul_scalar(&self, a: &PolyRNS<u64>, b: &u64, c: &mut PolyRNS<u64>) {
        debug_assert!(a.level() >= self.level(), "a.level() = {} < self.level() = {}", a.level(), self.level());
        debug_assert!(c.level() >= self.level(), "c.level() = {} < self.level() = {}", c.level(), self.level());
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.mul_scalar(a.at(i), b, c.at_mut(i)));
    }
}

impl RingRNS<u64> {
    /// CRT-composes each coefficient of a (coefficient representation)
    /// into one integer in [0, prod(q_i)). Supports chains of at most two
    /// primes, whose product must fit 127 bits.
    pub fn compose_inplace(&self, a: &PolyRNS<u64>, coeffs: &mut [u128]) {
        let k: usize = self.0.len();
        assert!(
            k <= 2,
            "invalid modulus chain: compose supports at most two primes, got {}",
            k
        );
        assert!(
            coeffs.len() == self.n(),
            "invalid coeffs: coeffs.len() = {} != n = {}",
            coeffs.len(),
            self.n()
        );
        assert!(
            a.level() + 1 == k,
            "invalid a: a.level() = {} != chain length - 1 = {}",
            a.level(),
            k - 1
        );

        if k == 1 {
            izip!(coeffs.iter_mut(), &a.at(0).0).for_each(|(c, &r0)| *c = r0 as u128);
            return;
        }

        let q0: u64 = self.0[0].modulus.q;
        let p1 = &self.0[1].modulus;
        let q0_inv: u64 = p1.inv(q0 % p1.q);

        izip!(coeffs.iter_mut(), &a.at(0).0, &a.at(1).0).for_each(|(c, &r0, &r1)| {
            let diff: u64 = (r1 + p1.q - r0 % p1.q) % p1.q;
            let t: u64 = p1.mul_mod(diff, q0_inv);
            *c = r0 as u128 + q0 as u128 * t as u128;
        });
    }

    /// Splits integers in [0, prod(q_i)) back into residues per modulus
    /// (coefficient representation).
    pub fn decompose_inplace(&self, coeffs: &[u128], a: &mut PolyRNS<u64>) {
        assert!(
            coeffs.len() == self.n(),
            "invalid coeffs: coeffs.len() = {} != n = {}",
            coeffs.len(),
            self.n()
        );
        assert!(
            a.level() >= self.level(),
            "a.level() = {} < self.level() = {}",
            a.level(),
            self.level()
        );
        self.0.iter().enumerate().for_each(|(i, ring)| {
            let q: u128 = ring.modulus.q as u128;
            izip!(coeffs, &mut a.at_mut(i).0).for_each(|(c, r)| *r = (c % q) as u64);
        });
    }
}
