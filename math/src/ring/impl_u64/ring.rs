use crate::dft::DFT;
use crate::dft::ntt::Table;
use crate::modulus::ReduceOnce;
use crate::modulus::barrett::Barrett;
use crate::modulus::prime::Prime;
use crate::poly::Poly;
use crate::ring::Ring;
use itertools::izip;

impl Ring<u64> {
    pub fn new(n: usize, q: u64) -> Self {
        assert!(
            n.is_power_of_two(),
            "invalid argument: n = {} is not a power of two",
            n
        );
        let prime: Prime<u64> = Prime::new(q);
        Self {
            n,
            modulus: prime.clone(),
            dft: Box::new(Table::<u64>::new(prime, (2 * n) as u64)),
        }
    }
}

impl Ring<u64> {
    pub fn ntt_inplace(&self, a: &mut Poly<u64>) {
        self.dft.forward_inplace(&mut a.0)
    }

    pub fn intt_inplace(&self, a: &mut Poly<u64>) {
        self.dft.backward_inplace(&mut a.0)
    }
}

impl Ring<u64> {
    /// Assigns a + b to c.
    #[inline(always)]
    pub fn add(&self, a: &Poly<u64>, b: &Poly<u64>, c: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n() = {} != n = {}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n() = {} != n = {}", b.n(), self.n());
        debug_assert!(c.n() == self.n(), "c.n() = {} != n = {}", c.n(), self.n());
        let q: u64 = self.modulus.q;
        izip!(&a.0, &b.0, &mut c.0).for_each(|(a, b, c)| *c = (a + b).reduce_once(q));
    }

    /// Assigns a + b to b.
    #[inline(always)]
    pub fn add_inplace(&self, a: &Poly<u64>, b: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n() = {} != n = {}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n() = {} != n = {}", b.n(), self.n());
        let q: u64 = self.modulus.q;
        izip!(&a.0, &mut b.0).for_each(|(a, b)| *b = (*a + *b).reduce_once(q));
    }

    /// Assigns b - a to b.
    #[inline(always)]
    pub fn sub_inplace(&self, a: &Poly<u64>, b: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n() = {} != n = {}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n() = {} != n = {}", b.n(), self.n());
        let q: u64 = self.modulus.q;
        izip!(&a.0, &mut b.0).for_each(|(a, b)| *b = (*b + q - *a).reduce_once(q));
    }

    /// Assigns -a to a.
    #[inline(always)]
    pub fn neg_inplace(&self, a: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n() = {} != n = {}", a.n(), self.n());
        let q: u64 = self.modulus.q;
        a.0.iter_mut().for_each(|a| *a = (q - *a).reduce_once(q));
    }

    /// Assigns a * b to c (evaluation representation).
    #[inline(always)]
    pub fn mul(&self, a: &Poly<u64>, b: &Poly<u64>, c: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n() = {} != n = {}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n() = {} != n = {}", b.n(), self.n());
        debug_assert!(c.n() == self.n(), "c.n() = {} != n = {}", c.n(), self.n());
        izip!(&a.0, &b.0, &mut c.0).for_each(|(a, b, c)| *c = self.modulus.mul_mod(*a, *b));
    }

    /// Assigns a * b + c to c (evaluation representation).
    #[inline(always)]
    pub fn mul_add_inplace(&self, a: &Poly<u64>, b: &Poly<u64>, c: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n() = {} != n = {}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n() = {} != n = {}", b.n(), self.n());
        debug_assert!(c.n() == self.n(), "c.n() = {} != n = {}", c.n(), self.n());
        let q: u64 = self.modulus.q;
        izip!(&a.0, &b.0, &mut c.0)
            .for_each(|(a, b, c)| *c = (*c + self.modulus.mul_mod(*a, *b)).reduce_once(q));
    }

    /// Assigns a * b to c.
    #[inline(always)]
    pub fn mul_scalar(&self, a: &Poly<u64>, b: &u64, c: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n() = {} != n = {}", a.n(), self.n());
        debug_assert!(c.n() == self.n(), "c.n() = {} != n = {}", c.n(), self.n());
        let b: Barrett<u64> = self.modulus.barrett.prepare(b % self.modulus.q);
        izip!(&a.0, &mut c.0).for_each(|(a, c)| *c = self.modulus.barrett.mul_external(b, *a));
    }

    /// Assigns a * b to a.
    #[inline(always)]
    pub fn mul_scalar_inplace(&self, b: &u64, a: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n() = {} != n = {}", a.n(), self.n());
        let b: Barrett<u64> = self.modulus.barrett.prepare(b % self.modulus.q);
        a.0.iter_mut()
            .for_each(|a| self.modulus.barrett.mul_external_assign(b, a));
    }
}
