use crate::dft::DFT;
use crate::modulus::barrett::Barrett;
use crate::modulus::prime::Prime;
use crate::modulus::{ReduceOnce, WordOps};
use itertools::izip;

/// Negacyclic NTT tables for a prime q = 1 mod nth_root, where
/// nth_root = 2n and n is the transform length. Twiddle factors are
/// stored in bit-reversed order with their precomputed quotients.
pub struct Table<O> {
    prime: Prime<O>,
    psi_forward_rev: Vec<Barrett<u64>>,
    psi_backward_rev: Vec<Barrett<u64>>,
    n_inv: Barrett<u64>,
    psi_n_inv: Barrett<u64>,
    q: O,
    two_q: O,
}

impl Table<u64> {
    pub fn new(prime: Prime<u64>, nth_root: u64) -> Table<u64> {
        assert!(
            nth_root.is_power_of_two(),
            "invalid argument: nth_root = {} is not a power of two",
            nth_root
        );

        let psi: u64 = prime.primitive_nth_root(nth_root);
        let psi_inv: u64 = prime.inv(psi);

        let n: usize = (nth_root >> 1) as usize;
        let log_n: u32 = n.log2() as u32;

        let mut psi_forward_rev: Vec<Barrett<u64>> = vec![Barrett(0, 0); n];
        let mut psi_backward_rev: Vec<Barrett<u64>> = vec![Barrett(0, 0); n];

        psi_forward_rev[0] = prime.barrett.prepare(1);
        psi_backward_rev[0] = prime.barrett.prepare(1);

        let mut power_forward: u64 = 1;
        let mut power_backward: u64 = 1;

        for i in 1..n {
            power_forward = prime.mul_mod(power_forward, psi);
            power_backward = prime.mul_mod(power_backward, psi_inv);
            let i_rev: usize = i.reverse_bits_msb(log_n);
            psi_forward_rev[i_rev] = prime.barrett.prepare(power_forward);
            psi_backward_rev[i_rev] = prime.barrett.prepare(power_backward);
        }

        let n_inv_value: u64 = prime.inv(n as u64);
        let n_inv: Barrett<u64> = prime.barrett.prepare(n_inv_value);
        let psi_n_inv: Barrett<u64> = prime
            .barrett
            .prepare(prime.mul_mod(n_inv_value, *psi_backward_rev[1].value()));

        let q: u64 = prime.q;

        Self {
            prime,
            psi_forward_rev,
            psi_backward_rev,
            n_inv,
            psi_n_inv,
            q,
            two_q: q << 1,
        }
    }

    fn forward(&self, a: &mut [u64]) {
        let n: usize = a.len();
        assert!(
            n == self.psi_forward_rev.len(),
            "invalid a.len() = {}: table was built for n = {}",
            n,
            self.psi_forward_rev.len()
        );
        let log_n: usize = n.log2();

        for layer in 0..log_n {
            let m: usize = 1 << layer;
            let size: usize = n >> (layer + 1);
            izip!(a.chunks_exact_mut(2 * size), &self.psi_forward_rev[m..]).for_each(
                |(chunk, psi)| {
                    let (lo, hi) = chunk.split_at_mut(size);
                    izip!(lo, hi).for_each(|(x, y)| self.dit(x, y, *psi));
                },
            );
        }

        a.iter_mut().for_each(|x| {
            x.reduce_once_assign(self.two_q);
            x.reduce_once_assign(self.q);
        });
    }

    /// Cooley-Tukey butterfly; operands stay below 4q across layers.
    #[inline(always)]
    fn dit(&self, x: &mut u64, y: &mut u64, psi: Barrett<u64>) {
        debug_assert!(*x < self.two_q << 1, "x: {} >= 4q: {}", x, self.two_q << 1);
        debug_assert!(*y < self.two_q << 1, "y: {} >= 4q: {}", y, self.two_q << 1);
        x.reduce_once_assign(self.two_q);
        let bt: u64 = self.prime.barrett.mul_external_lazy(psi, *y);
        *y = *x + self.two_q - bt;
        *x += bt;
    }

    fn backward(&self, a: &mut [u64]) {
        let n: usize = a.len();
        assert!(
            n == self.psi_backward_rev.len(),
            "invalid a.len() = {}: table was built for n = {}",
            n,
            self.psi_backward_rev.len()
        );
        let log_n: usize = n.log2();

        for layer in (1..log_n).rev() {
            let m: usize = 1 << layer;
            let size: usize = n >> (layer + 1);
            izip!(a.chunks_exact_mut(2 * size), &self.psi_backward_rev[m..]).for_each(
                |(chunk, psi)| {
                    let (lo, hi) = chunk.split_at_mut(size);
                    izip!(lo, hi).for_each(|(x, y)| self.dif(x, y, *psi));
                },
            );
        }

        let (lo, hi) = a.split_at_mut(n >> 1);
        izip!(lo, hi).for_each(|(x, y)| self.dif_last(x, y));
    }

    /// Gentleman-Sande butterfly; operands stay below 2q across layers.
    #[inline(always)]
    fn dif(&self, x: &mut u64, y: &mut u64, psi: Barrett<u64>) {
        debug_assert!(*x < self.two_q, "x: {} >= 2q: {}", x, self.two_q);
        debug_assert!(*y < self.two_q, "y: {} >= 2q: {}", y, self.two_q);
        let d: u64 = self
            .prime
            .barrett
            .mul_external_lazy(psi, *x + self.two_q - *y);
        *x = (*x + *y).reduce_once(self.two_q);
        *y = d;
    }

    /// Last layer folds the n^-1 scaling into the butterfly and reduces
    /// fully.
    #[inline(always)]
    fn dif_last(&self, x: &mut u64, y: &mut u64) {
        debug_assert!(*x < self.two_q, "x: {} >= 2q: {}", x, self.two_q);
        debug_assert!(*y < self.two_q, "y: {} >= 2q: {}", y, self.two_q);
        let d: u64 = self
            .prime
            .barrett
            .mul_external(self.psi_n_inv, *x + self.two_q - *y);
        *x = self.prime.barrett.mul_external(self.n_inv, *x + *y);
        *y = d;
    }
}

impl DFT<u64> for Table<u64> {
    fn forward_inplace(&self, a: &mut [u64]) {
        self.forward(a)
    }

    fn backward_inplace(&self, a: &mut [u64]) {
        self.backward(a)
    }
}
