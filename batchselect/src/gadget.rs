use math::poly::PolyRNS;
use math::ring::RingRNS;

/// Base-g digit codec for ring elements: an m-term decomposition and its
/// scaling dual. A ciphertext block satisfying C*s = encode(v) + noise
/// recovers v*s through an inner product with decompose(s), with noise
/// growth bounded by the m digit terms instead of the modulus magnitude.
#[derive(Clone, Copy, Debug)]
pub struct Gadget {
    m: usize,
    g: u64,
}

impl Gadget {
    pub fn new(m: usize, g: u64) -> Self {
        assert!(m >= 1, "invalid gadget length: m = {}", m);
        assert!(g >= 2, "invalid gadget base: g = {}", g);
        Self { m, g }
    }

    pub fn m(&self) -> usize {
        self.m
    }

    pub fn g(&self) -> u64 {
        self.g
    }

    /// Writes (a, g*a, ..., g^(m-1)*a) into out.
    pub fn encode(&self, ring: &RingRNS<u64>, a: &PolyRNS<u64>, out: &mut [PolyRNS<u64>]) {
        assert!(
            out.len() == self.m,
            "invalid out: out.len() = {} != m = {}",
            out.len(),
            self.m
        );
        out[0].copy_from(a);
        for k in 1..self.m {
            let (prev, next) = out.split_at_mut(k);
            ring.mul_scalar(&prev[k - 1], &self.g, &mut next[0]);
        }
    }

    /// Writes the m base-g digits of a into out, least significant first:
    /// the element moves to coefficient representation, each coefficient
    /// is CRT-composed into one integer, and m divmod rounds capture the
    /// remainder as the digit while the quotient is carried into the next
    /// round. Digits are re-split across the chain and moved back to
    /// evaluation representation.
    pub fn decompose(&self, ring: &RingRNS<u64>, a: &PolyRNS<u64>, out: &mut [PolyRNS<u64>]) {
        assert!(
            out.len() == self.m,
            "invalid out: out.len() = {} != m = {}",
            out.len(),
            self.m
        );

        let mut composed: PolyRNS<u64> = a.clone();
        ring.intt_inplace(&mut composed);

        let mut coeffs: Vec<u128> = vec![0; ring.n()];
        ring.compose_inplace(&composed, &mut coeffs);

        let g: u128 = self.g as u128;
        for digit in out.iter_mut() {
            for (i, value) in coeffs.iter_mut().enumerate() {
                let (quotient, remainder) = (*value / g, *value % g);
                *value = quotient;
                for (j, ring_j) in ring.0.iter().enumerate() {
                    digit.at_mut(j).0[i] = (remainder % ring_j.modulus.q as u128) as u64;
                }
            }
            ring.ntt_inplace(digit);
        }
    }
}
