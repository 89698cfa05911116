use crate::gadget::Gadget;
use math::modulus::prime_generation::NTTFriendlyPrimesGenerator;
use math::ring::RingRNS;
use sampling::distributions::ClippedNormal;

/// Noise samples are rejected beyond 128 standard deviations.
const MAX_DEVIATION_FACTOR: f64 = 128.0;

/// Literal description of a protocol instance.
#[derive(Clone, Copy, Debug)]
pub struct ParametersLiteral {
    /// base two logarithm of the ring degree
    pub log_n: usize,
    /// base two logarithm of the vector width
    pub log_w: usize,
    /// gadget length m
    pub digits: usize,
    /// base two logarithm of the gadget base g
    pub log_base: usize,
    /// bit size of the plaintext prime
    pub log_p: u64,
    /// bit size of the noise prime
    pub log_q: u64,
    /// standard deviation of the encryption noise
    pub sigma_small: f64,
    /// standard deviation of the flooding noise
    pub sigma_large: f64,
}

/// Production-scale instance: degree 4096, width 512, four 28-bit digits,
/// 50-bit plaintext prime, 59-bit noise prime.
pub const BATCH_SELECT_N4096_W512: ParametersLiteral = ParametersLiteral {
    log_n: 12,
    log_w: 9,
    digits: 4,
    log_base: 28,
    log_p: 50,
    log_q: 59,
    sigma_small: 4.0,
    sigma_large: 1000.0,
};

/// Instantiated protocol parameters: the two-prime RNS ring (plaintext
/// prime first, noise prime second), the gadget codec, and the scaling
/// constants of the Delta-lift.
///
/// The gadget base and length must satisfy g^m > p*q; this is a
/// precondition of the digit decomposition, not a runtime check, and
/// violating it yields silently incorrect output.
pub struct Parameters {
    n: usize,
    w: usize,
    l: usize,
    gadget: Gadget,
    ring: RingRNS<u64>,
    delta: u64,
    delta_inv: u64,
    sigma_small: f64,
    sigma_large: f64,
}

impl Parameters {
    pub fn new(lit: &ParametersLiteral) -> Self {
        assert!(lit.log_w >= 1, "invalid parameters: log_w = {} < 1", lit.log_w);
        assert!(lit.digits >= 1, "invalid parameters: digits = {} < 1", lit.digits);
        assert!(
            lit.log_p < lit.log_q,
            "invalid parameters: plaintext prime must be smaller than the noise prime"
        );

        let n: usize = 1 << lit.log_n;
        let w: usize = 1 << lit.log_w;
        let nth_root: u64 = (n << 1) as u64;

        let p: u64 = NTTFriendlyPrimesGenerator::new(lit.log_p, nth_root)
            .next_downstream_prime()
            .q();
        let q: u64 = NTTFriendlyPrimesGenerator::new(lit.log_q, nth_root)
            .next_downstream_prime()
            .q();

        let ring: RingRNS<u64> = RingRNS::new(n, vec![p, q]);
        let delta: u64 = q % p;
        let delta_inv: u64 = ring.0[0].modulus.inv(delta);

        Self {
            n,
            w,
            l: lit.log_w,
            gadget: Gadget::new(lit.digits, 1u64 << lit.log_base),
            ring,
            delta,
            delta_inv,
            sigma_small: lit.sigma_small,
            sigma_large: lit.sigma_large,
        }
    }

    /// Ring degree.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Vector width.
    pub fn w(&self) -> usize {
        self.w
    }

    /// Tree depth, log2(w).
    pub fn l(&self) -> usize {
        self.l
    }

    /// Gadget length.
    pub fn m(&self) -> usize {
        self.gadget.m()
    }

    pub fn gadget(&self) -> Gadget {
        self.gadget
    }

    pub fn ring(&self) -> &RingRNS<u64> {
        &self.ring
    }

    pub fn plaintext_modulus(&self) -> u64 {
        self.ring.0[0].modulus.q
    }

    pub fn noise_modulus(&self) -> u64 {
        self.ring.0[1].modulus.q
    }

    /// Scaling factor of the lift, q mod p.
    pub fn delta(&self) -> u64 {
        self.delta
    }

    /// Inverse of the scaling factor mod p.
    pub fn delta_inv(&self) -> u64 {
        self.delta_inv
    }

    pub fn noise_small(&self) -> ClippedNormal {
        ClippedNormal::new(self.sigma_small, MAX_DEVIATION_FACTOR * self.sigma_small)
    }

    pub fn noise_large(&self) -> ClippedNormal {
        ClippedNormal::new(self.sigma_large, MAX_DEVIATION_FACTOR * self.sigma_large)
    }
}
