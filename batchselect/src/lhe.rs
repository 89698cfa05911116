use crate::ops::{add_noise, broadcast_product, inner_product, outer_product};
use crate::parameters::Parameters;
use itertools::izip;
use math::poly::PolyRNS;
use sampling::source::Source;

/// Width-w linear homomorphic scheme over the public vector A.
///
/// `ct1` carries a gadget-encoded message under m ephemeral secrets and
/// small noise; `ct2` carries a plain message under one secret and noise
/// wide enough to flood the correlated noise that `ct1` contributes once
/// it is combined with the selection digest. The asymmetry is a
/// correctness requirement, not a tuning knob.
///
/// Stages must run in order (setup, enc1/enc2, keygen, dec); each stage
/// replaces the state of the previous call of the same kind.
pub struct LinearHe {
    pub(crate) a: Vec<PolyRNS<u64>>,
    pub(crate) s1: Vec<PolyRNS<u64>>,
    pub(crate) s2: Vec<PolyRNS<u64>>,
    pub(crate) sk: Vec<PolyRNS<u64>>,
    pub(crate) ct1: Vec<PolyRNS<u64>>,
    pub(crate) ct2: Vec<PolyRNS<u64>>,
}

impl Default for LinearHe {
    fn default() -> Self {
        Self::new()
    }
}

impl LinearHe {
    pub fn new() -> Self {
        Self {
            a: Vec::new(),
            s1: Vec::new(),
            s2: Vec::new(),
            sk: Vec::new(),
            ct1: Vec::new(),
            ct2: Vec::new(),
        }
    }

    /// Samples the public vector A, directly in evaluation form.
    pub fn setup(&mut self, params: &Parameters, source: &mut Source) {
        let ring = params.ring();
        self.a = (0..params.w())
            .map(|_| {
                let mut a: PolyRNS<u64> = ring.new_polyrns();
                ring.fill_uniform(source, &mut a);
                a
            })
            .collect();
    }

    /// Encrypts m1 under m fresh secrets: ct1[i*m + k] = A[i]*s1[k]
    /// + g^k * m1[i] + noise.
    pub fn enc1(&mut self, params: &Parameters, m1: &[PolyRNS<u64>], source: &mut Source) {
        assert!(!self.a.is_empty(), "setup must run before enc1");
        assert!(
            m1.len() == params.w(),
            "invalid m1: m1.len() = {} != w = {}",
            m1.len(),
            params.w()
        );
        let ring = params.ring();
        let (w, m) = (params.w(), params.m());

        self.s1 = (0..m)
            .map(|_| {
                let mut s: PolyRNS<u64> = ring.new_polyrns();
                ring.fill_uniform(source, &mut s);
                s
            })
            .collect();

        self.ct1 = vec![ring.new_polyrns(); w * m];
        outer_product(ring, &self.a, &self.s1, &mut self.ct1);

        let gadget = params.gadget();
        let mut encoded: Vec<PolyRNS<u64>> = vec![ring.new_polyrns(); m];
        for i in 0..w {
            gadget.encode(ring, &m1[i], &mut encoded);
            izip!(&encoded, &mut self.ct1[i * m..(i + 1) * m])
                .for_each(|(e, ct)| ring.add_inplace(e, ct));
        }

        add_noise(ring, source, &params.noise_small(), &mut self.ct1);
    }

    /// Encrypts m2 under one fresh secret with flooding noise:
    /// ct2[i] = A[i]*s2 + m2[i] + noise.
    pub fn enc2(&mut self, params: &Parameters, m2: &[PolyRNS<u64>], source: &mut Source) {
        assert!(!self.a.is_empty(), "setup must run before enc2");
        assert!(
            m2.len() == params.w(),
            "invalid m2: m2.len() = {} != w = {}",
            m2.len(),
            params.w()
        );
        let ring = params.ring();

        let mut s2: PolyRNS<u64> = ring.new_polyrns();
        ring.fill_uniform(source, &mut s2);
        self.s2 = vec![s2];

        self.ct2 = vec![ring.new_polyrns(); params.w()];
        broadcast_product(ring, &self.a, &self.s2[0], &mut self.ct2);
        izip!(m2, &mut self.ct2).for_each(|(m2i, ct)| ring.add_inplace(m2i, ct));

        add_noise(ring, source, &params.noise_large(), &mut self.ct2);
    }

    /// Derives the selection key sk = s2 + sum_k s1[k] * decompose(y)[k].
    pub fn keygen(&mut self, params: &Parameters, y: &PolyRNS<u64>) {
        assert!(!self.s1.is_empty(), "enc1 must run before keygen");
        assert!(!self.s2.is_empty(), "enc2 must run before keygen");
        let ring = params.ring();

        let mut y_digits: Vec<PolyRNS<u64>> = vec![ring.new_polyrns(); params.m()];
        params.gadget().decompose(ring, y, &mut y_digits);

        let mut sk: PolyRNS<u64> = self.s2[0].clone();
        izip!(&self.s1, &y_digits).for_each(|(s, d)| ring.mul_add_inplace(s, d, &mut sk));
        self.sk = vec![sk];
    }

    /// Decrypts against y: mres[i] = <ct1[i,:], decompose(y)> + ct2[i]
    /// - A[i]*sk, which is m1[i]*y + m2[i] up to noise.
    pub fn dec(&self, params: &Parameters, y: &PolyRNS<u64>) -> Vec<PolyRNS<u64>> {
        assert!(!self.ct1.is_empty(), "enc1 must run before dec");
        assert!(!self.ct2.is_empty(), "enc2 must run before dec");
        assert!(!self.sk.is_empty(), "keygen must run before dec");
        let ring = params.ring();
        let (w, m) = (params.w(), params.m());

        let mut y_digits: Vec<PolyRNS<u64>> = vec![ring.new_polyrns(); m];
        params.gadget().decompose(ring, y, &mut y_digits);

        let mut mres: Vec<PolyRNS<u64>> = vec![ring.new_polyrns(); w];
        for i in 0..w {
            inner_product(ring, &self.ct1[i * m..(i + 1) * m], &y_digits, &mut mres[i]);
        }
        izip!(&self.ct2, &mut mres).for_each(|(ct, r)| ring.add_inplace(ct, r));

        let mut a_sk: PolyRNS<u64> = ring.new_polyrns();
        izip!(&self.a, &mut mres).for_each(|(a, r)| {
            ring.mul(a, &self.sk[0], &mut a_sk);
            ring.sub_inplace(&a_sk, r);
        });

        mres
    }
}
