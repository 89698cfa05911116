use crate::lhe::LinearHe;
use crate::ops::add_noise;
use crate::parameters::Parameters;
use crate::plaintext::{Labels, SelectionVector};
use crate::tree::TreeDigest;
use itertools::izip;
use math::poly::PolyRNS;
use sampling::source::Source;

/// The four-stage batch-select protocol: a [LinearHe] instance keyed by
/// a [TreeDigest] built over the selection vector.
///
/// The label content of the first vector is carried by the ciphertext
/// tree, while the linear scheme encrypts only the tree's level-0
/// randomness; this nesting lets an m-wide secret stand in for a w-wide
/// selection. Stages are not reentrant and must run in dependency order:
/// setup, enc1/enc2, keygen, dec.
pub struct BatchSelect {
    params: Parameters,
    pub(crate) lhe: LinearHe,
    pub(crate) tree: TreeDigest,
}

impl BatchSelect {
    pub fn new(params: Parameters) -> Self {
        Self {
            params,
            lhe: LinearHe::new(),
            tree: TreeDigest::new(),
        }
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Samples the public vectors A and B.
    pub fn setup(&mut self, source: &mut Source) {
        let Self { params, lhe, tree } = self;
        lhe.setup(params, source);
        tree.setup(params, source);
    }

    /// Protects the first label vector: the lifted labels feed the
    /// ciphertext tree, whose level-0 randomness is then encrypted under
    /// the linear scheme.
    pub fn enc1(&mut self, l1: &Labels, source: &mut Source) {
        let Self { params, lhe, tree } = self;
        let scaled: Vec<PolyRNS<u64>> = lift_labels(params, l1);
        let r: &[PolyRNS<u64>] = tree.enc(params, &scaled, source);
        lhe.enc1(params, &r[..params.w()], source);
    }

    /// Protects the second label vector, flooding the lifted labels with
    /// large noise before (and independently of) the linear scheme's own
    /// flooding.
    pub fn enc2(&mut self, l2: &Labels, source: &mut Source) {
        let Self { params, lhe, .. } = self;
        let mut scaled: Vec<PolyRNS<u64>> = lift_labels(params, l2);
        add_noise(params.ring(), source, &params.noise_large(), &mut scaled);
        lhe.enc2(params, &scaled, source);
    }

    /// Derives the selection key from the digest of the lifted selection
    /// vector.
    pub fn keygen(&mut self, y: &SelectionVector) {
        let Self { params, lhe, tree } = self;
        let lifted: Vec<PolyRNS<u64>> = lift_selection(params, y);
        let digest: PolyRNS<u64> = tree.digest(params, &lifted);
        lhe.keygen(params, &digest);
    }

    /// Reconstructs the selected output, w*n values below the plaintext
    /// modulus: out[i] = l1[i]*y[i] + l2[i] mod p.
    pub fn dec(&mut self, y: &SelectionVector) -> Vec<u64> {
        let Self { params, lhe, tree } = self;
        let lifted: Vec<PolyRNS<u64>> = lift_selection(params, y);
        let digest: PolyRNS<u64> = tree.digest(params, &lifted);
        let mut res: Vec<PolyRNS<u64>> = lhe.dec(params, &digest);
        let delta: Vec<PolyRNS<u64>> = tree.eval(params);
        izip!(&delta, &mut res).for_each(|(d, r)| params.ring().sub_inplace(d, r));
        decode(params, &mut res)
    }
}

/// Lifts w*n label values into w ring elements: each label lands in one
/// evaluation slot of the plaintext-prime residue, scaled by
/// Delta = q mod p; the noise-prime residue is zero.
fn lift_labels(params: &Parameters, labels: &Labels) -> Vec<PolyRNS<u64>> {
    let ring = params.ring();
    let plain = &ring.0[0];
    labels
        .words()
        .chunks_exact(params.n())
        .map(|chunk| {
            let mut e: PolyRNS<u64> = ring.new_polyrns();
            e.at_mut(0).0.copy_from_slice(chunk);
            plain.mul_scalar_inplace(&params.delta(), e.at_mut(0));
            e
        })
        .collect()
}

/// Lifts w*n selection bits into w ring elements: the bits land in the
/// evaluation slots of the plaintext-prime residue, and the same integer
/// polynomial is re-expressed under the noise prime by an inverse
/// transform against the plaintext-prime tables followed by a forward
/// transform against the noise-prime tables.
fn lift_selection(params: &Parameters, y: &SelectionVector) -> Vec<PolyRNS<u64>> {
    let ring = params.ring();
    let plain = &ring.0[0];
    let noise = &ring.0[1];
    y.bits()
        .chunks_exact(params.n())
        .map(|chunk| {
            let mut e: PolyRNS<u64> = ring.new_polyrns();
            izip!(chunk, &mut e.at_mut(0).0).for_each(|(&bit, v)| *v = bit as u64);
            let (lo, hi) = e.0.split_at_mut(1);
            hi[0].copy_from(&lo[0]);
            plain.intt_inplace(&mut hi[0]);
            noise.ntt_inplace(&mut hi[0]);
            e
        })
        .collect()
}

/// Final decoding: the noise-prime residue, in coefficient form, holds
/// the accumulated noise; values above q/2 are remapped to their signed
/// representative under p (wrapping, as accumulated noise is assumed
/// below p), the noise is subtracted from the plaintext-prime residue,
/// and the Delta scaling is undone. The evaluation-slot values of the
/// corrected residue are the outputs.
fn decode(params: &Parameters, res: &mut [PolyRNS<u64>]) -> Vec<u64> {
    let ring = params.ring();
    let plain = &ring.0[0];
    let noise = &ring.0[1];
    let p: u64 = plain.modulus.q;
    let q: u64 = noise.modulus.q;
    let delta_inv: u64 = params.delta_inv();

    let mut out: Vec<u64> = Vec::with_capacity(params.w() * params.n());
    for e in res.iter_mut() {
        let (lo, hi) = e.0.split_at_mut(1);
        let (m0, m1) = (&mut lo[0], &mut hi[0]);

        noise.intt_inplace(m1);
        m1.0.iter_mut().for_each(|v| {
            if *v > q / 2 {
                *v = p.wrapping_sub(q - *v);
            }
        });
        plain.ntt_inplace(m1);

        plain.sub_inplace(m1, m0);
        plain.mul_scalar_inplace(&delta_inv, m0);
        out.extend_from_slice(&m0.0);
    }
    out
}
