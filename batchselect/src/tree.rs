use crate::ops::{add_noise, inner_product, outer_product};
use crate::parameters::Parameters;
use itertools::izip;
use math::poly::PolyRNS;
use sampling::source::Source;

/// Binary-tree compacting scheme over w leaf slots and the public vector
/// B, letting the fixed-width linear scheme consume a whole selection
/// vector through a single digest, and letting an evaluator reconstruct
/// the matching per-slot combination from published ciphertext alone.
///
/// The ciphertext tree holds, per level and slot, a 2m-wide block
/// encrypting both possible child branches; which half carries the
/// gadget-encoded child is decided by one bit of the slot index, and
/// `eval` must mirror that bit test exactly.
pub struct TreeDigest {
    pub(crate) b: Vec<PolyRNS<u64>>,
    pub(crate) r: Vec<PolyRNS<u64>>,
    pub(crate) ct: Vec<PolyRNS<u64>>,
    /// digest tree in decomposed form, heap-indexed, node 0 unused
    pub(crate) tree: Vec<PolyRNS<u64>>,
    pub(crate) digest: Vec<PolyRNS<u64>>,
}

impl Default for TreeDigest {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeDigest {
    pub fn new() -> Self {
        Self {
            b: Vec::new(),
            r: Vec::new(),
            ct: Vec::new(),
            tree: Vec::new(),
            digest: Vec::new(),
        }
    }

    /// Samples the public vector B, directly in evaluation form.
    pub fn setup(&mut self, params: &Parameters, source: &mut Source) {
        let ring = params.ring();
        self.b = (0..2 * params.m())
            .map(|_| {
                let mut b: PolyRNS<u64> = ring.new_polyrns();
                ring.fill_uniform(source, &mut b);
                b
            })
            .collect();
    }

    /// Encrypts s into the ciphertext tree: at level i and slot j, a
    /// 2m-wide block r[i][j] x B carries the gadget-encoded child (the
    /// supplied s[j] at the deepest level, the next level's randomness
    /// above it) in the half selected by bit (l-i-1) of j. Returns the
    /// freshly sampled randomness; the first w entries key the linear
    /// scheme.
    pub fn enc(
        &mut self,
        params: &Parameters,
        s: &[PolyRNS<u64>],
        source: &mut Source,
    ) -> &[PolyRNS<u64>] {
        assert!(!self.b.is_empty(), "setup must run before enc");
        assert!(
            s.len() == params.w(),
            "invalid s: s.len() = {} != w = {}",
            s.len(),
            params.w()
        );
        let ring = params.ring();
        let (w, l, m) = (params.w(), params.l(), params.m());
        let cols: usize = 2 * m;

        self.r = (0..l * w)
            .map(|_| {
                let mut r: PolyRNS<u64> = ring.new_polyrns();
                ring.fill_uniform(source, &mut r);
                r
            })
            .collect();

        self.ct = vec![ring.new_polyrns(); l * w * cols];
        for level in 0..l {
            outer_product(
                ring,
                &self.r[level * w..(level + 1) * w],
                &self.b,
                &mut self.ct[level * w * cols..(level + 1) * w * cols],
            );
        }

        let gadget = params.gadget();
        let mut encoded: Vec<PolyRNS<u64>> = vec![ring.new_polyrns(); m];
        let Self { r, ct, .. } = self;
        for level in 0..l {
            for slot in 0..w {
                let child: &PolyRNS<u64> = if level == l - 1 {
                    &s[slot]
                } else {
                    &r[(level + 1) * w + slot]
                };
                gadget.encode(ring, child, &mut encoded);

                let half: usize = if slot & (1 << (l - level - 1)) != 0 { m } else { 0 };
                let block: &mut [PolyRNS<u64>] = &mut ct[(level * w + slot) * cols..][..cols];
                izip!(&encoded, &mut block[half..half + m])
                    .for_each(|(e, ct)| ring.add_inplace(e, ct));
            }
        }

        add_noise(ring, source, &params.noise_small(), &mut self.ct);

        &self.r
    }

    /// Digest of the vector a: leaves hold decompose(a[i]) at heap
    /// position w-1+i, each internal node takes the negated inner product
    /// of B with its decomposed children, and the root value is returned
    /// undecomposed. The decomposed tree is retained for eval.
    pub fn digest(&mut self, params: &Parameters, a: &[PolyRNS<u64>]) -> PolyRNS<u64> {
        assert!(!self.b.is_empty(), "setup must run before digest");
        assert!(
            a.len() == params.w(),
            "invalid a: a.len() = {} != w = {}",
            a.len(),
            params.w()
        );
        let ring = params.ring();
        let (w, m) = (params.w(), params.m());
        let gadget = params.gadget();

        self.tree = vec![ring.new_polyrns(); (2 * w - 1) * m];
        for (i, ai) in a.iter().enumerate() {
            gadget.decompose(ring, ai, &mut self.tree[(w - 1 + i) * m..(w + i) * m]);
        }

        let mut value: PolyRNS<u64> = ring.new_polyrns();
        for i in (0..w - 1).rev() {
            inner_product(
                ring,
                &self.b,
                &self.tree[(2 * i + 1) * m..(2 * i + 3) * m],
                &mut value,
            );
            ring.neg_inplace(&mut value);
            if i != 0 {
                gadget.decompose(ring, &value, &mut self.tree[i * m..(i + 1) * m]);
            } else {
                self.digest = vec![value.clone()];
            }
        }

        self.digest[0].clone()
    }

    /// Per-slot correction terms: for each leaf, walk the root-to-leaf
    /// path, at every level pairing the slot's ciphertext block with the
    /// decomposed children of the path's node, and negate the
    /// accumulated sum. digest must have run on this instance.
    pub fn eval(&self, params: &Parameters) -> Vec<PolyRNS<u64>> {
        assert!(!self.ct.is_empty(), "enc must run before eval");
        assert!(!self.tree.is_empty(), "digest must run before eval");
        let ring = params.ring();
        let (w, l, m) = (params.w(), params.l(), params.m());
        let cols: usize = 2 * m;

        let mut delta: Vec<PolyRNS<u64>> = vec![ring.new_polyrns(); w];
        let mut acc: PolyRNS<u64> = ring.new_polyrns();
        for slot in 0..w {
            for level in 0..l {
                let node: usize = (slot >> (l - level)) + (1 << level) - 1;
                inner_product(
                    ring,
                    &self.ct[(level * w + slot) * cols..][..cols],
                    &self.tree[(2 * node + 1) * m..(2 * node + 3) * m],
                    &mut acc,
                );
                ring.add_inplace(&acc, &mut delta[slot]);
            }
            ring.neg_inplace(&mut delta[slot]);
        }

        delta
    }
}
