use itertools::izip;
use math::poly::PolyRNS;
use math::ring::RingRNS;
use sampling::distributions::ClippedNormal;
use sampling::source::Source;

/// Row-major outer product: c[i*b.len() + j] = a[i] * b[j].
pub(crate) fn outer_product(
    ring: &RingRNS<u64>,
    a: &[PolyRNS<u64>],
    b: &[PolyRNS<u64>],
    c: &mut [PolyRNS<u64>],
) {
    debug_assert!(
        c.len() == a.len() * b.len(),
        "c.len() = {} != a.len() * b.len() = {}",
        c.len(),
        a.len() * b.len()
    );
    izip!(a, c.chunks_exact_mut(b.len())).for_each(|(ai, row)| {
        izip!(b, row).for_each(|(bj, cij)| ring.mul(ai, bj, cij));
    });
}

/// c = sum_i a[i] * b[i].
pub(crate) fn inner_product(
    ring: &RingRNS<u64>,
    a: &[PolyRNS<u64>],
    b: &[PolyRNS<u64>],
    c: &mut PolyRNS<u64>,
) {
    debug_assert!(
        a.len() == b.len(),
        "a.len() = {} != b.len() = {}",
        a.len(),
        b.len()
    );
    c.zero();
    izip!(a, b).for_each(|(ai, bi)| ring.mul_add_inplace(ai, bi, c));
}

/// c[i] = a[i] * b.
pub(crate) fn broadcast_product(
    ring: &RingRNS<u64>,
    a: &[PolyRNS<u64>],
    b: &PolyRNS<u64>,
    c: &mut [PolyRNS<u64>],
) {
    debug_assert!(
        a.len() == c.len(),
        "a.len() = {} != c.len() = {}",
        a.len(),
        c.len()
    );
    izip!(a, c).for_each(|(ai, ci)| ring.mul(ai, b, ci));
}

/// Adds a fresh clipped-normal noise element (moved to evaluation
/// representation) to every element of dst.
pub(crate) fn add_noise(
    ring: &RingRNS<u64>,
    source: &mut Source,
    dist: &ClippedNormal,
    dst: &mut [PolyRNS<u64>],
) {
    let mut noise: PolyRNS<u64> = ring.new_polyrns();
    dst.iter_mut().for_each(|ct| {
        ring.fill_normal(source, dist, &mut noise);
        ring.ntt_inplace(&mut noise);
        ring.add_inplace(&noise, ct);
    });
}
