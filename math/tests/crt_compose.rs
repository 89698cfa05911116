use math::modulus::prime_generation::NTTFriendlyPrimesGenerator;
use math::poly::PolyRNS;
use math::ring::RingRNS;
use sampling::source::Source;

fn new_ring(n: usize, log_q: &[u64]) -> (RingRNS<u64>, Vec<u64>) {
    let nth_root: u64 = (n << 1) as u64;
    let moduli: Vec<u64> = log_q
        .iter()
        .map(|&bits| {
            NTTFriendlyPrimesGenerator::new(bits, nth_root)
                .next_downstream_prime()
                .q()
        })
        .collect();
    (RingRNS::new(n, moduli.clone()), moduli)
}

#[test]
fn crt_compose_u64() {
    let n: usize = 1 << 6;
    let (ring_rns, moduli) = new_ring(n, &[30, 40]);

    let seed: [u8; 32] = [0; 32];
    let mut source: Source = Source::new(seed);

    let mut a: PolyRNS<u64> = ring_rns.new_polyrns();
    ring_rns.fill_uniform(&mut source, &mut a);

    let mut coeffs: Vec<u128> = vec![0; n];
    ring_rns.compose_inplace(&a, &mut coeffs);

    // each composed coefficient reduces back onto its residues and stays
    // below the product of the chain
    let q_product: u128 = moduli.iter().map(|&q| q as u128).product();
    for i in 0..n {
        assert!(coeffs[i] < q_product);
        for (j, &q) in moduli.iter().enumerate() {
            assert_eq!((coeffs[i] % q as u128) as u64, a.at(j).0[i]);
        }
    }

    let mut b: PolyRNS<u64> = ring_rns.new_polyrns();
    ring_rns.decompose_inplace(&coeffs, &mut b);
    assert!(a == b);
}

#[test]
fn uniform_sampling_reduced() {
    let n: usize = 1 << 8;
    let (ring_rns, moduli) = new_ring(n, &[28, 39]);

    let seed: [u8; 32] = [1; 32];
    let mut source: Source = Source::new(seed);

    let mut a: PolyRNS<u64> = ring_rns.new_polyrns();
    ring_rns.fill_uniform(&mut source, &mut a);

    for (j, &q) in moduli.iter().enumerate() {
        assert!(a.at(j).0.iter().all(|&v| v < q));
    }
}

#[test]
fn ntt_matches_across_representations() {
    let n: usize = 1 << 6;
    let (ring_rns, _) = new_ring(n, &[30, 40]);

    let seed: [u8; 32] = [2; 32];
    let mut source: Source = Source::new(seed);

    let mut a: PolyRNS<u64> = ring_rns.new_polyrns();
    ring_rns.fill_uniform(&mut source, &mut a);
    let b: PolyRNS<u64> = a.clone();

    ring_rns.intt_inplace(&mut a);
    ring_rns.ntt_inplace(&mut a);
    assert!(a == b);
}
