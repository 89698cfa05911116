use batchselect::lhe::LinearHe;
use batchselect::{Parameters, ParametersLiteral};
use math::poly::PolyRNS;
use sampling::source::Source;

const TEST_PARAMETERS: ParametersLiteral = ParametersLiteral {
    log_n: 8,
    log_w: 4,
    digits: 4,
    log_base: 17,
    log_p: 28,
    log_q: 39,
    sigma_small: 4.0,
    sigma_large: 1000.0,
};

/// The linear scheme alone: dec(y) recovers m1[i]*y + m2[i] up to noise
/// whose centered coefficients stay far below q/2.
#[test]
fn linear_scheme_decrypts_up_to_noise() {
    let params: Parameters = Parameters::new(&TEST_PARAMETERS);
    let ring = params.ring();
    let mut source: Source = Source::new([5u8; 32]);

    let sample = |source: &mut Source| {
        let mut a: PolyRNS<u64> = ring.new_polyrns();
        ring.fill_uniform(source, &mut a);
        a
    };

    let m1: Vec<PolyRNS<u64>> = (0..params.w()).map(|_| sample(&mut source)).collect();
    let m2: Vec<PolyRNS<u64>> = (0..params.w()).map(|_| sample(&mut source)).collect();
    let y: PolyRNS<u64> = sample(&mut source);

    let mut scheme: LinearHe = LinearHe::new();
    scheme.setup(&params, &mut source);
    scheme.enc1(&params, &m1, &mut source);
    scheme.enc2(&params, &m2, &mut source);
    scheme.keygen(&params, &y);
    let mres: Vec<PolyRNS<u64>> = scheme.dec(&params, &y);

    // noise bound with a wide margin over the expected deviation
    let bound: u64 = 1 << 27;
    let q: u64 = params.noise_modulus();

    let mut expected: PolyRNS<u64> = ring.new_polyrns();
    let mut diff: PolyRNS<u64> = ring.new_polyrns();
    for i in 0..params.w() {
        ring.mul(&m1[i], &y, &mut expected);
        ring.add_inplace(&m2[i], &mut expected);

        diff.copy_from(&mres[i]);
        ring.sub_inplace(&expected, &mut diff);
        ring.intt_inplace(&mut diff);

        for &v in &diff.at(1).0 {
            let centered: u64 = v.min(q - v);
            assert!(
                centered < bound,
                "slot {}: noise magnitude {} exceeds the bound",
                i,
                centered
            );
        }
    }
}
