use batchselect::serialize::Error;
use batchselect::{BATCH_SELECT_N4096_W512, BatchSelect, Labels, Parameters, ParametersLiteral, SelectionVector};
use sampling::source::Source;
use std::io::Cursor;

/// Reduced instance sized so that the accumulated noise stays far below
/// both the remap bound p and q/2; an exact match is expected with
/// overwhelming probability.
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

fn random_labels(params: &Parameters, source: &mut Source) -> Labels {
    let p: u64 = params.plaintext_modulus();
    let mask: u64 = p.next_power_of_two() - 1;
    let words: Vec<u64> = (0..params.w() * params.n())
        .map(|_| source.next_u64n(p, mask))
        .collect();
    Labels::from_words(params, words).expect("labels sampled below p")
}

fn random_selection(params: &Parameters, source: &mut Source) -> SelectionVector {
    let words: Vec<u64> = (0..params.w() * params.n())
        .map(|_| source.next_u64n(2, 1))
        .collect();
    SelectionVector::from_words(params, &words).expect("words sampled as bits")
}

fn run_protocol(
    seed: [u8; 32],
    literal: &ParametersLiteral,
) -> (BatchSelect, Labels, Labels, SelectionVector, Vec<u64>) {
    let params: Parameters = Parameters::new(literal);
    let mut source: Source = Source::new(seed);

    let l1: Labels = random_labels(&params, &mut source);
    let l2: Labels = random_labels(&params, &mut source);
    let y: SelectionVector = random_selection(&params, &mut source);

    let mut protocol: BatchSelect = BatchSelect::new(params);
    protocol.setup(&mut source);
    protocol.enc1(&l1, &mut source);
    protocol.enc2(&l2, &mut source);
    protocol.keygen(&y);
    let out: Vec<u64> = protocol.dec(&y);

    (protocol, l1, l2, y, out)
}

fn assert_selected(protocol: &BatchSelect, l1: &Labels, l2: &Labels, y: &SelectionVector, out: &[u64]) {
    let p: u64 = protocol.params().plaintext_modulus();
    let total: usize = protocol.params().w() * protocol.params().n();
    assert_eq!(out.len(), total);
    for i in 0..total {
        let want: u64 =
            ((l1.words()[i] as u128 * y.bits()[i] as u128 + l2.words()[i] as u128) % p as u128) as u64;
        assert_eq!(out[i], want, "slot {} selected the wrong label", i);
    }
}

#[test]
fn end_to_end_selects_labels() {
    let (protocol, l1, l2, y, out) = run_protocol([0u8; 32], &TEST_PARAMETERS);
    assert_selected(&protocol, &l1, &l2, &y, &out);
}

#[test]
fn end_to_end_fresh_randomness() {
    let (protocol, l1, l2, y, out) = run_protocol([7u8; 32], &TEST_PARAMETERS);
    assert_selected(&protocol, &l1, &l2, &y, &out);
}

/// Full production-scale scenario; several GiB of ciphertext state and a
/// long runtime, so it stays opt-in.
#[test]
#[ignore]
fn end_to_end_production_parameters() {
    let (protocol, l1, l2, y, out) = run_protocol([3u8; 32], &BATCH_SELECT_N4096_W512);
    assert_selected(&protocol, &l1, &l2, &y, &out);
}

#[test]
fn persistence_round_trip() {
    let (protocol, _, _, y, out) = run_protocol([1u8; 32], &TEST_PARAMETERS);

    let mut pp: Vec<u8> = Vec::new();
    let mut ct1: Vec<u8> = Vec::new();
    let mut ct2: Vec<u8> = Vec::new();
    let mut sk: Vec<u8> = Vec::new();
    protocol.save_pp(&mut pp).expect("writing to memory");
    protocol.save_ct1(&mut ct1).expect("writing to memory");
    protocol.save_ct2(&mut ct2).expect("writing to memory");
    protocol.save_sk(&mut sk).expect("writing to memory");

    let mut restored: BatchSelect = BatchSelect::new(Parameters::new(&TEST_PARAMETERS));
    restored.read_pp(&mut Cursor::new(&pp)).expect("layout intact");
    restored.read_ct1(&mut Cursor::new(&ct1)).expect("layout intact");
    restored.read_ct2(&mut Cursor::new(&ct2)).expect("layout intact");
    restored.read_sk(&mut Cursor::new(&sk)).expect("layout intact");

    assert_eq!(restored.dec(&y), out);
}

#[test]
fn secret_artifacts_round_trip() {
    let (mut protocol, _, _, _, _) = run_protocol([2u8; 32], &TEST_PARAMETERS);

    let mut st1: Vec<u8> = Vec::new();
    let mut st2: Vec<u8> = Vec::new();
    protocol.save_st1(&mut st1).expect("writing to memory");
    protocol.save_st2(&mut st2).expect("writing to memory");

    let params = protocol.params();
    let element_bytes: usize = params.n() * 2 * 8;
    assert_eq!(st1.len(), params.m() * element_bytes);
    assert_eq!(st2.len(), element_bytes);

    protocol.read_st1(&mut Cursor::new(&st1)).expect("layout intact");
    protocol.read_st2(&mut Cursor::new(&st2)).expect("layout intact");

    let mut st1_again: Vec<u8> = Vec::new();
    let mut st2_again: Vec<u8> = Vec::new();
    protocol.save_st1(&mut st1_again).expect("writing to memory");
    protocol.save_st2(&mut st2_again).expect("writing to memory");
    assert_eq!(st1, st1_again);
    assert_eq!(st2, st2_again);
}

#[test]
fn truncated_artifact_is_rejected() {
    let (protocol, _, _, _, _) = run_protocol([4u8; 32], &TEST_PARAMETERS);

    let mut pp: Vec<u8> = Vec::new();
    protocol.save_pp(&mut pp).expect("writing to memory");
    pp.truncate(pp.len() / 2);

    let mut restored: BatchSelect = BatchSelect::new(Parameters::new(&TEST_PARAMETERS));
    match restored.read_pp(&mut Cursor::new(&pp)) {
        Err(Error::Truncated { .. }) => {}
        other => panic!("expected a truncation error, got {:?}", other.err()),
    }
}

#[test]
fn boundary_values_are_validated() {
    let params: Parameters = Parameters::new(&TEST_PARAMETERS);
    let total: usize = params.w() * params.n();

    let short: Vec<u64> = vec![0; total - 1];
    assert!(matches!(
        Labels::from_words(&params, short),
        Err(Error::WordCount { .. })
    ));

    let mut labels: Vec<u64> = vec![0; total];
    labels[3] = params.plaintext_modulus();
    assert!(matches!(
        Labels::from_words(&params, labels),
        Err(Error::LabelOutOfRange { .. })
    ));

    let mut bits: Vec<u64> = vec![1; total];
    bits[17] = 2;
    assert!(matches!(
        SelectionVector::from_words(&params, &bits),
        Err(Error::InvalidSelectionBit { value: 2 })
    ));

    let valid: Vec<u64> = vec![1; total];
    let selection: SelectionVector =
        SelectionVector::from_words(&params, &valid).expect("all words are bits");
    assert_eq!(selection.to_words(), valid);
}
