use batchselect::{BatchSelect, Labels, Parameters, ParametersLiteral, SelectionVector};
use criterion::{Criterion, criterion_group, criterion_main};
use sampling::source::Source;

const BENCH_PARAMETERS: ParametersLiteral = ParametersLiteral {
    log_n: 10,
    log_w: 6,
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

fn protocol_stages(c: &mut Criterion) {
    let params: Parameters = Parameters::new(&BENCH_PARAMETERS);
    let mut source: Source = Source::new([0u8; 32]);

    let l1: Labels = random_labels(&params, &mut source);
    let l2: Labels = random_labels(&params, &mut source);
    let y: SelectionVector = random_selection(&params, &mut source);

    let mut protocol: BatchSelect = BatchSelect::new(params);

    // one full pass so every stage's preconditions hold under filtering
    protocol.setup(&mut source);
    protocol.enc1(&l1, &mut source);
    protocol.enc2(&l2, &mut source);
    protocol.keygen(&y);

    c.bench_function("setup", |b| b.iter(|| protocol.setup(&mut source)));
    c.bench_function("enc1", |b| b.iter(|| protocol.enc1(&l1, &mut source)));
    c.bench_function("enc2", |b| b.iter(|| protocol.enc2(&l2, &mut source)));
    c.bench_function("keygen", |b| b.iter(|| protocol.keygen(&y)));
    c.bench_function("dec", |b| b.iter(|| protocol.dec(&y)));
}

criterion_group!(benches, protocol_stages);
criterion_main!(benches);
