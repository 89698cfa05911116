use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use math::poly::Poly;
use math::ring::Ring;
use sampling::source::Source;

fn ntt(c: &mut Criterion) {
    let mut group = c.benchmark_group("ntt");
    for log_n in [10usize, 12, 14] {
        let n: usize = 1 << log_n;
        let ring: Ring<u64> = Ring::new(n, 0x1fffffffffe00001);

        let mut source: Source = Source::new([0u8; 32]);
        let mut a: Poly<u64> = ring.new_poly();
        ring.fill_uniform(&mut source, &mut a);

        group.bench_with_input(BenchmarkId::new("forward", n), &(), |b, _| {
            b.iter(|| ring.ntt_inplace(&mut a))
        });
        group.bench_with_input(BenchmarkId::new("backward", n), &(), |b, _| {
            b.iter(|| ring.intt_inplace(&mut a))
        });
    }
    group.finish();
}

criterion_group!(benches, ntt);
criterion_main!(benches);
