use bench::RuntimePreset;
use bench::default_rng;
use criterion::BenchmarkGroup;
use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use criterion::measurement::Measurement;
use rand::Rng;
use std::hint::black_box;
use succinct_rmq::SparseTableRmq;
use succinct_rmq::StaticRmq;
use succinct_rmq::SuccinctRmq;

const SIZES: [usize; 4] = [1_024, 16_384, 262_144, 1_048_576];
const QUERIES: usize = 100_000;
const VALUE_RANGE: std::ops::RangeInclusive<i64> = -1_000_000_000..=1_000_000_000;

fn generate_values<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<i64> {
    (0..n).map(|_| rng.random_range(VALUE_RANGE)).collect()
}

fn generate_queries<R: Rng + ?Sized>(rng: &mut R, n: usize, q: usize) -> Vec<(usize, usize)> {
    (0..q)
        .map(|_| {
            let l = rng.random_range(0..n);
            let r = rng.random_range((l + 1)..=n);
            (l, r)
        })
        .collect()
}

fn bench_build<M, R>(group: &mut BenchmarkGroup<'_, M>, name: &str, values: &[i64])
where
    M: Measurement,
    R: StaticRmq,
{
    group.bench_function(BenchmarkId::new(name, values.len()), |bencher| {
        bencher.iter(|| black_box(R::build(black_box(values.to_vec())).unwrap()))
    });
}

fn bench_query<M, R>(
    group: &mut BenchmarkGroup<'_, M>,
    name: &str,
    rmq: &R,
    size: usize,
    queries: &[(usize, usize)],
) where
    M: Measurement,
    R: StaticRmq,
{
    group.bench_function(BenchmarkId::new(name, size), |bencher| {
        bencher.iter(|| {
            let mut acc = 0_usize;
            for &(l, r) in queries {
                acc ^= rmq.argmin(black_box(l)..black_box(r)).unwrap();
            }
            black_box(acc);
        })
    });
}

fn bench_rmq(c: &mut Criterion) {
    let mut rng = default_rng();

    for &size in &SIZES {
        let values = generate_values(&mut rng, size);
        let queries = generate_queries(&mut rng, size, QUERIES);

        let mut group = c.benchmark_group("rmq/build");
        RuntimePreset::for_len(size).apply(&mut group);
        bench_build::<_, SparseTableRmq>(&mut group, "sparse", &values);
        bench_build::<_, SuccinctRmq>(&mut group, "succinct", &values);
        group.finish();

        let sparse = SparseTableRmq::new(values.clone());
        let succinct = SuccinctRmq::new(values).unwrap();
        let mut group = c.benchmark_group("rmq/query");
        RuntimePreset::for_len(size).apply(&mut group);
        bench_query(&mut group, "sparse", &sparse, size, &queries);
        bench_query(&mut group, "succinct", &succinct, size, &queries);
        group.finish();
    }
}

fn bench_persistence(c: &mut Criterion) {
    let mut rng = default_rng();
    let mut group = c.benchmark_group("rmq/persist");

    for &size in &SIZES {
        RuntimePreset::for_len(size).apply(&mut group);
        let rmq = SuccinctRmq::new(generate_values(&mut rng, size)).unwrap();
        let mut bytes = Vec::new();
        rmq.save(&mut bytes).unwrap();

        group.bench_function(BenchmarkId::new("save", size), |bencher| {
            bencher.iter(|| {
                let mut out = Vec::with_capacity(bytes.len());
                rmq.save(&mut out).unwrap();
                black_box(out)
            })
        });
        group.bench_function(BenchmarkId::new("load", size), |bencher| {
            bencher.iter(|| black_box(SuccinctRmq::load(black_box(bytes.as_slice())).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rmq, bench_persistence);
criterion_main!(benches);
