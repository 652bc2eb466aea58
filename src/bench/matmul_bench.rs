use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use matmul_rowblock::random::random_matrix;
use matmul_rowblock::{multiply, multiply_parallel};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn inputs(m: usize, k: usize, n: usize) -> (Vec<f32>, Vec<f32>) {
    let mut rng = StdRng::seed_from_u64(11);
    let mut a = vec![0.0f32; m * k];
    let mut b = vec![0.0f32; k * n];
    random_matrix(&mut rng, &mut a, m, k).unwrap();
    random_matrix(&mut rng, &mut b, k, n).unwrap();
    (a, b)
}

fn bench_naive_vs_threaded(c: &mut Criterion) {
    let mut group = c.benchmark_group("matmul_k64");
    group.sample_size(10);

    // Same tall-skinny shape as the runner, scaled down
    for size in [256usize, 512, 1024] {
        let (m, k, n) = (size, 64, size);
        let (a, b) = inputs(m, k, n);
        let mut out = vec![0.0f32; m * n];

        group.throughput(Throughput::Elements((2 * m * k * n) as u64));

        group.bench_with_input(BenchmarkId::new("naive", size), &size, |bench, _| {
            bench.iter(|| multiply(black_box(&a), black_box(&b), &mut out, m, k, n).unwrap());
        });

        for threads in [2usize, 4, 8] {
            group.bench_with_input(
                BenchmarkId::new(format!("row_block_{}t", threads), size),
                &size,
                |bench, _| {
                    bench.iter(|| {
                        multiply_parallel(black_box(&a), black_box(&b), &mut out, m, k, n, threads)
                            .unwrap()
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_naive_vs_threaded);
criterion_main!(benches);
