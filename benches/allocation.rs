use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use memfit::{allocate, fragmentation, Block, Process, Strategy};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn workload(blocks: usize, processes: usize) -> (Vec<Block>, Vec<Process>) {
    let mut rng = StdRng::seed_from_u64(42);
    let caps = (0..blocks).map(|_| rng.gen_range(64..4096)).collect::<Vec<u64>>();
    let sizes = (0..processes).map(|_| rng.gen_range(1..1024)).collect::<Vec<u64>>();
    (Block::from_capacities(caps), Process::from_sizes(sizes))
}

/// Benchmark each strategy over growing block counts
fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocate");

    for blocks in [16, 256, 4096] {
        let (b, p) = workload(blocks, 1000);
        for strategy in Strategy::ALL {
            group.bench_with_input(
                BenchmarkId::new(strategy.to_string(), blocks),
                &(b.clone(), p.clone()),
                |bench, (b, p)| bench.iter(|| allocate(black_box(strategy), b, p)),
            );
        }
    }

    group.finish();
}

/// Benchmark fragmentation totals on a finished run
fn bench_fragmentation(c: &mut Criterion) {
    let (blocks, procs) = workload(4096, 1000);
    let result = allocate(Strategy::BestFit, &blocks, &procs);

    c.bench_function("fragmentation_4096_blocks", |b| {
        b.iter(|| fragmentation(black_box(&blocks), black_box(&result)))
    });
}

criterion_group!(benches, bench_strategies, bench_fragmentation);
criterion_main!(benches);
