use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use strata::bfs::{sequential_bfs, BfsConfig, ParallelBfs, Partitioning};
use strata::graph::ValueGraph;
use strata::RoundBarrier;

const NODES: usize = 20_000;
const EDGES: usize = 200_000;

fn bench_bfs(c: &mut Criterion) {
    let graph = ValueGraph::generate_sparse(NODES, EDGES, 1234, 6).expect("graph");
    let mut group = c.benchmark_group("bfs");
    group.throughput(Throughput::Elements(graph.edge_count() as u64));

    group.bench_function("sequential", |b| {
        b.iter(|| black_box(sequential_bfs(&graph, 0, 5).unwrap()));
    });

    for workers in [1, 2, 4, 8] {
        for (name, partitioning) in [
            ("chunked_2", Partitioning::Chunked { chunk_size: 2 }),
            ("chunked_256", Partitioning::Chunked { chunk_size: 256 }),
            ("even_split", Partitioning::EvenSplit),
        ] {
            let config = BfsConfig::default()
                .with_workers(workers)
                .with_partitioning(partitioning);
            let engine = ParallelBfs::new(config.clone()).expect("config");
            group.bench_with_input(BenchmarkId::new(name, workers), &workers, |b, _| {
                b.iter(|| black_box(engine.run(&graph, 0, 5).unwrap()));
            });

            #[cfg(feature = "parallel")]
            group.bench_with_input(
                BenchmarkId::new(format!("rayon_{name}"), workers),
                &workers,
                |b, _| {
                    b.iter(|| black_box(strata::bfs::rayon_bfs(&graph, 0, 5, &config).unwrap()));
                },
            );
        }
    }

    group.finish();
}

fn bench_barrier_round_trip(c: &mut Criterion) {
    const ROUNDS: usize = 1_000;
    let mut group = c.benchmark_group("round_barrier");
    group.throughput(Throughput::Elements(ROUNDS as u64));

    for workers in [1, 2, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, &workers| {
            b.iter(|| {
                let barrier = RoundBarrier::new(workers);
                std::thread::scope(|s| {
                    for _ in 0..workers {
                        s.spawn(|| {
                            for _ in 0..ROUNDS {
                                let _ = barrier.worker_done_and_wait();
                            }
                        });
                    }
                    for round in 0..ROUNDS {
                        let _ = barrier.wait_for_workers();
                        if round + 1 < ROUNDS {
                            barrier.release();
                        }
                    }
                    barrier.release();
                });
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_bfs, bench_barrier_round_trip);
criterion_main!(benches);
