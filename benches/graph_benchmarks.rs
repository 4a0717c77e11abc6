use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use graphlib::algo::{dijkstra, out_edges_of, tarjan, topsort, unit_weight, PriorityQueue};
use graphlib::{Graph, GraphOptions};

/// Layered DAG: `width` nodes per layer, each linked to every node of the next layer
fn layered(size: usize, width: usize) -> Graph {
    let mut g = Graph::with_options(GraphOptions::new());
    for i in 0..size {
        g.set_node(i, None);
    }
    for i in 0..size.saturating_sub(width) {
        let layer_start = (i / width + 1) * width;
        for j in layer_start..(layer_start + width).min(size) {
            g.set_edge(i, j, None);
        }
    }
    g
}

/// Benchmark node and edge insertion throughput
fn bench_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("insertion");

    for size in [100, 1000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let mut g: Graph<usize> = Graph::new();
                for i in 0..size {
                    g.set_node(i, i);
                }
                for i in 1..size {
                    g.set_edge(i - 1, i, None);
                }
                criterion::black_box(g.edge_count());
            });
        });
    }
    group.finish();
}

/// Benchmark indexed priority queue churn
fn bench_priority_queue(c: &mut Criterion) {
    let mut group = c.benchmark_group("priority_queue");

    for size in [1000, 10_000].iter() {
        let keys: Vec<String> = (0..*size).map(|i| i.to_string()).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let mut pq = PriorityQueue::with_capacity(size);
                for (i, key) in keys.iter().enumerate() {
                    pq.add(key.as_str(), (size - i) as f64);
                }
                for key in keys.iter().step_by(2) {
                    let _ = pq.decrease(key, -1.0);
                }
                while pq.remove_min().is_ok() {}
            });
        });
    }
    group.finish();
}

/// Benchmark single-source shortest paths
fn bench_dijkstra(c: &mut Criterion) {
    let mut group = c.benchmark_group("dijkstra");

    for size in [100, 1000, 5000].iter() {
        let g = layered(*size, 10);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let paths = dijkstra(&g, "0", unit_weight, out_edges_of(&g));
                criterion::black_box(paths.map(|p| p.len()).unwrap_or(0));
            });
        });
    }
    group.finish();
}

/// Benchmark ordering and strongly connected components
fn bench_ordering(c: &mut Criterion) {
    let mut group = c.benchmark_group("ordering");

    for size in [1000, 10_000].iter() {
        let g = layered(*size, 10);
        group.bench_with_input(BenchmarkId::new("topsort", size), size, |b, _| {
            b.iter(|| criterion::black_box(topsort(&g).map(|o| o.len()).unwrap_or(0)));
        });
        group.bench_with_input(BenchmarkId::new("tarjan", size), size, |b, _| {
            b.iter(|| criterion::black_box(tarjan(&g).len()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_insertion,
    bench_priority_queue,
    bench_dijkstra,
    bench_ordering
);
criterion_main!(benches);
