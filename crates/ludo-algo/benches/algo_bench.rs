//! Criterion benchmarks for ludo-algo analytics.
//!
//! Run with:
//! ```bash
//! cargo bench -p ludo-algo
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ludo_algo::{
    betweenness_centrality, component_summary, find_bridges, louvain, pagerank, AnalysisConfig,
    BetweennessConfig, LouvainConfig, MetricsEngine, PageRankConfig,
};
use ludo_graph::{Entity, Graph};

// ── helpers ─────────────────────────────────────────────────────────────────

/// Ring of `n` nodes with a chord every 7 nodes.
fn ring_with_chords(n: usize) -> Graph {
    let mut g = Graph::new();
    for i in 0..n {
        g.add_node(Entity::game(i as u64, format!("game {i}")));
    }
    for i in 0..n {
        g.upsert_edge(i, (i + 1) % n, 1.0);
        if i % 7 == 0 {
            g.upsert_edge(i, (i + n / 3) % n, 0.5);
        }
    }
    g
}

// ── benches ─────────────────────────────────────────────────────────────────

fn bench_centrality(c: &mut Criterion) {
    let mut group = c.benchmark_group("algo/centrality");
    for &n in &[100usize, 500, 1000] {
        let g = ring_with_chords(n);
        group.bench_with_input(BenchmarkId::new("betweenness", n), &g, |b, g| {
            b.iter(|| betweenness_centrality(g, &BetweennessConfig::default()))
        });
        group.bench_with_input(BenchmarkId::new("pagerank", n), &g, |b, g| {
            b.iter(|| pagerank(g, &PageRankConfig::default()))
        });
    }
    group.finish();
}

fn bench_structure(c: &mut Criterion) {
    let mut group = c.benchmark_group("algo/structure");
    for &n in &[100usize, 1000] {
        let g = ring_with_chords(n);
        group.bench_with_input(BenchmarkId::new("bridges", n), &g, |b, g| b.iter(|| find_bridges(g)));
        group.bench_with_input(BenchmarkId::new("component_summary", n), &g, |b, g| {
            b.iter(|| component_summary(g, None))
        });
        group.bench_with_input(BenchmarkId::new("louvain", n), &g, |b, g| {
            b.iter(|| louvain(g, &LouvainConfig::default()))
        });
    }
    group.finish();
}

fn bench_engine(c: &mut Criterion) {
    let g = ring_with_chords(500);
    let engine = MetricsEngine::new(AnalysisConfig::default());
    c.bench_function("algo/engine/compute_500", |b| b.iter(|| engine.compute(&g, None)));
}

criterion_group!(benches, bench_centrality, bench_structure, bench_engine);
criterion_main!(benches);
