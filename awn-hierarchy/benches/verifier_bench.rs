use std::collections::BTreeSet;

use awn_hierarchy::{PathVerifier, DEFAULT_MAX_HOPS};
use awn_lexicon::{RelationGraph, SynsetId};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn synset(n: usize) -> SynsetId {
    SynsetId::new(format!("s{n:06}"))
}

/// A forest where every synset points at one to three random synsets with
/// a smaller number, so chains always lead towards the roots.
fn build_graph(nodes: usize) -> RelationGraph {
    let mut rng = StdRng::seed_from_u64(42);
    let mut edges = Vec::with_capacity(nodes * 2);
    for child in 1..nodes {
        for _ in 0..rng.gen_range(1..=3) {
            edges.push((synset(child), synset(rng.gen_range(0..child))));
        }
    }
    RelationGraph::from_edges(edges)
}

fn candidate_sets(nodes: usize, count: usize, width: usize) -> Vec<(BTreeSet<SynsetId>, BTreeSet<SynsetId>)> {
    let mut rng = StdRng::seed_from_u64(7);
    (0..count)
        .map(|_| {
            let children = (0..width).map(|_| synset(rng.gen_range(0..nodes))).collect();
            let parents = (0..width).map(|_| synset(rng.gen_range(0..nodes))).collect();
            (children, parents)
        })
        .collect()
}

fn bench_shortest_path(c: &mut Criterion) {
    let nodes = 20_000;
    let graph = build_graph(nodes);
    let verifier = PathVerifier::new(&graph, DEFAULT_MAX_HOPS);

    let mut group = c.benchmark_group("hypernym_bfs");
    for width in [1, 4, 16] {
        let queries = candidate_sets(nodes, 200, width);
        group.bench_function(BenchmarkId::new("candidates", width), |b| {
            b.iter(|| {
                queries
                    .iter()
                    .filter(|(children, parents)| verifier.shortest_path(children, parents).is_some())
                    .count()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_shortest_path);
criterion_main!(benches);
