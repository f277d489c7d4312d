//! Performance benchmarks for node enrichment.
//!
//! Run with: `cargo bench --bench enrichment`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use ln_topology::{enrich, ChannelPolicy, ChannelRecord, NodeRecord};

/// Create a synthetic node set.
fn make_nodes(n: usize) -> Vec<NodeRecord> {
    (0..n).map(|i| NodeRecord::new(format!("node{i:06}"))).collect()
}

/// Create a ring of channels over `n` nodes, `per_node` parallel channels
/// per adjacent pair.
fn make_channels(n: usize, per_node: usize) -> Vec<ChannelRecord> {
    let mut channels = Vec::with_capacity(n * per_node);
    let mut id = 0u64;
    for i in 0..n {
        let a = format!("node{i:06}");
        let b = format!("node{:06}", (i + 1) % n);
        for _ in 0..per_node {
            id += 1;
            channels.push(ChannelRecord::new(id, a.clone(), b.clone(), 100_000).with_policies(
                Some(ChannelPolicy::with_disabled(false)),
                Some(ChannelPolicy::with_disabled(id % 3 == 0)),
            ));
        }
    }
    channels
}

fn bench_enrichment(c: &mut Criterion) {
    let mut group = c.benchmark_group("enrich_nodes");

    for &n in &[100usize, 1_000, 10_000] {
        let nodes = make_nodes(n);
        let channels = make_channels(n, 4);

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| enrich::enrich_nodes(black_box(&nodes), black_box(&channels)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_enrichment);
criterion_main!(benches);
