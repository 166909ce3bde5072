use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use xdmf_heavy::io::xdmf::{decode_fixed, decode_mixed};
use xdmf_heavy::prelude::*;

/// Alternating hexahedra and hexagons over `cells` cells.
fn mixed_stream(cells: usize) -> Vec<i64> {
    let mut stream = Vec::with_capacity(cells * 9);
    for c in 0..cells as i64 {
        if c % 2 == 0 {
            stream.push(TopologyType::Hexahedron.code());
            stream.extend((0..8).map(|p| c * 8 + p));
        } else {
            stream.push(TopologyType::Polygon.code());
            stream.push(6);
            stream.extend((0..6).map(|p| c * 6 + p));
        }
    }
    stream
}

fn bench_connectivity(c: &mut Criterion) {
    let mut group = c.benchmark_group("connectivity_decode");
    for &cells in &[1_000usize, 100_000] {
        let mixed = mixed_stream(cells);
        group.bench_with_input(BenchmarkId::new("mixed", cells), &mixed, |b, stream| {
            b.iter(|| {
                let out = decode_mixed(black_box(stream), cells).unwrap();
                black_box(out);
            });
        });

        let fixed: Vec<i64> = (0..(cells * 8) as i64).collect();
        group.bench_with_input(BenchmarkId::new("fixed", cells), &fixed, |b, stream| {
            b.iter(|| {
                let out = decode_fixed(black_box(stream.clone()), cells, 8).unwrap();
                black_box(out);
            });
        });
    }
    group.finish();
}

fn bench_hyperslab(c: &mut Criterion) {
    let mut group = c.benchmark_group("hyperslab_read");
    let shape = vec![64usize, 64, 64];
    let n: usize = shape.iter().product();
    let mut store = InMemoryArrayStore::new();
    let tag = store
        .insert_shaped("field", shape, ArrayData::F32(vec![1.0; n]))
        .unwrap();
    for &stride in &[1usize, 2, 4] {
        let count = 64 / stride;
        let selection = Selection::Hyperslab {
            start: vec![0; 3],
            stride: vec![stride; 3],
            count: vec![count; 3],
        };
        group.bench_with_input(BenchmarkId::new("stride", stride), &selection, |b, sel| {
            b.iter(|| {
                let out = store.read(&tag, black_box(sel)).unwrap();
                store.clear_logs();
                black_box(out);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_connectivity, bench_hyperslab);
criterion_main!(benches);
