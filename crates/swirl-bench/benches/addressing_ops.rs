//! Criterion micro-benchmarks for AA address translation.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use swirl_core::Parity;
use swirl_lattice::LatticeModel;
use swirl_population::AddressTranslator;
use swirl_space::Grid;

/// Benchmark: read and write offsets for every D3Q19 direction of a 32³ grid.
fn bench_offsets_d3q19_32k(c: &mut Criterion) {
    let grid = Grid::new(32, 32, 32).unwrap();
    let lattice = Arc::new(LatticeModel::d3q19());
    let tr = AddressTranslator::new(grid, Arc::clone(&lattice), 1).unwrap();
    let directions: Vec<_> = lattice.directions().collect();

    for parity in [Parity::Even, Parity::Odd] {
        c.bench_function(&format!("offsets_d3q19_32k_{parity}"), |b| {
            b.iter(|| {
                let mut acc = 0usize;
                for [x, y, z] in grid.iter_nodes() {
                    let nb = grid.neighbourhood(x, y, z);
                    for &(n, d) in &directions {
                        acc ^= tr.read_offset(parity, &nb, n, d, 0).index();
                        acc ^= tr.write_offset(parity, &nb, n, d, 0).index();
                    }
                }
                black_box(acc)
            });
        });
    }
}

/// Benchmark: delinearize every offset of a 16³ D3Q27 buffer.
fn bench_delinearize_d3q27(c: &mut Criterion) {
    let grid = Grid::new(16, 16, 16).unwrap();
    let tr = AddressTranslator::new(grid, Arc::new(LatticeModel::d3q27()), 1).unwrap();
    let offsets: Vec<_> = grid
        .iter_nodes()
        .map(|[x, y, z]| tr.linearize(x, y, z, 0, 0, 0))
        .collect();

    c.bench_function("delinearize_d3q27_4k_nodes", |b| {
        b.iter(|| {
            for &offset in &offsets {
                black_box(tr.delinearize(offset));
            }
        });
    });
}

/// Benchmark: full write-exclusivity check on a 16³ D3Q19 grid.
fn bench_write_exclusivity(c: &mut Criterion) {
    let grid = Grid::new(16, 16, 16).unwrap();
    let tr = AddressTranslator::new(grid, Arc::new(LatticeModel::d3q19()), 1).unwrap();

    c.bench_function("check_write_exclusivity_d3q19_4k", |b| {
        b.iter(|| black_box(tr.check_write_exclusivity(Parity::Odd)));
    });
}

criterion_group!(
    benches,
    bench_offsets_d3q19_32k,
    bench_delinearize_d3q27,
    bench_write_exclusivity
);
criterion_main!(benches);
