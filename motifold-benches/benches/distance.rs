//! Pairwise Wasserstein distance matrix benchmarks.
//!
//! Compares sequential and parallel construction of the condensed distance
//! matrix over ego-motif catalogs of growing size.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use motifold_benches::{
    error::BenchSetupError,
    params::CatalogBenchParams,
    synthetic::{SyntheticGraph, SyntheticGraphConfig},
};
use motifold_core::{ExecutionStrategy, WeightProfile, compute_distance_matrix};

const SEED: u64 = 42;
const DEGREE: usize = 6;
const MOTIF_COUNTS: &[usize] = &[100, 500, 1_000];

fn distance_matrix_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("distance_matrix");
    group.sample_size(20);

    for &motif_count in MOTIF_COUNTS {
        let catalog = SyntheticGraph::generate(&SyntheticGraphConfig {
            node_count: motif_count,
            degree: DEGREE,
            max_weight: 10.0,
            seed: SEED,
        })?
        .catalog()?;
        let params = CatalogBenchParams {
            motif_count,
            degree: DEGREE,
        };

        for strategy in [ExecutionStrategy::Sequential, ExecutionStrategy::Parallel] {
            // Surface an unavailable backend before Criterion starts timing.
            compute_distance_matrix(&catalog, WeightProfile::All, strategy)?;
            group.bench_with_input(
                BenchmarkId::new(strategy.to_string(), &params),
                &catalog,
                |b, catalog| {
                    b.iter(|| compute_distance_matrix(catalog, WeightProfile::All, strategy));
                },
            );
        }
    }

    group.finish();
    Ok(())
}

fn distance_matrix(c: &mut Criterion) {
    if let Err(err) = distance_matrix_impl(c) {
        panic!("distance_matrix benchmark setup failed: {err}");
    }
}

criterion_group!(benches, distance_matrix);
criterion_main!(benches);
