//! Dendrogram construction and threshold-cut benchmarks.
//!
//! Distances are computed once per catalog so the timings isolate the merge
//! engine drivers.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use motifold_benches::{
    error::BenchSetupError,
    params::DendrogramBenchParams,
    synthetic::{SyntheticGraph, SyntheticGraphConfig},
};
use motifold_core::{
    ExecutionStrategy, Linkage, WeightProfile, build_dendrogram, compute_distance_matrix,
    partition_at,
};

const SEED: u64 = 7;
const DEGREE: usize = 4;
const MOTIF_COUNTS: &[usize] = &[100, 500, 1_000];

fn dendrogram_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut build = c.benchmark_group("build_dendrogram");
    build.sample_size(20);
    let mut matrices = Vec::with_capacity(MOTIF_COUNTS.len());

    for &motif_count in MOTIF_COUNTS {
        let catalog = SyntheticGraph::generate(&SyntheticGraphConfig {
            node_count: motif_count,
            degree: DEGREE,
            max_weight: 10.0,
            seed: SEED,
        })?
        .catalog()?;
        let matrix =
            compute_distance_matrix(&catalog, WeightProfile::All, ExecutionStrategy::Auto)?;

        for linkage in [Linkage::Single, Linkage::Average] {
            build.bench_with_input(
                BenchmarkId::from_parameter(DendrogramBenchParams {
                    motif_count,
                    linkage,
                }),
                &matrix,
                |b, matrix| b.iter(|| build_dendrogram(matrix, linkage)),
            );
        }
        matrices.push((motif_count, matrix));
    }
    build.finish();

    let mut cut = c.benchmark_group("partition_at");
    for (motif_count, matrix) in &matrices {
        let dendrogram = build_dendrogram(matrix, Linkage::Average)?;
        let tau = dendrogram.max_merge_value().unwrap_or(0.0) / 2.0;
        cut.bench_with_input(
            BenchmarkId::from_parameter(motif_count),
            &dendrogram,
            |b, dendrogram| b.iter(|| partition_at(dendrogram, tau)),
        );
    }
    cut.finish();
    Ok(())
}

fn dendrogram(c: &mut Criterion) {
    if let Err(err) = dendrogram_impl(c) {
        panic!("dendrogram benchmark setup failed: {err}");
    }
}

criterion_group!(benches, dendrogram);
criterion_main!(benches);
