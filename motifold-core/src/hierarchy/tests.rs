//! Unit and property tests for dendrogram construction and cuts.

use proptest::prelude::*;
use rstest::rstest;

use super::*;
use crate::{
    distance::DistanceMatrix,
    ids::{ClusterId, MotifId},
    test_utils::suite_proptest_config,
};

/// Three motifs A=1, B=2, C=3 with d(A,B)=1, d(A,C)=3, d(B,C)=2.
fn abc() -> DistanceMatrix {
    DistanceMatrix::from_condensed(
        vec![MotifId::new(1), MotifId::new(2), MotifId::new(3)],
        vec![1.0, 3.0, 2.0],
    )
    .expect("matrix is valid")
}

fn clusters(values: &[u64]) -> Vec<ClusterId> {
    values.iter().copied().map(ClusterId::new).collect()
}

#[test]
fn single_linkage_merges_in_distance_order() {
    let dendrogram = build_dendrogram(&abc(), Linkage::Single).expect("dendrogram builds");
    let values: Vec<f32> = dendrogram.events().iter().map(|event| event.value()).collect();
    assert_eq!(values, vec![1.0, 2.0]);
    assert_eq!(dendrogram.linkage(), Linkage::Single);

    let partition = partition_at(&dendrogram, 1.5).expect("cut succeeds");
    assert_eq!(partition.assignments(), clusters(&[0, 0, 1]).as_slice());
    assert_eq!(
        partition.classes(),
        vec![vec![MotifId::new(1), MotifId::new(2)], vec![MotifId::new(3)]]
    );
}

#[rstest]
#[case::negative(-1.0, &[0, 1, 2])]
#[case::zero(0.0, &[0, 1, 2])]
#[case::nan(f32::NAN, &[0, 1, 2])]
#[case::exact_first_merge(1.0, &[0, 0, 1])]
#[case::at_max(2.0, &[0, 0, 0])]
#[case::beyond_max(50.0, &[0, 0, 0])]
fn cuts_follow_the_threshold(#[case] tau: f32, #[case] expected: &[u64]) {
    let dendrogram = build_dendrogram(&abc(), Linkage::Single).expect("dendrogram builds");
    let partition = dendrogram.partition_at(tau).expect("cut succeeds");
    assert_eq!(partition.assignments(), clusters(expected).as_slice());
    assert_eq!(dendrogram.cluster_count_at(tau), partition.cluster_count());
}

#[test]
fn average_linkage_uses_mean_distances() {
    let dendrogram = build_dendrogram(&abc(), Linkage::Average).expect("dendrogram builds");
    let values: Vec<f32> = dendrogram.events().iter().map(|event| event.value()).collect();
    assert_eq!(values, vec![1.0, 2.5]);
    assert_eq!(dendrogram.cluster_count_at(2.0), 2);
    assert_eq!(dendrogram.cluster_count_at(2.5), 1);
}

#[test]
fn tree_has_one_internal_node_per_event() {
    let dendrogram = build_dendrogram(&abc(), Linkage::Single).expect("dendrogram builds");
    let tree = dendrogram.tree();
    assert_eq!(tree.len(), 5);
    assert!(tree[..3].iter().all(LinkageNode::is_leaf));

    let root = tree[4];
    assert_eq!(root.size(), 3);
    assert_eq!(root.value(), 2.0);
    assert_eq!(root.left(), Some(3));
    assert_eq!(root.right(), Some(2));
    assert_eq!(tree[3].left(), Some(0));
    assert_eq!(tree[3].right(), Some(1));
}

#[rstest]
#[case::empty(0)]
#[case::single_leaf(1)]
fn trivial_dendrograms(#[case] n: u64) {
    let matrix =
        DistanceMatrix::from_pairs((0..n).map(MotifId::new).collect(), [], 1.0).expect("valid");
    for linkage in [Linkage::Single, Linkage::Average] {
        let dendrogram = build_dendrogram(&matrix, linkage).expect("dendrogram builds");
        assert!(dendrogram.events().is_empty());
        assert_eq!(dendrogram.max_merge_value(), None);
        let partition = dendrogram.partition_at(10.0).expect("cut succeeds");
        assert_eq!(partition.cluster_count(), n as usize);
    }
}

#[test]
fn zero_distances_stay_apart_at_zero_threshold() {
    let matrix =
        DistanceMatrix::from_pairs(vec![MotifId::new(1), MotifId::new(2)], [], 0.0).expect("valid");
    let dendrogram = build_dendrogram(&matrix, Linkage::Single).expect("dendrogram builds");
    assert_eq!(dendrogram.cluster_count_at(0.0), 2);
    assert_eq!(dendrogram.cluster_count_at(f32::MIN_POSITIVE), 1);
}

fn matrix_strategy() -> impl Strategy<Value = DistanceMatrix> {
    (1usize..16).prop_flat_map(|n| {
        let pairs = n * (n - 1) / 2;
        prop::collection::vec(0.0f32..10.0, pairs).prop_map(move |condensed| {
            DistanceMatrix::from_condensed((0..n as u64).map(MotifId::new).collect(), condensed)
                .expect("generated matrix is valid")
        })
    })
}

fn linkage_strategy() -> impl Strategy<Value = Linkage> {
    prop_oneof![Just(Linkage::Single), Just(Linkage::Average)]
}

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn events_are_complete_and_non_decreasing(
        matrix in matrix_strategy(),
        linkage in linkage_strategy(),
    ) {
        let dendrogram = build_dendrogram(&matrix, linkage).expect("dendrogram builds");
        prop_assert_eq!(dendrogram.events().len(), matrix.len() - 1);
        for pair in dendrogram.events().windows(2) {
            prop_assert!(pair[0].value() <= pair[1].value());
        }
    }

    #[test]
    fn partitions_coarsen_as_the_threshold_grows(
        matrix in matrix_strategy(),
        linkage in linkage_strategy(),
        low in 0.0f32..12.0,
        delta in 0.0f32..12.0,
    ) {
        let dendrogram = build_dendrogram(&matrix, linkage).expect("dendrogram builds");
        let fine = dendrogram.partition_at(low).expect("cut succeeds");
        let coarse = dendrogram.partition_at(low + delta).expect("cut succeeds");

        prop_assert!(fine.cluster_count() >= coarse.cluster_count());
        let fine_ids = fine.assignments();
        let coarse_ids = coarse.assignments();
        for i in 0..fine_ids.len() {
            for j in (i + 1)..fine_ids.len() {
                if fine_ids[i] == fine_ids[j] {
                    prop_assert_eq!(coarse_ids[i], coarse_ids[j]);
                }
            }
        }
    }

    #[test]
    fn single_linkage_joins_every_pair_within_threshold(
        matrix in matrix_strategy(),
        tau in 0.01f32..10.0,
    ) {
        let dendrogram = build_dendrogram(&matrix, Linkage::Single).expect("dendrogram builds");
        let partition = dendrogram.partition_at(tau).expect("cut succeeds");
        for (i, j, value) in matrix.pairs() {
            if value <= tau {
                prop_assert_eq!(partition.assignments()[i], partition.assignments()[j]);
            }
        }
    }
}
