//! Unit and property tests for motif distances.

use proptest::prelude::*;
use rstest::rstest;

use super::*;
use crate::{
    builder::ExecutionStrategy,
    ids::MotifId,
    motif::{MotifCatalog, WeightProfile},
    test_utils::{star_motif, suite_proptest_config},
};

#[rstest]
#[case::identical(vec![1.0, 2.0, 3.0], vec![3.0, 1.0, 2.0], 0.0)]
#[case::shifted(vec![1.0, 2.0], vec![2.0, 3.0], 2.0)]
#[case::padded(vec![5.0], vec![1.0, 5.0], 1.0)]
#[case::both_empty(vec![], vec![], 0.0)]
#[case::one_empty(vec![], vec![0.5, 0.25], 0.75)]
#[case::negative_weights(vec![-1.0], vec![1.0, -1.0], 1.0)]
fn wasserstein_matches_hand_computed_values(
    #[case] left: Vec<f32>,
    #[case] right: Vec<f32>,
    #[case] expected: f32,
) {
    let distance = wasserstein_distance(&left, &right).expect("weights are finite");
    assert!((distance - expected).abs() < 1e-6, "got {distance}");
}

#[rstest]
#[case::left(vec![1.0, f32::NAN], vec![1.0], Side::Left, 1)]
#[case::right(vec![1.0], vec![f32::INFINITY], Side::Right, 0)]
fn wasserstein_rejects_non_finite_weights(
    #[case] left: Vec<f32>,
    #[case] right: Vec<f32>,
    #[case] side: Side,
    #[case] position: usize,
) {
    let err = wasserstein_distance(&left, &right).expect_err("weights are not finite");
    match err {
        DistanceError::NonFiniteWeight { which, index, .. } => {
            assert_eq!(which, side);
            assert_eq!(index, position);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        wasserstein_distance(&left, &right)
            .expect_err("weights are not finite")
            .code(),
        DistanceErrorCode::NonFiniteWeight
    );
}

#[test]
fn distances_beyond_the_f32_range_are_rejected() {
    let err = wasserstein_distance(&[3e38, 3e38], &[]).expect_err("sum overflows f32");
    assert!(matches!(err, DistanceError::Overflow { value } if value > f64::from(f32::MAX)));
    assert_eq!(err.code().as_str(), "DISTANCE_OVERFLOW");
}

#[test]
fn overflowing_matrix_entries_name_both_motifs() {
    let catalog = MotifCatalog::new(vec![
        star_motif(1, &[3e38, 3e38]),
        star_motif(2, &[]),
        star_motif(3, &[1.0]),
    ])
    .expect("weights are finite");

    let err = compute_distance_matrix(&catalog, WeightProfile::All, ExecutionStrategy::Sequential)
        .expect_err("distance overflows f32");
    assert_eq!(
        err,
        DistanceError::InvalidDistance {
            left: MotifId::new(1),
            right: MotifId::new(2),
            value: f32::INFINITY,
        }
    );
}

#[test]
fn matrix_names_the_motif_with_a_non_finite_weight() {
    let catalog = MotifCatalog::unvalidated(vec![
        star_motif(1, &[1.0]),
        star_motif(7, &[2.0, f32::NAN]),
    ]);
    let err = compute_distance_matrix(&catalog, WeightProfile::All, ExecutionStrategy::Sequential)
        .expect_err("weight is NaN");
    assert!(matches!(
        err,
        DistanceError::NonFiniteMotifWeight { id, index: 1, .. } if id == MotifId::new(7)
    ));
    assert_eq!(err.code(), DistanceErrorCode::NonFiniteMotifWeight);
}

#[test]
fn empty_motifs_are_indistinguishable() {
    let empty = star_motif(1, &[]);
    let other_empty = star_motif(9, &[]);
    let loaded = star_motif(20, &[0.5]);

    let same = motif_distance(&empty, &other_empty, WeightProfile::All).expect("finite");
    let different = motif_distance(&empty, &loaded, WeightProfile::All).expect("finite");
    assert_eq!(same, 0.0);
    assert!(different > 0.0);
}

#[rstest]
#[case::sequential(ExecutionStrategy::Sequential)]
#[case::auto(ExecutionStrategy::Auto)]
fn matrix_matches_pairwise_distances(#[case] strategy: ExecutionStrategy) {
    let catalog = MotifCatalog::new(vec![
        star_motif(0, &[1.0, 2.0]),
        star_motif(10, &[1.0]),
        star_motif(20, &[4.0, 4.0, 4.0]),
    ])
    .expect("catalog is valid");

    let matrix =
        compute_distance_matrix(&catalog, WeightProfile::All, strategy).expect("matrix builds");
    assert_eq!(matrix.len(), 3);
    assert_eq!(matrix.condensed().len(), 3);
    for (i, j, value) in matrix.pairs() {
        let expected = motif_distance(
            &catalog.motifs()[i],
            &catalog.motifs()[j],
            WeightProfile::All,
        )
        .expect("finite");
        assert_eq!(value, expected);
        assert_eq!(matrix.get(j, i), Some(expected));
    }
    assert_eq!(matrix.distance(MotifId::new(0), MotifId::new(10)), Some(2.0));
    assert_eq!(matrix.max_distance(), 11.0);
}

#[test]
fn condensed_length_is_checked() {
    let err = DistanceMatrix::from_condensed(vec![MotifId::new(1), MotifId::new(2)], vec![])
        .expect_err("one entry is required");
    assert_eq!(
        err,
        DistanceError::LengthMismatch {
            items: 2,
            expected: 1,
            actual: 0,
        }
    );
}

#[rstest]
#[case::negative(-0.5)]
#[case::nan(f32::NAN)]
fn supplied_distances_must_be_valid(#[case] value: f32) {
    let err = DistanceMatrix::from_condensed(vec![MotifId::new(1), MotifId::new(2)], vec![value])
        .expect_err("distance is invalid");
    assert_eq!(err.code(), DistanceErrorCode::InvalidDistance);
}

#[test]
fn pairs_fill_missing_entries() {
    let ids = vec![MotifId::new(1), MotifId::new(2), MotifId::new(3)];
    let matrix = DistanceMatrix::from_pairs(
        ids,
        [
            (MotifId::new(1), MotifId::new(2), 0.25),
            (MotifId::new(3), MotifId::new(3), 7.0),
        ],
        100.0,
    )
    .expect("pairs are valid");
    assert_eq!(matrix.condensed(), &[0.25, 100.0, 100.0]);
}

#[test]
fn pairs_reject_unknown_ids() {
    let err = DistanceMatrix::from_pairs(
        vec![MotifId::new(1), MotifId::new(2)],
        [(MotifId::new(1), MotifId::new(5), 1.0)],
        100.0,
    )
    .expect_err("id 5 is unknown");
    assert_eq!(err, DistanceError::UnknownMotif { id: MotifId::new(5) });
}

#[test]
fn matrix_rejects_duplicate_labels() {
    let err = DistanceMatrix::from_pairs(vec![MotifId::new(4), MotifId::new(4)], [], 1.0)
        .expect_err("label repeats");
    assert_eq!(err.code(), DistanceErrorCode::DuplicateMotif);
}

#[test]
fn empty_catalog_yields_empty_matrix() {
    let matrix = compute_distance_matrix(
        &MotifCatalog::default(),
        WeightProfile::All,
        ExecutionStrategy::Sequential,
    )
    .expect("empty matrix");
    assert!(matrix.is_empty());
    assert_eq!(matrix.max_distance(), 0.0);
}

fn weights() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-50.0f32..50.0, 0..12)
}

proptest! {
    #![proptest_config(suite_proptest_config(256))]

    #[test]
    fn distance_is_symmetric_and_non_negative(left in weights(), right in weights()) {
        let forward = wasserstein_distance(&left, &right).expect("finite");
        let backward = wasserstein_distance(&right, &left).expect("finite");
        prop_assert_eq!(forward, backward);
        prop_assert!(forward >= 0.0);
    }

    #[test]
    fn distance_to_self_is_zero(values in weights()) {
        prop_assert_eq!(wasserstein_distance(&values, &values).expect("finite"), 0.0);
    }

    #[test]
    fn distance_ignores_input_order(mut values in weights(), other in weights()) {
        let before = wasserstein_distance(&values, &other).expect("finite");
        values.reverse();
        prop_assert_eq!(wasserstein_distance(&values, &other).expect("finite"), before);
    }
}
