//! Unit tests for supernode aggregation and graph compression.

use proptest::prelude::*;
use rstest::rstest;

use super::*;
use crate::{
    hierarchy::Partition,
    ids::{ClusterId, MotifId, NodeId},
    motif::{MotifCatalog, WeightedEdge},
    test_utils::{star_motif, suite_proptest_config},
};

fn catalog() -> MotifCatalog {
    MotifCatalog::new(vec![
        star_motif(1, &[1.0]),
        star_motif(2, &[1.0, 1.0, 1.0]),
        star_motif(3, &[1.0, 1.0]),
        star_motif(4, &[]),
    ])
    .expect("catalog is valid")
}

fn partition(assignments: &[u64]) -> Partition {
    Partition::try_new(
        (1..=assignments.len() as u64).map(MotifId::new).collect(),
        assignments.iter().copied().map(ClusterId::new).collect(),
    )
    .expect("assignments are contiguous")
}

fn edge(from: u64, to: u64, weight: f32) -> WeightedEdge {
    WeightedEdge::new(NodeId::new(from), NodeId::new(to), weight)
}

#[test]
fn supernodes_summarise_member_sizes() {
    let supernodes = aggregate(&partition(&[0, 0, 1, 0]), &catalog()).expect("ids are known");
    assert_eq!(supernodes.len(), 2);

    let first = &supernodes[0];
    assert_eq!(first.cluster(), ClusterId::new(0));
    assert_eq!(first.representative(), MotifId::new(1));
    assert_eq!(
        first.members(),
        &[MotifId::new(1), MotifId::new(2), MotifId::new(4)]
    );
    assert_eq!(first.member_count(), 3);
    assert!((first.mean_size() - 4.0 / 3.0).abs() < 1e-12);
    assert!((first.size_variance() - 14.0 / 9.0).abs() < 1e-12);

    let second = &supernodes[1];
    assert_eq!(second.representative(), MotifId::new(3));
    assert_eq!(second.mean_size(), 2.0);
    assert_eq!(second.size_variance(), 0.0);
}

#[test]
fn aggregate_rejects_unknown_motifs() {
    let stray = Partition::try_new(vec![MotifId::new(99)], vec![ClusterId::new(0)])
        .expect("assignments are contiguous");
    let err = aggregate(&stray, &catalog()).expect_err("motif 99 is unknown");
    assert_eq!(err, AggregateError::UnknownMotif { id: MotifId::new(99) });
    assert_eq!(err.code().as_str(), "AGGREGATE_UNKNOWN_MOTIF");
}

#[rstest]
#[case::connected(vec![edge(1, 2, 1.0), edge(2, 4, 1.0)], 2)]
#[case::split(vec![edge(1, 2, 1.0)], 3)]
#[case::cross_cluster_edges_do_not_join(vec![edge(1, 3, 1.0), edge(3, 4, 1.0)], 4)]
fn split_follows_graph_components(#[case] edges: Vec<WeightedEdge>, #[case] expected: usize) {
    let refined = split_disconnected(&partition(&[0, 0, 1, 0]), &catalog(), &edges)
        .expect("ids are known");
    assert_eq!(refined.cluster_count(), expected);
}

#[test]
fn split_numbers_components_by_first_leaf() {
    let refined = split_disconnected(&partition(&[0, 0, 0, 0]), &catalog(), &[edge(2, 4, 1.0)])
        .expect("ids are known");
    let expected: Vec<ClusterId> = [0, 1, 2, 1].into_iter().map(ClusterId::new).collect();
    assert_eq!(refined.assignments(), expected.as_slice());
}

#[test]
fn compression_drops_internal_edges_and_averages_links() {
    let catalog = catalog();
    let supernodes = aggregate(&partition(&[0, 0, 1, 1]), &catalog).expect("ids are known");
    let graph = compress_graph(
        supernodes,
        &catalog,
        &[
            edge(1, 2, 9.0),
            edge(1, 3, 2.0),
            edge(4, 2, 4.0),
            edge(3, 50, 1.5),
        ],
    )
    .expect("ids are known");

    let links: Vec<(u64, u64, f32, usize)> = graph
        .links()
        .iter()
        .map(|link| {
            (
                link.source().get(),
                link.target().get(),
                link.weight(),
                link.multiplicity(),
            )
        })
        .collect();
    assert_eq!(links, vec![(1, 3, 3.0, 2), (3, 50, 1.5, 1)]);
    assert_eq!(graph.supernodes().len(), 2);
}

fn bare_catalog(motifs: u64) -> MotifCatalog {
    MotifCatalog::new((1..=motifs).map(|id| star_motif(id, &[])).collect())
        .expect("catalog is valid")
}

#[test]
fn cluster_subgraph_keeps_edges_inside_the_cluster() {
    let subgraph = cluster_subgraph(
        &partition(&[0, 0, 1, 0]),
        &catalog(),
        &[
            edge(2, 1, 5.0),
            edge(1, 2, 8.0),
            edge(4, 4, 1.0),
            edge(2, 3, 2.0),
            edge(4, 9, 3.0),
        ],
        ClusterId::new(0),
    )
    .expect("cluster 0 exists");

    assert_eq!(subgraph.cluster(), ClusterId::new(0));
    assert_eq!(
        subgraph.nodes(),
        &[NodeId::new(1), NodeId::new(2), NodeId::new(4)]
    );
    assert_eq!(
        subgraph.adjacency(),
        &[0.0, 5.0, 0.0, 5.0, 0.0, 0.0, 0.0, 0.0, 1.0]
    );
    assert_eq!(subgraph.edge_count(), 2);
    assert_eq!(subgraph.row(2), Some(&[0.0, 0.0, 1.0][..]));
    assert_eq!(subgraph.weight(1, 0), Some(5.0));
    assert_eq!(subgraph.weight(3, 0), None);
    assert!(subgraph.has_edge(2, 2));
    assert!(!subgraph.has_edge(0, 2));
}

#[rstest]
#[case::past_the_last_cluster(2)]
#[case::far_out_of_range(u64::MAX)]
fn cluster_subgraph_rejects_unknown_clusters(#[case] cluster: u64) {
    let err = cluster_subgraph(
        &partition(&[0, 0, 1, 0]),
        &catalog(),
        &[],
        ClusterId::new(cluster),
    )
    .expect_err("partition has two clusters");
    assert_eq!(
        err,
        AggregateError::UnknownCluster {
            cluster: ClusterId::new(cluster),
            clusters: 2,
        }
    );
    assert_eq!(err.code().as_str(), "AGGREGATE_UNKNOWN_CLUSTER");
}

#[test]
fn isomorphic_clusters_share_a_pattern_regardless_of_weights() {
    let patterns = unique_patterns(
        &partition(&[0, 0, 1, 1]),
        &catalog(),
        &[edge(1, 2, 1.0), edge(4, 3, 7.0)],
    )
    .expect("ids are known");

    assert_eq!(patterns.len(), 1);
    let pattern = &patterns[0];
    assert_eq!(pattern.count(), 2);
    assert_eq!(pattern.clusters(), &[ClusterId::new(0), ClusterId::new(1)]);
    assert_eq!(
        pattern.nodes(),
        &[NodeId::new(1), NodeId::new(2), NodeId::new(3), NodeId::new(4)]
    );
    assert_eq!(pattern.sample().cluster(), ClusterId::new(0));
    assert_eq!(pattern.sample().weight(0, 1), Some(1.0));
}

#[test]
fn equal_degree_sequences_do_not_imply_a_shared_pattern() {
    // Cluster 0 is two triangles, clusters 1 and 2 are six-cycles listed in
    // different orders. Every node has degree two in all three.
    let assignments: Vec<u64> = (0..18).map(|index| index / 6).collect();
    let edges = [
        edge(1, 2, 1.0),
        edge(2, 3, 1.0),
        edge(3, 1, 1.0),
        edge(4, 5, 1.0),
        edge(5, 6, 1.0),
        edge(6, 4, 1.0),
        edge(7, 8, 1.0),
        edge(8, 9, 1.0),
        edge(9, 10, 1.0),
        edge(10, 11, 1.0),
        edge(11, 12, 1.0),
        edge(12, 7, 1.0),
        edge(13, 15, 2.0),
        edge(15, 17, 2.0),
        edge(17, 14, 2.0),
        edge(14, 16, 2.0),
        edge(16, 18, 2.0),
        edge(18, 13, 2.0),
    ];
    let patterns = unique_patterns(&partition(&assignments), &bare_catalog(18), &edges)
        .expect("ids are known");

    let grouped: Vec<Vec<ClusterId>> = patterns
        .iter()
        .map(|pattern| pattern.clusters().to_vec())
        .collect();
    assert_eq!(
        grouped,
        vec![
            vec![ClusterId::new(0)],
            vec![ClusterId::new(1), ClusterId::new(2)],
        ]
    );
}

#[test]
fn self_loops_are_part_of_the_shape() {
    let patterns = unique_patterns(
        &partition(&[0, 0, 1, 1]),
        &catalog(),
        &[edge(1, 2, 1.0), edge(1, 1, 1.0), edge(3, 4, 1.0), edge(4, 4, 1.0)],
    )
    .expect("ids are known");
    assert_eq!(patterns.len(), 1);

    let patterns = unique_patterns(
        &partition(&[0, 0, 1, 1]),
        &catalog(),
        &[edge(1, 2, 1.0), edge(1, 1, 1.0), edge(3, 4, 1.0)],
    )
    .expect("ids are known");
    assert_eq!(patterns.len(), 2);
}

fn relabelled_graph_strategy() -> impl Strategy<Value = (Vec<(u64, u64)>, Vec<u64>)> {
    let pairs: Vec<(u64, u64)> = (0..5)
        .flat_map(|i| ((i + 1)..5).map(move |j| (i, j)))
        .collect();
    (
        prop::collection::vec(any::<bool>(), pairs.len()),
        Just((0..5).collect::<Vec<u64>>()).prop_shuffle(),
    )
        .prop_map(move |(keep, permutation)| {
            let chosen = pairs
                .iter()
                .zip(keep)
                .filter_map(|(&pair, kept)| kept.then_some(pair))
                .collect();
            (chosen, permutation)
        })
}

proptest! {
    #![proptest_config(suite_proptest_config(64))]

    #[test]
    fn relabelled_copies_share_a_pattern((pairs, permutation) in relabelled_graph_strategy()) {
        let mut edges = Vec::new();
        for &(i, j) in &pairs {
            edges.push(edge(i + 1, j + 1, 1.0));
            edges.push(edge(
                permutation[i as usize] + 6,
                permutation[j as usize] + 6,
                3.0,
            ));
        }
        let patterns = unique_patterns(
            &partition(&[0, 0, 0, 0, 0, 1, 1, 1, 1, 1]),
            &bare_catalog(10),
            &edges,
        )
        .expect("ids are known");
        prop_assert_eq!(patterns.len(), 1);
        prop_assert_eq!(patterns[0].count(), 2);
        prop_assert_eq!(patterns[0].sample().edge_count(), pairs.len());
    }
}
