//! Persistence extraction over the fixture graph and its motifs.

mod common;

use common::{TWO_TRIANGLES, ego_motif, two_triangles};
use motifold_core::{
    NodeId, WeightedEdge, extract_persistence_pairs, maximum_spanning_forest, motif_persistence,
};

#[test]
fn whole_graph_filtration_tracks_component_merges() {
    let edges = two_triangles().graph_edges();
    assert_eq!(edges.len(), TWO_TRIANGLES.len());

    let diagram = extract_persistence_pairs(&edges).expect("weights are valid");
    let deaths: Vec<f32> = diagram.finite().map(|pair| pair.death()).collect();
    assert_eq!(deaths, vec![1.0, 1.0, 2.0, 5.0, 5.0]);
    assert_eq!(diagram.component_count(), 1);
    assert_eq!(diagram.len(), 6);
    assert_eq!(diagram.total_persistence(), 14.0);
    assert!(diagram.pairs().iter().all(|pair| pair.birth() == 0.0));
}

#[test]
fn bridge_motif_persistence_follows_its_spanning_tree() {
    let motif = ego_motif(TWO_TRIANGLES, 3);
    let forest = maximum_spanning_forest(&motif.nodes(), &motif.spanning_edges())
        .expect("weights are valid");
    assert!(forest.is_tree());
    assert_eq!(forest.total_weight(), 12.0);
    assert_eq!(
        forest.excluded(),
        &[WeightedEdge::new(NodeId::new(2), NodeId::new(3), 5.0)]
    );

    let diagram = motif_persistence(&motif).expect("weights are valid");
    let deaths: Vec<f32> = diagram.finite().map(|pair| pair.death()).collect();
    assert_eq!(deaths, vec![2.0, 5.0, 5.0]);
    assert_eq!(diagram.essential().count(), 1);
}
