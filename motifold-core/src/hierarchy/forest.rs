//! Binary linkage tree recovered from merge events.
//!
//! Every event joins the tree nodes currently standing for its two groups
//! into a new internal node. Event representatives index a table of those
//! nodes, so no union-find is needed to rebuild the tree.

use crate::merge::MergeEvent;

/// Node of a binary dendrogram tree.
///
/// The first `n` nodes are leaves in leaf order; internal node `n + k` is
/// produced by the `k`-th merge event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkageNode {
    left: Option<usize>,
    right: Option<usize>,
    value: f32,
    size: usize,
    leaf: Option<usize>,
}

impl LinkageNode {
    /// Child holding the merge event's left group.
    #[rustfmt::skip]
    #[must_use]
    pub const fn left(&self) -> Option<usize> { self.left }

    /// Child holding the merge event's right group.
    #[rustfmt::skip]
    #[must_use]
    pub const fn right(&self) -> Option<usize> { self.right }

    /// Merge value of an internal node; `0` for leaves.
    #[rustfmt::skip]
    #[must_use]
    pub const fn value(&self) -> f32 { self.value }

    /// Number of leaves below this node.
    #[rustfmt::skip]
    #[must_use]
    pub const fn size(&self) -> usize { self.size }

    /// Leaf index of a leaf node.
    #[rustfmt::skip]
    #[must_use]
    pub const fn leaf(&self) -> Option<usize> { self.leaf }

    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.leaf.is_some()
    }
}

pub(super) fn linkage_tree(leaf_count: usize, events: &[MergeEvent]) -> Vec<LinkageNode> {
    let mut nodes = Vec::with_capacity(leaf_count + events.len());
    for leaf in 0..leaf_count {
        nodes.push(LinkageNode {
            left: None,
            right: None,
            value: 0.0,
            size: 1,
            leaf: Some(leaf),
        });
    }

    let mut group_node: Vec<usize> = (0..leaf_count).collect();
    for event in events {
        let left_node = group_node[event.left()];
        let right_node = group_node[event.right()];
        let new_id = nodes.len();
        let size = nodes[left_node].size + nodes[right_node].size;
        nodes.push(LinkageNode {
            left: Some(left_node),
            right: Some(right_node),
            value: event.value(),
            size,
            leaf: None,
        });
        group_node[event.survivor()] = new_id;
    }
    nodes
}
