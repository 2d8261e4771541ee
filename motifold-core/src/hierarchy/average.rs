//! Average-linkage merges via the nearest-neighbour chain.
//!
//! Average linkage is reducible, so following a chain of nearest neighbours
//! until two clusters are reciprocal nearest neighbours always finds a merge
//! of the final hierarchy. Distances to the merged cluster follow the
//! Lance-Williams update `d(k, a ∪ b) = (|a| d(k, a) + |b| d(k, b)) / (|a| + |b|)`.
//!
//! Merges come out in discovery order, not value order; the caller sorts them
//! before replaying them through the merge engine.

use crate::{distance::DistanceMatrix, merge::MergeCandidate};

struct ClusterTable {
    n: usize,
    distances: Vec<f64>,
    size: Vec<usize>,
    active: Vec<bool>,
}

impl ClusterTable {
    fn from_matrix(matrix: &DistanceMatrix) -> Self {
        let n = matrix.len();
        let mut distances = vec![0.0; n * n];
        for (i, j, value) in matrix.pairs() {
            distances[i * n + j] = f64::from(value);
            distances[j * n + i] = f64::from(value);
        }
        Self {
            n,
            distances,
            size: vec![1; n],
            active: vec![true; n],
        }
    }

    fn distance(&self, a: usize, b: usize) -> f64 {
        self.distances[a * self.n + b]
    }

    fn set_distance(&mut self, a: usize, b: usize, value: f64) {
        self.distances[a * self.n + b] = value;
        self.distances[b * self.n + a] = value;
    }

    /// Nearest active neighbour of `a`.
    ///
    /// Ties prefer `previous` (the chain element before `a`) and then the
    /// smallest index, which keeps the chain from cycling.
    fn nearest(&self, a: usize, previous: Option<usize>) -> Option<usize> {
        let mut best = previous.map(|p| (p, self.distance(a, p)));
        for k in (0..self.n).filter(|&k| k != a && self.active[k]) {
            let candidate = self.distance(a, k);
            match best {
                Some((_, current)) if candidate >= current => {}
                _ => best = Some((k, candidate)),
            }
        }
        best.map(|(k, _)| k)
    }

    /// Merges `a` and `b` into the smaller slot.
    fn merge(&mut self, a: usize, b: usize) {
        let (keep, absorbed) = if a < b { (a, b) } else { (b, a) };
        let (size_keep, size_absorbed) = (self.size[keep] as f64, self.size[absorbed] as f64);
        for k in 0..self.n {
            if !self.active[k] || k == keep || k == absorbed {
                continue;
            }
            let merged = (size_keep * self.distance(keep, k)
                + size_absorbed * self.distance(absorbed, k))
                / (size_keep + size_absorbed);
            self.set_distance(keep, k, merged);
        }
        self.active[absorbed] = false;
        self.size[keep] += self.size[absorbed];
    }
}

/// Finds the `n - 1` average-linkage merges of `matrix`.
///
/// Each candidate names one leaf from each of the two merged clusters; slot
/// `i` of the working table always contains leaf `i`.
pub(super) fn average_linkage_merges(matrix: &DistanceMatrix) -> Vec<MergeCandidate> {
    let mut table = ClusterTable::from_matrix(matrix);
    let n = table.n;
    let mut merges = Vec::with_capacity(n.saturating_sub(1));
    let mut chain: Vec<usize> = Vec::with_capacity(n);

    while merges.len() + 1 < n {
        if chain.is_empty() {
            match table.active.iter().position(|&active| active) {
                Some(first) => chain.push(first),
                None => break,
            }
        }
        let Some(&a) = chain.last() else { break };
        let previous = chain.len().checked_sub(2).map(|index| chain[index]);
        let Some(b) = table.nearest(a, previous) else {
            break;
        };

        if Some(b) == previous {
            chain.truncate(chain.len() - 2);
            let value = table.distance(a, b);
            merges.push(MergeCandidate::new(a, b, value as f32));
            table.merge(a, b);
        } else {
            chain.push(b);
        }
    }

    merges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::MotifId;

    fn matrix(condensed: Vec<f32>, n: u64) -> DistanceMatrix {
        DistanceMatrix::from_condensed((0..n).map(MotifId::new).collect(), condensed)
            .expect("matrix is valid")
    }

    #[test]
    fn merges_reciprocal_neighbours_first() {
        // 0 and 1 are close; 2 sits at 4 and 6 from them.
        let merges = average_linkage_merges(&matrix(vec![1.0, 4.0, 6.0], 3));
        assert_eq!(merges.len(), 2);
        assert_eq!(merges[0].items(), (0, 1));
        assert_eq!(merges[0].value(), 1.0);
        assert_eq!(merges[1].items(), (0, 2));
        assert_eq!(merges[1].value(), 5.0);
    }

    #[test]
    fn weights_merged_distances_by_cluster_size() {
        // {0,1} merge at 1, then {0,1,2} at mean(2,2)=2, then 3 joins at
        // mean(9,9,6)=8.
        let merges = average_linkage_merges(&matrix(vec![1.0, 2.0, 9.0, 2.0, 9.0, 6.0], 4));
        let values: Vec<f32> = merges.iter().map(MergeCandidate::value).collect();
        assert_eq!(values, vec![1.0, 2.0, 8.0]);
    }

    #[test]
    fn trivial_inputs_have_no_merges() {
        assert!(average_linkage_merges(&matrix(vec![], 0)).is_empty());
        assert!(average_linkage_merges(&matrix(vec![], 1)).is_empty());
    }
}
