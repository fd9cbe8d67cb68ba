//! Lightweight diagnostic statistics for a [`crate::graph::GraphStore`].
//!
//! Exists purely for diagnostics and tests; there is no query planner in
//! this core to feed.

use gp2_common::LabelClass;

/// A point-in-time snapshot of a graph store's size and shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphStatistics {
    /// Live node count.
    pub node_count: usize,
    /// Live edge count.
    pub edge_count: usize,
    /// Per-class live node counts, indexed by [`LabelClass::slot`].
    pub nodes_per_class: [usize; LabelClass::COUNT],
    /// Per-class live edge counts, indexed by [`LabelClass::slot`].
    pub edges_per_class: [usize; LabelClass::COUNT],
    /// Largest total degree (in + out) observed across all nodes.
    pub max_degree: usize,
}

impl GraphStatistics {
    /// Count of nodes classified under `class`.
    #[must_use]
    pub fn nodes_in_class(&self, class: LabelClass) -> usize {
        self.nodes_per_class[class.slot()]
    }

    /// Count of edges classified under `class`.
    #[must_use]
    pub fn edges_in_class(&self, class: LabelClass) -> usize {
        self.edges_per_class[class.slot()]
    }
}
