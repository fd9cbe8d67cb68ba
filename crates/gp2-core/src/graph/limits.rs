//! Configurable compile-time ceilings.
//!
//! Incidence arrays always grow on demand rather than being capped by a
//! fixed-capacity backing array. A [`GraphLimits`] ceiling is instead an
//! explicit guard checked at the `add_node`/`add_edge` call site, surfaced
//! as [`gp2_common::Error::LimitExceeded`] — never a backing-array bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphLimits {
    /// Maximum number of live nodes. `add_node` rejects once reached.
    pub max_nodes: usize,
    /// Maximum number of live edges. `add_edge` rejects once reached.
    pub max_edges: usize,
    /// Maximum number of edges incident to a single node (counting both
    /// directions independently: a node may have up to this many outgoing
    /// and, separately, this many incoming edges).
    pub max_incident_edges: usize,
}

impl Default for GraphLimits {
    fn default() -> Self {
        Self {
            max_nodes: usize::MAX,
            max_edges: usize::MAX,
            max_incident_edges: usize::MAX,
        }
    }
}

impl GraphLimits {
    /// No configured ceiling on anything.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }
}
