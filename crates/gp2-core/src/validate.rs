//! The `valid_graph` consistency predicate.
//!
//! Walks every node and edge cross-checking recorded degrees, incidence
//! membership, cached label classes, class-index placement, and root-flag
//! state against [`GraphStore`]'s actual structure.

use std::fmt;

use gp2_common::{EdgeIndex, LabelClass, NodeIndex};

use crate::diagnostics::{self, Reporter, Severity};
use crate::graph::GraphStore;

/// A single broken invariant, naming the entity and what was expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A node's recorded degree does not match its incidence container's
    /// populated count (invariant: degree counters are always in sync).
    DegreeMismatch {
        /// The affected node.
        node: NodeIndex,
        /// `true` for out-degree, `false` for in-degree.
        outgoing: bool,
        /// The node's recorded counter.
        recorded: usize,
        /// The incidence container's actual populated count.
        actual: usize,
    },
    /// An edge's source/target does not reference a live node.
    DanglingEndpoint {
        /// The affected edge.
        edge: EdgeIndex,
        /// `true` if the source is dangling, `false` if the target is.
        source: bool,
        /// The referenced (non-live) node index.
        node: NodeIndex,
    },
    /// An edge appears in a node's incidence array, but that edge's
    /// own source/target does not point back at the node.
    IncidenceMismatch {
        /// The affected node.
        node: NodeIndex,
        /// The affected edge.
        edge: EdgeIndex,
        /// `true` for out-incidence, `false` for in-incidence.
        outgoing: bool,
    },
    /// A node's cached label class does not match what its label actually
    /// classifies to.
    StaleNodeClass {
        /// The affected node.
        node: NodeIndex,
        /// The cached class.
        cached: LabelClass,
        /// The class the label actually computes to.
        actual: LabelClass,
    },
    /// An edge's cached label class does not match what its label actually
    /// classifies to.
    StaleEdgeClass {
        /// The affected edge.
        edge: EdgeIndex,
        /// The cached class.
        cached: LabelClass,
        /// The class the label actually computes to.
        actual: LabelClass,
    },
    /// A node appears in the class index under a class other than its own
    /// cached class, or is missing from its own class's bucket.
    ClassIndexMismatch {
        /// The affected node.
        node: NodeIndex,
    },
    /// An edge's class-index placement disagrees with its cached class.
    EdgeClassIndexMismatch {
        /// The affected edge.
        edge: EdgeIndex,
    },
    /// A node listed as a root does not have its root flag set, or vice
    /// versa.
    RootFlagMismatch {
        /// The affected node.
        node: NodeIndex,
        /// Whether the node's own flag says it is a root.
        flagged_root: bool,
        /// Whether the node appears in the root list.
        listed_root: bool,
    },
    /// A slotted container's free-stack/occupied-slot partition is broken,
    /// surfaced verbatim from [`crate::slotted::SlotMap::diagnose`].
    SlotMapInconsistency(String),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::DegreeMismatch { node, outgoing, recorded, actual } => {
                let dir = if *outgoing { "out" } else { "in" };
                write!(f, "node {node} recorded {dir}-degree {recorded}, actual {actual}")
            }
            Violation::DanglingEndpoint { edge, source, node } => {
                let end = if *source { "source" } else { "target" };
                write!(f, "edge {edge} {end} {node} is not a live node")
            }
            Violation::IncidenceMismatch { node, edge, outgoing } => {
                let dir = if *outgoing { "out" } else { "in" };
                write!(f, "node {node}'s {dir}-incidence lists edge {edge}, which does not point back")
            }
            Violation::StaleNodeClass { node, cached, actual } => {
                write!(f, "node {node} cached class {cached:?}, actual {actual:?}")
            }
            Violation::StaleEdgeClass { edge, cached, actual } => {
                write!(f, "edge {edge} cached class {cached:?}, actual {actual:?}")
            }
            Violation::ClassIndexMismatch { node } => {
                write!(f, "node {node} is missing from (or misplaced in) its class's index bucket")
            }
            Violation::EdgeClassIndexMismatch { edge } => {
                write!(f, "edge {edge} is missing from (or misplaced in) its class's index bucket")
            }
            Violation::RootFlagMismatch { node, flagged_root, listed_root } => {
                write!(
                    f,
                    "node {node} root flag is {flagged_root} but root-list membership is {listed_root}"
                )
            }
            Violation::SlotMapInconsistency(detail) => write!(f, "{detail}"),
        }
    }
}

/// The outcome of [`validate`]: every invariant violation found, in no
/// particular order. Empty means the graph is structurally consistent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Every violation found.
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Whether the graph passed every check.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Walks `graph` checking every structural invariant it is expected to
/// maintain, returning every violation found.
///
/// This never mutates `graph` and never panics; a malformed graph produces
/// a non-empty [`ValidationReport`], not an error. Every violation found is
/// also routed through `reporter`'s diagnostic sinks, at [`Severity::Error`]:
/// a broken invariant, not a rejected operation.
#[must_use]
pub fn validate(graph: &GraphStore, reporter: Option<&dyn Reporter>) -> ValidationReport {
    let mut violations = Vec::new();

    for entity in graph.node_slots().diagnose("nodes") {
        violations.push(Violation::SlotMapInconsistency(entity));
    }
    for entity in graph.edge_slots().diagnose("edges") {
        violations.push(Violation::SlotMapInconsistency(entity));
    }
    for node in graph.iter_nodes() {
        let index = node.index();

        for entity in node.out_incidence().diagnose(&format!("n{index}.out")) {
            violations.push(Violation::SlotMapInconsistency(entity));
        }
        for entity in node.in_incidence().diagnose(&format!("n{index}.in")) {
            violations.push(Violation::SlotMapInconsistency(entity));
        }

        let out_actual = node_out_incidence_len(graph, index);
        if node.out_degree() != out_actual {
            violations.push(Violation::DegreeMismatch {
                node: index,
                outgoing: true,
                recorded: node.out_degree(),
                actual: out_actual,
            });
        }
        let in_actual = node_in_incidence_len(graph, index);
        if node.in_degree() != in_actual {
            violations.push(Violation::DegreeMismatch {
                node: index,
                outgoing: false,
                recorded: node.in_degree(),
                actual: in_actual,
            });
        }

        if let Ok(actual) = node.label().class() {
            if actual != node.class() {
                violations.push(Violation::StaleNodeClass {
                    node: index,
                    cached: node.class(),
                    actual,
                });
            }
        }

        if !graph.nodes_by_class(node.class()).any(|n| n == index) {
            violations.push(Violation::ClassIndexMismatch { node: index });
        }

        let flagged_root = node.is_root();
        let listed_root = graph.root_nodes().any(|n| n == index);
        if flagged_root != listed_root {
            violations.push(Violation::RootFlagMismatch {
                node: index,
                flagged_root,
                listed_root,
            });
        }
    }

    for edge in graph.iter_edges() {
        let index = edge.index();

        if graph.get_node(edge.source()).is_err() {
            violations.push(Violation::DanglingEndpoint {
                edge: index,
                source: true,
                node: edge.source(),
            });
        } else if let Ok(source_node) = graph.get_node(edge.source()) {
            if !source_node.out_incidence().iterate().any(|(_, &e)| e == index) {
                violations.push(Violation::IncidenceMismatch {
                    node: edge.source(),
                    edge: index,
                    outgoing: true,
                });
            }
        }

        if graph.get_node(edge.target()).is_err() {
            violations.push(Violation::DanglingEndpoint {
                edge: index,
                source: false,
                node: edge.target(),
            });
        } else if let Ok(target_node) = graph.get_node(edge.target()) {
            if !target_node.in_incidence().iterate().any(|(_, &e)| e == index) {
                violations.push(Violation::IncidenceMismatch {
                    node: edge.target(),
                    edge: index,
                    outgoing: false,
                });
            }
        }

        if let Ok(actual) = edge.label().class() {
            if actual != edge.class() {
                violations.push(Violation::StaleEdgeClass {
                    edge: index,
                    cached: edge.class(),
                    actual,
                });
            }
        }

        if !graph.edges_by_class(edge.class()).any(|e| e == index) {
            violations.push(Violation::EdgeClassIndexMismatch { edge: index });
        }
    }

    for violation in &violations {
        diagnostics::emit(
            &diagnostics::Diagnostic {
                severity: Severity::Error,
                message: violation.to_string(),
            },
            reporter,
        );
    }

    ValidationReport { violations }
}

fn node_out_incidence_len(graph: &GraphStore, node: NodeIndex) -> usize {
    graph.get_node(node).map_or(0, |n| n.out_incidence().len())
}

fn node_in_incidence_len(graph: &GraphStore, node: NodeIndex) -> usize {
    graph.get_node(node).map_or(0, |n| n.in_incidence().len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freshly_built_graph_is_valid() {
        let mut g = GraphStore::new();
        let a = g.add_node(true, None, None).unwrap();
        let b = g.add_node(false, None, None).unwrap();
        g.add_edge(false, None, a, b, None).unwrap();

        let report = validate(&g, None);
        assert!(report.is_valid(), "{report:?}");
    }

    #[test]
    fn empty_graph_is_valid() {
        let report = validate(&GraphStore::new(), None);
        assert!(report.is_valid());
    }
}
