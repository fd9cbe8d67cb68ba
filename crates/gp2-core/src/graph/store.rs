//! The host-graph store.
//!
//! Every field is a plain owned value and every mutation goes through
//! `&mut self`: access is single-threaded and synchronous, with no
//! `RwLock`/atomics anywhere in this type.

use std::collections::VecDeque;

use gp2_common::{EdgeIndex, Error, Label, LabelClass, NodeIndex};

use crate::diagnostics::{self, Reporter};
use crate::graph::{Edge, GraphLimits, GraphStatistics, Node};
use crate::index::ClassIndex;
use crate::slotted::SlotMap;

/// Reports `result`'s error, if any, through `reporter`'s sinks before
/// handing the `Result` back to the caller unchanged.
fn reported<T>(result: Result<T, Error>, reporter: Option<&dyn Reporter>) -> Result<T, Error> {
    if let Err(ref err) = result {
        diagnostics::emit_error(err, reporter);
    }
    result
}

/// The host graph: a directed, labelled, possibly bidirectional multigraph,
/// and the sole mutable surface GP2 rule application acts through.
///
/// Ownership: the store exclusively owns its nodes and edges;
/// nodes own their incidence arrays and labels; edges own their labels.
/// Everything else — edge source/target, the class index, the root list —
/// is a weak reference: a plain index, never a handle that keeps an entity
/// alive.
#[derive(Debug, Clone)]
pub struct GraphStore {
    nodes: SlotMap<Node>,
    edges: SlotMap<Edge>,
    nodes_by_class: ClassIndex<NodeIndex>,
    edges_by_class: ClassIndex<EdgeIndex>,
    roots: VecDeque<NodeIndex>,
    limits: GraphLimits,
}

impl GraphStore {
    /// Creates a new empty store with unbounded limits.
    #[must_use]
    pub fn new() -> Self {
        Self::with_limits(GraphLimits::default())
    }

    /// Creates a new empty store with the given [`GraphLimits`] ceilings.
    #[must_use]
    pub fn with_limits(limits: GraphLimits) -> Self {
        Self {
            nodes: SlotMap::new(),
            edges: SlotMap::new(),
            nodes_by_class: ClassIndex::new(),
            edges_by_class: ClassIndex::new(),
            roots: VecDeque::new(),
            limits,
        }
    }

    /// The configured limits.
    #[must_use]
    pub fn limits(&self) -> GraphLimits {
        self.limits
    }

    // === Node operations ===

    /// Creates a node with the given root flag and label, inserting it into
    /// the node container and the class index, and — if `root` — the root
    /// list.
    ///
    /// `label` defaults to the sentinel empty label when `None`.
    ///
    /// # Errors
    ///
    /// [`Error::LimitExceeded`] if `max_nodes` is configured and reached.
    /// [`Error::LabelTooLong`] if the label's atom list exceeds the maximum
    /// length — the label is rejected before installation.
    ///
    /// Any error is also routed through `reporter`'s diagnostic sinks.
    pub fn add_node(
        &mut self,
        root: bool,
        label: Option<Label>,
        reporter: Option<&dyn Reporter>,
    ) -> Result<NodeIndex, Error> {
        if self.nodes.len() >= self.limits.max_nodes {
            let err = Error::LimitExceeded {
                what: "node",
                limit: self.limits.max_nodes,
            };
            diagnostics::emit_error(&err, reporter);
            return Err(err);
        }

        let label = label.unwrap_or_else(Label::empty);
        let class = reported(label.class(), reporter)?;

        let raw = self.nodes.insert(|idx| Node::new(NodeIndex::new(idx), root, label, class));
        let index = NodeIndex::new(raw);

        self.nodes_by_class.prepend(class, index);
        if root {
            self.roots.push_front(index);
        }

        Ok(index)
    }

    /// Removes a node.
    ///
    /// # Errors
    ///
    /// [`Error::DanglingIncidence`] if the node still has incident edges
    /// (in-degree + out-degree > 0); the graph is left unchanged. Any error
    /// from the underlying container accessor (out-of-range, empty-slot)
    /// propagates unchanged.
    ///
    /// Any error is also routed through `reporter`'s diagnostic sinks.
    pub fn remove_node(&mut self, index: NodeIndex, reporter: Option<&dyn Reporter>) -> Result<(), Error> {
        let node = reported(self.nodes.get(index.index()), reporter)?;
        let degree = node.in_degree() + node.out_degree();
        if degree > 0 {
            let err = Error::DanglingIncidence {
                index: index.index(),
                degree,
            };
            diagnostics::emit_error(&err, reporter);
            return Err(err);
        }
        let class = node.class();
        let was_root = node.is_root();

        self.nodes_by_class.remove(class, index);
        if was_root {
            if let Some(pos) = self.roots.iter().position(|&r| r == index) {
                self.roots.remove(pos);
            }
        }

        reported(self.nodes.remove(index.index()), reporter)?;
        Ok(())
    }

    /// Relabels or re-roots a node.
    ///
    /// If `toggle_root`, flips the root flag and adds/removes the node from
    /// the root list accordingly. If `change_label`, replaces the label
    /// (`None` installs the empty sentinel) and recomputes its class; if the
    /// class changed, moves the node between class buckets by removing it
    /// from the old bucket before prepending it to the new one.
    ///
    /// # Errors
    ///
    /// Propagates container accessor errors and [`Error::LabelTooLong`].
    /// Any error is also routed through `reporter`'s diagnostic sinks.
    pub fn relabel_node(
        &mut self,
        index: NodeIndex,
        new_label: Option<Label>,
        change_label: bool,
        toggle_root: bool,
        reporter: Option<&dyn Reporter>,
    ) -> Result<(), Error> {
        // Validate before mutating anything: commit fully or signal
        // before touching state.
        let new_class = reported(
            change_label
                .then(|| new_label.clone().unwrap_or_else(Label::empty).class())
                .transpose(),
            reporter,
        )?;

        if toggle_root {
            let node = reported(self.nodes.get_mut(index.index()), reporter)?;
            let flipped = !node.is_root();
            node.set_root(flipped);
        }

        if let (true, Some(new_class)) = (change_label, new_class) {
            let label = new_label.unwrap_or_else(Label::empty);
            let node = reported(self.nodes.get_mut(index.index()), reporter)?;
            let old_class = node.set_label(label, new_class);
            if old_class != new_class {
                self.nodes_by_class.move_class(old_class, new_class, index);
            }
        }

        if toggle_root {
            let is_root = reported(self.nodes.get(index.index()), reporter)?.is_root();
            let already_listed = self.roots.iter().any(|&r| r == index);
            match (is_root, already_listed) {
                (true, false) => self.roots.push_front(index),
                (false, true) => {
                    if let Some(pos) = self.roots.iter().position(|&r| r == index) {
                        self.roots.remove(pos);
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Returns the number of live nodes.
    #[must_use]
    pub fn number_of_nodes(&self) -> usize {
        self.nodes.len()
    }

    // === Edge operations ===

    /// Creates an edge from `source` to `target`.
    ///
    /// Both endpoints must be live node handles in this graph.
    ///
    /// # Errors
    ///
    /// Propagates `source`/`target` container accessor errors.
    /// [`Error::LimitExceeded`] if `max_edges` or either endpoint's
    /// `max_incident_edges` ceiling is reached. [`Error::LabelTooLong`] if
    /// the label is rejected.
    ///
    /// Any error is also routed through `reporter`'s diagnostic sinks.
    pub fn add_edge(
        &mut self,
        bidirectional: bool,
        label: Option<Label>,
        source: NodeIndex,
        target: NodeIndex,
        reporter: Option<&dyn Reporter>,
    ) -> Result<EdgeIndex, Error> {
        // Live-handle check, before any mutation.
        let source_out_degree = reported(self.nodes.get(source.index()), reporter)?
            .out_incidence()
            .len();
        let target_in_degree = reported(self.nodes.get(target.index()), reporter)?
            .in_incidence()
            .len();

        if self.edges.len() >= self.limits.max_edges {
            let err = Error::LimitExceeded {
                what: "edge",
                limit: self.limits.max_edges,
            };
            diagnostics::emit_error(&err, reporter);
            return Err(err);
        }
        if source_out_degree >= self.limits.max_incident_edges {
            let err = Error::LimitExceeded {
                what: "incident edge",
                limit: self.limits.max_incident_edges,
            };
            diagnostics::emit_error(&err, reporter);
            return Err(err);
        }
        if target_in_degree >= self.limits.max_incident_edges {
            let err = Error::LimitExceeded {
                what: "incident edge",
                limit: self.limits.max_incident_edges,
            };
            diagnostics::emit_error(&err, reporter);
            return Err(err);
        }

        let label = label.unwrap_or_else(Label::empty);
        let class = reported(label.class(), reporter)?;

        let raw = self
            .edges
            .insert(|idx| Edge::new(EdgeIndex::new(idx), bidirectional, label, class, source, target));
        let index = EdgeIndex::new(raw);

        reported(self.nodes.get_mut(source.index()), reporter)?
            .out_incidence_mut()
            .insert(|_| index);
        reported(self.nodes.get_mut(source.index()), reporter)?.increment_out_degree();
        reported(self.nodes.get_mut(target.index()), reporter)?
            .in_incidence_mut()
            .insert(|_| index);
        reported(self.nodes.get_mut(target.index()), reporter)?.increment_in_degree();

        self.edges_by_class.prepend(class, index);

        Ok(index)
    }

    /// Removes an edge, detaching it from both endpoints' incidence arrays
    /// and from the class index.
    ///
    /// # Errors
    ///
    /// Propagates container accessor errors. Signals
    /// [`Error::InvariantViolation`] if the edge is not found in the
    /// recorded source's out-incidence or the recorded target's
    /// in-incidence (a bug, since spec invariant 4 guarantees it is).
    ///
    /// Any error is also routed through `reporter`'s diagnostic sinks.
    pub fn remove_edge(&mut self, index: EdgeIndex, reporter: Option<&dyn Reporter>) -> Result<(), Error> {
        let (source, target, class) = {
            let edge = reported(self.edges.get(index.index()), reporter)?;
            (edge.source(), edge.target(), edge.class())
        };

        self.detach_from_incidence(source, index, Direction::Out, reporter)?;
        self.detach_from_incidence(target, index, Direction::In, reporter)?;

        self.edges_by_class.remove(class, index);
        reported(self.edges.remove(index.index()), reporter)?;

        Ok(())
    }

    fn detach_from_incidence(
        &mut self,
        node: NodeIndex,
        edge: EdgeIndex,
        direction: Direction,
        reporter: Option<&dyn Reporter>,
    ) -> Result<(), Error> {
        let node_ref = reported(self.nodes.get_mut(node.index()), reporter)?;
        let incidence = match direction {
            Direction::Out => node_ref.out_incidence(),
            Direction::In => node_ref.in_incidence(),
        };
        let Some((slot, _)) = incidence.iterate().find(|&(_, &e)| e == edge) else {
            let err = Error::InvariantViolation(format!(
                "edge {} missing from node {}'s {:?} incidence",
                edge, node, direction
            ));
            diagnostics::emit_error(&err, reporter);
            return Err(err);
        };

        let node_ref = reported(self.nodes.get_mut(node.index()), reporter)?;
        match direction {
            Direction::Out => {
                reported(node_ref.out_incidence_mut().remove(slot), reporter)?;
                node_ref.decrement_out_degree();
            }
            Direction::In => {
                reported(node_ref.in_incidence_mut().remove(slot), reporter)?;
                node_ref.decrement_in_degree();
            }
        }
        Ok(())
    }

    /// Relabels or flips the bidirectional flag of an edge.
    ///
    /// # Errors
    ///
    /// Propagates container accessor errors and [`Error::LabelTooLong`].
    /// Any error is also routed through `reporter`'s diagnostic sinks.
    pub fn relabel_edge(
        &mut self,
        index: EdgeIndex,
        new_label: Option<Label>,
        change_label: bool,
        toggle_bidirectional: bool,
        reporter: Option<&dyn Reporter>,
    ) -> Result<(), Error> {
        let new_class = if change_label {
            Some(reported(
                new_label.clone().unwrap_or_else(Label::empty).class(),
                reporter,
            )?)
        } else {
            None
        };

        let edge = reported(self.edges.get_mut(index.index()), reporter)?;
        if toggle_bidirectional {
            let flipped = !edge.is_bidirectional();
            edge.set_bidirectional(flipped);
        }

        if let (true, Some(new_class)) = (change_label, new_class) {
            let label = new_label.unwrap_or_else(Label::empty);
            let old_class = edge.set_label(label, new_class);
            if old_class != new_class {
                self.edges_by_class.move_class(old_class, new_class, index);
            }
        }

        Ok(())
    }

    /// Returns the number of live edges.
    #[must_use]
    pub fn number_of_edges(&self) -> usize {
        self.edges.len()
    }

    // === Read-only query surface (consumed by the matcher) ===

    /// Returns the node at `index`.
    pub fn get_node(&self, index: NodeIndex) -> Result<&Node, Error> {
        self.nodes.get(index.index())
    }

    /// Returns the edge at `index`.
    pub fn get_edge(&self, index: EdgeIndex) -> Result<&Edge, Error> {
        self.edges.get(index.index())
    }

    /// Returns the source node index of an edge.
    pub fn get_source(&self, edge: EdgeIndex) -> Result<NodeIndex, Error> {
        Ok(self.get_edge(edge)?.source())
    }

    /// Returns the target node index of an edge.
    pub fn get_target(&self, edge: EdgeIndex) -> Result<NodeIndex, Error> {
        Ok(self.get_edge(edge)?.target())
    }

    /// Returns a node's in-degree.
    pub fn in_degree(&self, node: NodeIndex) -> Result<usize, Error> {
        Ok(self.get_node(node)?.in_degree())
    }

    /// Returns a node's out-degree.
    pub fn out_degree(&self, node: NodeIndex) -> Result<usize, Error> {
        Ok(self.get_node(node)?.out_degree())
    }

    /// Returns the edge at incidence slot `slot` in `node`'s out-incidence
    /// array (not the `slot`-th *logical* out-edge — incidence slots are
    /// themselves subject to slot reuse).
    pub fn out_edge(&self, node: NodeIndex, slot: usize) -> Result<EdgeIndex, Error> {
        self.get_node(node)?.out_incidence().get(slot).map(|&e| e)
    }

    /// Returns the edge at incidence slot `slot` in `node`'s in-incidence
    /// array.
    pub fn in_edge(&self, node: NodeIndex, slot: usize) -> Result<EdgeIndex, Error> {
        self.get_node(node)?.in_incidence().get(slot).map(|&e| e)
    }

    /// Iterates over the root set, in most-recently-rooted-first order.
    pub fn root_nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.roots.iter().copied()
    }

    /// Iterates over nodes currently classified under `class`, head first.
    pub fn nodes_by_class(&self, class: LabelClass) -> impl Iterator<Item = NodeIndex> + '_ {
        self.nodes_by_class.iter(class)
    }

    /// Iterates over edges currently classified under `class`, head first.
    pub fn edges_by_class(&self, class: LabelClass) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.edges_by_class.iter(class)
    }

    /// Iterates over every live node, in ascending index order.
    pub fn iter_nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iterate().map(|(_, n)| n)
    }

    /// Iterates over every live edge, in ascending index order.
    pub fn iter_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iterate().map(|(_, e)| e)
    }

    // === Statistics ===

    /// A point-in-time snapshot of this store's size and shape, for
    /// diagnostics and tests.
    #[must_use]
    pub fn statistics(&self) -> GraphStatistics {
        let mut nodes_per_class = [0usize; LabelClass::COUNT];
        let mut edges_per_class = [0usize; LabelClass::COUNT];
        let mut max_degree = 0usize;

        for (_, node) in self.nodes.iterate() {
            nodes_per_class[node.class().slot()] += 1;
            max_degree = max_degree.max(node.in_degree() + node.out_degree());
        }
        for (_, edge) in self.edges.iterate() {
            edges_per_class[edge.class().slot()] += 1;
        }

        GraphStatistics {
            node_count: self.nodes.len(),
            edge_count: self.edges.len(),
            nodes_per_class,
            edges_per_class,
            max_degree,
        }
    }

    pub(crate) fn node_slots(&self) -> &SlotMap<Node> {
        &self.nodes
    }

    pub(crate) fn edge_slots(&self) -> &SlotMap<Edge> {
        &self.edges
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Out,
    In,
}

#[cfg(test)]
mod tests {
    use super::*;
    use gp2_common::{Atom, Mark};

    #[test]
    fn add_node_assigns_class_and_index() {
        let mut g = GraphStore::new();
        let n = g.add_node(false, None, None).unwrap();
        assert_eq!(n.index(), 0);
        assert_eq!(g.get_node(n).unwrap().class(), LabelClass::Empty);
        assert_eq!(g.number_of_nodes(), 1);
        assert_eq!(g.nodes_by_class(LabelClass::Empty).collect::<Vec<_>>(), vec![n]);
    }

    #[test]
    fn root_node_is_listed() {
        let mut g = GraphStore::new();
        let n = g.add_node(true, None, None).unwrap();
        assert!(g.get_node(n).unwrap().is_root());
        assert_eq!(g.root_nodes().collect::<Vec<_>>(), vec![n]);
    }

    #[test]
    fn add_edge_updates_incidence_and_degrees() {
        let mut g = GraphStore::new();
        let a = g.add_node(false, None, None).unwrap();
        let b = g.add_node(false, None, None).unwrap();
        let e = g.add_edge(false, None, a, b, None).unwrap();

        assert_eq!(g.out_degree(a).unwrap(), 1);
        assert_eq!(g.in_degree(b).unwrap(), 1);
        assert_eq!(g.out_edge(a, 0).unwrap(), e);
        assert_eq!(g.in_edge(b, 0).unwrap(), e);
        assert_eq!(g.get_source(e).unwrap(), a);
        assert_eq!(g.get_target(e).unwrap(), b);
    }

    #[test]
    fn add_edge_requires_live_endpoints() {
        let mut g = GraphStore::new();
        let a = g.add_node(false, None, None).unwrap();
        let bogus = NodeIndex::new(99);
        assert!(g.add_edge(false, None, a, bogus, None).is_err());
    }

    #[test]
    fn remove_node_with_incident_edges_is_rejected() {
        let mut g = GraphStore::new();
        let a = g.add_node(false, None, None).unwrap();
        let b = g.add_node(false, None, None).unwrap();
        g.add_edge(false, None, a, b, None).unwrap();

        let err = g.remove_node(a, None).unwrap_err();
        assert!(matches!(err, Error::DanglingIncidence { degree: 1, .. }));
        assert_eq!(g.number_of_nodes(), 2);
    }

    #[test]
    fn remove_edge_then_remove_node_succeeds() {
        let mut g = GraphStore::new();
        let a = g.add_node(false, None, None).unwrap();
        let b = g.add_node(false, None, None).unwrap();
        let e = g.add_edge(false, None, a, b, None).unwrap();

        g.remove_edge(e, None).unwrap();
        assert_eq!(g.out_degree(a).unwrap(), 0);
        assert_eq!(g.in_degree(b).unwrap(), 0);

        g.remove_node(a, None).unwrap();
        g.remove_node(b, None).unwrap();
        assert_eq!(g.number_of_nodes(), 0);
    }

    #[test]
    fn relabel_node_moves_between_classes() {
        let mut g = GraphStore::new();
        let n = g.add_node(false, None, None).unwrap();
        assert!(g.nodes_by_class(LabelClass::Empty).any(|x| x == n));

        let new_label = Label::new(Mark::None, vec![Atom::Int(42)]).unwrap();
        g.relabel_node(n, Some(new_label), true, false, None).unwrap();

        assert!(!g.nodes_by_class(LabelClass::Empty).any(|x| x == n));
        assert!(g.nodes_by_class(LabelClass::Int).any(|x| x == n));
        assert_eq!(g.get_node(n).unwrap().class(), LabelClass::Int);
    }

    #[test]
    fn relabel_node_toggle_root_updates_root_list() {
        let mut g = GraphStore::new();
        let n = g.add_node(false, None, None).unwrap();
        assert!(g.root_nodes().next().is_none());

        g.relabel_node(n, None, false, true, None).unwrap();
        assert!(g.get_node(n).unwrap().is_root());
        assert!(g.root_nodes().any(|x| x == n));

        g.relabel_node(n, None, false, true, None).unwrap();
        assert!(!g.get_node(n).unwrap().is_root());
        assert!(!g.root_nodes().any(|x| x == n));
    }

    #[test]
    fn relabel_edge_flips_bidirectional() {
        let mut g = GraphStore::new();
        let a = g.add_node(false, None, None).unwrap();
        let b = g.add_node(false, None, None).unwrap();
        let e = g.add_edge(false, None, a, b, None).unwrap();

        g.relabel_edge(e, None, false, true, None).unwrap();
        assert!(g.get_edge(e).unwrap().is_bidirectional());
    }

    #[test]
    fn slot_reuse_after_removal() {
        let mut g = GraphStore::new();
        let a = g.add_node(false, None, None).unwrap();
        let b = g.add_node(false, None, None).unwrap();
        let c = g.add_node(false, None, None).unwrap();
        let e0 = g.add_edge(false, None, a, b, None).unwrap();
        g.add_edge(false, None, b, c, None).unwrap();

        g.remove_edge(e0, None).unwrap();
        let reused = g.add_edge(false, None, a, c, None).unwrap();
        assert_eq!(reused.index(), e0.index());
    }

    #[test]
    fn limits_reject_additional_nodes() {
        let mut g = GraphStore::with_limits(GraphLimits {
            max_nodes: 1,
            ..GraphLimits::default()
        });
        g.add_node(false, None, None).unwrap();
        assert!(matches!(
            g.add_node(false, None, None),
            Err(Error::LimitExceeded { what: "node", .. })
        ));
    }

    #[test]
    fn limits_reject_additional_incident_edges() {
        let mut g = GraphStore::with_limits(GraphLimits {
            max_incident_edges: 1,
            ..GraphLimits::default()
        });
        let a = g.add_node(false, None, None).unwrap();
        let b = g.add_node(false, None, None).unwrap();
        let c = g.add_node(false, None, None).unwrap();
        g.add_edge(false, None, a, b, None).unwrap();
        assert!(matches!(
            g.add_edge(false, None, a, c, None),
            Err(Error::LimitExceeded { what: "incident edge", .. })
        ));
    }
}
