//! Node storage.

use gp2_common::{EdgeIndex, Label, LabelClass, NodeIndex};

use crate::slotted::SlotMap;

/// A node in a [`crate::graph::GraphStore`].
///
/// A node exclusively owns its label and its two incidence containers;
/// all cross-references it holds to edges are weak (plain [`EdgeIndex`]
/// values, no ownership).
#[derive(Debug, Clone)]
pub struct Node {
    index: NodeIndex,
    root: bool,
    label: Label,
    class: LabelClass,
    out_incidence: SlotMap<EdgeIndex>,
    in_incidence: SlotMap<EdgeIndex>,
    out_degree: usize,
    in_degree: usize,
}

impl Node {
    pub(crate) fn new(index: NodeIndex, root: bool, label: Label, class: LabelClass) -> Self {
        Self {
            index,
            root,
            label,
            class,
            out_incidence: SlotMap::new(),
            in_incidence: SlotMap::new(),
            out_degree: 0,
            in_degree: 0,
        }
    }

    /// This node's stable index.
    #[must_use]
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    /// Whether this node's root flag is set.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.root
    }

    /// This node's current label.
    #[must_use]
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// This node's cached label class.
    #[must_use]
    pub fn class(&self) -> LabelClass {
        self.class
    }

    /// Recorded out-degree (spec invariant 5: equals the populated count of
    /// the out-incidence container).
    #[must_use]
    pub fn out_degree(&self) -> usize {
        self.out_degree
    }

    /// Recorded in-degree.
    #[must_use]
    pub fn in_degree(&self) -> usize {
        self.in_degree
    }

    pub(crate) fn out_incidence(&self) -> &SlotMap<EdgeIndex> {
        &self.out_incidence
    }

    pub(crate) fn in_incidence(&self) -> &SlotMap<EdgeIndex> {
        &self.in_incidence
    }

    pub(crate) fn out_incidence_mut(&mut self) -> &mut SlotMap<EdgeIndex> {
        &mut self.out_incidence
    }

    pub(crate) fn in_incidence_mut(&mut self) -> &mut SlotMap<EdgeIndex> {
        &mut self.in_incidence
    }

    pub(crate) fn set_root(&mut self, root: bool) {
        self.root = root;
    }

    pub(crate) fn set_label(&mut self, label: Label, class: LabelClass) -> LabelClass {
        let old_class = self.class;
        self.label = label;
        self.class = class;
        old_class
    }

    pub(crate) fn increment_out_degree(&mut self) {
        self.out_degree += 1;
    }

    pub(crate) fn increment_in_degree(&mut self) {
        self.in_degree += 1;
    }

    pub(crate) fn decrement_out_degree(&mut self) {
        self.out_degree -= 1;
    }

    pub(crate) fn decrement_in_degree(&mut self) {
        self.in_degree -= 1;
    }
}
