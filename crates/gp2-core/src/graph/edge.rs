//! Edge storage.

use gp2_common::{EdgeIndex, Label, LabelClass, NodeIndex};

/// An edge in a [`crate::graph::GraphStore`].
///
/// An edge exclusively owns its label; its source/target are weak
/// references (plain [`NodeIndex`] values, never ownership).
#[derive(Debug, Clone)]
pub struct Edge {
    index: EdgeIndex,
    bidirectional: bool,
    label: Label,
    class: LabelClass,
    source: NodeIndex,
    target: NodeIndex,
}

impl Edge {
    pub(crate) fn new(
        index: EdgeIndex,
        bidirectional: bool,
        label: Label,
        class: LabelClass,
        source: NodeIndex,
        target: NodeIndex,
    ) -> Self {
        Self {
            index,
            bidirectional,
            label,
            class,
            source,
            target,
        }
    }

    /// This edge's stable index.
    #[must_use]
    pub fn index(&self) -> EdgeIndex {
        self.index
    }

    /// Whether this edge is bidirectional (matches in either direction
    /// during rule matching — the matcher itself is out of scope here).
    #[must_use]
    pub fn is_bidirectional(&self) -> bool {
        self.bidirectional
    }

    /// This edge's current label.
    #[must_use]
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// This edge's cached label class.
    #[must_use]
    pub fn class(&self) -> LabelClass {
        self.class
    }

    /// The source node's index.
    #[must_use]
    pub fn source(&self) -> NodeIndex {
        self.source
    }

    /// The target node's index.
    #[must_use]
    pub fn target(&self) -> NodeIndex {
        self.target
    }

    pub(crate) fn set_bidirectional(&mut self, bidirectional: bool) {
        self.bidirectional = bidirectional;
    }

    pub(crate) fn set_label(&mut self, label: Label, class: LabelClass) -> LabelClass {
        let old_class = self.class;
        self.label = label;
        self.class = class;
        old_class
    }
}
