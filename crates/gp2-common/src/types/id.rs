//! Stable-index newtypes.
//!
//! A [`NodeIndex`]/[`EdgeIndex`] is the stable slot index a [`crate::types`]
//! consumer receives from the slotted container on insertion (see
//! `gp2_core::slotted::SlotMap`). It stays valid across arbitrary insert and
//! remove sequences until the entity it names is removed; slot reuse means a
//! numerically equal index may later be handed out to a different entity.

use std::fmt;

/// Stable index of a node within a [`gp2_core`](../../gp2_core/index.html)
/// graph store's node container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Wraps a raw slot index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Stable index of an edge within a [`gp2_core`](../../gp2_core/index.html)
/// graph store's edge container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct EdgeIndex(usize);

impl EdgeIndex {
    /// Wraps a raw slot index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EdgeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}
