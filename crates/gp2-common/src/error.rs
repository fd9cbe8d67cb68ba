//! Crate-wide error type.
//!
//! Every kind here either rejects a mutation before any state changes
//! (`DanglingIncidence`, `OutOfRange`, `EmptySlot`, `LabelTooLong`,
//! `LimitExceeded`) or reports a diagnostic produced by
//! `GraphStore::validate` (`InvariantViolation`). There is no variant for
//! memory exhaustion: allocation failure is left to the ordinary Rust
//! allocator, which aborts rather than returning an error.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors the graph core can report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// `remove_node` was called on a node with `in_degree + out_degree > 0`.
    #[error("node {index} still has {degree} incident edge(s)")]
    DanglingIncidence {
        /// The node that was not removed.
        index: usize,
        /// Its total degree at the time of the call.
        degree: usize,
    },

    /// An accessor was called with an index at or beyond the container's
    /// high-water mark.
    #[error("index {index} is out of range (container holds {len} slot(s))")]
    OutOfRange {
        /// The offending index.
        index: usize,
        /// The container's current length (high-water mark).
        len: usize,
    },

    /// An accessor was called with an index below the high-water mark, but
    /// the slot at that index is currently empty.
    #[error("slot {index} is empty")]
    EmptySlot {
        /// The offending index.
        index: usize,
    },

    /// A label's atom list classification saw a list longer than
    /// [`crate::types::MAX_LIST_LENGTH`].
    #[error("label list has length {length}, exceeding the maximum of {max}", max = crate::types::MAX_LIST_LENGTH)]
    LabelTooLong {
        /// The offending list length.
        length: usize,
    },

    /// A configured [`GraphLimits`](../../gp2_core/struct.GraphLimits.html)
    /// ceiling (max nodes, max edges, or max incident edges per node) was
    /// reached.
    #[error("{what} limit of {limit} reached")]
    LimitExceeded {
        /// Which ceiling was hit (`"node"`, `"edge"`, or `"incident edge"`).
        what: &'static str,
        /// The configured ceiling.
        limit: usize,
    },

    /// `valid_graph` detected a violated invariant. Carries the diagnostic
    /// text; `GraphStore::validate` collects these into a
    /// `ValidationReport` rather than returning the first one found.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}
