//! # gp2-core
//!
//! Runtime host-graph storage core for the GP2 graph-transformation
//! language: a stable-index slotted container, the node/edge graph store
//! built on it, the label-class secondary index, and the snapshot/restore
//! stack that backs speculative execution for `try`/`if`/`P!`.
//!
//! This crate provides the storage layer consumed by the (out of scope, not
//! part of this crate) pattern-matching algorithm and rule-application
//! engine through the read-only query surface on [`graph::GraphStore`].
//!
//! ## Modules
//!
//! - [`slotted`] - the generic append-with-reuse container (§4.1)
//! - [`graph`] - nodes, edges, and the graph store built on it (§4.2)
//! - [`index`] - the label-class secondary index (§4.3)
//! - [`snapshot`] - the executor-owned snapshot stack (§4.4)
//! - [`validate`] - the `valid_graph` predicate (§4.5)
//! - [`text`] - the textual graph/atom forms (§6)
//! - [`diagnostics`] - the console/log diagnostic sinks (§7)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod diagnostics;
pub mod graph;
pub mod index;
pub mod slotted;
pub mod snapshot;
pub mod text;
pub mod validate;

pub use gp2_common::{Atom, EdgeIndex, Error, Label, LabelClass, Mark, NodeIndex, Result};
pub use graph::{Edge, GraphLimits, GraphStatistics, GraphStore, Node};
pub use snapshot::Executor;
pub use validate::ValidationReport;
