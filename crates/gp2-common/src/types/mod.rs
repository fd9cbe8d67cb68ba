//! Core type definitions for the GP2 runtime graph core.
//!
//! - Identifier types ([`NodeIndex`], [`EdgeIndex`])
//! - The label data model ([`Mark`], [`Atom`], [`Label`], [`LabelClass`])

mod id;
mod label;

pub use id::{EdgeIndex, NodeIndex};
pub use label::{classify, Atom, Label, LabelClass, Mark, MAX_LIST_LENGTH};
