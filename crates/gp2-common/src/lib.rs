//! # gp2-common
//!
//! Foundation layer for the GP2 graph runtime core: stable-index types, the
//! label data model, and shared error handling.
//!
//! This crate provides the fundamental building blocks used by `gp2-core`.
//! It has no internal dependencies and should be kept minimal.
//!
//! ## Modules
//!
//! - [`types`] - Stable-index ids (`NodeIndex`, `EdgeIndex`) and the label
//!   data model (`Label`, `Atom`, `Mark`, `LabelClass`)
//! - [`error`] - Crate-wide `Error`/`Result`
//! - [`utils`] - Small hashing helpers

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use types::{Atom, EdgeIndex, Label, LabelClass, Mark, NodeIndex};
