//! Genealogy Graph
//!
//! This module implements the storage layer of the genealogy: nodes, the
//! store that owns them, and the guards used to edit relations atomically.
//!
//! # Overview
//!
//! The graph is a directed acyclic graph with multiple-parent lineage:
//!
//! - Nodes hold one entity plus a parents relation and a children relation
//! - Edges are recorded twice: `A` is in `B`'s parents iff `B` is in `A`'s
//!   children
//!
//! # Design Decisions
//!
//! 1. Nodes live in a single identifier-keyed store (arena-by-identifier).
//!    Relations hold identifiers only, so back-references never extend a
//!    node's lifetime and cannot dangle once the store drops a node.
//!
//! 2. Relations are ordered sets, which makes every traversal deterministic
//!    (ascending by identifier).
//!
//! 3. Multi-edge edits go through a [`Transaction`] whose guards undo
//!    partial work when the operation does not complete.

mod children;
mod guard;
mod node;
mod store;

pub use children::Children;
pub use guard::{InsertGuard, InsertMode, RemoveGuard, Transaction};
pub use node::{Node, Relation, Side};
pub use store::Store;
