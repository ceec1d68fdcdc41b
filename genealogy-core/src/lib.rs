//! Genealogy Core
//!
//! This crate maintains a single evolving lineage graph: a directed acyclic
//! graph of entities where every entity may descend from several parents.
//! It implements:
//!
//! - An identifier-keyed node store that owns every node
//! - Guard-based all-or-nothing relation edits
//! - Creation, linking and cascading removal of nodes
//! - Snapshot export and bulk import
//!
//! Every mutating operation is strongly exception safe: when it returns an
//! error the graph is exactly as it was before the call.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `entity`: The caller-supplied value type held by every node
//! - `graph`: Nodes, the node store, mutation guards and the children iterator
//! - `genealogy`: The public engine, cascading removal, snapshots and a
//!   lock-wrapped shared handle
//! - `error`: The error taxonomy
//!
//! # Example
//!
//! ```rust
//! use genealogy_core::{Entity, Genealogy, GenealogyError};
//!
//! struct Virus(u64);
//!
//! impl Entity for Virus {
//!     type Id = u64;
//!     fn from_id(id: u64) -> Self { Self(id) }
//!     fn id(&self) -> u64 { self.0 }
//! }
//!
//! let mut genealogy = Genealogy::<Virus>::new(0);
//! genealogy.create(1, &[0]).unwrap();
//! genealogy.create(2, &[1]).unwrap();
//!
//! // A missing parent fails the whole call
//! assert_eq!(genealogy.create(3, &[2, 99]), Err(GenealogyError::NotFound(99)));
//! assert!(!genealogy.exists(&3));
//!
//! // 2 has no other parent, so it goes with 1
//! genealogy.remove(&1).unwrap();
//! assert_eq!(genealogy.ids(), vec![0]);
//! ```

pub mod entity;
pub mod error;
pub mod genealogy;
pub mod graph;

pub use entity::Entity;
pub use error::{GenealogyError, Result};
pub use genealogy::shared::SharedGenealogy;
pub use genealogy::snapshot::{Snapshot, SnapshotError, SnapshotNode};
pub use genealogy::Genealogy;
pub use graph::Children;
