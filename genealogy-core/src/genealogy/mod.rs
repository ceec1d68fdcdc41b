//! Genealogy Engine
//!
//! The engine is the public entry point. It owns the node store and
//! composes it with the mutation guards so that every mutating call is
//! all-or-nothing.
//!
//! # How It Works
//!
//! 1. A mutating call opens a [`Transaction`] over the store.
//!
//! 2. Relation edits are made through guards. Any error propagated with
//!    `?` drops the transaction, which undoes the edits made so far.
//!
//! 3. Once every edit succeeded the transaction is committed: the new node
//!    (if any) is registered and the guards are disarmed.
//!
//! Cascading removal is implemented in the `cascade` submodule, bulk
//! export and import in [`snapshot`], and a lock-wrapped handle in
//! [`shared`].

mod cascade;
pub mod shared;
pub mod snapshot;

use std::collections::BTreeSet;

use tracing::debug;

use crate::entity::Entity;
use crate::error::{GenealogyError, Result};
use crate::graph::{Children, InsertMode, Node, Store, Transaction};

/// A lineage graph rooted at a fixed stem.
///
/// Every node except the stem has at least one parent. Identifiers are
/// unique within the graph.
///
/// # Example
///
/// ```rust
/// use genealogy_core::{Entity, Genealogy};
///
/// struct Virus(u32);
///
/// impl Entity for Virus {
///     type Id = u32;
///     fn from_id(id: u32) -> Self { Self(id) }
///     fn id(&self) -> u32 { self.0 }
/// }
///
/// let mut genealogy = Genealogy::<Virus>::new(0);
/// genealogy.create(1, &[0]).unwrap();
/// genealogy.create(2, &[0]).unwrap();
/// genealogy.create(3, &[1, 2]).unwrap();
///
/// genealogy.remove(&1).unwrap();
/// assert!(genealogy.exists(&3));
/// assert_eq!(genealogy.parents_of(&3).unwrap(), vec![2]);
/// ```
#[derive(Debug)]
pub struct Genealogy<V: Entity> {
    /// Identifier of the root, fixed for the lifetime of the graph.
    stem_id: V::Id,

    /// Owner of every node, the stem included.
    store: Store<V>,
}

impl<V: Entity> Genealogy<V> {
    /// Create a graph holding only the stem.
    pub fn new(stem_id: V::Id) -> Self {
        Self::with_capacity(stem_id, 1)
    }

    /// Create a graph holding only the stem, with room for `capacity` nodes.
    pub fn with_capacity(stem_id: V::Id, capacity: usize) -> Self {
        let store = Store::with_root(Node::new(stem_id.clone()), capacity);
        Self { stem_id, store }
    }

    /// Identifier of the stem.
    pub fn stem_id(&self) -> &V::Id {
        &self.stem_id
    }

    /// Check whether `id` names a node.
    pub fn exists(&self, id: &V::Id) -> bool {
        self.store.contains(id)
    }

    /// Get the entity held by `id`.
    pub fn get(&self, id: &V::Id) -> Result<&V, V::Id> {
        self.store.lookup(id).map(Node::entity)
    }

    /// Parents of `id`, ascending by identifier.
    pub fn parents_of(&self, id: &V::Id) -> Result<Vec<V::Id>, V::Id> {
        Ok(self.store.lookup(id)?.parents().iter().cloned().collect())
    }

    /// Iterate over the children of `id`, ascending by identifier.
    pub fn children(&self, id: &V::Id) -> Result<Children<'_, V>, V::Id> {
        let node = self.store.lookup(id)?;
        Ok(Children::new(id.clone(), node.children().iter(), &self.store))
    }

    /// Number of nodes, the stem included.
    pub fn node_count(&self) -> usize {
        self.store.len()
    }

    /// Every identifier in the graph, ascending.
    pub fn ids(&self) -> Vec<V::Id> {
        let mut ids: Vec<_> = self.store.nodes().map(Node::id).collect();
        ids.sort();
        ids
    }

    /// Create `id` as a child of every node in `parent_ids`.
    ///
    /// Duplicate parents collapse to a single edge. An empty parent list is
    /// a no-op. On error the graph is left unchanged.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if `id` is already a node
    /// - `NotFound` if any parent does not exist
    pub fn create(&mut self, id: V::Id, parent_ids: &[V::Id]) -> Result<(), V::Id> {
        if parent_ids.is_empty() {
            return Ok(());
        }
        if self.store.contains(&id) {
            return Err(GenealogyError::AlreadyExists(id));
        }

        let parents: BTreeSet<&V::Id> = parent_ids.iter().collect();
        let mut tx = Transaction::new(&mut self.store);
        tx.stage(Node::new(id.clone()));

        for parent in &parents {
            // The staged node is not a valid parent of itself
            if !tx.store().contains(parent) {
                return Err(GenealogyError::NotFound((*parent).clone()));
            }
            tx.link(parent, &id, InsertMode::Strict)?;
        }
        tx.commit()?;

        debug!(id = ?id, parents = parents.len(), "created virus");
        Ok(())
    }

    /// Create `id` as a child of `parent_id`.
    pub fn create_with_parent(&mut self, id: V::Id, parent_id: &V::Id) -> Result<(), V::Id> {
        self.create(id, std::slice::from_ref(parent_id))
    }

    /// Add the edge `parent_id -> child_id`.
    ///
    /// Connecting an already connected pair is not an error. Connecting the
    /// stem as a child is silently ignored. Cycles are not detected.
    ///
    /// # Errors
    ///
    /// - `NotFound` if either node does not exist
    pub fn connect(&mut self, child_id: &V::Id, parent_id: &V::Id) -> Result<(), V::Id> {
        self.store.lookup(child_id)?;
        self.store.lookup(parent_id)?;

        if *child_id == self.stem_id {
            return Ok(());
        }

        let mut tx = Transaction::new(&mut self.store);
        tx.link(parent_id, child_id, InsertMode::Lenient)?;
        tx.commit()?;

        debug!(child = ?child_id, parent = ?parent_id, "connected viruses");
        Ok(())
    }
}
