//! Node Store
//!
//! The store is the single owner of every node in the graph. Relations
//! refer to other nodes by identifier only, so a node is released exactly
//! when it leaves this map.

use std::collections::HashMap;

use super::node::Node;
use crate::entity::Entity;
use crate::error::{GenealogyError, Result};

/// Identifier-keyed owner of all nodes.
#[derive(Debug)]
pub struct Store<V: Entity> {
    /// All nodes in the graph, indexed by ID.
    nodes: HashMap<V::Id, Node<V>>,
}

impl<V: Entity> Store<V> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
        }
    }

    /// Create a store owning a single root node.
    pub fn with_root(root: Node<V>, capacity: usize) -> Self {
        let mut nodes = HashMap::with_capacity(capacity.max(1));
        nodes.insert(root.id(), root);
        Self { nodes }
    }

    /// Get a node, failing with `NotFound` if it is absent.
    pub fn lookup(&self, id: &V::Id) -> Result<&Node<V>, V::Id> {
        self.nodes
            .get(id)
            .ok_or_else(|| GenealogyError::NotFound(id.clone()))
    }

    /// Get a node mutably, failing with `NotFound` if it is absent.
    pub fn lookup_mut(&mut self, id: &V::Id) -> Result<&mut Node<V>, V::Id> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| GenealogyError::NotFound(id.clone()))
    }

    /// Get a node if present.
    pub fn get(&self, id: &V::Id) -> Option<&Node<V>> {
        self.nodes.get(id)
    }

    /// Get a node mutably if present.
    pub fn get_mut(&mut self, id: &V::Id) -> Option<&mut Node<V>> {
        self.nodes.get_mut(id)
    }

    /// Check whether a node is present.
    pub fn contains(&self, id: &V::Id) -> bool {
        self.nodes.contains_key(id)
    }

    /// Take ownership of a node under its own identifier.
    ///
    /// Fails with `AlreadyExists` and hands nothing over if the identifier
    /// is taken. The node is dropped in that case.
    pub fn insert_owned(&mut self, node: Node<V>) -> Result<(), V::Id> {
        let id = node.id();
        if self.nodes.contains_key(&id) {
            return Err(GenealogyError::AlreadyExists(id));
        }
        self.nodes.insert(id, node);
        Ok(())
    }

    /// Remove and destroy a node.
    ///
    /// The caller must already have detached every surviving relation edge
    /// that points at it.
    pub fn erase_owned(&mut self, id: &V::Id) -> Option<Node<V>> {
        self.nodes.remove(id)
    }

    /// Get the total number of nodes in the store.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether the store holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over every node, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<V>> {
        self.nodes.values()
    }
}

impl<V: Entity> Default for Store<V> {
    fn default() -> Self {
        Self::new()
    }
}
