//! Graph Nodes
//!
//! This module defines the vertex type stored in the genealogy graph.

use std::collections::BTreeSet;

use crate::entity::Entity;

/// Edges incident to one node, keyed by the identifier of the node at the
/// other end.
///
/// A relation never owns the nodes it names. Identifiers are resolved
/// through the [`Store`](super::Store), which is the only owner.
pub type Relation<Id> = BTreeSet<Id>;

/// Which of a node's two relations an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The nodes this node descends from.
    Parents,

    /// The nodes descending from this node.
    Children,
}

/// A vertex in the genealogy graph.
#[derive(Debug)]
pub struct Node<V: Entity> {
    /// The entity held by this vertex.
    entity: V,

    /// Nodes this node descends from.
    parents: Relation<V::Id>,

    /// Nodes that descend from this node.
    children: Relation<V::Id>,
}

impl<V: Entity> Node<V> {
    /// Create an unlinked node holding the entity built from `id`.
    pub fn new(id: V::Id) -> Self {
        Self {
            entity: V::from_id(id),
            parents: Relation::new(),
            children: Relation::new(),
        }
    }

    /// Get the node's identifier.
    pub fn id(&self) -> V::Id {
        self.entity.id()
    }

    /// Get the entity held by this node.
    pub fn entity(&self) -> &V {
        &self.entity
    }

    /// Get the parents relation.
    pub fn parents(&self) -> &Relation<V::Id> {
        &self.parents
    }

    /// Get the children relation.
    pub fn children(&self) -> &Relation<V::Id> {
        &self.children
    }

    /// Get one relation by side.
    pub fn relation(&self, side: Side) -> &Relation<V::Id> {
        match side {
            Side::Parents => &self.parents,
            Side::Children => &self.children,
        }
    }

    /// Get one relation by side, mutably.
    pub fn relation_mut(&mut self, side: Side) -> &mut Relation<V::Id> {
        match side {
            Side::Parents => &mut self.parents,
            Side::Children => &mut self.children,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Virus(u32);

    impl Entity for Virus {
        type Id = u32;

        fn from_id(id: u32) -> Self {
            Self(id)
        }

        fn id(&self) -> u32 {
            self.0
        }
    }

    #[test]
    fn new_node_is_unlinked() {
        let node = Node::<Virus>::new(4);
        assert_eq!(node.id(), 4);
        assert_eq!(node.entity().0, 4);
        assert!(node.parents().is_empty());
        assert!(node.children().is_empty());
    }

    #[test]
    fn relation_management() {
        let mut node = Node::<Virus>::new(1);

        node.relation_mut(Side::Parents).insert(9);
        node.relation_mut(Side::Parents).insert(3);
        node.relation_mut(Side::Children).insert(5);

        // Relations are ordered by identifier
        assert_eq!(node.parents().iter().copied().collect::<Vec<_>>(), vec![3, 9]);
        assert!(node.relation(Side::Children).contains(&5));

        node.relation_mut(Side::Parents).remove(&3);
        assert_eq!(node.parents().len(), 1);
    }
}
