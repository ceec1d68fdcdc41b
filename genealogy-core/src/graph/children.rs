//! Children Iterator
//!
//! Read-only traversal over one node's children, ascending by identifier.
//! The iterator borrows the graph, so any mutation while it is alive is
//! rejected at compile time.

use std::collections::btree_set;
use std::fmt;
use std::iter::FusedIterator;

use super::store::Store;
use crate::entity::Entity;

/// Iterator over the entities of one node's children.
///
/// Two iterators compare equal when they walk the same node's children and
/// sit at the same front and back positions.
pub struct Children<'a, V: Entity> {
    owner: V::Id,
    ids: btree_set::Iter<'a, V::Id>,
    store: &'a Store<V>,
    /// Items taken from the front.
    front: usize,
    /// Items taken from the back.
    back: usize,
}

impl<'a, V: Entity> Children<'a, V> {
    pub(crate) fn new(owner: V::Id, ids: btree_set::Iter<'a, V::Id>, store: &'a Store<V>) -> Self {
        Self {
            owner,
            ids,
            store,
            front: 0,
            back: 0,
        }
    }

    /// The node whose children are being walked.
    pub fn owner(&self) -> &V::Id {
        &self.owner
    }

    /// Identifiers still ahead of the cursor, without resolving entities.
    pub fn ids(&self) -> btree_set::Iter<'a, V::Id> {
        self.ids.clone()
    }

    fn resolve(&self, id: &V::Id) -> Option<&'a V> {
        self.store.get(id).map(|node| node.entity())
    }
}

impl<'a, V: Entity> Iterator for Children<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.ids.next()?;
        self.front += 1;
        self.resolve(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl<V: Entity> DoubleEndedIterator for Children<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let id = self.ids.next_back()?;
        self.back += 1;
        self.resolve(id)
    }
}

impl<V: Entity> ExactSizeIterator for Children<'_, V> {}

impl<V: Entity> FusedIterator for Children<'_, V> {}

impl<V: Entity> Clone for Children<'_, V> {
    fn clone(&self) -> Self {
        Self {
            owner: self.owner.clone(),
            ids: self.ids.clone(),
            store: self.store,
            front: self.front,
            back: self.back,
        }
    }
}

impl<V: Entity> PartialEq for Children<'_, V> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.store, other.store)
            && self.owner == other.owner
            && self.front == other.front
            && self.back == other.back
    }
}

impl<V: Entity> fmt::Debug for Children<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Children")
            .field("owner", &self.owner)
            .field("remaining", &self.ids.len())
            .field("front", &self.front)
            .field("back", &self.back)
            .finish()
    }
}
