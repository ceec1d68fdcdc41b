//! Mutation Guards
//!
//! Multi-edge mutations are made all-or-nothing with scoped guards instead
//! of a transaction log.
//!
//! # How It Works
//!
//! 1. A [`Transaction`] borrows the store mutably for the duration of one
//!    engine operation.
//!
//! 2. Each relation edit is recorded as a guard:
//!    - an [`InsertGuard`] performs its insertion immediately and stays
//!      armed, so the insertion is undone unless the operation completes;
//!    - a [`RemoveGuard`] only marks an edge for deletion, and the edge is
//!      deleted only if the operation completes.
//!
//! 3. [`Transaction::commit`] registers the staged node (if any), then
//!    disarms every insert guard and confirms every remove guard.
//!
//! 4. When the transaction is dropped, confirmed removals are applied and
//!    armed insertions are undone in reverse order of acquisition. Leaving
//!    the scope early through `?` is therefore a full rollback.

use smallvec::SmallVec;
use tracing::trace;

use super::node::{Node, Relation, Side};
use super::store::Store;
use crate::entity::Entity;
use crate::error::{GenealogyError, Result};

/// How an insert guard treats a key that is already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertMode {
    /// An existing key is an error (`AlreadyExists`).
    Strict,

    /// An existing key counts as already satisfied.
    Lenient,
}

/// One relation insertion, undone on drop unless disarmed.
#[derive(Debug)]
pub struct InsertGuard<Id> {
    owner: Id,
    side: Side,
    key: Id,
    /// Whether the insertion actually added an entry.
    inserted: bool,
    armed: bool,
}

impl<Id> InsertGuard<Id> {
    /// Keep the insertion.
    pub fn disarm(&mut self) {
        self.armed = false;
    }

    /// Whether dropping now would undo the insertion.
    pub fn needs_rollback(&self) -> bool {
        self.armed && self.inserted
    }
}

/// A deferred deletion of one relation entry.
#[derive(Debug)]
pub struct RemoveGuard<Id> {
    owner: Id,
    side: Side,
    key: Id,
    confirmed: bool,
}

impl<Id> RemoveGuard<Id> {
    /// Let the deletion happen when the guard is released.
    pub fn confirm(&mut self) {
        self.confirmed = true;
    }

    /// Whether releasing now would delete the entry.
    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }
}

/// Scope of one engine mutation.
///
/// Holds the guards placed so far and, while a node is being created, the
/// node itself until it can be handed to the store.
pub struct Transaction<'s, V: Entity> {
    store: &'s mut Store<V>,
    staged: Option<Node<V>>,
    inserts: SmallVec<[InsertGuard<V::Id>; 8]>,
    removals: SmallVec<[RemoveGuard<V::Id>; 8]>,
}

impl<'s, V: Entity> Transaction<'s, V> {
    /// Open a transaction over the store.
    pub fn new(store: &'s mut Store<V>) -> Self {
        Self {
            store,
            staged: None,
            inserts: SmallVec::new(),
            removals: SmallVec::new(),
        }
    }

    /// Hold a new node outside the store until commit.
    ///
    /// Relation edits addressed to the staged node's identifier are applied
    /// to it rather than looked up in the store.
    pub fn stage(&mut self, node: Node<V>) {
        self.staged = Some(node);
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &Store<V> {
        self.store
    }

    /// Resolve a node among the staged node and the store.
    fn resolve_mut(&mut self, owner: &V::Id) -> Option<&mut Node<V>> {
        if self.staged.as_ref().is_some_and(|node| node.id() == *owner) {
            self.staged.as_mut()
        } else {
            self.store.get_mut(owner)
        }
    }

    fn relation_mut(&mut self, owner: &V::Id, side: Side) -> Result<&mut Relation<V::Id>, V::Id> {
        self.resolve_mut(owner)
            .map(|node| node.relation_mut(side))
            .ok_or_else(|| GenealogyError::NotFound(owner.clone()))
    }

    /// Insert `key` into `owner`'s relation on `side` under an insert guard.
    pub fn insert(
        &mut self,
        owner: &V::Id,
        side: Side,
        key: &V::Id,
        mode: InsertMode,
    ) -> Result<(), V::Id> {
        let inserted = self.relation_mut(owner, side)?.insert(key.clone());
        if !inserted && mode == InsertMode::Strict {
            return Err(GenealogyError::AlreadyExists(key.clone()));
        }
        self.inserts.push(InsertGuard {
            owner: owner.clone(),
            side,
            key: key.clone(),
            inserted,
            armed: true,
        });
        Ok(())
    }

    /// Insert both halves of the edge `parent -> child`.
    pub fn link(&mut self, parent: &V::Id, child: &V::Id, mode: InsertMode) -> Result<(), V::Id> {
        self.insert(parent, Side::Children, child, mode)?;
        self.insert(child, Side::Parents, parent, mode)
    }

    /// Mark `key` for removal from `owner`'s relation on `side`.
    pub fn defer_remove(&mut self, owner: &V::Id, side: Side, key: &V::Id) {
        self.removals.push(RemoveGuard {
            owner: owner.clone(),
            side,
            key: key.clone(),
            confirmed: false,
        });
    }

    /// Number of guards placed so far.
    pub fn guard_count(&self) -> usize {
        self.inserts.len() + self.removals.len()
    }

    /// Complete the operation.
    ///
    /// The staged node is registered first. If that fails every guard is
    /// still armed and the drop that follows restores the previous state.
    pub fn commit(mut self) -> Result<(), V::Id> {
        if let Some(node) = self.staged.take() {
            self.store.insert_owned(node)?;
        }
        self.inserts.iter_mut().for_each(InsertGuard::disarm);
        self.removals.iter_mut().for_each(RemoveGuard::confirm);
        Ok(())
    }
}

impl<V: Entity> Drop for Transaction<'_, V> {
    fn drop(&mut self) {
        let removals = std::mem::take(&mut self.removals);
        for guard in removals.into_iter().filter(RemoveGuard::is_confirmed) {
            if let Some(node) = self.store.get_mut(&guard.owner) {
                node.relation_mut(guard.side).remove(&guard.key);
                trace!(owner = ?guard.owner, side = ?guard.side, key = ?guard.key, "detached edge");
            }
        }

        while let Some(guard) = self.inserts.pop() {
            if !guard.needs_rollback() {
                continue;
            }
            if let Some(node) = self.resolve_mut(&guard.owner) {
                node.relation_mut(guard.side).remove(&guard.key);
                trace!(owner = ?guard.owner, side = ?guard.side, key = ?guard.key, "rolled back edge");
            }
        }
    }
}
