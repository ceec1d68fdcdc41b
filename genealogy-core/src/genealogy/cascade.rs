//! Cascading Removal
//!
//! Removing a node also removes every descendant that would be left
//! without a parent.
//!
//! # Algorithm
//!
//! 1. Seed the doomed set with the target and mark the edges from each of
//!    its parents for detachment.
//! 2. Walk forward breadth-first from the target's children. A node whose
//!    parents are all doomed becomes doomed and its children are queued.
//!    Otherwise it survives and only the edge from the doomed parent it was
//!    reached through is marked for detachment.
//! 3. Commit the marked detachments in one pass.
//! 4. Erase every doomed node from the store.
//!
//! A node reached again after it was doomed is skipped, so each node is
//! doomed at most once and the walk terminates even if `connect` was used
//! to close a cycle.

use std::collections::{BTreeSet, VecDeque};

use indexmap::IndexSet;
use tracing::debug;

use super::Genealogy;
use crate::entity::Entity;
use crate::error::{GenealogyError, Result};
use crate::graph::{Side, Transaction};

impl<V: Entity> Genealogy<V> {
    /// Remove `id` and every descendant whose parents are all removed.
    ///
    /// Descendants with at least one surviving parent stay and only lose
    /// the edge coming from the removed branch.
    ///
    /// # Errors
    ///
    /// - `CannotRemoveStem` if `id` is the stem
    /// - `NotFound` if `id` does not exist
    pub fn remove(&mut self, id: &V::Id) -> Result<(), V::Id> {
        if *id == self.stem_id {
            return Err(GenealogyError::CannotRemoveStem(id.clone()));
        }

        let mut tx = Transaction::new(&mut self.store);
        let target = tx.store().lookup(id)?;
        let parents: Vec<V::Id> = target.parents().iter().cloned().collect();
        let mut queue: VecDeque<(V::Id, V::Id)> = target
            .children()
            .iter()
            .map(|child| (id.clone(), child.clone()))
            .collect();

        for parent in &parents {
            tx.defer_remove(parent, Side::Children, id);
        }

        let mut doomed = IndexSet::new();
        doomed.insert(id.clone());

        while let Some((via, current)) = queue.pop_front() {
            if doomed.contains(&current) {
                continue;
            }
            let Some(node) = tx.store().get(&current) else {
                continue;
            };

            if node.parents().iter().all(|parent| doomed.contains(parent)) {
                queue.extend(
                    node.children()
                        .iter()
                        .map(|child| (current.clone(), child.clone())),
                );
                doomed.insert(current);
            } else {
                tx.defer_remove(&current, Side::Parents, &via);
            }
        }

        let detached = tx.guard_count();
        tx.commit()?;

        for doomed_id in &doomed {
            self.store.erase_owned(doomed_id);
        }

        debug!(id = ?id, removed = doomed.len(), detached, "removed virus");
        Ok(())
    }

    /// Every node reachable forward from `id`, ascending, excluding `id`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if `id` does not exist
    pub fn descendants(&self, id: &V::Id) -> Result<Vec<V::Id>, V::Id> {
        let mut seen = BTreeSet::new();
        let mut queue: VecDeque<&V::Id> = self.store.lookup(id)?.children().iter().collect();

        while let Some(current) = queue.pop_front() {
            if current == id || !seen.insert(current.clone()) {
                continue;
            }
            if let Some(node) = self.store.get(current) {
                queue.extend(node.children().iter());
            }
        }

        Ok(seen.into_iter().collect())
    }
}
