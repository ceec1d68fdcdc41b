//! Snapshot export and bulk import.
//!
//! A [`Snapshot`] is the structure of a graph without its entities: the
//! stem plus the parents of every other node. It can be encoded as JSON or
//! MessagePack and rebuilt into a fresh [`Genealogy`].

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::Genealogy;
use crate::entity::Entity;
use crate::error::{GenealogyError, Result};

/// Errors raised while encoding or decoding a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// JSON encoding or decoding failed.
    #[error("json codec error: {0}")]
    Json(#[from] serde_json::Error),

    /// MessagePack encoding failed.
    #[error("msgpack encode error: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    /// MessagePack decoding failed.
    #[error("msgpack decode error: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
}

/// One non-stem node and its parents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotNode<Id> {
    /// Node identifier.
    pub id: Id,
    /// Parent identifiers, ascending.
    pub parents: Vec<Id>,
}

/// Structure of a whole graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot<Id> {
    /// Identifier of the stem.
    pub stem: Id,
    /// Every node except the stem, ascending by identifier.
    pub nodes: Vec<SnapshotNode<Id>>,
}

impl<Id: Serialize> Snapshot<Id> {
    /// Encode as JSON.
    pub fn to_json(&self) -> std::result::Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Encode as MessagePack with named fields.
    pub fn to_msgpack(&self) -> std::result::Result<Vec<u8>, SnapshotError> {
        Ok(rmp_serde::to_vec_named(self)?)
    }
}

impl<Id: DeserializeOwned> Snapshot<Id> {
    /// Decode from JSON.
    pub fn from_json(json: &str) -> std::result::Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode from MessagePack.
    pub fn from_msgpack(bytes: &[u8]) -> std::result::Result<Self, SnapshotError> {
        Ok(rmp_serde::from_slice(bytes)?)
    }
}

impl<V: Entity> Genealogy<V> {
    /// Capture the structure of the graph.
    pub fn snapshot(&self) -> Snapshot<V::Id> {
        let nodes = self
            .ids()
            .into_iter()
            .filter(|id| *id != self.stem_id)
            .filter_map(|id| {
                let parents = self.parents_of(&id).ok()?;
                Some(SnapshotNode { id, parents })
            })
            .collect();

        Snapshot {
            stem: self.stem_id.clone(),
            nodes,
        }
    }

    /// Rebuild a graph from a snapshot.
    ///
    /// Nodes are created forward from the stem, each through the first of
    /// its parents that already exists. The remaining edges are then added
    /// with [`connect`](Genealogy::connect), so structures closed into a
    /// cycle by `connect` survive the round trip.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if an identifier appears twice or names the stem
    /// - `NotFound` if a node cannot be reached from the stem or lists a
    ///   parent that is not in the snapshot
    pub fn from_snapshot(snapshot: Snapshot<V::Id>) -> Result<Self, V::Id> {
        let Snapshot { stem, nodes } = snapshot;
        let mut genealogy = Self::with_capacity(stem.clone(), nodes.len() + 1);

        let mut listed = BTreeSet::new();
        let mut children_of: BTreeMap<&V::Id, Vec<&V::Id>> = BTreeMap::new();
        for node in &nodes {
            if node.id == stem || !listed.insert(&node.id) {
                return Err(GenealogyError::AlreadyExists(node.id.clone()));
            }
            for parent in &node.parents {
                children_of.entry(parent).or_default().push(&node.id);
            }
        }

        let mut queue = VecDeque::from([&stem]);
        while let Some(parent) = queue.pop_front() {
            for child in children_of.get(parent).into_iter().flatten() {
                if !genealogy.exists(child) {
                    genealogy.create_with_parent((*child).clone(), parent)?;
                    queue.push_back(*child);
                }
            }
        }

        for node in &nodes {
            if !genealogy.exists(&node.id) {
                return Err(GenealogyError::NotFound(node.id.clone()));
            }
            for parent in &node.parents {
                genealogy.connect(&node.id, parent)?;
            }
        }

        debug!(nodes = genealogy.node_count(), "imported genealogy snapshot");
        Ok(genealogy)
    }
}
