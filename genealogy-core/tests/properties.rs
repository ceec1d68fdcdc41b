//! Property-based tests for the genealogy engine.
//!
//! Uses proptest to validate, over randomly grown lineages:
//! - Parent and child relations stay symmetric
//! - Failed creates leave the graph untouched
//! - Removal drops exactly the nodes no longer reachable from the stem
//! - Connecting an existing edge changes nothing

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use genealogy_core::{Entity, Genealogy, GenealogyError};
use proptest::prelude::*;
use proptest::sample::Index;

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

/// Picks for each new node (at least one parent among earlier nodes) and a
/// list of extra forward edges.
type Shape = (Vec<Vec<Index>>, Vec<(Index, Index)>);

fn lineage_shape() -> impl Strategy<Value = Shape> {
    (
        prop::collection::vec(prop::collection::vec(any::<Index>(), 1..4), 1..25),
        prop::collection::vec((any::<Index>(), any::<Index>()), 0..10),
    )
}

/// Grow a lineage rooted at 0. Node `k` only ever descends from nodes
/// below `k`, so the result is acyclic.
fn grow((picks, extra): &Shape) -> Genealogy<Virus> {
    let mut genealogy = Genealogy::new(0);
    for (offset, parents) in picks.iter().enumerate() {
        let id = offset as u32 + 1;
        let parents: Vec<u32> = parents.iter().map(|ix| ix.index(id as usize) as u32).collect();
        genealogy.create(id, &parents).unwrap();
    }

    let count = picks.len() + 1;
    for (a, b) in extra {
        let (a, b) = (a.index(count) as u32, b.index(count) as u32);
        if a != b {
            genealogy.connect(&a.max(b), &a.min(b)).unwrap();
        }
    }
    genealogy
}

fn children_of(genealogy: &Genealogy<Virus>, id: u32) -> Vec<u32> {
    genealogy.children(&id).unwrap().map(Virus::id).collect()
}

fn check_symmetry(genealogy: &Genealogy<Virus>) -> Result<(), TestCaseError> {
    for id in genealogy.ids() {
        let parents = genealogy.parents_of(&id).unwrap();
        prop_assert_eq!(parents.is_empty(), id == *genealogy.stem_id());
        for parent in parents {
            prop_assert!(children_of(genealogy, parent).contains(&id));
        }
        for child in children_of(genealogy, id) {
            prop_assert!(genealogy.parents_of(&child).unwrap().contains(&id));
        }
    }
    Ok(())
}

/// Nodes reachable from the stem without passing through `removed`.
fn reachable_without(genealogy: &Genealogy<Virus>, removed: u32) -> Vec<u32> {
    let mut forward: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
    for id in genealogy.ids() {
        forward.insert(id, children_of(genealogy, id));
    }

    let stem = *genealogy.stem_id();
    let mut seen = BTreeSet::from([stem]);
    let mut queue = VecDeque::from([stem]);
    while let Some(current) = queue.pop_front() {
        for &child in forward.get(&current).into_iter().flatten() {
            if child != removed && seen.insert(child) {
                queue.push_back(child);
            }
        }
    }
    seen.into_iter().collect()
}

proptest! {
    /// Property: every grown graph has symmetric relations
    #[test]
    fn prop_grown_graph_is_symmetric(shape in lineage_shape()) {
        let genealogy = grow(&shape);
        check_symmetry(&genealogy)?;
    }

    /// Property: removal keeps exactly the nodes still reachable from the stem
    #[test]
    fn prop_removal_matches_reachability(shape in lineage_shape(), target in any::<Index>()) {
        let mut genealogy = grow(&shape);
        let target = target.index(shape.0.len()) as u32 + 1;
        let expected = reachable_without(&genealogy, target);

        genealogy.remove(&target).unwrap();

        prop_assert_eq!(genealogy.ids(), expected);
        check_symmetry(&genealogy)?;
    }

    /// Property: a create naming a missing parent changes nothing
    #[test]
    fn prop_failed_create_is_atomic(shape in lineage_shape(), parents in prop::collection::vec(any::<Index>(), 0..5)) {
        let mut genealogy = grow(&shape);
        let count = shape.0.len() + 1;
        let before = genealogy.snapshot();

        let missing = 10_000;
        let mut parents: Vec<u32> = parents.iter().map(|ix| ix.index(count) as u32).collect();
        parents.push(missing);

        prop_assert_eq!(
            genealogy.create(count as u32, &parents),
            Err(GenealogyError::NotFound(missing))
        );
        prop_assert_eq!(genealogy.snapshot(), before);
    }

    /// Property: re-creating an existing node changes nothing
    #[test]
    fn prop_duplicate_create_is_atomic(shape in lineage_shape(), existing in any::<Index>()) {
        let mut genealogy = grow(&shape);
        let existing = existing.index(shape.0.len() + 1) as u32;
        let before = genealogy.snapshot();

        prop_assert_eq!(
            genealogy.create(existing, &[0]),
            Err(GenealogyError::AlreadyExists(existing))
        );
        prop_assert_eq!(genealogy.snapshot(), before);
    }

    /// Property: connecting the same pair twice equals connecting it once
    #[test]
    fn prop_connect_is_idempotent(shape in lineage_shape(), a in any::<Index>(), b in any::<Index>()) {
        let mut genealogy = grow(&shape);
        let count = shape.0.len() + 1;
        let (a, b) = (a.index(count) as u32, b.index(count) as u32);
        prop_assume!(a != b);
        let (child, parent) = (a.max(b), a.min(b));

        genealogy.connect(&child, &parent).unwrap();
        let once = genealogy.snapshot();
        genealogy.connect(&child, &parent).unwrap();

        prop_assert_eq!(genealogy.snapshot(), once);
        check_symmetry(&genealogy)?;
    }
}
