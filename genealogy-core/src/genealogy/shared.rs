//! Shared access to one genealogy.
//!
//! [`Genealogy`] itself does no locking. This handle puts the whole engine
//! behind a single mutex so that clones of it can be used from several
//! threads, with every call fully serialized.

use std::sync::Arc;

use parking_lot::Mutex;

use super::Genealogy;
use crate::entity::Entity;
use crate::error::Result;

/// Cloneable, lock-protected handle to a [`Genealogy`].
pub struct SharedGenealogy<V: Entity> {
    inner: Arc<Mutex<Genealogy<V>>>,
}

impl<V: Entity> SharedGenealogy<V> {
    /// Create a shared graph holding only the stem.
    pub fn new(stem_id: V::Id) -> Self {
        Self::from(Genealogy::new(stem_id))
    }

    /// Run `f` with shared access to the graph.
    pub fn read<R>(&self, f: impl FnOnce(&Genealogy<V>) -> R) -> R {
        f(&*self.inner.lock())
    }

    /// Run `f` with exclusive access to the graph.
    ///
    /// Several operations inside one closure are applied without any other
    /// handle observing the intermediate states.
    pub fn write<R>(&self, f: impl FnOnce(&mut Genealogy<V>) -> R) -> R {
        f(&mut *self.inner.lock())
    }

    /// See [`Genealogy::create`].
    pub fn create(&self, id: V::Id, parent_ids: &[V::Id]) -> Result<(), V::Id> {
        self.write(|genealogy| genealogy.create(id, parent_ids))
    }

    /// See [`Genealogy::connect`].
    pub fn connect(&self, child_id: &V::Id, parent_id: &V::Id) -> Result<(), V::Id> {
        self.write(|genealogy| genealogy.connect(child_id, parent_id))
    }

    /// See [`Genealogy::remove`].
    pub fn remove(&self, id: &V::Id) -> Result<(), V::Id> {
        self.write(|genealogy| genealogy.remove(id))
    }

    /// See [`Genealogy::exists`].
    pub fn exists(&self, id: &V::Id) -> bool {
        self.read(|genealogy| genealogy.exists(id))
    }

    /// See [`Genealogy::parents_of`].
    pub fn parents_of(&self, id: &V::Id) -> Result<Vec<V::Id>, V::Id> {
        self.read(|genealogy| genealogy.parents_of(id))
    }

    /// Take the graph back if this is the last handle.
    pub fn try_unwrap(self) -> std::result::Result<Genealogy<V>, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl<V: Entity> From<Genealogy<V>> for SharedGenealogy<V> {
    fn from(genealogy: Genealogy<V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(genealogy)),
        }
    }
}

impl<V: Entity> Clone for SharedGenealogy<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
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
    fn handles_share_one_graph() {
        let shared = SharedGenealogy::<Virus>::new(0);
        let other = shared.clone();

        shared.create(1, &[0]).unwrap();
        assert!(other.exists(&1));

        other.remove(&1).unwrap();
        assert!(!shared.exists(&1));
    }

    #[test]
    fn concurrent_creates_are_serialized() {
        let shared = SharedGenealogy::<Virus>::new(0);

        std::thread::scope(|scope| {
            for worker in 0..4u32 {
                let handle = shared.clone();
                scope.spawn(move || {
                    for n in 0..25u32 {
                        let id = 1 + worker * 100 + n;
                        handle.create(id, &[0]).unwrap();
                        handle.connect(&id, &0).unwrap();
                    }
                });
            }
        });

        assert_eq!(shared.read(Genealogy::node_count), 101);
        assert_eq!(shared.parents_of(&101).unwrap(), vec![0]);
    }

    #[test]
    fn write_groups_several_operations() {
        let shared = SharedGenealogy::<Virus>::new(0);
        let created = shared.write(|genealogy| {
            genealogy.create(1, &[0])?;
            genealogy.create(2, &[1])?;
            genealogy.remove(&1)
        });

        assert_eq!(created, Ok(()));
        assert_eq!(shared.read(Genealogy::ids), vec![0]);
    }

    #[test]
    fn last_handle_unwraps() {
        let shared = SharedGenealogy::<Virus>::new(0);
        let other = shared.clone();

        let shared = shared.try_unwrap().err().unwrap();
        drop(other);

        let genealogy = shared.try_unwrap().ok().unwrap();
        assert_eq!(genealogy.node_count(), 1);
    }
}
