//! Id-keyed entity storage with insertion-ordered traversal.
//!
//! Entities live in a slot vector; removal leaves a tombstone so that the
//! index of every other entity stays valid. Tombstones are compacted away
//! once they outnumber live entries. Traversal that wants to drop entities
//! returns [`Visit::Evict`] and the registry applies those removals after
//! the walk, so a visitor never observes a half-mutated collection.

use fnv::FnvHashMap;
use std::hash::Hash;

/// Anything stored in a [`Registry`] exposes its own key.
pub trait Keyed {
    type Key: Clone + Eq + Hash;

    fn key(&self) -> &Self::Key;
}

/// Visitor verdict for [`Registry::for_each_mut`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visit {
    Keep,
    Evict,
}

pub struct Registry<T: Keyed> {
    slots: Vec<Option<T>>,
    index: FnvHashMap<T::Key, usize>,
}

impl<T: Keyed> Default for Registry<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            index: FnvHashMap::default(),
        }
    }
}

impl<T: Keyed> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, key: &T::Key) -> bool {
        self.index.contains_key(key)
    }

    /// Register `entity`; an entity whose key is taken is handed back.
    pub fn add(&mut self, entity: T) -> Result<(), T> {
        if self.index.contains_key(entity.key()) {
            return Err(entity);
        }
        self.index.insert(entity.key().clone(), self.slots.len());
        self.slots.push(Some(entity));
        Ok(())
    }

    pub fn remove(&mut self, key: &T::Key) -> Option<T> {
        let slot = self.index.remove(key)?;
        let removed = self.slots.get_mut(slot).and_then(Option::take);
        self.maybe_compact();
        removed
    }

    pub fn find(&self, key: &T::Key) -> Option<&T> {
        let slot = *self.index.get(key)?;
        self.slots.get(slot).and_then(Option::as_ref)
    }

    pub fn find_mut(&mut self, key: &T::Key) -> Option<&mut T> {
        let slot = *self.index.get(key)?;
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }

    /// Live entities in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    pub fn for_each(&self, mut visitor: impl FnMut(&T)) {
        for entity in self.iter() {
            visitor(entity);
        }
    }

    /// Visit every live entity mutably; evictions are applied after the walk.
    /// Returns the evicted entities in traversal order.
    pub fn for_each_mut(&mut self, mut visitor: impl FnMut(&mut T) -> Visit) -> Vec<T> {
        let mut doomed = Vec::new();
        for entity in self.slots.iter_mut().flatten() {
            if visitor(entity) == Visit::Evict {
                doomed.push(entity.key().clone());
            }
        }
        doomed.iter().filter_map(|key| self.remove(key)).collect()
    }

    /// Remove everything, returning the entities in insertion order.
    pub fn drain(&mut self) -> Vec<T> {
        self.index.clear();
        self.slots.drain(..).flatten().collect()
    }

    fn maybe_compact(&mut self) {
        let live = self.index.len();
        let dead = self.slots.len() - live;
        if dead <= live {
            return;
        }
        self.slots.retain(Option::is_some);
        for (slot, entity) in self.slots.iter().enumerate() {
            if let Some(entity) = entity {
                self.index.insert(entity.key().clone(), slot);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item(u32);

    impl Keyed for Item {
        type Key = u32;
        fn key(&self) -> &u32 {
            &self.0
        }
    }

    #[test]
    fn compaction_keeps_lookups_valid() {
        let mut reg = Registry::new();
        for i in 0..10 {
            reg.add(Item(i)).unwrap();
        }
        for i in 0..8 {
            reg.remove(&i);
        }
        assert!(reg.slots.len() < 10);
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.find(&8), Some(&Item(8)));
        assert_eq!(reg.find(&9), Some(&Item(9)));
    }
}
