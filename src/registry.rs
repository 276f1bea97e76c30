use crate::key::Key;
use crate::revealable::Revealable;
use std::collections::{HashMap, HashSet};

/// Revealables known to a reveal state, indexed by key.
///
/// Duplicate keys are last-write-wins: a second element registered under an existing key
/// replaces the first.
#[derive(Debug, Clone)]
pub(crate) struct Registry<K: Key> {
    revealables: HashMap<K, Revealable<K>>,
}

impl<K: Key> Default for Registry<K> {
    fn default() -> Self {
        Registry {
            revealables: HashMap::new(),
        }
    }
}

impl<K: Key> Registry<K> {
    pub fn new() -> Registry<K> {
        Registry::default()
    }

    /// Inserts or replaces a revealable. Returns the replaced entry.
    pub fn put(&mut self, revealable: Revealable<K>) -> Option<Revealable<K>> {
        self.revealables.insert(revealable.key.clone(), revealable)
    }

    /// Removes a revealable. Removing an unknown key does nothing.
    pub fn remove(&mut self, key: &K) -> Option<Revealable<K>> {
        self.revealables.remove(key)
    }

    pub fn get(&self, key: &K) -> Option<&Revealable<K>> {
        self.revealables.get(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.revealables.contains_key(key)
    }

    /// Returns a snapshot of all keys.
    pub fn keys(&self) -> HashSet<K> {
        self.revealables.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.revealables.len()
    }
}
