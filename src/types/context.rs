use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Thread-safe key-value store shared between the caller and the rules of a run.
///
/// Every value in one store has the same type `V`. Each operation takes the
/// internal lock for the duration of a single map access only, so hooks may call
/// back into the store freely and other threads may inspect it mid-run.
///
/// A store outlives runs: create it, seed it, hand it to any number of runner
/// invocations, then read the results back.
pub struct RuleContext<V> {
    entries: RwLock<HashMap<String, V>>,
}

impl<V> RuleContext<V> {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Create an empty store with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::with_capacity(capacity)),
        }
    }

    /// Seed an entry while building the store.
    #[must_use]
    pub fn with_entry(self, key: impl Into<String>, value: V) -> Self {
        self.set(key, value);
        self
    }

    /// Insert or overwrite the value stored under `key`.
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.write().insert(key.into(), value);
    }

    /// Remove `key` if present. Removing a missing key is a no-op.
    pub fn delete(&self, key: &str) {
        self.write().remove(key);
    }

    #[must_use]
    pub fn exists(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }

    /// Snapshot of the keys currently stored. Order is unspecified.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.write().clear();
    }

    // A hook that panicked while holding the guard leaves the map itself intact,
    // so poisoning is ignored rather than propagated.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, V>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, V>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<V: Clone> RuleContext<V> {
    /// Look up `key`. Returns `None` when the key is absent, which is always
    /// distinguishable from a stored default value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<V> {
        self.read().get(key).cloned()
    }

    /// Look up a key the caller asserts must exist.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not present. Use [`get`](Self::get) when absence is a
    /// legitimate outcome.
    #[must_use]
    #[track_caller]
    pub fn must_get(&self, key: &str) -> V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("key '{key}' not found in rule context"),
        }
    }

    /// Copy of the whole map at this instant.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, V> {
        self.read().clone()
    }
}

impl<V> Default for RuleContext<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for RuleContext<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleContext")
            .field("entries", &*self.read())
            .finish()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for RuleContext<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self {
            entries: RwLock::new(entries),
        }
    }
}
