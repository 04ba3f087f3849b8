//! TTL key-value cache
//!
//! In-process cache for generated parlays. Writes replace entries wholesale
//! (last-writer-wins); there is no partial update, versioning, or
//! single-flight de-duplication, so concurrent misses may each regenerate.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

struct Entry<V> {
    inserted_at: Instant,
    value: V,
}

/// Async map with a single explicit TTL
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: RwLock<HashMap<K, Entry<V>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Cloned value for an unexpired key
    pub async fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.read().await;
        entries.get(key).and_then(|entry| {
            if entry.inserted_at.elapsed() < self.ttl {
                Some(entry.value.clone())
            } else {
                None
            }
        })
    }

    /// Insert or overwrite
    pub async fn insert(&self, key: K, value: V) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key,
            Entry {
                inserted_at: Instant::now(),
                value,
            },
        );
    }

    /// Remove all keys matching the predicate
    pub async fn remove_matching(&self, mut predicate: impl FnMut(&K) -> bool) {
        let mut entries = self.entries.write().await;
        entries.retain(|k, _| !predicate(k));
    }

    /// All unexpired values
    pub async fn values(&self) -> Vec<V> {
        let entries = self.entries.read().await;
        entries
            .values()
            .filter(|e| e.inserted_at.elapsed() < self.ttl)
            .map(|e| e.value.clone())
            .collect()
    }

    /// All unexpired key/value pairs
    pub async fn snapshot(&self) -> Vec<(K, V)> {
        let entries = self.entries.read().await;
        entries
            .iter()
            .filter(|(_, e)| e.inserted_at.elapsed() < self.ttl)
            .map(|(k, e)| (k.clone(), e.value.clone()))
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
