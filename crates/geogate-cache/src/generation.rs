use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use metrics::counter;
use tracing::debug;

/// Memoizes values per `(key, generation)`.
///
/// The first value stored for a key within a generation is the one every later lookup
/// in that generation observes. Concurrent misses may compute twice; only the first
/// insert is kept. A value computed under a generation that has since been invalidated
/// is handed back to its caller but never stored.
#[derive(Debug)]
pub struct GenerationCache<K, V> {
    name: &'static str,
    generation: AtomicU64,
    entries: RwLock<HashMap<(K, u64), Arc<V>>>,
}

impl<K, V> GenerationCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            generation: AtomicU64::new(0),
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<(K, u64), Arc<V>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<(K, u64), Arc<V>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Looks up `key` in the current generation.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let generation = self.generation();
        self.read().get(&(key.clone(), generation)).cloned()
    }

    /// Stores `value` for `key` under `generation`.
    ///
    /// Returns the value callers should use: the already-stored one if another
    /// caller won the race, otherwise `value`.
    pub fn insert(&self, key: K, generation: u64, value: Arc<V>) -> Arc<V> {
        let mut entries = self.write();
        if generation != self.generation() {
            debug!(cache = self.name, generation, "Discarding value from stale generation");
            return value;
        }
        entries
            .entry((key, generation))
            .or_insert(value)
            .clone()
    }

    /// Returns the cached value for `key`, computing and storing it on a miss.
    pub async fn get_or_try_insert_with<F, Fut, E>(&self, key: K, compute: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let generation = self.generation();
        let cached = self.read().get(&(key.clone(), generation)).cloned();
        if let Some(hit) = cached {
            counter!("access_cache_hits_total", "cache" => self.name).increment(1);
            return Ok(hit);
        }

        counter!("access_cache_misses_total", "cache" => self.name).increment(1);
        let value = Arc::new(compute().await?);
        Ok(self.insert(key, generation, value))
    }

    /// Starts a new generation and drops every stored entry.
    ///
    /// Returns the new generation.
    pub fn invalidate(&self) -> u64 {
        let mut entries = self.write();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        entries.clear();
        drop(entries);

        counter!("access_cache_invalidations_total", "cache" => self.name).increment(1);
        debug!(cache = self.name, generation, "Cache invalidated");
        generation
    }
}
