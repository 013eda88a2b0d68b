//! Bounded memo cache for per-process lookups.
//!
//! Entries never expire. A process that exits and whose PID is later reused
//! will be reported with the old process's details until the entry is evicted
//! or the owner drops the cache. Callers that need fresher data should build a
//! new cache per monitoring session.

use std::collections::{HashMap, VecDeque};

use parking_lot::RwLock;

/// Default number of entries kept.
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Which per-process value an entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailField {
    ParentPid,
    CommandPath,
    WorkingDir,
}

type Key = (u32, DetailField);

struct Inner {
    entries: HashMap<Key, String>,
    order: VecDeque<Key>,
}

/// Concurrency-safe memo of raw lookup results keyed by `(pid, field)`.
///
/// When full, the oldest inserted entry is evicted first. Racing inserts of the
/// same key keep the last value written.
pub struct DetailCache {
    capacity: usize,
    inner: RwLock<Inner>,
}

impl DetailCache {
    /// Create a cache holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            inner: RwLock::new(Inner {
                entries: HashMap::with_capacity(capacity.min(DEFAULT_CACHE_CAPACITY)),
                order: VecDeque::new(),
            }),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a cached value.
    pub fn get(&self, pid: u32, field: DetailField) -> Option<String> {
        self.inner.read().entries.get(&(pid, field)).cloned()
    }

    /// Insert or overwrite a value, evicting the oldest entries if needed.
    pub fn insert(&self, pid: u32, field: DetailField, value: String) {
        let key = (pid, field);
        let mut inner = self.inner.write();

        if inner.entries.insert(key, value).is_some() {
            return;
        }

        inner.order.push_back(key);
        while inner.entries.len() > self.capacity {
            match inner.order.pop_front() {
                Some(oldest) => {
                    inner.entries.remove(&oldest);
                }
                None => break,
            }
        }
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.entries.clear();
        inner.order.clear();
    }
}

impl Default for DetailCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl std::fmt::Debug for DetailCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailCache")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_get_and_insert() {
        let cache = DetailCache::default();
        assert!(cache.is_empty());
        assert_eq!(cache.get(1, DetailField::ParentPid), None);

        cache.insert(1, DetailField::ParentPid, "0".to_string());
        cache.insert(1, DetailField::CommandPath, "/sbin/launchd".to_string());

        assert_eq!(cache.get(1, DetailField::ParentPid).as_deref(), Some("0"));
        assert_eq!(
            cache.get(1, DetailField::CommandPath).as_deref(),
            Some("/sbin/launchd")
        );
        assert_eq!(cache.get(1, DetailField::WorkingDir), None);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_evicts_oldest_insertion_first() {
        let cache = DetailCache::new(2);
        cache.insert(1, DetailField::WorkingDir, "/a".to_string());
        cache.insert(2, DetailField::WorkingDir, "/b".to_string());
        // Overwrite does not refresh position.
        cache.insert(1, DetailField::WorkingDir, "/a2".to_string());
        cache.insert(3, DetailField::WorkingDir, "/c".to_string());

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(1, DetailField::WorkingDir), None);
        assert_eq!(cache.get(2, DetailField::WorkingDir).as_deref(), Some("/b"));
        assert_eq!(cache.get(3, DetailField::WorkingDir).as_deref(), Some("/c"));
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let cache = DetailCache::new(0);
        assert_eq!(cache.capacity(), 1);
        cache.insert(1, DetailField::ParentPid, "1".to_string());
        cache.insert(2, DetailField::ParentPid, "1".to_string());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear() {
        let cache = DetailCache::default();
        cache.insert(7, DetailField::ParentPid, "1".to_string());
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_inserts_stay_bounded() {
        let cache = Arc::new(DetailCache::new(64));
        let handles: Vec<_> = (0..8u32)
            .map(|t| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for pid in 0..100u32 {
                        cache.insert(pid, DetailField::ParentPid, t.to_string());
                        let _ = cache.get(pid, DetailField::ParentPid);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 64);
        assert!(cache.get(99, DetailField::ParentPid).is_some());
    }
}
