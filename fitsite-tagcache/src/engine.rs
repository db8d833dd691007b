use ahash::{AHashMap, AHashSet};
use moka::{notification::RemovalCause, sync::Cache};
use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};
use thiserror::Error as ThisError;

pub type CacheKey = u64;

type TagIndex = Arc<Mutex<AHashMap<Arc<str>, AHashSet<CacheKey>>>>;

#[derive(Debug, ThisError)]
pub enum TagCacheError {
    #[error("invalid cache tag: {0:?}")]
    InvalidTag(String),

    #[error("tag index lock poisoned")]
    Poisoned,
}

#[derive(Debug, Clone)]
pub struct TaggedEntry<V> {
    pub tags: Arc<[Arc<str>]>,
    pub value: V,
}

/// Invalidation epoch observed before a backing read started.
///
/// An insert carrying a ticket older than the current epoch is dropped, so a
/// read that raced an invalidation never repopulates the cache with the data
/// the invalidation was meant to evict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

pub struct TagCache<V> {
    cache: Cache<CacheKey, TaggedEntry<V>>,
    index: TagIndex,
    epoch: AtomicU64,
}

impl<V> TagCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(ttl_secs: u64, max_capacity: u64) -> Self {
        let index: TagIndex = Arc::default();
        let listener_index = index.clone();

        let cache = Cache::builder()
            .time_to_live(Duration::from_secs(ttl_secs.max(1)))
            .max_capacity(max_capacity.max(1))
            .eviction_listener(
                move |key: Arc<CacheKey>, entry: TaggedEntry<V>, cause: RemovalCause| {
                    // A replaced entry is re-indexed by the insert that replaced it.
                    if matches!(cause, RemovalCause::Replaced) {
                        return;
                    }
                    if let Ok(mut index) = listener_index.lock() {
                        unlink(&mut index, *key, &entry.tags);
                    }
                },
            )
            .build();

        Self {
            cache,
            index,
            epoch: AtomicU64::new(0),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<V> {
        self.cache.get(key).map(|entry| entry.value)
    }

    pub fn ticket(&self) -> FetchTicket {
        FetchTicket(self.epoch.load(Ordering::SeqCst))
    }

    /// Stores `value` under `key` unless an invalidation happened after `ticket` was taken.
    /// Returns whether the entry was kept.
    pub fn insert<I, T>(&self, ticket: FetchTicket, key: CacheKey, tags: I, value: V) -> bool
    where
        I: IntoIterator<Item = T>,
        T: Into<Arc<str>>,
    {
        if self.ticket() != ticket {
            return false;
        }

        let tags: Arc<[Arc<str>]> = tags.into_iter().map(Into::into).collect();
        self.cache.insert(
            key,
            TaggedEntry {
                tags: tags.clone(),
                value,
            },
        );

        // The guard must be gone before invalidating: the eviction listener takes the lock too.
        let indexed = match self.index.lock() {
            Ok(mut index) => {
                for tag in tags.iter() {
                    index.entry(tag.clone()).or_default().insert(key);
                }
                true
            }
            Err(_) => false,
        };
        if !indexed {
            self.cache.invalidate(&key);
            return false;
        }

        // An invalidation may have slipped in between the check and the insert.
        if self.ticket() != ticket {
            self.cache.invalidate(&key);
            return false;
        }
        true
    }

    /// Evicts every entry carrying `tag`. Returns how many keys were indexed under it.
    pub fn invalidate_tag(&self, tag: &str) -> Result<usize, TagCacheError> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(TagCacheError::InvalidTag(tag.to_string()));
        }

        self.epoch.fetch_add(1, Ordering::SeqCst);

        // The lock must be released before invalidating: the eviction listener takes it too.
        let keys = self
            .index
            .lock()
            .map_err(|_| TagCacheError::Poisoned)?
            .remove(tag)
            .unwrap_or_default();

        for key in &keys {
            self.cache.invalidate(key);
        }
        Ok(keys.len())
    }

    pub fn invalidate_all(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.cache.invalidate_all();
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

fn unlink(index: &mut AHashMap<Arc<str>, AHashSet<CacheKey>>, key: CacheKey, tags: &[Arc<str>]) {
    for tag in tags {
        if let Some(keys) = index.get_mut(tag) {
            keys.remove(&key);
            if keys.is_empty() {
                index.remove(tag);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_none_when_empty() {
        let cache: TagCache<String> = TagCache::new(3600, 64);
        assert!(cache.get(&42).is_none());
    }

    #[test]
    fn insert_then_get_hits() {
        let cache = TagCache::new(3600, 64);
        let ticket = cache.ticket();
        assert!(cache.insert(ticket, 7, ["membership_plans"], "rows".to_string()));
        assert_eq!(cache.get(&7).as_deref(), Some("rows"));
    }

    #[test]
    fn invalidate_tag_only_evicts_matching_entries() {
        let cache = TagCache::new(3600, 64);
        let ticket = cache.ticket();
        cache.insert(ticket, 1, ["access_passes", "pass_features"], 1_u32);
        cache.insert(ticket, 2, ["membership_plans"], 2_u32);

        assert_eq!(cache.invalidate_tag("pass_features").unwrap(), 1);

        assert!(cache.get(&1).is_none());
        assert_eq!(cache.get(&2), Some(2));
    }

    #[test]
    fn replacing_an_entry_keeps_it_indexed() {
        let cache = TagCache::new(3600, 64);
        cache.insert(cache.ticket(), 3, ["social_posts"], 1_u32);
        cache.insert(cache.ticket(), 3, ["social_posts"], 2_u32);
        assert_eq!(cache.get(&3), Some(2));

        cache.invalidate_tag("social_posts").unwrap();
        assert!(cache.get(&3).is_none());
    }

    #[test]
    fn stale_ticket_is_not_stored() {
        let cache = TagCache::new(3600, 64);
        let ticket = cache.ticket();
        cache.invalidate_tag("social_posts").unwrap();

        assert!(!cache.insert(ticket, 9, ["social_posts"], 9_u32));
        assert!(cache.get(&9).is_none());

        let fresh = cache.ticket();
        assert!(cache.insert(fresh, 9, ["social_posts"], 10_u32));
        assert_eq!(cache.get(&9), Some(10));
    }

    #[test]
    fn poisoned_index_drops_the_entry_without_blocking() {
        let cache = Arc::new(TagCache::new(3600, 64));

        let poisoner = cache.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.index.lock().unwrap();
            panic!("poison the tag index");
        })
        .join();
        assert!(cache.index.is_poisoned());

        let (tx, rx) = std::sync::mpsc::channel();
        let worker = cache.clone();
        std::thread::spawn(move || {
            let stored = worker.insert(worker.ticket(), 5, ["social_posts"], 5_u32);
            let _ = tx.send(stored);
        });

        let stored = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("insert blocked on the tag index");
        assert!(!stored);
        assert!(cache.get(&5).is_none());
    }

    #[test]
    fn blank_tag_is_rejected() {
        let cache: TagCache<u32> = TagCache::new(3600, 64);
        assert!(matches!(
            cache.invalidate_tag("  "),
            Err(TagCacheError::InvalidTag(_))
        ));
    }
}
