//! Per-factory content cache using moka

use moka::future::Cache;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Typed view over a shared moka cache
///
/// Values of any clonable type are stored type-erased; a lookup with the
/// wrong type is a miss.
#[derive(Clone)]
pub struct CacheAgent {
    inner: Cache<String, Arc<dyn Any + Send + Sync>>,
}

impl CacheAgent {
    /// Create cache with capacity and time-to-live
    #[must_use]
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Cached value under `key`
    pub async fn get<T>(&self, key: &str) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.inner
            .get(key)
            .await
            .and_then(|value| value.downcast_ref::<T>().cloned())
    }

    /// Store `value` under `key`
    pub async fn insert<T>(&self, key: impl Into<String>, value: T)
    where
        T: Send + Sync + 'static,
    {
        self.inner.insert(key.into(), Arc::new(value)).await;
    }

    /// Drop the entry under `key`
    #[inline]
    pub async fn invalidate(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    /// Drop every entry
    #[inline]
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    /// Approximate number of entries
    #[inline]
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

impl fmt::Debug for CacheAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheAgent")
            .field("entry_count", &self.inner.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent() -> CacheAgent {
        CacheAgent::new(100, Duration::from_secs(60))
    }

    #[tokio::test]
    async fn insert_then_get() {
        let cache = agent();
        cache.insert("page:/index", "home".to_string()).await;

        assert_eq!(cache.get::<String>("page:/index").await.as_deref(), Some("home"));
        assert_eq!(cache.get::<String>("page:/other").await, None);
    }

    #[tokio::test]
    async fn wrong_type_is_a_miss() {
        let cache = agent();
        cache.insert("cp:1", 42_u32).await;

        assert_eq!(cache.get::<String>("cp:1").await, None);
        assert_eq!(cache.get::<u32>("cp:1").await, Some(42));
    }

    #[tokio::test]
    async fn invalidate_removes_entry() {
        let cache = agent();
        cache.insert("cp:1", 1_u8).await;
        cache.invalidate("cp:1").await;

        assert_eq!(cache.get::<u8>("cp:1").await, None);
    }
}
