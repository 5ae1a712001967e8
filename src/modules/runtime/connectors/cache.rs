//! Process-wide connection cache

use futures::future::{BoxFuture, FutureExt};
use smartpos_core::{Config, Result, SmartPosError};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::mongodb::MongoStore;
use super::traits::DocumentStore;

type Connect = Box<dyn Fn() -> BoxFuture<'static, Result<Arc<dyn DocumentStore>>> + Send + Sync>;

/// Holds at most one store handle for the lifetime of the process.
///
/// The handle is created on first use and never replaced: there is no expiry,
/// health check or reconnect. A failed first attempt caches nothing, so the
/// next caller tries again. Concurrent first callers share one attempt.
pub struct ConnectionCache {
    cell: OnceCell<Arc<dyn DocumentStore>>,
    connect: Connect,
}

impl ConnectionCache {
    /// Create a cache around an arbitrary connect function
    pub fn new<F, Fut>(connect: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Arc<dyn DocumentStore>>> + Send + 'static,
    {
        Self {
            cell: OnceCell::new(),
            connect: Box::new(move || connect().boxed()),
        }
    }

    /// Cache that connects to MongoDB with the given configuration
    pub fn mongodb(config: Config) -> Self {
        let config = Arc::new(config);
        Self::new(move || {
            let config = config.clone();
            async move {
                let store = MongoStore::connect(&config).await?;
                Ok(Arc::new(store) as Arc<dyn DocumentStore>)
            }
        })
    }

    /// Cache that already holds a store
    pub fn with_store(store: Arc<dyn DocumentStore>) -> Self {
        let handle = store.clone();
        Self {
            cell: OnceCell::new_with(Some(store)),
            connect: Box::new(move || {
                let handle = handle.clone();
                async move { Ok::<_, SmartPosError>(handle) }.boxed()
            }),
        }
    }

    /// Return the cached store, connecting first if there is none yet
    pub async fn get(&self) -> Result<Arc<dyn DocumentStore>> {
        if let Some(store) = self.cell.get() {
            debug!(backend = store.backend(), "Reusing cached connection");
            return Ok(store.clone());
        }

        let store = self
            .cell
            .get_or_try_init(|| async {
                info!("Opening database connection");
                (self.connect)().await
            })
            .await?;
        Ok(store.clone())
    }

    /// Returns true once a connection has been established
    pub fn is_connected(&self) -> bool {
        self.cell.initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectors::MemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_cache(fail_first: usize) -> (ConnectionCache, Arc<AtomicUsize>) {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = attempts.clone();
        let cache = ConnectionCache::new(move || {
            let attempt = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < fail_first {
                    Err(SmartPosError::MongoDB("server selection timeout".into()))
                } else {
                    Ok(Arc::new(MemoryStore::new()) as Arc<dyn DocumentStore>)
                }
            }
        });
        (cache, attempts)
    }

    #[tokio::test]
    async fn test_connects_once() {
        let (cache, attempts) = counting_cache(0);
        assert!(!cache.is_connected());

        let first = cache.get().await.unwrap();
        let second = cache.get().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert!(cache.is_connected());
    }

    #[tokio::test]
    async fn test_failed_connect_is_not_cached() {
        let (cache, attempts) = counting_cache(1);

        assert!(cache.get().await.is_err());
        assert!(!cache.is_connected());

        assert!(cache.get().await.is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_concurrent_first_use_shares_one_attempt() {
        let (cache, attempts) = counting_cache(0);
        let cache = Arc::new(cache);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move { cache.get().await.map(|_| ()) })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_with_store() {
        let cache = ConnectionCache::with_store(Arc::new(MemoryStore::new()));
        assert!(cache.is_connected());
        assert_eq!(cache.get().await.unwrap().backend(), "memory");
    }

    #[tokio::test]
    async fn test_mongodb_without_url_fails_at_first_use() {
        let cache = ConnectionCache::mongodb(Config::default());
        let err = cache.get().await.err().unwrap();
        assert!(matches!(err, SmartPosError::Config(_)));
    }
}
