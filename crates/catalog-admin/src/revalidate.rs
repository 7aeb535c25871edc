//! # Invalidation Fan-out
//!
//! After a successful write every cached view that depends on the resource type is invalidated,
//! one call per path. Failures are logged and dropped: the caller's result never depends on them.

use crate::config::RevalidationConfig;
use crate::model::ResourceKind;
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CacheError {
    #[error("View cache unavailable: {0}")]
    Unavailable(String),
}

/// The collaborator that owns rendered views. `invalidate` must be idempotent.
#[async_trait]
pub trait ViewCache: Send + Sync {
    async fn invalidate(&self, path: &str) -> Result<(), CacheError>;
}

#[derive(Debug, Default)]
struct CacheState {
    cached: BTreeSet<String>,
    invalidations: Vec<String>,
}

/// In-process view cache that records what was rendered and what was invalidated.
#[derive(Debug, Default)]
pub struct MemoryViewCache {
    state: Mutex<CacheState>,
}

impl MemoryViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `path` as rendered and cached.
    pub fn render(&self, path: &str) {
        self.lock().cached.insert(path.to_string());
    }

    pub fn is_cached(&self, path: &str) -> bool {
        self.lock().cached.contains(path)
    }

    /// Every invalidated path, in call order.
    pub fn invalidations(&self) -> Vec<String> {
        self.lock().invalidations.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ViewCache for MemoryViewCache {
    async fn invalidate(&self, path: &str) -> Result<(), CacheError> {
        let mut state = self.lock();
        state.cached.remove(path);
        state.invalidations.push(path.to_string());
        Ok(())
    }
}

/// Invalidates each path in turn. Returns how many invalidations failed.
pub async fn invalidate(cache: &dyn ViewCache, paths: &[String]) -> usize {
    let mut failed = 0;
    for path in paths {
        match cache.invalidate(path).await {
            Ok(()) => debug!(%path, "Invalidated"),
            Err(e) => {
                failed += 1;
                warn!(%path, error = %e, "Invalidation failed");
            }
        }
    }
    failed
}

/// Runs the fan-out for a resource type after a write.
#[derive(Clone)]
pub struct Revalidator {
    cache: Arc<dyn ViewCache>,
    config: RevalidationConfig,
}

impl Revalidator {
    pub fn new(cache: Arc<dyn ViewCache>, config: RevalidationConfig) -> Self {
        Self { cache, config }
    }

    /// Invalidates the views that depend on `kind`. With `detached` set the fan-out runs on its
    /// own task and this returns immediately.
    pub async fn after_mutation(&self, kind: ResourceKind, id: &str) {
        let paths = self.config.paths_for(kind, id);
        debug!(resource = %kind, %id, count = paths.len(), "Revalidating");
        if self.config.detached {
            let cache = self.cache.clone();
            tokio::spawn(async move {
                invalidate(cache.as_ref(), &paths).await;
            });
        } else {
            invalidate(self.cache.as_ref(), &paths).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails every call after counting it.
    struct BrokenCache {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ViewCache for BrokenCache {
        async fn invalidate(&self, path: &str) -> Result<(), CacheError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(CacheError::Unavailable(path.to_string()))
        }
    }

    fn inline() -> RevalidationConfig {
        RevalidationConfig {
            detached: false,
            ..RevalidationConfig::default()
        }
    }

    #[tokio::test]
    async fn test_one_call_per_path() {
        let cache = Arc::new(MemoryViewCache::new());
        cache.render("/menu");
        let revalidator = Revalidator::new(cache.clone(), inline());

        revalidator.after_mutation(ResourceKind::Category, "abc").await;

        assert_eq!(cache.invalidations(), vec!["/admin/categories", "/menu"]);
        assert!(!cache.is_cached("/menu"));
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_the_fan_out() {
        let cache = BrokenCache {
            calls: AtomicUsize::new(0),
        };
        let paths = vec!["/a".to_string(), "/b".to_string(), "/c".to_string()];

        assert_eq!(invalidate(&cache, &paths).await, 3);
        assert_eq!(cache.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_detached_fan_out_completes_in_background() {
        let cache = Arc::new(MemoryViewCache::new());
        let revalidator = Revalidator::new(cache.clone(), RevalidationConfig::default());

        revalidator.after_mutation(ResourceKind::Product, "p1").await;

        for _ in 0..100 {
            if cache.invalidations().len() == 3 {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(
            cache.invalidations(),
            vec!["/admin/menu-items", "/admin/menu-items/p1/edit", "/menu"]
        );
    }
}
