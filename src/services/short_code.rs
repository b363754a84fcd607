//! Short-code allocation
//!
//! Codes are 3 characters drawn uniformly from `[0-9a-zA-Z]`. The existence
//! check is a point-in-time read; the UNIQUE index on `bookmarks.short_url`
//! decides the race, and callers re-allocate when the insert loses it.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::errors::Result;
use crate::storage::SeaOrmStorage;
use crate::utils::generate_random_code;

/// Length of every generated short code
pub const SHORT_CODE_LENGTH: usize = 3;

/// Answers whether a short code is already held by a bookmark
#[async_trait]
pub trait CodeRegistry: Send + Sync {
    async fn code_exists(&self, code: &str) -> Result<bool>;
}

#[async_trait]
impl CodeRegistry for SeaOrmStorage {
    async fn code_exists(&self, code: &str) -> Result<bool> {
        self.short_url_exists(code).await
    }
}

/// Produces candidate short codes
pub type CodeGenerator = Arc<dyn Fn() -> String + Send + Sync>;

#[derive(Clone)]
pub struct ShortCodeAllocator {
    registry: Arc<dyn CodeRegistry>,
    generator: CodeGenerator,
}

impl ShortCodeAllocator {
    pub fn new(registry: Arc<dyn CodeRegistry>) -> Self {
        Self::with_generator(registry, || generate_random_code(SHORT_CODE_LENGTH))
    }

    /// Allocator drawing candidates from `generator` instead of the random source
    pub fn with_generator<G>(registry: Arc<dyn CodeRegistry>, generator: G) -> Self
    where
        G: Fn() -> String + Send + Sync + 'static,
    {
        Self {
            registry,
            generator: Arc::new(generator),
        }
    }

    /// Draw codes until one is not taken.
    ///
    /// There is no attempt limit; the only failure is a registry error.
    pub async fn allocate(&self) -> Result<String> {
        let mut collisions = 0u32;
        loop {
            let code = (self.generator)();
            if !self.registry.code_exists(&code).await? {
                if collisions > 0 {
                    debug!(
                        "Allocated short code {} after {} collisions",
                        code, collisions
                    );
                }
                return Ok(code);
            }
            collisions += 1;
            debug!("Short code {} already taken, drawing again", code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ShortmarkError;
    use crate::utils::is_valid_short_code;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Reports the first `collisions` lookups as taken
    struct CollidingRegistry {
        collisions: u32,
        calls: AtomicU32,
        seen: Mutex<Vec<String>>,
    }

    impl CollidingRegistry {
        fn new(collisions: u32) -> Self {
            Self {
                collisions,
                calls: AtomicU32::new(0),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CodeRegistry for CollidingRegistry {
        async fn code_exists(&self, code: &str) -> Result<bool> {
            self.seen.lock().unwrap().push(code.to_string());
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(n < self.collisions)
        }
    }

    struct FailingRegistry;

    #[async_trait]
    impl CodeRegistry for FailingRegistry {
        async fn code_exists(&self, _code: &str) -> Result<bool> {
            Err(ShortmarkError::database_connection("pool closed"))
        }
    }

    #[tokio::test]
    async fn test_allocate_without_collision() {
        let registry = Arc::new(CollidingRegistry::new(0));
        let allocator = ShortCodeAllocator::new(registry.clone());

        let code = allocator.allocate().await.unwrap();
        assert!(is_valid_short_code(&code, SHORT_CODE_LENGTH));
        assert_eq!(registry.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_allocate_keeps_drawing_through_collisions() {
        let registry = Arc::new(CollidingRegistry::new(25));
        let allocator = ShortCodeAllocator::new(registry.clone());

        let code = allocator.allocate().await.unwrap();
        assert_eq!(registry.calls.load(Ordering::SeqCst), 26);
        let seen = registry.seen.lock().unwrap();
        assert_eq!(seen.last(), Some(&code));
        assert!(seen.iter().all(|c| is_valid_short_code(c, SHORT_CODE_LENGTH)));
    }

    #[tokio::test]
    async fn test_allocate_uses_injected_generator() {
        let registry = Arc::new(CollidingRegistry::new(1));
        let queue = Mutex::new(vec!["zz1".to_string(), "zz2".to_string()]);
        let allocator = ShortCodeAllocator::with_generator(registry.clone(), move || {
            queue.lock().unwrap().remove(0)
        });

        assert_eq!(allocator.allocate().await.unwrap(), "zz2");
        assert_eq!(*registry.seen.lock().unwrap(), vec!["zz1", "zz2"]);
    }

    #[tokio::test]
    async fn test_allocate_propagates_registry_error() {
        let allocator = ShortCodeAllocator::new(Arc::new(FailingRegistry));
        let err = allocator.allocate().await.unwrap_err();
        assert!(matches!(err, ShortmarkError::DatabaseConnection(_)));
    }
}
