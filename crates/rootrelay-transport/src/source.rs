//! Read-only access to the source of truth.

use std::sync::Arc;

use async_trait::async_trait;
use rootrelay_core::{Address, U256};

use crate::error::SourceError;

/// The component holding the authoritative root.
///
/// Implementations must not mutate the source when answering.
#[async_trait]
pub trait RootSource: Send + Sync {
    /// Address of the source-of-truth component.
    fn address(&self) -> Address;

    /// The current root (`latestRoot()`).
    async fn latest_root(&self) -> Result<U256, SourceError>;
}

#[async_trait]
impl<S: RootSource + ?Sized> RootSource for Arc<S> {
    fn address(&self) -> Address {
        (**self).address()
    }

    async fn latest_root(&self) -> Result<U256, SourceError> {
        (**self).latest_root().await
    }
}

/// In-memory source for tests and local wiring.
pub mod memory {
    use super::*;
    use std::sync::RwLock;

    pub struct MemorySource {
        address: Address,
        inner: RwLock<SourceInner>,
    }

    struct SourceInner {
        root: U256,
        failure: Option<SourceError>,
        reads: u64,
    }

    impl MemorySource {
        pub fn new(address: Address, root: U256) -> Self {
            Self {
                address,
                inner: RwLock::new(SourceInner {
                    root,
                    failure: None,
                    reads: 0,
                }),
            }
        }

        pub fn set_root(&self, root: U256) {
            self.inner.write().unwrap().root = root;
        }

        /// Fail every read with `error` until [`MemorySource::recover`].
        pub fn fail_with(&self, error: SourceError) {
            self.inner.write().unwrap().failure = Some(error);
        }

        pub fn recover(&self) {
            self.inner.write().unwrap().failure = None;
        }

        /// Number of successful reads served.
        pub fn reads(&self) -> u64 {
            self.inner.read().unwrap().reads
        }
    }

    #[async_trait]
    impl RootSource for MemorySource {
        fn address(&self) -> Address {
            self.address
        }

        async fn latest_root(&self) -> Result<U256, SourceError> {
            let mut inner = self.inner.write().unwrap();
            if let Some(error) = &inner.failure {
                return Err(error.clone());
            }
            inner.reads += 1;
            Ok(inner.root)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemorySource;
    use super::*;

    #[tokio::test]
    async fn test_memory_source_serves_current_root() {
        let source = MemorySource::new(Address::from_bytes([0x51; 20]), U256::from(42u64));
        assert_eq!(source.latest_root().await.unwrap(), U256::from(42u64));

        source.set_root(U256::from(43u64));
        assert_eq!(source.latest_root().await.unwrap(), U256::from(43u64));
        assert_eq!(source.reads(), 2);
    }

    #[tokio::test]
    async fn test_memory_source_failure_and_recovery() {
        let source = MemorySource::new(Address::from_bytes([0x51; 20]), U256::ZERO);
        source.fail_with(SourceError::Unavailable("rpc down".into()));

        assert_eq!(
            source.latest_root().await,
            Err(SourceError::Unavailable("rpc down".into()))
        );
        assert_eq!(source.reads(), 0);

        source.recover();
        assert_eq!(source.latest_root().await, Ok(U256::ZERO));
    }
}
