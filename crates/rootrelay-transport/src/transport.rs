//! Transport abstraction for cross-domain dispatch.
//!
//! The transport carries an encoded payload to a target on the remote
//! domain with a resource budget attached. Authentication, delivery and
//! ordering are the transport's business; callers only learn whether the
//! dispatch was accepted.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use rootrelay_core::Address;

use crate::error::Result;

/// Transport trait for dispatching encoded calls to the remote domain.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Address of the transport on the local domain.
    fn address(&self) -> Address;

    /// Dispatch `payload` to `target` on the remote domain, bounded by `budget`.
    ///
    /// Once this returns `Ok` the message is out of the caller's hands and
    /// cannot be withdrawn.
    async fn dispatch(&self, target: Address, payload: Bytes, budget: u32) -> Result<()>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn address(&self) -> Address {
        (**self).address()
    }

    async fn dispatch(&self, target: Address, payload: Bytes, budget: u32) -> Result<()> {
        (**self).dispatch(target, payload, budget).await
    }
}

/// A simple in-memory transport for testing.
///
/// Records every accepted dispatch instead of delivering it.
pub mod memory {
    use super::*;
    use crate::error::TransportError;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// One accepted dispatch.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Dispatch {
        pub target: Address,
        pub payload: Bytes,
        pub budget: u32,
    }

    /// Recording transport implementation.
    pub struct RecordingTransport {
        address: Address,
        inner: Mutex<RecordingInner>,
    }

    #[derive(Default)]
    struct RecordingInner {
        dispatches: Vec<Dispatch>,
        /// Errors to return from upcoming dispatches, front first.
        failures: VecDeque<TransportError>,
    }

    impl RecordingTransport {
        pub fn new(address: Address) -> Self {
            Self {
                address,
                inner: Mutex::new(RecordingInner::default()),
            }
        }

        /// Make the next dispatch fail with `error`. Queued failures are
        /// consumed one per dispatch.
        pub fn fail_next(&self, error: TransportError) {
            self.inner.lock().unwrap().failures.push_back(error);
        }

        /// All accepted dispatches, oldest first.
        pub fn dispatches(&self) -> Vec<Dispatch> {
            self.inner.lock().unwrap().dispatches.clone()
        }

        pub fn last_dispatch(&self) -> Option<Dispatch> {
            self.inner.lock().unwrap().dispatches.last().cloned()
        }

        pub fn dispatch_count(&self) -> usize {
            self.inner.lock().unwrap().dispatches.len()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        fn address(&self) -> Address {
            self.address
        }

        async fn dispatch(&self, target: Address, payload: Bytes, budget: u32) -> Result<()> {
            let mut inner = self.inner.lock().unwrap();
            if let Some(error) = inner.failures.pop_front() {
                return Err(error);
            }
            inner.dispatches.push(Dispatch {
                target,
                payload,
                budget,
            });
            Ok(())
        }
    }
}
