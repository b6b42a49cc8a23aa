//! # rootrelay
//!
//! Relays a source-of-truth root from one execution domain to a mirror on
//! another, over an already-trusted cross-domain messenger, and administers
//! the mirror from the local side.
//!
//! ## Overview
//!
//! A [`Relay`] owns no roots. It reads the current one from a
//! [`RootSource`], encodes a `receiveRoot(uint256)` call, and hands it to a
//! [`Transport`] with the propagation budget. The owner can additionally:
//!
//! - transfer ownership of the remote mirror
//! - change the mirror's root history expiry
//! - tune the budget of each dispatch kind independently
//! - hand local ownership to someone else (propose, then accept)
//!
//! Local ownership can never be renounced.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use rootrelay::{Relay, RelayConfig};
//! use rootrelay::core::{Address, U256};
//! use rootrelay::transport::{MemorySource, RecordingTransport};
//!
//! async fn example() {
//!     let source = Address::from_bytes([0x51; 20]);
//!     let mirror = Address::from_bytes([0x4d; 20]);
//!     let messenger = Address::from_bytes([0x7e; 20]);
//!     let owner = Address::from_bytes([0x01; 20]);
//!
//!     let config = RelayConfig::new(source, mirror, messenger, owner);
//!     let relay = Relay::new(
//!         config,
//!         Arc::new(MemorySource::new(source, U256::from(42u64))),
//!         Arc::new(RecordingTransport::new(messenger)),
//!     )
//!     .unwrap();
//!
//!     let root = relay.propagate_root().await.unwrap();
//!     assert_eq!(root, U256::from(42u64));
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `rootrelay::core` - addresses, words, budgets, call codec
//! - `rootrelay::transport` - collaborator ports and their implementations
//! - `rootrelay::ownership` - the two-phase ownership state machine

pub mod audit;
pub mod config;
pub mod error;
pub mod relay;

// Re-export component crates
pub use rootrelay_core as core;
pub use rootrelay_ownership as ownership;
pub use rootrelay_transport as transport;

// Re-export main types for convenience
pub use audit::{verify_chain, AuditChainError, AuditId, AuditLog, AuditRecord, RelayEvent};
pub use config::RelayConfig;
pub use error::{RelayError, Result, Role};
pub use relay::{Relay, RelayEndpoints, RelaySnapshot};

pub use rootrelay_core::{Address, BudgetKind, Budgets, RemoteCall, DEFAULT_BUDGET, U256};
pub use rootrelay_ownership::Ownership;
pub use rootrelay_transport::{RootSource, SourceError, Transport, TransportError};
