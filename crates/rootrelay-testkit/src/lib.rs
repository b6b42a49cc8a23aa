//! # rootrelay testkit
//!
//! Testing utilities for rootrelay.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: a relay wired to an in-memory source and a recording
//!   transport, with well-known addresses
//! - **Generators**: proptest strategies for addresses, words, budgets,
//!   remote calls and administrative operations
//! - **Golden vectors**: fixed encodings the remote mirror and messenger
//!   expect, byte for byte
//!
//! ## Golden Vectors
//!
//! ```rust
//! use rootrelay_testkit::vectors::verify_all_vectors;
//!
//! for (name, ok, hex) in verify_all_vectors() {
//!     assert!(ok, "{name}: {hex}");
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust,no_run
//! use rootrelay_testkit::fixtures::{RelayFixture, MIRROR};
//!
//! async fn example() {
//!     let fixture = RelayFixture::new();
//!     fixture.relay.propagate_root().await.unwrap();
//!     assert_eq!(fixture.transport.last_dispatch().unwrap().target, MIRROR);
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{principals, MemoryRelay, RelayFixture};
pub use generators::AdminOp;
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};
