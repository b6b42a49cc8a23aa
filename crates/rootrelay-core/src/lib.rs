//! # rootrelay core
//!
//! Pure primitives for rootrelay: identities, 256-bit words, dispatch
//! budgets and the remote call codec.
//!
//! This crate contains no I/O. Everything here is deterministic computation
//! over byte layouts that the remote mirror and the cross-domain messenger
//! depend on.
//!
//! ## Key Types
//!
//! - [`Address`] - 20-byte identity of a caller or component
//! - [`U256`] - 256-bit big-endian word (roots, expiry windows)
//! - [`Budgets`] / [`BudgetKind`] - per-dispatch resource budgets
//! - [`RemoteCall`] - an invocation of the remote mirror
//! - [`MessengerCall`] - the `sendMessage` envelope around a remote call

pub mod abi;
pub mod budget;
pub mod error;
pub mod selector;
pub mod types;

pub use abi::{MessengerCall, RemoteCall};
pub use budget::{BudgetKind, Budgets, DEFAULT_BUDGET};
pub use error::{CodecError, Result};
pub use selector::{selector, Selector};
pub use types::{Address, U256};
