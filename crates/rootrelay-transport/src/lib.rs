//! # rootrelay transport
//!
//! The two external collaborators the relay talks to, expressed as ports:
//!
//! - [`Transport`] - authenticated, budgeted dispatch to the remote domain
//! - [`RootSource`] - read-only query of the current root
//!
//! The relay depends only on these traits. This crate also ships the
//! implementations used for tests and local wiring ([`RecordingTransport`],
//! [`MemorySource`]) and a messenger-framing transport ([`ChannelMessenger`])
//! that turns each dispatch into `sendMessage` calldata for an external
//! submitter.
//!
//! ## Dispatch Flow
//!
//! ```text
//! Relay                 ChannelMessenger              submitter
//!   |-- dispatch(M, p, b) -->|                            |
//!   |                        |-- sendMessage(M, p, b) --->|
//!   |<------- Ok ------------|                            |
//! ```

pub mod error;
pub mod messenger;
pub mod source;
pub mod transport;

pub use error::{Result, SourceError, TransportError};
pub use messenger::{ChannelMessenger, OutboundCall};
pub use source::{memory::MemorySource, RootSource};
pub use transport::{
    memory::{Dispatch, RecordingTransport},
    Transport,
};
