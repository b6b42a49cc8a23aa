//! # rootrelay ownership
//!
//! Local administrative ownership of a relay.
//!
//! Ownership moves in two phases: the owner proposes a candidate, and the
//! candidate accepts. Until acceptance the current owner stays in control
//! and may re-propose or cancel. Ownership can never be renounced, so there
//! is always exactly one owner.
//!
//! ```text
//!             propose(c)                 accept() by c
//!   Owned(o) -----------> Pending(o, c) ---------------> Owned(c)
//!      ^                    |    ^
//!      |     cancel()       |    | propose(c')
//!      +--------------------+    +-----------+
//! ```

pub mod error;
pub mod ownership;

pub use error::{OwnershipError, Result};
pub use ownership::Ownership;
