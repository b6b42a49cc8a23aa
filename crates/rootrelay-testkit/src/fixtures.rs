//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use rootrelay::{Relay, RelayConfig};
use rootrelay_core::{Address, Budgets, RemoteCall, U256};
use rootrelay_transport::{MemorySource, RecordingTransport};

/// Source-of-truth address used by fixtures.
pub const SOURCE: Address = Address::from_bytes([0x51; 20]);
/// Mirror address used by fixtures.
pub const MIRROR: Address = Address::from_bytes([0x4d; 20]);
/// Messenger address used by fixtures.
pub const MESSENGER: Address = Address::from_bytes([0x7e; 20]);
/// Initial owner used by fixtures.
pub const OWNER: Address = Address::from_bytes([0x01; 20]);

/// Root the fixture source starts with.
pub const INITIAL_ROOT: u64 = 42;

/// A relay over in-memory collaborators.
pub type MemoryRelay = Relay<Arc<MemorySource>, Arc<RecordingTransport>>;

/// A relay plus handles on its collaborators.
pub struct RelayFixture {
    pub relay: MemoryRelay,
    pub source: Arc<MemorySource>,
    pub transport: Arc<RecordingTransport>,
    pub owner: Address,
}

impl RelayFixture {
    /// Default budgets, source root 42.
    pub fn new() -> Self {
        Self::with_root(U256::from(INITIAL_ROOT))
    }

    pub fn with_root(root: U256) -> Self {
        Self::build(root, Budgets::default())
    }

    pub fn with_budgets(budgets: Budgets) -> Self {
        Self::build(U256::from(INITIAL_ROOT), budgets)
    }

    /// The config fixtures are built from.
    pub fn config() -> RelayConfig {
        RelayConfig::new(SOURCE, MIRROR, MESSENGER, OWNER)
    }

    fn build(root: U256, budgets: Budgets) -> Self {
        let source = Arc::new(MemorySource::new(SOURCE, root));
        let transport = Arc::new(RecordingTransport::new(MESSENGER));
        let relay = Relay::new(
            Self::config().with_budgets(budgets),
            Arc::clone(&source),
            Arc::clone(&transport),
        )
        .expect("fixture config is valid");

        Self {
            relay,
            source,
            transport,
            owner: OWNER,
        }
    }

    /// Every recorded dispatch, decoded: (target, call, budget).
    pub fn decoded_dispatches(&self) -> Vec<(Address, RemoteCall, u32)> {
        self.transport
            .dispatches()
            .into_iter()
            .map(|d| {
                let call = RemoteCall::decode(&d.payload).expect("relay emitted undecodable payload");
                (d.target, call, d.budget)
            })
            .collect()
    }

    /// The most recent dispatched call, decoded.
    pub fn last_call(&self) -> Option<RemoteCall> {
        self.decoded_dispatches().pop().map(|(_, call, _)| call)
    }
}

impl Default for RelayFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Distinct, non-zero addresses that are none of the fixture addresses.
pub fn principals(count: usize) -> Vec<Address> {
    (0..count)
        .map(|i| {
            let mut bytes = [0xC0u8; 20];
            bytes[12..].copy_from_slice(&(i as u64).to_be_bytes());
            Address::from_bytes(bytes)
        })
        .collect()
}

/// A random non-zero address.
pub fn random_address() -> Address {
    loop {
        let address = Address::from_bytes(rand::random());
        if !address.is_zero() {
            return address;
        }
    }
}
