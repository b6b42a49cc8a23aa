//! Proptest generators for property-based testing.

use proptest::prelude::*;

use rootrelay::RelayError;
use rootrelay_core::{Address, BudgetKind, U256};
use rootrelay_transport::TransportError;

use crate::fixtures::{principals, RelayFixture};

/// Generate any address, including zero.
pub fn address() -> impl Strategy<Value = Address> {
    any::<[u8; 20]>().prop_map(Address::from_bytes)
}

/// Generate a 256-bit word.
pub fn u256() -> impl Strategy<Value = U256> {
    any::<[u8; 32]>().prop_map(U256::from_be_bytes)
}

pub fn budget_kind() -> impl Strategy<Value = BudgetKind> {
    prop_oneof![
        Just(BudgetKind::PropagateRoot),
        Just(BudgetKind::SetExpiry),
        Just(BudgetKind::TransferOwnership),
    ]
}

/// A budget the relay accepts.
pub fn budget_value() -> impl Strategy<Value = u32> {
    1u32..=u32::MAX
}

/// Who performs an operation, resolved against the relay when applied.
#[derive(Debug, Clone)]
pub enum Actor {
    /// Whoever owns the relay at the time.
    Owner,
    /// Whoever is pending at the time (falls back to a bystander).
    Pending,
    /// A fixed principal.
    Other(Address),
}

impl Actor {
    async fn resolve(&self, fixture: &RelayFixture) -> Address {
        match self {
            Actor::Owner => fixture.relay.owner().await,
            Actor::Pending => fixture
                .relay
                .pending_owner()
                .await
                .unwrap_or_else(|| principals(1)[0]),
            Actor::Other(address) => *address,
        }
    }
}

pub fn actor() -> impl Strategy<Value = Actor> {
    prop_oneof![
        3 => Just(Actor::Owner),
        2 => Just(Actor::Pending),
        1 => prop::sample::select(principals(4)).prop_map(Actor::Other),
    ]
}

/// One call against the relay's public surface.
#[derive(Debug, Clone)]
pub enum AdminOp {
    PropagateRoot { root: U256 },
    TransferRemoteOwnership { caller: Actor, new_owner: Address, is_local: bool },
    SetExpiry { caller: Actor, expiry: U256 },
    SetBudget { caller: Actor, kind: BudgetKind, value: u32 },
    ProposeOwner { caller: Actor, candidate: Address },
    AcceptOwnership { caller: Actor },
    CancelTransfer { caller: Actor },
    Renounce { caller: Actor },
    /// Make the next dispatch fail at the transport.
    FailNextDispatch,
}

impl AdminOp {
    /// Apply to the fixture's relay.
    pub async fn apply(&self, fixture: &RelayFixture) -> Result<(), RelayError> {
        match self {
            AdminOp::PropagateRoot { root } => {
                fixture.source.set_root(*root);
                fixture.relay.propagate_root().await.map(|_| ())
            }
            AdminOp::TransferRemoteOwnership {
                caller,
                new_owner,
                is_local,
            } => {
                let caller = caller.resolve(fixture).await;
                fixture
                    .relay
                    .transfer_remote_ownership(&caller, *new_owner, *is_local)
                    .await
            }
            AdminOp::SetExpiry { caller, expiry } => {
                let caller = caller.resolve(fixture).await;
                fixture
                    .relay
                    .set_remote_root_history_expiry(&caller, *expiry)
                    .await
            }
            AdminOp::SetBudget {
                caller,
                kind,
                value,
            } => {
                let caller = caller.resolve(fixture).await;
                fixture.relay.set_budget(&caller, *kind, *value).await
            }
            AdminOp::ProposeOwner { caller, candidate } => {
                let caller = caller.resolve(fixture).await;
                fixture.relay.propose_owner(&caller, *candidate).await
            }
            AdminOp::AcceptOwnership { caller } => {
                let caller = caller.resolve(fixture).await;
                fixture.relay.accept_ownership(&caller).await
            }
            AdminOp::CancelTransfer { caller } => {
                let caller = caller.resolve(fixture).await;
                fixture.relay.cancel_ownership_transfer(&caller).await
            }
            AdminOp::Renounce { caller } => {
                let caller = caller.resolve(fixture).await;
                fixture.relay.renounce_ownership(&caller).await.map(|_| ())
            }
            AdminOp::FailNextDispatch => {
                fixture
                    .transport
                    .fail_next(TransportError::Rejected("injected".into()));
                Ok(())
            }
        }
    }
}

pub fn admin_op() -> impl Strategy<Value = AdminOp> {
    prop_oneof![
        3 => u256().prop_map(|root| AdminOp::PropagateRoot { root }),
        1 => (actor(), address(), any::<bool>()).prop_map(|(caller, new_owner, is_local)| {
            AdminOp::TransferRemoteOwnership { caller, new_owner, is_local }
        }),
        1 => (actor(), u256()).prop_map(|(caller, expiry)| AdminOp::SetExpiry { caller, expiry }),
        2 => (actor(), budget_kind(), 0u32..=1_000_000).prop_map(|(caller, kind, value)| {
            AdminOp::SetBudget { caller, kind, value }
        }),
        2 => (actor(), prop::sample::select(principals(4))).prop_map(|(caller, candidate)| {
            AdminOp::ProposeOwner { caller, candidate }
        }),
        2 => actor().prop_map(|caller| AdminOp::AcceptOwnership { caller }),
        1 => actor().prop_map(|caller| AdminOp::CancelTransfer { caller }),
        1 => actor().prop_map(|caller| AdminOp::Renounce { caller }),
        1 => Just(AdminOp::FailNextDispatch),
    ]
}
