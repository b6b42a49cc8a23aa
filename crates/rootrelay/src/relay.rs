//! The Relay: root propagation and remote administration.
//!
//! Every operation follows the same shape: authorize the caller (if gated),
//! read any external state, encode the remote call, dispatch it with the
//! matching budget, then append an audit record. Operations hold the state
//! write guard from authorization to audit append, so each one is applied
//! entirely or not at all.

use std::convert::Infallible;

use rootrelay_core::{Address, BudgetKind, Budgets, RemoteCall, U256};
use rootrelay_ownership::Ownership;
use rootrelay_transport::{RootSource, Transport};
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};

use crate::audit::{AuditId, AuditLog, AuditRecord, RelayEvent};
use crate::config::RelayConfig;
use crate::error::{RelayError, Result};

/// The fixed addresses a relay was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayEndpoints {
    pub source: Address,
    pub mirror: Address,
    pub transport: Address,
}

/// A consistent view of the relay's mutable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaySnapshot {
    pub ownership: Ownership,
    pub budgets: Budgets,
    /// Number of audit records.
    pub audit_len: usize,
    /// Id of the latest audit record.
    pub audit_head: Option<AuditId>,
}

/// Mutable relay state, guarded as one unit.
struct RelayState {
    ownership: Ownership,
    budgets: Budgets,
    audit: AuditLog,
}

impl RelayState {
    /// Fail unless `caller` owns the relay.
    fn authorize(&self, caller: &Address, operation: &'static str) -> Result<()> {
        self.ownership.ensure_owner(caller).map_err(|e| {
            warn!(caller = %caller, operation, "rejected unauthorized caller");
            RelayError::from(e)
        })
    }
}

/// The relay.
///
/// Generic over its two collaborators so tests can substitute recording
/// fakes for the real source and transport.
pub struct Relay<S: RootSource, T: Transport> {
    endpoints: RelayEndpoints,
    source: S,
    transport: T,
    state: RwLock<RelayState>,
}

impl<S: RootSource, T: Transport> Relay<S, T> {
    /// Create a relay.
    ///
    /// The source and transport handles must sit at the configured
    /// addresses.
    pub fn new(config: RelayConfig, source: S, transport: T) -> Result<Self> {
        config.validate()?;

        if source.address() != config.source {
            return Err(RelayError::InvalidConfig(format!(
                "source handle is at {}, config says {}",
                source.address(),
                config.source
            )));
        }
        if transport.address() != config.messenger {
            return Err(RelayError::InvalidConfig(format!(
                "transport handle is at {}, config says {}",
                transport.address(),
                config.messenger
            )));
        }

        let ownership = Ownership::new(config.owner)?;
        let endpoints = RelayEndpoints {
            source: config.source,
            mirror: config.mirror,
            transport: config.messenger,
        };

        info!(
            source = %endpoints.source,
            mirror = %endpoints.mirror,
            transport = %endpoints.transport,
            owner = %config.owner,
            "relay created"
        );

        Ok(Self {
            endpoints,
            source,
            transport,
            state: RwLock::new(RelayState {
                ownership,
                budgets: config.budgets,
                audit: AuditLog::new(),
            }),
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Dispatch Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Read the current root and send it to the mirror.
    ///
    /// Open to any caller. Repeated calls dispatch repeatedly; the mirror
    /// deals with duplicates. Returns the root that was sent.
    pub async fn propagate_root(&self) -> Result<U256> {
        let mut state = self.state.write().await;

        let root = self.source.latest_root().await.map_err(|e| {
            warn!(source = %self.endpoints.source, error = %e, "reading latest root failed");
            RelayError::from(e)
        })?;

        self.dispatch(&state.budgets, RemoteCall::ReceiveRoot { root })
            .await?;

        info!(root = %root, "root propagated");
        state.audit.append(RelayEvent::RootPropagated { root });
        Ok(root)
    }

    /// Hand ownership of the remote mirror to `new_owner`.
    ///
    /// `is_local` tells the mirror whether `new_owner` lives on the remote
    /// domain (true) or is only reachable through this relay's domain
    /// (false).
    pub async fn transfer_remote_ownership(
        &self,
        caller: &Address,
        new_owner: Address,
        is_local: bool,
    ) -> Result<()> {
        let mut state = self.state.write().await;
        state.authorize(caller, "transfer_remote_ownership")?;

        if new_owner.is_zero() {
            return Err(RelayError::InvalidArgument(
                "remote owner must not be the zero address".into(),
            ));
        }

        self.dispatch(
            &state.budgets,
            RemoteCall::TransferOwnership {
                new_owner,
                is_local,
            },
        )
        .await?;

        let previous_local_owner = state.ownership.owner();
        info!(new_owner = %new_owner, is_local, "remote ownership transfer dispatched");
        state.audit.append(RelayEvent::OwnershipTransferredRemote {
            previous_local_owner,
            new_owner,
            is_local,
        });
        Ok(())
    }

    /// Change how long the mirror keeps superseded roots.
    pub async fn set_remote_root_history_expiry(
        &self,
        caller: &Address,
        expiry: U256,
    ) -> Result<()> {
        let mut state = self.state.write().await;
        state.authorize(caller, "set_remote_root_history_expiry")?;

        self.dispatch(&state.budgets, RemoteCall::SetRootHistoryExpiry { expiry })
            .await?;

        info!(expiry = %expiry, "remote root history expiry dispatched");
        state
            .audit
            .append(RelayEvent::RootHistoryExpiryChangedRemote { expiry });
        Ok(())
    }

    /// Encode `call` and send it to the mirror with its budget.
    async fn dispatch(&self, budgets: &Budgets, call: RemoteCall) -> Result<()> {
        let budget = budgets.get(call.budget_kind());
        let payload = call.encode();

        debug!(
            call = call.signature(),
            payload_len = payload.len(),
            budget,
            "dispatching to mirror"
        );

        self.transport
            .dispatch(self.endpoints.mirror, payload, budget)
            .await
            .map_err(|e| {
                warn!(call = call.signature(), error = %e, "dispatch failed");
                RelayError::from(e)
            })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Budget Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Set the budget for one dispatch kind. The other two are untouched.
    pub async fn set_budget(&self, caller: &Address, kind: BudgetKind, value: u32) -> Result<()> {
        let mut state = self.state.write().await;
        state.authorize(caller, "set_budget")?;

        if value == 0 {
            return Err(RelayError::InvalidArgument(format!(
                "{kind} budget must not be zero"
            )));
        }

        let previous = state.budgets.set(kind, value);
        info!(kind = %kind, previous, value, "budget changed");
        state.audit.append(RelayEvent::BudgetChanged { kind, value });
        Ok(())
    }

    /// Set the `receiveRoot` dispatch budget.
    pub async fn set_propagate_root_budget(&self, caller: &Address, value: u32) -> Result<()> {
        self.set_budget(caller, BudgetKind::PropagateRoot, value)
            .await
    }

    /// Set the `setRootHistoryExpiry` dispatch budget.
    pub async fn set_expiry_budget(&self, caller: &Address, value: u32) -> Result<()> {
        self.set_budget(caller, BudgetKind::SetExpiry, value).await
    }

    /// Set the `transferOwnership` dispatch budget.
    pub async fn set_transfer_ownership_budget(&self, caller: &Address, value: u32) -> Result<()> {
        self.set_budget(caller, BudgetKind::TransferOwnership, value)
            .await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ownership Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Propose `candidate` as the next local owner.
    ///
    /// Overwrites any earlier proposal. The caller stays owner until the
    /// candidate accepts.
    pub async fn propose_owner(&self, caller: &Address, candidate: Address) -> Result<()> {
        let mut state = self.state.write().await;
        state.authorize(caller, "propose_owner")?;

        let replaced = state.ownership.propose(caller, candidate)?;
        if let Some(replaced) = replaced {
            debug!(replaced = %replaced, "pending owner replaced");
        }

        info!(owner = %caller, candidate = %candidate, "ownership transfer started");
        state.audit.append(RelayEvent::OwnershipTransferStarted {
            owner: *caller,
            candidate,
        });
        Ok(())
    }

    /// Become owner. Only the pending candidate may call this.
    pub async fn accept_ownership(&self, caller: &Address) -> Result<()> {
        let mut state = self.state.write().await;

        let previous_owner = state.ownership.accept(caller).map_err(|e| {
            warn!(caller = %caller, "rejected ownership acceptance");
            RelayError::from(e)
        })?;

        info!(previous_owner = %previous_owner, new_owner = %caller, "ownership transferred");
        state.audit.append(RelayEvent::OwnershipTransferred {
            previous_owner,
            new_owner: *caller,
        });
        Ok(())
    }

    /// Withdraw a pending proposal. A no-op when nothing is pending.
    pub async fn cancel_ownership_transfer(&self, caller: &Address) -> Result<()> {
        let mut state = self.state.write().await;
        state.authorize(caller, "cancel_ownership_transfer")?;

        if let Some(candidate) = state.ownership.cancel(caller)? {
            info!(owner = %caller, candidate = %candidate, "ownership transfer cancelled");
            state.audit.append(RelayEvent::OwnershipTransferCancelled {
                owner: *caller,
                candidate,
            });
        }
        Ok(())
    }

    /// Always fails: a relay without an owner could never administer the
    /// mirror again.
    pub async fn renounce_ownership(&self, caller: &Address) -> Result<Infallible> {
        warn!(caller = %caller, "refusing to renounce ownership");
        let state = self.state.read().await;
        Ok(state.ownership.renounce(caller)?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// The configured source, mirror and transport addresses.
    pub fn endpoints(&self) -> RelayEndpoints {
        self.endpoints
    }

    /// Address of the source of truth.
    pub fn source_address(&self) -> Address {
        self.endpoints.source
    }

    /// Address of the remote mirror.
    pub fn mirror_address(&self) -> Address {
        self.endpoints.mirror
    }

    /// Address of the transport (messenger).
    pub fn transport_address(&self) -> Address {
        self.endpoints.transport
    }

    /// The source handle.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The transport handle.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The current local owner.
    pub async fn owner(&self) -> Address {
        self.state.read().await.ownership.owner()
    }

    /// The proposed owner, if a transfer is pending.
    pub async fn pending_owner(&self) -> Option<Address> {
        self.state.read().await.ownership.pending_owner()
    }

    /// The full ownership state.
    pub async fn ownership(&self) -> Ownership {
        self.state.read().await.ownership
    }

    /// All three dispatch budgets.
    pub async fn budgets(&self) -> Budgets {
        self.state.read().await.budgets
    }

    /// The budget for one dispatch kind.
    pub async fn budget(&self, kind: BudgetKind) -> u32 {
        self.state.read().await.budgets.get(kind)
    }

    /// Ownership, budgets and audit position read under one guard.
    pub async fn snapshot(&self) -> RelaySnapshot {
        let state = self.state.read().await;
        RelaySnapshot {
            ownership: state.ownership,
            budgets: state.budgets,
            audit_len: state.audit.len(),
            audit_head: state.audit.head().map(|r| r.id),
        }
    }

    /// Copy of the audit log, oldest first.
    pub async fn audit_records(&self) -> Vec<AuditRecord> {
        self.state.read().await.audit.records().to_vec()
    }

    /// Receive audit records appended from now on.
    pub async fn subscribe(&self) -> broadcast::Receiver<AuditRecord> {
        self.state.read().await.audit.subscribe()
    }
}
