//! Per-operation resource budgets.
//!
//! Every dispatch carries a budget that bounds execution cost on the remote
//! domain. There is one budget per dispatch kind and they are fully
//! independent: updating one never touches another.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Budget applied to each dispatch kind until the owner changes it.
pub const DEFAULT_BUDGET: u32 = 100_000;

/// The dispatch kind a budget applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetKind {
    /// Budget for `receiveRoot` dispatches.
    PropagateRoot,
    /// Budget for `setRootHistoryExpiry` dispatches.
    SetExpiry,
    /// Budget for `transferOwnership` dispatches.
    TransferOwnership,
}

impl BudgetKind {
    pub const ALL: [BudgetKind; 3] = [
        BudgetKind::PropagateRoot,
        BudgetKind::SetExpiry,
        BudgetKind::TransferOwnership,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetKind::PropagateRoot => "propagate_root",
            BudgetKind::SetExpiry => "set_expiry",
            BudgetKind::TransferOwnership => "transfer_ownership",
        }
    }
}

impl fmt::Display for BudgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three dispatch budgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budgets {
    #[serde(default = "default_budget")]
    pub propagate_root: u32,
    #[serde(default = "default_budget")]
    pub set_expiry: u32,
    #[serde(default = "default_budget")]
    pub transfer_ownership: u32,
}

fn default_budget() -> u32 {
    DEFAULT_BUDGET
}

impl Default for Budgets {
    fn default() -> Self {
        Self::uniform(DEFAULT_BUDGET)
    }
}

impl Budgets {
    /// All three budgets set to the same value.
    pub const fn uniform(value: u32) -> Self {
        Self {
            propagate_root: value,
            set_expiry: value,
            transfer_ownership: value,
        }
    }

    /// Budget for the given kind.
    pub fn get(&self, kind: BudgetKind) -> u32 {
        match kind {
            BudgetKind::PropagateRoot => self.propagate_root,
            BudgetKind::SetExpiry => self.set_expiry,
            BudgetKind::TransferOwnership => self.transfer_ownership,
        }
    }

    /// Set the budget for exactly one kind. Returns the previous value.
    pub fn set(&mut self, kind: BudgetKind, value: u32) -> u32 {
        let slot = match kind {
            BudgetKind::PropagateRoot => &mut self.propagate_root,
            BudgetKind::SetExpiry => &mut self.set_expiry,
            BudgetKind::TransferOwnership => &mut self.transfer_ownership,
        };
        std::mem::replace(slot, value)
    }

    /// The first kind whose budget is zero, if any.
    pub fn first_zero(&self) -> Option<BudgetKind> {
        BudgetKind::ALL.into_iter().find(|kind| self.get(*kind) == 0)
    }
}
