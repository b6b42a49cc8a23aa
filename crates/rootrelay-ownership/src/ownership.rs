//! The ownership state machine.

use std::convert::Infallible;

use rootrelay_core::Address;
use serde::{Deserialize, Serialize};

use crate::error::{OwnershipError, Result};

/// Who administers the relay.
///
/// The owner is never the zero address and only changes when a proposed
/// candidate accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Ownership {
    /// No transfer in flight.
    Owned { owner: Address },
    /// `pending` may accept; `owner` is still in control.
    PendingTransfer { owner: Address, pending: Address },
}

impl Ownership {
    /// Start in `Owned(owner)`.
    pub fn new(owner: Address) -> Result<Self> {
        if owner.is_zero() {
            return Err(OwnershipError::InvalidCandidate(owner));
        }
        Ok(Ownership::Owned { owner })
    }

    /// The current owner.
    pub fn owner(&self) -> Address {
        match self {
            Ownership::Owned { owner } | Ownership::PendingTransfer { owner, .. } => *owner,
        }
    }

    /// The proposed candidate, if a transfer is pending.
    pub fn pending_owner(&self) -> Option<Address> {
        match self {
            Ownership::Owned { .. } => None,
            Ownership::PendingTransfer { pending, .. } => Some(*pending),
        }
    }

    pub fn is_owner(&self, caller: &Address) -> bool {
        self.owner() == *caller
    }

    /// Fail unless `caller` is the current owner.
    pub fn ensure_owner(&self, caller: &Address) -> Result<()> {
        if !self.is_owner(caller) {
            return Err(OwnershipError::NotOwner { caller: *caller });
        }
        Ok(())
    }

    /// Propose `candidate` as the next owner.
    ///
    /// Replaces any earlier candidate; returns the replaced one.
    pub fn propose(&mut self, caller: &Address, candidate: Address) -> Result<Option<Address>> {
        self.ensure_owner(caller)?;
        if candidate.is_zero() {
            return Err(OwnershipError::InvalidCandidate(candidate));
        }

        let replaced = self.pending_owner();
        *self = Ownership::PendingTransfer {
            owner: self.owner(),
            pending: candidate,
        };
        Ok(replaced)
    }

    /// Complete a pending transfer. Only the pending candidate may call this.
    ///
    /// Returns the previous owner.
    pub fn accept(&mut self, caller: &Address) -> Result<Address> {
        match *self {
            Ownership::PendingTransfer { owner, pending } if pending == *caller => {
                *self = Ownership::Owned { owner: pending };
                Ok(owner)
            }
            _ => Err(OwnershipError::NotPendingOwner { caller: *caller }),
        }
    }

    /// Withdraw a pending proposal. Returns the withdrawn candidate, or
    /// `None` if nothing was pending.
    pub fn cancel(&mut self, caller: &Address) -> Result<Option<Address>> {
        self.ensure_owner(caller)?;

        let withdrawn = self.pending_owner();
        *self = Ownership::Owned {
            owner: self.owner(),
        };
        Ok(withdrawn)
    }

    /// Renunciation always fails, whoever asks.
    pub fn renounce(&self, caller: &Address) -> Result<Infallible> {
        Err(OwnershipError::RenounceForbidden { caller: *caller })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const OWNER: Address = Address::from_bytes([0x01; 20]);
    const ALICE: Address = Address::from_bytes([0xA1; 20]);
    const BOB: Address = Address::from_bytes([0xB0; 20]);

    #[test]
    fn test_zero_owner_rejected() {
        assert_eq!(
            Ownership::new(Address::ZERO),
            Err(OwnershipError::InvalidCandidate(Address::ZERO))
        );
    }

    #[test]
    fn test_propose_then_accept() {
        let mut ownership = Ownership::new(OWNER).unwrap();

        assert_eq!(ownership.propose(&OWNER, ALICE), Ok(None));
        assert_eq!(ownership.owner(), OWNER);
        assert_eq!(ownership.pending_owner(), Some(ALICE));

        assert_eq!(ownership.accept(&ALICE), Ok(OWNER));
        assert_eq!(ownership, Ownership::Owned { owner: ALICE });
        assert_eq!(ownership.pending_owner(), None);
    }

    #[test]
    fn test_repropose_overwrites_candidate() {
        let mut ownership = Ownership::new(OWNER).unwrap();
        ownership.propose(&OWNER, ALICE).unwrap();

        assert_eq!(ownership.propose(&OWNER, BOB), Ok(Some(ALICE)));
        assert_eq!(
            ownership.accept(&ALICE),
            Err(OwnershipError::NotPendingOwner { caller: ALICE })
        );
        assert_eq!(ownership.accept(&BOB), Ok(OWNER));
    }

    #[test]
    fn test_accept_without_proposal() {
        let mut ownership = Ownership::new(OWNER).unwrap();
        assert_eq!(
            ownership.accept(&OWNER),
            Err(OwnershipError::NotPendingOwner { caller: OWNER })
        );
        assert_eq!(ownership, Ownership::Owned { owner: OWNER });
    }

    #[test]
    fn test_non_owner_cannot_propose_or_cancel() {
        let mut ownership = Ownership::new(OWNER).unwrap();
        ownership.propose(&OWNER, ALICE).unwrap();
        let before = ownership;

        assert_eq!(
            ownership.propose(&ALICE, BOB),
            Err(OwnershipError::NotOwner { caller: ALICE })
        );
        assert_eq!(
            ownership.cancel(&BOB),
            Err(OwnershipError::NotOwner { caller: BOB })
        );
        assert_eq!(ownership, before);
    }

    #[test]
    fn test_cancel_clears_pending() {
        let mut ownership = Ownership::new(OWNER).unwrap();
        ownership.propose(&OWNER, ALICE).unwrap();

        assert_eq!(ownership.cancel(&OWNER), Ok(Some(ALICE)));
        assert_eq!(ownership.cancel(&OWNER), Ok(None));
        assert!(ownership.accept(&ALICE).is_err());
    }

    #[test]
    fn test_zero_candidate_rejected() {
        let mut ownership = Ownership::new(OWNER).unwrap();
        assert_eq!(
            ownership.propose(&OWNER, Address::ZERO),
            Err(OwnershipError::InvalidCandidate(Address::ZERO))
        );
        assert_eq!(ownership.pending_owner(), None);
    }

    #[test]
    fn test_renounce_fails_even_for_owner() {
        let ownership = Ownership::new(OWNER).unwrap();
        assert_eq!(
            ownership.renounce(&OWNER).unwrap_err(),
            OwnershipError::RenounceForbidden { caller: OWNER }
        );
        assert_eq!(ownership.owner(), OWNER);
    }

    proptest! {
        #[test]
        fn test_only_latest_candidate_accepts(
            candidates in prop::collection::vec(any::<[u8; 20]>(), 1..5),
            caller in any::<[u8; 20]>(),
        ) {
            let candidates: Vec<Address> = candidates
                .into_iter()
                .map(Address::from_bytes)
                .filter(|a| !a.is_zero())
                .collect();
            prop_assume!(!candidates.is_empty());

            let mut ownership = Ownership::new(OWNER).unwrap();
            for candidate in &candidates {
                ownership.propose(&OWNER, *candidate).unwrap();
            }
            let latest = *candidates.last().unwrap();
            let caller = Address::from_bytes(caller);
            let before = ownership;

            let result = ownership.accept(&caller);
            if caller == latest {
                prop_assert_eq!(result, Ok(OWNER));
                prop_assert_eq!(ownership.owner(), latest);
            } else {
                prop_assert_eq!(result, Err(OwnershipError::NotPendingOwner { caller }));
                prop_assert_eq!(ownership, before);
            }
        }
    }
}
