//! Function selectors.
//!
//! A selector is the first four bytes of the Keccak-256 hash of a canonical
//! function signature. The mirror and the messenger dispatch on it, so the
//! constants below are wire-compatibility commitments.

use sha3::{Digest, Keccak256};

/// A 4-byte function selector.
pub type Selector = [u8; 4];

/// Canonical signatures of every call this crate encodes.
pub mod signatures {
    pub const RECEIVE_ROOT: &str = "receiveRoot(uint256)";
    pub const TRANSFER_OWNERSHIP: &str = "transferOwnership(address,bool)";
    pub const SET_ROOT_HISTORY_EXPIRY: &str = "setRootHistoryExpiry(uint256)";
    pub const SEND_MESSAGE: &str = "sendMessage(address,bytes,uint32)";
}

/// `receiveRoot(uint256)`
pub const RECEIVE_ROOT: Selector = [0xfb, 0xde, 0x92, 0x9b];
/// `transferOwnership(address,bool)`
pub const TRANSFER_OWNERSHIP: Selector = [0xb2, 0x42, 0xe5, 0x34];
/// `setRootHistoryExpiry(uint256)`
pub const SET_ROOT_HISTORY_EXPIRY: Selector = [0xc7, 0x0a, 0xa7, 0x27];
/// `sendMessage(address,bytes,uint32)`
pub const SEND_MESSAGE: Selector = [0x3d, 0xbb, 0x20, 0x2b];

/// Compute the selector of a canonical signature.
pub fn selector(signature: &str) -> Selector {
    let hash = Keccak256::digest(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_selector() {
        assert_eq!(selector("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
    }

    #[test]
    fn test_constants_match_signatures() {
        assert_eq!(selector(signatures::RECEIVE_ROOT), RECEIVE_ROOT);
        assert_eq!(selector(signatures::TRANSFER_OWNERSHIP), TRANSFER_OWNERSHIP);
        assert_eq!(
            selector(signatures::SET_ROOT_HISTORY_EXPIRY),
            SET_ROOT_HISTORY_EXPIRY
        );
        assert_eq!(selector(signatures::SEND_MESSAGE), SEND_MESSAGE);
    }
}
