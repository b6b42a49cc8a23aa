//! Golden test vectors for deterministic verification.
//!
//! The remote mirror and the messenger decode these layouts byte for byte,
//! so every encoding change must keep these vectors passing.

use rootrelay_core::{Address, MessengerCall, RemoteCall, U256};

/// What a vector encodes.
#[derive(Debug, Clone)]
pub enum VectorCall {
    /// A bare mirror call.
    Remote(RemoteCall),
    /// A mirror call wrapped in the messenger's `sendMessage` envelope.
    Envelope {
        target: Address,
        call: RemoteCall,
        min_gas_limit: u32,
    },
}

impl VectorCall {
    pub fn encode(&self) -> Vec<u8> {
        match self {
            VectorCall::Remote(call) => call.encode().to_vec(),
            VectorCall::Envelope {
                target,
                call,
                min_gas_limit,
            } => MessengerCall::new(*target, call.encode(), *min_gas_limit)
                .encode()
                .to_vec(),
        }
    }
}

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub call: VectorCall,
    /// Expected calldata (hex, no prefix).
    pub expected_hex: &'static str,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "receiveRoot(42)",
            call: VectorCall::Remote(RemoteCall::ReceiveRoot {
                root: U256::from(42u64),
            }),
            expected_hex: "fbde929b\
                000000000000000000000000000000000000000000000000000000000000002a",
        },
        GoldenVector {
            name: "receiveRoot(max)",
            call: VectorCall::Remote(RemoteCall::ReceiveRoot { root: U256::MAX }),
            expected_hex: "fbde929b\
                ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        },
        GoldenVector {
            name: "transferOwnership(0x11.., true)",
            call: VectorCall::Remote(RemoteCall::TransferOwnership {
                new_owner: Address::from_bytes([0x11; 20]),
                is_local: true,
            }),
            expected_hex: "b242e534\
                0000000000000000000000001111111111111111111111111111111111111111\
                0000000000000000000000000000000000000000000000000000000000000001",
        },
        GoldenVector {
            name: "transferOwnership(0xab.., false)",
            call: VectorCall::Remote(RemoteCall::TransferOwnership {
                new_owner: Address::from_bytes([0xab; 20]),
                is_local: false,
            }),
            expected_hex: "b242e534\
                000000000000000000000000abababababababababababababababababababab\
                0000000000000000000000000000000000000000000000000000000000000000",
        },
        GoldenVector {
            name: "setRootHistoryExpiry(3600)",
            call: VectorCall::Remote(RemoteCall::SetRootHistoryExpiry {
                expiry: U256::from(3600u64),
            }),
            expected_hex: "c70aa727\
                0000000000000000000000000000000000000000000000000000000000000e10",
        },
        GoldenVector {
            name: "sendMessage(0x22.., receiveRoot(42), 100000)",
            call: VectorCall::Envelope {
                target: Address::from_bytes([0x22; 20]),
                call: RemoteCall::ReceiveRoot {
                    root: U256::from(42u64),
                },
                min_gas_limit: 100_000,
            },
            expected_hex: "3dbb202b\
                0000000000000000000000002222222222222222222222222222222222222222\
                0000000000000000000000000000000000000000000000000000000000000060\
                00000000000000000000000000000000000000000000000000000000000186a0\
                0000000000000000000000000000000000000000000000000000000000000024\
                fbde929b000000000000000000000000000000000000000000000000000000000000002a\
                00000000000000000000000000000000000000000000000000000000",
        },
    ]
}

/// Encode every vector and compare with its expected bytes.
///
/// Returns `(name, matches, actual_hex)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let hex = hex::encode(v.call.encode());
            let matches = hex == v.expected_hex;
            (v.name.to_string(), matches, hex)
        })
        .collect()
}
