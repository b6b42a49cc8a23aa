//! Remote call encoding.
//!
//! Payloads follow the Solidity ABI calling convention: a 4-byte selector
//! followed by 32-byte words. Static arguments occupy one word each in
//! declaration order; the single dynamic argument used here (`bytes` in the
//! messenger envelope) is stored after the head, referenced by offset.
//!
//! Encoding is infallible. Decoding is strict and only accepts what
//! [`RemoteCall::encode`] and [`MessengerCall::encode`] produce.

use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

use crate::budget::BudgetKind;
use crate::error::{CodecError, Result};
use crate::selector::{self, signatures, Selector};
use crate::types::{Address, U256};

/// Size of one ABI word.
pub const WORD_LEN: usize = 32;

/// Size of a selector.
pub const SELECTOR_LEN: usize = 4;

/// An invocation of the remote mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteCall {
    /// `receiveRoot(uint256)`
    ReceiveRoot { root: U256 },
    /// `transferOwnership(address,bool)`
    TransferOwnership { new_owner: Address, is_local: bool },
    /// `setRootHistoryExpiry(uint256)`
    SetRootHistoryExpiry { expiry: U256 },
}

impl RemoteCall {
    pub fn signature(&self) -> &'static str {
        match self {
            RemoteCall::ReceiveRoot { .. } => signatures::RECEIVE_ROOT,
            RemoteCall::TransferOwnership { .. } => signatures::TRANSFER_OWNERSHIP,
            RemoteCall::SetRootHistoryExpiry { .. } => signatures::SET_ROOT_HISTORY_EXPIRY,
        }
    }

    pub fn selector(&self) -> Selector {
        match self {
            RemoteCall::ReceiveRoot { .. } => selector::RECEIVE_ROOT,
            RemoteCall::TransferOwnership { .. } => selector::TRANSFER_OWNERSHIP,
            RemoteCall::SetRootHistoryExpiry { .. } => selector::SET_ROOT_HISTORY_EXPIRY,
        }
    }

    /// The budget that pays for dispatching this call.
    pub fn budget_kind(&self) -> BudgetKind {
        match self {
            RemoteCall::ReceiveRoot { .. } => BudgetKind::PropagateRoot,
            RemoteCall::TransferOwnership { .. } => BudgetKind::TransferOwnership,
            RemoteCall::SetRootHistoryExpiry { .. } => BudgetKind::SetExpiry,
        }
    }

    fn arg_words(&self) -> usize {
        match self {
            RemoteCall::TransferOwnership { .. } => 2,
            RemoteCall::ReceiveRoot { .. } | RemoteCall::SetRootHistoryExpiry { .. } => 1,
        }
    }

    /// Length of the encoded payload in bytes.
    pub fn encoded_len(&self) -> usize {
        SELECTOR_LEN + self.arg_words() * WORD_LEN
    }

    /// Encode as selector followed by argument words.
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        buf.put_slice(&self.selector());

        match self {
            RemoteCall::ReceiveRoot { root } => buf.put_slice(root.as_bytes()),
            RemoteCall::TransferOwnership {
                new_owner,
                is_local,
            } => {
                buf.put_slice(&address_word(new_owner));
                buf.put_slice(&bool_word(*is_local));
            }
            RemoteCall::SetRootHistoryExpiry { expiry } => buf.put_slice(expiry.as_bytes()),
        }

        buf.freeze()
    }

    /// Decode a payload produced by [`RemoteCall::encode`].
    pub fn decode(data: &[u8]) -> Result<Self> {
        let (sel, args) = split_selector(data)?;

        match sel {
            selector::RECEIVE_ROOT => {
                expect_words(args, 1)?;
                Ok(RemoteCall::ReceiveRoot {
                    root: U256(word(args, 0)),
                })
            }
            selector::TRANSFER_OWNERSHIP => {
                expect_words(args, 2)?;
                Ok(RemoteCall::TransferOwnership {
                    new_owner: decode_address(&word(args, 0))?,
                    is_local: decode_bool(&word(args, 1))?,
                })
            }
            selector::SET_ROOT_HISTORY_EXPIRY => {
                expect_words(args, 1)?;
                Ok(RemoteCall::SetRootHistoryExpiry {
                    expiry: U256(word(args, 0)),
                })
            }
            other => Err(CodecError::UnknownSelector(hex::encode(other))),
        }
    }
}

/// A `sendMessage(address,bytes,uint32)` call on a cross-domain messenger.
///
/// This is the envelope a messenger-backed transport submits on the local
/// domain; `message` is an encoded [`RemoteCall`] and `min_gas_limit` is the
/// dispatch budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessengerCall {
    pub target: Address,
    pub message: Bytes,
    pub min_gas_limit: u32,
}

impl MessengerCall {
    /// Head words: target, offset of `message`, gas limit.
    const HEAD_WORDS: usize = 3;

    pub fn new(target: Address, message: Bytes, min_gas_limit: u32) -> Self {
        Self {
            target,
            message,
            min_gas_limit,
        }
    }

    pub fn encoded_len(&self) -> usize {
        SELECTOR_LEN + (Self::HEAD_WORDS + 1) * WORD_LEN + padded_len(self.message.len())
    }

    pub fn encode(&self) -> Bytes {
        let len = self.message.len();
        let mut buf = BytesMut::with_capacity(self.encoded_len());

        buf.put_slice(&selector::SEND_MESSAGE);
        buf.put_slice(&address_word(&self.target));
        buf.put_slice(&usize_word(Self::HEAD_WORDS * WORD_LEN));
        buf.put_slice(&u32_word(self.min_gas_limit));

        // Tail: length word, then data right-padded to a word boundary
        buf.put_slice(&usize_word(len));
        buf.put_slice(&self.message);
        buf.put_bytes(0, padded_len(len) - len);

        buf.freeze()
    }

    /// Decode the canonical encoding produced by [`MessengerCall::encode`].
    pub fn decode(data: &[u8]) -> Result<Self> {
        let (sel, args) = split_selector(data)?;
        if sel != selector::SEND_MESSAGE {
            return Err(CodecError::UnknownSelector(hex::encode(sel)));
        }

        let min_len = (Self::HEAD_WORDS + 1) * WORD_LEN;
        if args.len() < min_len {
            return Err(CodecError::InvalidLength {
                expected: SELECTOR_LEN + min_len,
                got: data.len(),
            });
        }

        let target = decode_address(&word(args, 0))?;
        let offset = decode_usize(&word(args, 1))?;
        if offset != Self::HEAD_WORDS * WORD_LEN {
            return Err(CodecError::InvalidOffset(offset));
        }
        let min_gas_limit = decode_u32(&word(args, 2))?;
        let len = decode_usize(&word(args, 3))?;

        let padded = len
            .checked_add(WORD_LEN - 1)
            .map(|n| n / WORD_LEN * WORD_LEN)
            .ok_or(CodecError::Overflow("usize"))?;
        let expected = padded
            .checked_add(SELECTOR_LEN + min_len)
            .ok_or(CodecError::Overflow("usize"))?;
        if data.len() != expected {
            return Err(CodecError::InvalidLength {
                expected,
                got: data.len(),
            });
        }

        let start = min_len;
        Ok(Self {
            target,
            message: Bytes::copy_from_slice(&args[start..start + len]),
            min_gas_limit,
        })
    }
}

/// An address, left-padded to a word.
pub fn address_word(address: &Address) -> [u8; WORD_LEN] {
    let mut out = [0u8; WORD_LEN];
    out[12..].copy_from_slice(address.as_bytes());
    out
}

pub fn bool_word(value: bool) -> [u8; WORD_LEN] {
    let mut out = [0u8; WORD_LEN];
    out[31] = value as u8;
    out
}

pub fn u32_word(value: u32) -> [u8; WORD_LEN] {
    let mut out = [0u8; WORD_LEN];
    out[28..].copy_from_slice(&value.to_be_bytes());
    out
}

fn usize_word(value: usize) -> [u8; WORD_LEN] {
    let mut out = [0u8; WORD_LEN];
    out[24..].copy_from_slice(&(value as u64).to_be_bytes());
    out
}

fn padded_len(len: usize) -> usize {
    (len + WORD_LEN - 1) / WORD_LEN * WORD_LEN
}

fn split_selector(data: &[u8]) -> Result<(Selector, &[u8])> {
    if data.len() < SELECTOR_LEN {
        return Err(CodecError::InvalidLength {
            expected: SELECTOR_LEN,
            got: data.len(),
        });
    }
    let mut sel = [0u8; SELECTOR_LEN];
    sel.copy_from_slice(&data[..SELECTOR_LEN]);
    Ok((sel, &data[SELECTOR_LEN..]))
}

fn expect_words(args: &[u8], words: usize) -> Result<()> {
    if args.len() != words * WORD_LEN {
        return Err(CodecError::InvalidLength {
            expected: SELECTOR_LEN + words * WORD_LEN,
            got: SELECTOR_LEN + args.len(),
        });
    }
    Ok(())
}

/// Word at `index`. Callers check bounds first.
fn word(args: &[u8], index: usize) -> [u8; WORD_LEN] {
    let mut out = [0u8; WORD_LEN];
    out.copy_from_slice(&args[index * WORD_LEN..(index + 1) * WORD_LEN]);
    out
}

fn decode_address(word: &[u8; WORD_LEN]) -> Result<Address> {
    if word[..12].iter().any(|b| *b != 0) {
        return Err(CodecError::InvalidAddressPadding);
    }
    let mut arr = [0u8; 20];
    arr.copy_from_slice(&word[12..]);
    Ok(Address(arr))
}

fn decode_bool(word: &[u8; WORD_LEN]) -> Result<bool> {
    if word[..31].iter().any(|b| *b != 0) {
        return Err(CodecError::InvalidBool);
    }
    match word[31] {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(CodecError::InvalidBool),
    }
}

fn decode_u32(word: &[u8; WORD_LEN]) -> Result<u32> {
    if word[..28].iter().any(|b| *b != 0) {
        return Err(CodecError::Overflow("uint32"));
    }
    let mut low = [0u8; 4];
    low.copy_from_slice(&word[28..]);
    Ok(u32::from_be_bytes(low))
}

fn decode_usize(word: &[u8; WORD_LEN]) -> Result<usize> {
    if word[..24].iter().any(|b| *b != 0) {
        return Err(CodecError::Overflow("usize"));
    }
    let mut low = [0u8; 8];
    low.copy_from_slice(&word[24..]);
    usize::try_from(u64::from_be_bytes(low)).map_err(|_| CodecError::Overflow("usize"))
}
