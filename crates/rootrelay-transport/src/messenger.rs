//! Messenger-backed transport.
//!
//! Frames each dispatch as a `sendMessage(address,bytes,uint32)` call on the
//! cross-domain messenger and hands the calldata to an outbound queue. A
//! separate submitter drains the queue and signs/sends the calls; it is not
//! part of this crate.

use async_trait::async_trait;
use bytes::Bytes;
use rootrelay_core::{Address, MessengerCall};
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::error::{Result, TransportError};
use crate::transport::Transport;

/// A call ready for submission on the local domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundCall {
    /// The messenger contract.
    pub to: Address,
    /// Encoded `sendMessage` calldata.
    pub calldata: Bytes,
}

/// Transport that queues messenger calldata on a bounded channel.
///
/// The queue never blocks: a full queue rejects the dispatch so the caller
/// sees the failure immediately.
pub struct ChannelMessenger {
    address: Address,
    sender: mpsc::Sender<OutboundCall>,
}

impl ChannelMessenger {
    /// Create a messenger transport and the receiving end of its queue.
    pub fn channel(address: Address, capacity: usize) -> (Self, mpsc::Receiver<OutboundCall>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { address, sender }, receiver)
    }
}

#[async_trait]
impl Transport for ChannelMessenger {
    fn address(&self) -> Address {
        self.address
    }

    async fn dispatch(&self, target: Address, payload: Bytes, budget: u32) -> Result<()> {
        let calldata = MessengerCall::new(target, payload, budget).encode();
        tracing::debug!(
            messenger = %self.address,
            target = %target,
            budget,
            calldata_len = calldata.len(),
            "queueing messenger call"
        );

        self.sender
            .try_send(OutboundCall {
                to: self.address,
                calldata,
            })
            .map_err(|e| match e {
                TrySendError::Full(_) => TransportError::Rejected("outbound queue full".into()),
                TrySendError::Closed(_) => {
                    TransportError::Disconnected("outbound queue closed".into())
                }
            })
    }
}
