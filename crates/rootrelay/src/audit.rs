//! Append-only audit log.
//!
//! Every successful dispatch or administrative change appends one record.
//! Records are hash-linked: each id is the Blake3 hash of the CBOR encoding
//! of `(seq, prev, event)`, and `prev` is the id of the record before it.
//! The relay writes the log but never reads it back to make decisions.

use std::fmt;

use rootrelay_core::{Address, BudgetKind, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::broadcast;

/// How many records a slow subscriber may fall behind before it lags.
pub const SUBSCRIBER_CAPACITY: usize = 256;

/// Something the relay did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RelayEvent {
    /// A root was dispatched to the mirror.
    RootPropagated { root: U256 },

    /// Remote mirror ownership transfer was dispatched.
    ///
    /// `previous_local_owner` is the relay's own owner at the time, kept for
    /// provenance; the relay does not know the mirror's prior owner.
    OwnershipTransferredRemote {
        previous_local_owner: Address,
        new_owner: Address,
        is_local: bool,
    },

    /// Remote root history expiry change was dispatched.
    RootHistoryExpiryChangedRemote { expiry: U256 },

    /// One dispatch budget changed.
    BudgetChanged { kind: BudgetKind, value: u32 },

    /// A local ownership transfer was proposed.
    OwnershipTransferStarted { owner: Address, candidate: Address },

    /// A proposed owner accepted.
    OwnershipTransferred {
        previous_owner: Address,
        new_owner: Address,
    },

    /// A pending proposal was withdrawn.
    OwnershipTransferCancelled { owner: Address, candidate: Address },
}

impl RelayEvent {
    pub fn name(&self) -> &'static str {
        match self {
            RelayEvent::RootPropagated { .. } => "RootPropagated",
            RelayEvent::OwnershipTransferredRemote { .. } => "OwnershipTransferredRemote",
            RelayEvent::RootHistoryExpiryChangedRemote { .. } => "RootHistoryExpiryChangedRemote",
            RelayEvent::BudgetChanged { .. } => "BudgetChanged",
            RelayEvent::OwnershipTransferStarted { .. } => "OwnershipTransferStarted",
            RelayEvent::OwnershipTransferred { .. } => "OwnershipTransferred",
            RelayEvent::OwnershipTransferCancelled { .. } => "OwnershipTransferCancelled",
        }
    }
}

/// A 32-byte audit record id (Blake3).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuditId(pub [u8; 32]);

impl AuditId {
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for AuditId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuditId({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for AuditId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

/// One entry in the audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Position in the log, starting at 1.
    pub seq: u64,
    /// Id of the previous record.
    pub prev: Option<AuditId>,
    pub event: RelayEvent,
    pub id: AuditId,
}

impl AuditRecord {
    fn new(seq: u64, prev: Option<AuditId>, event: RelayEvent) -> Self {
        let id = Self::compute_id(seq, prev.as_ref(), &event);
        Self {
            seq,
            prev,
            event,
            id,
        }
    }

    /// Canonical bytes: CBOR of `(seq, prev, event)`.
    pub fn canonical_bytes(seq: u64, prev: Option<&AuditId>, event: &RelayEvent) -> Vec<u8> {
        let mut buf = Vec::new();
        ciborium::into_writer(&(seq, prev, event), &mut buf).expect("CBOR serialization failed");
        buf
    }

    pub fn compute_id(seq: u64, prev: Option<&AuditId>, event: &RelayEvent) -> AuditId {
        let bytes = Self::canonical_bytes(seq, prev, event);
        AuditId(*blake3::hash(&bytes).as_bytes())
    }

    /// Whether `id` matches the record's contents.
    pub fn is_intact(&self) -> bool {
        self.id == Self::compute_id(self.seq, self.prev.as_ref(), &self.event)
    }
}

/// Ways an exported audit chain can be broken.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuditChainError {
    #[error("record at position {index} has seq {got}, expected {expected}")]
    Sequence { index: usize, expected: u64, got: u64 },

    #[error("record {seq} does not link to its predecessor")]
    Link { seq: u64 },

    #[error("record {seq} id does not match its contents")]
    Digest { seq: u64 },
}

/// Check that `records` form an unbroken chain starting at seq 1.
pub fn verify_chain(records: &[AuditRecord]) -> Result<(), AuditChainError> {
    let mut prev: Option<AuditId> = None;

    for (index, record) in records.iter().enumerate() {
        let expected = index as u64 + 1;
        if record.seq != expected {
            return Err(AuditChainError::Sequence {
                index,
                expected,
                got: record.seq,
            });
        }
        if record.prev != prev {
            return Err(AuditChainError::Link { seq: record.seq });
        }
        if !record.is_intact() {
            return Err(AuditChainError::Digest { seq: record.seq });
        }
        prev = Some(record.id);
    }

    Ok(())
}

/// The relay's audit log.
pub struct AuditLog {
    records: Vec<AuditRecord>,
    sender: broadcast::Sender<AuditRecord>,
}

impl AuditLog {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(SUBSCRIBER_CAPACITY);
        Self {
            records: Vec::new(),
            sender,
        }
    }

    /// Append an event and notify subscribers.
    pub fn append(&mut self, event: RelayEvent) -> &AuditRecord {
        let seq = self.records.len() as u64 + 1;
        let prev = self.records.last().map(|r| r.id);
        let record = AuditRecord::new(seq, prev, event);

        tracing::debug!(seq, id = %record.id, event = record.event.name(), "audit record appended");

        // No subscribers is fine
        let _ = self.sender.send(record.clone());

        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    pub fn records(&self) -> &[AuditRecord] {
        &self.records
    }

    /// The most recent record.
    pub fn head(&self) -> Option<&AuditRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Receive every record appended from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<AuditRecord> {
        self.sender.subscribe()
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root(n: u64) -> RelayEvent {
        RelayEvent::RootPropagated {
            root: U256::from(n),
        }
    }

    #[test]
    fn test_append_links_records() {
        let mut log = AuditLog::new();
        let first = log.append(root(1)).clone();
        let second = log.append(root(2)).clone();

        assert_eq!(first.seq, 1);
        assert_eq!(first.prev, None);
        assert_eq!(second.seq, 2);
        assert_eq!(second.prev, Some(first.id));
        assert_eq!(log.head(), Some(&second));
        assert!(verify_chain(log.records()).is_ok());
    }

    #[test]
    fn test_same_event_different_position_has_different_id() {
        let mut log = AuditLog::new();
        let a = log.append(root(7)).id;
        let b = log.append(root(7)).id;
        assert_ne!(a, b);
    }

    #[test]
    fn test_tampered_event_detected() {
        let mut log = AuditLog::new();
        log.append(root(1));
        log.append(root(2));

        let mut records = log.records().to_vec();
        records[1].event = root(3);
        assert_eq!(
            verify_chain(&records),
            Err(AuditChainError::Digest { seq: 2 })
        );
    }

    #[test]
    fn test_dropped_record_detected() {
        let mut log = AuditLog::new();
        log.append(root(1));
        log.append(root(2));
        log.append(root(3));

        let records = vec![log.records()[0].clone(), log.records()[2].clone()];
        assert!(matches!(
            verify_chain(&records),
            Err(AuditChainError::Sequence { index: 1, expected: 2, got: 3 })
        ));
    }

    #[tokio::test]
    async fn test_subscriber_sees_appends() {
        let mut log = AuditLog::new();
        let mut rx = log.subscribe();

        let appended = log.append(root(9)).clone();
        assert_eq!(rx.recv().await.unwrap(), appended);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn append_under(level: tracing::Level) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            AuditLog::new().append(root(1));
        });
        logs.text()
    }

    #[test]
    fn test_append_logs_below_info() {
        assert!(!append_under(tracing::Level::INFO).contains("audit record appended"));

        let debug = append_under(tracing::Level::DEBUG);
        assert!(debug.contains("audit record appended"));
        assert!(debug.contains("RootPropagated"));
    }

    #[test]
    fn test_event_json_shape() {
        let event = RelayEvent::BudgetChanged {
            kind: BudgetKind::SetExpiry,
            value: 5,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "budget_changed");
        assert_eq!(json["kind"], "set_expiry");
        assert_eq!(json["value"], 5);
        assert_eq!(event.name(), "BudgetChanged");
    }
}
