//! Relay construction input.

use std::path::Path;

use rootrelay_core::{Address, Budgets};
use serde::{Deserialize, Serialize};

use crate::error::{RelayError, Result};

/// Configuration for a relay.
///
/// The three component addresses are fixed for the relay's lifetime.
/// `owner` and `budgets` only seed the mutable administrative state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelayConfig {
    /// Source-of-truth component.
    pub source: Address,
    /// Mirror component on the remote domain.
    pub mirror: Address,
    /// Cross-domain messenger (the transport).
    pub messenger: Address,
    /// Initial local owner.
    pub owner: Address,
    /// Initial dispatch budgets.
    #[serde(default)]
    pub budgets: Budgets,
}

impl RelayConfig {
    /// Config with default budgets.
    pub fn new(source: Address, mirror: Address, messenger: Address, owner: Address) -> Self {
        Self {
            source,
            mirror,
            messenger,
            owner,
            budgets: Budgets::default(),
        }
    }

    pub fn with_budgets(mut self, budgets: Budgets) -> Self {
        self.budgets = budgets;
        self
    }

    /// Parse and validate JSON config text.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject zero addresses and zero budgets.
    pub fn validate(&self) -> Result<()> {
        let identities = [
            ("source", self.source),
            ("mirror", self.mirror),
            ("messenger", self.messenger),
            ("owner", self.owner),
        ];
        for (name, address) in identities {
            if address.is_zero() {
                return Err(RelayError::InvalidConfig(format!(
                    "{name} address must not be zero"
                )));
            }
        }

        if let Some(kind) = self.budgets.first_zero() {
            return Err(RelayError::InvalidConfig(format!(
                "{kind} budget must not be zero"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rootrelay_core::{BudgetKind, DEFAULT_BUDGET};

    fn addr(byte: u8) -> String {
        format!("0x{}", hex::encode([byte; 20]))
    }

    #[test]
    fn test_parse_with_default_budgets() {
        let json = format!(
            r#"{{"source":"{}","mirror":"{}","messenger":"{}","owner":"{}"}}"#,
            addr(1),
            addr(2),
            addr(3),
            addr(4)
        );
        let config = RelayConfig::from_json_str(&json).unwrap();

        assert_eq!(config.mirror, Address::from_bytes([2; 20]));
        assert_eq!(config.budgets, Budgets::default());
    }

    #[test]
    fn test_parse_partial_budgets() {
        let json = format!(
            r#"{{"source":"{}","mirror":"{}","messenger":"{}","owner":"{}",
                "budgets":{{"propagate_root":250000}}}}"#,
            addr(1),
            addr(2),
            addr(3),
            addr(4)
        );
        let config = RelayConfig::from_json_str(&json).unwrap();

        assert_eq!(config.budgets.get(BudgetKind::PropagateRoot), 250_000);
        assert_eq!(config.budgets.get(BudgetKind::SetExpiry), DEFAULT_BUDGET);
    }

    #[test]
    fn test_zero_address_rejected() {
        let config = RelayConfig::new(
            Address::from_bytes([1; 20]),
            Address::ZERO,
            Address::from_bytes([3; 20]),
            Address::from_bytes([4; 20]),
        );
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("mirror"));
    }

    #[test]
    fn test_zero_budget_rejected() {
        let mut budgets = Budgets::default();
        budgets.set(BudgetKind::SetExpiry, 0);
        let config = RelayConfig::new(
            Address::from_bytes([1; 20]),
            Address::from_bytes([2; 20]),
            Address::from_bytes([3; 20]),
            Address::from_bytes([4; 20]),
        )
        .with_budgets(budgets);

        assert!(matches!(
            config.validate(),
            Err(RelayError::InvalidConfig(msg)) if msg.contains("set_expiry")
        ));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let json = format!(
            r#"{{"source":"{}","mirror":"{}","messenger":"{}","owner":"{}","extra":1}}"#,
            addr(1),
            addr(2),
            addr(3),
            addr(4)
        );
        assert!(matches!(
            RelayConfig::from_json_str(&json),
            Err(RelayError::Json(_))
        ));
    }
}
