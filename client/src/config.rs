//! Client configuration with TOML file support.

use alloy_primitives::{address, Address};
use ballot_chain_jsonrpc::MULTICALL3_ADDRESS;
use ballot_governance::abi::event_topics;
use ballot_types::{parse_address, Decimal};
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

use crate::{ClientError, LogFormat};

/// Celo mainnet governance proxy.
const CELO_GOVERNANCE: Address = address!("D533Ca259b330c7A88f74E000a3FaEa2d63B7972");

/// Configuration for a [`GovernanceClient`](crate::GovernanceClient).
///
/// Can be loaded from a TOML file via [`ClientConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// JSON-RPC endpoint of the node.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// Chain the node must be serving.
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,

    /// Mixed-case addresses must carry a valid EIP-55 checksum.
    #[serde(default = "default_governance_address", deserialize_with = "checked_address")]
    pub governance_address: Address,

    #[serde(default = "default_multicall_address", deserialize_with = "checked_address")]
    pub multicall_address: Address,

    /// First block scanned for vote logs.
    #[serde(default)]
    pub from_block: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Threshold used when the contract's own default cannot be read.
    #[serde(default = "default_threshold")]
    pub default_threshold: Decimal,

    /// Event name whose logs carry votes.
    #[serde(default = "default_vote_event")]
    pub vote_event: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_rpc_url() -> String {
    "https://forno.celo.org".to_string()
}

fn default_chain_id() -> u64 {
    42220
}

fn default_governance_address() -> Address {
    CELO_GOVERNANCE
}

fn default_multicall_address() -> Address {
    MULTICALL3_ADDRESS
}

fn default_request_timeout_secs() -> u64 {
    15
}

fn default_threshold() -> Decimal {
    Decimal::HALF
}

fn default_vote_event() -> String {
    "ProposalVoted".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn checked_address<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Address, D::Error> {
    let s = String::deserialize(deserializer)?;
    parse_address(&s).map_err(serde::de::Error::custom)
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, ClientError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ClientError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ClientError> {
        toml::from_str(s).map_err(|e| ClientError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ClientError> {
        toml::to_string_pretty(self).map_err(|e| ClientError::Config(e.to_string()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Reject configurations that cannot produce correct results.
    pub fn validate(&self) -> Result<(), ClientError> {
        if !(self.rpc_url.starts_with("http://") || self.rpc_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "rpc_url must be an http(s) URL, got {:?}",
                self.rpc_url
            )));
        }
        if self.governance_address == Address::ZERO {
            return Err(ClientError::Config("governance_address is the zero address".into()));
        }
        if self.multicall_address == Address::ZERO {
            return Err(ClientError::Config("multicall_address is the zero address".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ClientError::Config("request_timeout_secs must be positive".into()));
        }
        if self.default_threshold > Decimal::ONE {
            return Err(ClientError::Config(format!(
                "default_threshold {} exceeds 1",
                self.default_threshold
            )));
        }
        if event_topics(&self.vote_event).is_none() {
            return Err(ClientError::Config(format!(
                "unknown vote_event {:?}",
                self.vote_event
            )));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            chain_id: default_chain_id(),
            governance_address: default_governance_address(),
            multicall_address: default_multicall_address(),
            from_block: 0,
            request_timeout_secs: default_request_timeout_secs(),
            default_threshold: default_threshold(),
            vote_event: default_vote_event(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = ClientConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        let parsed = ClientConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = ClientConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.chain_id, 42220);
        assert_eq!(config.multicall_address, MULTICALL3_ADDRESS);
        assert_eq!(config.default_threshold, Decimal::HALF);
        assert_eq!(config.log_format, LogFormat::Human);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            rpc_url = "http://localhost:8545"
            chain_id = 44787
            default_threshold = "0.6"
            log_format = "json"
        "#;
        let config = ClientConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.rpc_url, "http://localhost:8545");
        assert_eq!(config.chain_id, 44787);
        assert_eq!(config.default_threshold, "0.6".parse::<Decimal>().unwrap());
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_level, "info"); // default
    }

    #[test]
    fn malformed_address_is_a_config_error() {
        let err = ClientConfig::from_toml_str(r#"governance_address = "0x1234""#).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn bad_checksum_is_a_config_error() {
        let toml = r#"governance_address = "0xd533ca259b330c7a88f74e000a3faEa2d63B7972""#;
        assert!(matches!(
            ClientConfig::from_toml_str(toml),
            Err(ClientError::Config(_))
        ));
        let lower = r#"governance_address = "0xd533ca259b330c7a88f74e000a3faea2d63b7972""#;
        assert_eq!(
            ClientConfig::from_toml_str(lower).unwrap().governance_address,
            CELO_GOVERNANCE
        );
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = ClientConfig {
            default_threshold: "1.5".parse().unwrap(),
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());

        config.default_threshold = Decimal::ONE;
        config.vote_event = "Transfer".into();
        assert!(config.validate().is_err());

        config.vote_event = "ProposalVotedV2".into();
        config.governance_address = Address::ZERO;
        assert!(config.validate().is_err());

        config.governance_address = CELO_GOVERNANCE;
        config.rpc_url = "ws://localhost".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = ClientConfig::from_toml_file("/nonexistent/ballot.toml");
        assert!(matches!(result.unwrap_err(), ClientError::Config(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ballot.toml");
        std::fs::write(&path, "from_block = 1000\nrequest_timeout_secs = 30\n").unwrap();
        let config = ClientConfig::from_toml_file(path.to_str().unwrap()).unwrap();
        assert_eq!(config.from_block, 1000);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }
}
