//! Topic configuration

use crate::error::{Result, TokenError};
use crate::transaction::txid_from_hex;
use crate::types::Hash;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for one token topic
///
/// ```json
/// { "issuanceTxid": "<64 hex chars>" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TokenConfig {
    /// Txid (display order) of the transaction whose first output seeds the supply
    pub issuance_txid: String,
}

impl TokenConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| TokenError::Config(e.to_string()))
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| TokenError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&contents)
    }

    /// Issuance txid in internal byte order
    pub fn issuance_txid(&self) -> Result<Hash> {
        txid_from_hex(&self.issuance_txid).map_err(|e| TokenError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TXID: &str = "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b";

    #[test]
    fn test_from_json_str() {
        let json = format!(r#"{{"issuanceTxid": "{}"}}"#, TXID);
        let config = TokenConfig::from_json_str(&json).unwrap();
        assert_eq!(config.issuance_txid, TXID);

        let txid = config.issuance_txid().unwrap();
        assert_eq!(txid[0], 0x3b);
        assert_eq!(txid[31], 0x4a);
    }

    #[test]
    fn test_unknown_option_rejected() {
        let json = format!(r#"{{"issuanceTxid": "{}", "maxSupply": 5}}"#, TXID);
        assert!(matches!(
            TokenConfig::from_json_str(&json),
            Err(TokenError::Config(_))
        ));
    }

    #[test]
    fn test_missing_option_rejected() {
        assert!(TokenConfig::from_json_str("{}").is_err());
    }

    #[test]
    fn test_bad_txid_is_config_error() {
        let config = TokenConfig {
            issuance_txid: "not-hex".to_string(),
        };
        assert!(matches!(config.issuance_txid(), Err(TokenError::Config(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            TokenConfig::from_json_file("/nonexistent/token-topic.json"),
            Err(TokenError::Config(_))
        ));
    }
}
