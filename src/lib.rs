//! # Token-Conservation
//!
//! Admission rule for a fungible-token overlay topic.
//!
//! Given a transaction and the topic members it spends, this crate decides which
//! of the transaction's outputs are valid token instances that the topic may
//! track. Tokens live in PushDrop locking scripts whose first field is the amount.
//!
//! ## Rules
//!
//! 1. **Shape**: a transaction must have inputs and outputs
//! 2. **Issuance**: the configured issuance transaction admits output 0 unconditionally
//! 3. **Conservation**: otherwise, units created must not exceed units redeemed
//! 4. **Exclusion**: outputs that do not decode as tokens with amount ≥ 1 are skipped
//!
//! All functions are deterministic and side-effect-free. Diagnostics are emitted
//! as `tracing` events and stay silent unless the caller installs a subscriber.
//!
//! ## Usage
//!
//! ```rust
//! use token_conservation::TokenManager;
//! use token_conservation::types::*;
//!
//! let manager = TokenManager::new([7u8; 32]);
//! let tx = Transaction {
//!     version: 1,
//!     inputs: vec![TransactionInput {
//!         prevout: OutPoint { hash: [1; 32], index: 0 },
//!         script_sig: vec![],
//!         sequence: 0xffffffff,
//!     }],
//!     outputs: vec![TransactionOutput {
//!         value: 1,
//!         script_pubkey: vec![0x51],
//!     }],
//!     lock_time: 0,
//! };
//! let admitted = manager.admissible_outputs(&[], &tx).unwrap();
//! assert!(admitted.is_empty());
//! ```

pub mod types;
pub mod constants;
pub mod error;
pub mod script;
pub mod pushdrop;
pub mod token;
pub mod transaction;
pub mod admission;
pub mod config;

// Re-export commonly used types
pub use types::*;
pub use constants::*;
pub use error::{AmountError, DecodeFailure, Result, ScriptError, TokenError};
pub use config::TokenConfig;
pub use pushdrop::{PushDropCodec, ScriptCodec};

/// Admission rule for one token topic
///
/// Holds the issuance txid and the script codec; nothing else, and nothing
/// changes after construction.
///
/// # Examples
///
/// ```
/// use token_conservation::TokenManager;
/// use token_conservation::pushdrop::create_token_script;
/// use token_conservation::types::*;
/// use secp256k1::SecretKey;
///
/// let key = SecretKey::from_slice(&[1u8; 32]).unwrap();
/// let spent = SpentOutput {
///     outpoint: OutPoint { hash: [1; 32], index: 0 },
///     output_script: create_token_script(&key, 10).unwrap(),
/// };
///
/// let tx = Transaction {
///     version: 1,
///     inputs: vec![TransactionInput {
///         prevout: OutPoint { hash: [1; 32], index: 0 },
///         script_sig: vec![],
///         sequence: 0xffffffff,
///     }],
///     outputs: vec![
///         TransactionOutput { value: 1, script_pubkey: create_token_script(&key, 4).unwrap() },
///         TransactionOutput { value: 1, script_pubkey: create_token_script(&key, 6).unwrap() },
///     ],
///     lock_time: 0,
/// };
///
/// let manager = TokenManager::new([0u8; 32]);
/// assert_eq!(manager.admissible_outputs(&[spent], &tx).unwrap(), vec![0, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct TokenManager<C: ScriptCodec = PushDropCodec> {
    issuance_txid: Hash,
    codec: C,
}

impl TokenManager<PushDropCodec> {
    /// Create a manager for the topic seeded by `issuance_txid` (internal byte order)
    pub fn new(issuance_txid: Hash) -> Self {
        Self::with_codec(issuance_txid, PushDropCodec)
    }

    /// Create a manager from topic configuration
    ///
    /// # Examples
    ///
    /// ```
    /// use token_conservation::{TokenConfig, TokenManager};
    ///
    /// let config = TokenConfig::from_json_str(
    ///     r#"{"issuanceTxid": "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b"}"#,
    /// ).unwrap();
    /// let manager = TokenManager::from_config(&config).unwrap();
    /// assert_eq!(manager.issuance_txid()[31], 0x4a);
    /// ```
    pub fn from_config(config: &TokenConfig) -> Result<Self> {
        Ok(Self::new(config.issuance_txid()?))
    }
}

impl<C: ScriptCodec> TokenManager<C> {
    /// Create a manager that decodes token scripts with `codec`
    pub fn with_codec(issuance_txid: Hash, codec: C) -> Self {
        Self {
            issuance_txid,
            codec,
        }
    }

    pub fn issuance_txid(&self) -> &Hash {
        &self.issuance_txid
    }

    /// Classify the outputs of `tx`, keeping the reasons
    ///
    /// Only an empty input or output list is an error; every other problem is
    /// reported inside the returned [`AdmissionResult`].
    pub fn identify_admissible_outputs(
        &self,
        spent_outputs: &[SpentOutput],
        tx: &Transaction,
    ) -> Result<AdmissionResult> {
        admission::identify_admissible_outputs(&self.codec, &self.issuance_txid, spent_outputs, tx)
    }

    /// Indices of the outputs of `tx` that may join the topic
    ///
    /// An empty list means nothing in the transaction is admissible.
    pub fn admissible_outputs(
        &self,
        spent_outputs: &[SpentOutput],
        tx: &Transaction,
    ) -> Result<Vec<usize>> {
        self.identify_admissible_outputs(spent_outputs, tx)
            .map(|result| result.admissible_outputs())
    }
}
