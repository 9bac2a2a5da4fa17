//! Core types for token admission

use crate::error::DecodeFailure;
use serde::{Deserialize, Serialize};

/// Hash type: 256-bit hash
pub type Hash = [u8; 32];

/// Byte string type
pub type ByteString = Vec<u8>;

/// Natural number type
pub type Natural = u64;

/// Integer type
pub type Integer = i64;

/// Token units carried by a single output
pub type TokenAmount = u64;

/// Sum of token units over a transaction side
pub type TokenTotal = u128;

/// OutPoint: 𝒪 = ℍ × ℕ
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    pub hash: Hash,
    pub index: Natural,
}

/// Transaction Input: ℐ = 𝒪 × 𝕊 × ℕ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub prevout: OutPoint,
    pub script_sig: ByteString,
    pub sequence: Natural,
}

/// Transaction Output: 𝒯 = ℤ × 𝕊
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutput {
    pub value: Integer,
    pub script_pubkey: ByteString,
}

/// Transaction: 𝒯𝒳 = ℕ × ℐ* × 𝒯* × ℕ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub version: Natural,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub lock_time: Natural,
}

/// A former topic member spent by the transaction under evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpentOutput {
    pub outpoint: OutPoint,
    pub output_script: ByteString,
}

/// Decoded PushDrop script: locking key plus the pushed data fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenFields {
    pub locking_public_key: ByteString,
    pub fields: Vec<ByteString>,
}

/// An output left out of the admissible set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludedOutput {
    pub output_index: usize,
    pub reason: DecodeFailure,
}

/// Token accounting for a conserved transfer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenTally {
    /// Indices of decoded token outputs, ascending
    pub admitted: Vec<usize>,
    pub excluded: Vec<ExcludedOutput>,
    pub created: TokenTotal,
    pub redeemed: TokenTotal,
}

/// Why a whole transaction admits nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// A spent topic member did not decode as a token
    MalformedSpentOutput { index: usize, reason: DecodeFailure },
    /// Outputs create more units than the inputs redeem
    ConservationViolated { created: TokenTotal, redeemed: TokenTotal },
}

/// Admission outcome for one transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmissionResult {
    /// The configured issuance transaction; its first output seeds the supply
    Issuance,
    Admitted(TokenTally),
    Rejected(Rejection),
}

impl AdmissionResult {
    /// Output indices the topic may admit
    pub fn admissible_outputs(&self) -> Vec<usize> {
        match self {
            AdmissionResult::Issuance => vec![crate::constants::ISSUANCE_OUTPUT_INDEX],
            AdmissionResult::Admitted(tally) => tally.admitted.clone(),
            AdmissionResult::Rejected(_) => Vec::new(),
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, AdmissionResult::Rejected(_))
    }
}
