//! Error types for token admission

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("An array of transaction inputs is required")]
    MissingInputs,

    #[error("Transaction outputs must be included as an array")]
    MissingOutputs,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Failures of the token script codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("Not a PushDrop token script: {0}")]
    NotPushDrop(String),

    #[error("Malformed script: {0}")]
    Malformed(String),

    #[error("Cannot encode token script: {0}")]
    Encoding(String),
}

/// Failures converting a decoded field into a token amount.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Missing amount field")]
    MissingField,

    #[error("Amount field is not valid UTF-8")]
    NotUtf8,

    #[error("Amount field is not a decimal integer: {0:?}")]
    NotNumeric(String),

    #[error("Amount {0} does not fit in 64 bits")]
    OutOfRange(String),

    #[error("Output token amount cannot be less than 1 (got {0})")]
    BelowMinimum(u64),
}

/// Why a script did not yield a token amount
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeFailure {
    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error(transparent)]
    Amount(#[from] AmountError),
}

pub type Result<T> = std::result::Result<T, TokenError>;
