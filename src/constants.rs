//! Token script constants

/// Push an empty byte string
pub const OP_0: u8 = 0x00;

/// Largest opcode that is itself a direct push length
pub const OP_PUSHBYTES_75: u8 = 0x4b;

/// Next byte holds the push length
pub const OP_PUSHDATA1: u8 = 0x4c;

/// Next two bytes (little-endian) hold the push length
pub const OP_PUSHDATA2: u8 = 0x4d;

/// Next four bytes (little-endian) hold the push length
pub const OP_PUSHDATA4: u8 = 0x4e;

/// Push the number -1 (encoded as 0x81)
pub const OP_1NEGATE: u8 = 0x4f;

/// Push the number 1; OP_2..OP_16 follow contiguously
pub const OP_1: u8 = 0x51;

pub const OP_16: u8 = 0x60;

pub const OP_DROP: u8 = 0x75;

pub const OP_2DROP: u8 = 0x6d;

pub const OP_CHECKSIG: u8 = 0xac;

/// Compressed secp256k1 public key length
pub const COMPRESSED_PUBKEY_SIZE: usize = 33;

/// Uncompressed secp256k1 public key length
pub const UNCOMPRESSED_PUBKEY_SIZE: usize = 65;

/// Decoded field holding the token amount
pub const AMOUNT_FIELD_INDEX: usize = 0;

/// Smallest amount a token output may carry
pub const MIN_TOKEN_AMOUNT: u64 = 1;

/// Output of the issuance transaction that seeds the supply
pub const ISSUANCE_OUTPUT_INDEX: usize = 0;
