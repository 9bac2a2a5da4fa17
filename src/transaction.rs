//! Transaction shape checks and identifiers

use crate::error::{Result, TokenError};
use crate::types::*;
use bitcoin_hashes::{sha256d, Hash as BitcoinHash};

/// CheckTransactionShape: 𝒯𝒳 → {ok, error}
///
/// A transaction tx = (v, ins, outs, lt) may be evaluated only if:
/// 1. |ins| > 0, otherwise MissingInputs
/// 2. |outs| > 0, otherwise MissingOutputs
pub fn check_transaction_shape(tx: &Transaction) -> Result<()> {
    if tx.inputs.is_empty() {
        return Err(TokenError::MissingInputs);
    }
    if tx.outputs.is_empty() {
        return Err(TokenError::MissingOutputs);
    }
    Ok(())
}

/// Serialize a transaction in wire format
///
/// version (4) ‖ |ins| ‖ ins ‖ |outs| ‖ outs ‖ lock_time (4)
///
/// Fails if a 32-bit wire field holds a wider value.
pub fn serialize_transaction(tx: &Transaction) -> Result<ByteString> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&wire_u32(tx.version, "version")?.to_le_bytes());

    write_varint(&mut buf, tx.inputs.len() as u64);
    for input in &tx.inputs {
        buf.extend_from_slice(&input.prevout.hash);
        buf.extend_from_slice(&wire_u32(input.prevout.index, "prevout index")?.to_le_bytes());
        write_varint(&mut buf, input.script_sig.len() as u64);
        buf.extend_from_slice(&input.script_sig);
        buf.extend_from_slice(&wire_u32(input.sequence, "sequence")?.to_le_bytes());
    }

    write_varint(&mut buf, tx.outputs.len() as u64);
    for output in &tx.outputs {
        buf.extend_from_slice(&output.value.to_le_bytes());
        write_varint(&mut buf, output.script_pubkey.len() as u64);
        buf.extend_from_slice(&output.script_pubkey);
    }

    buf.extend_from_slice(&wire_u32(tx.lock_time, "lock_time")?.to_le_bytes());
    Ok(buf)
}

/// ComputeTxid: 𝒯𝒳 → ℍ
///
/// txid = SHA256(SHA256(Serialize(tx))), in internal byte order
pub fn compute_txid(tx: &Transaction) -> Result<Hash> {
    Ok(sha256d::Hash::hash(&serialize_transaction(tx)?).into_inner())
}

fn wire_u32(value: Natural, field: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        TokenError::Serialization(format!("{} {} does not fit in 32 bits", field, value))
    })
}

/// Display form of a txid (byte-reversed hex)
pub fn txid_to_hex(txid: &Hash) -> String {
    let mut reversed = *txid;
    reversed.reverse();
    hex::encode(reversed)
}

/// Parse a display-form txid
pub fn txid_from_hex(s: &str) -> Result<Hash> {
    let bytes = hex::decode(s.trim())
        .map_err(|e| TokenError::Serialization(format!("Invalid txid hex: {}", e)))?;
    let mut txid: Hash = bytes.try_into().map_err(|b: Vec<u8>| {
        TokenError::Serialization(format!("Txid must be 32 bytes, got {}", b.len()))
    })?;
    txid.reverse();
    Ok(txid)
}

/// CompactSize encoding
fn write_varint(buf: &mut ByteString, n: u64) {
    match n {
        0..=0xfc => buf.push(n as u8),
        0xfd..=0xffff => {
            buf.push(0xfd);
            buf.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            buf.push(0xfe);
            buf.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            buf.push(0xff);
            buf.extend_from_slice(&n.to_le_bytes());
        }
    }
}
