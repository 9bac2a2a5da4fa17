//! PushDrop token scripts
//!
//! Layout of a token locking script:
//!
//! ```text
//! <pubkey> OP_CHECKSIG <field 0> ... <field n-1> OP_2DROP ... [OP_DROP]
//! ```
//!
//! The key locks the output; the fields ride along and are dropped before the
//! stack is evaluated. For this token, field 0 is the amount as decimal text and
//! the last field is a signature by the locking key over the preceding fields.

use crate::constants::*;
use crate::error::ScriptError;
use crate::script::{parse_script, push_data, ScriptChunk};
use crate::types::*;
use secp256k1::{ecdsa::Signature, Message, PublicKey, Secp256k1, SecretKey};
use sha2::{Digest, Sha256};

/// Encode/decode capability for token locking scripts.
///
/// Fields are always raw bytes; callers convert them explicitly.
pub trait ScriptCodec {
    fn decode(&self, script: &[u8]) -> std::result::Result<TokenFields, ScriptError>;

    fn encode(&self, token: &TokenFields) -> std::result::Result<ByteString, ScriptError>;
}

/// The PushDrop script layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PushDropCodec;

impl ScriptCodec for PushDropCodec {
    fn decode(&self, script: &[u8]) -> std::result::Result<TokenFields, ScriptError> {
        let chunks = parse_script(script)?;

        let locking_public_key = match chunks.first().and_then(ScriptChunk::as_push) {
            Some(key) if is_public_key(key) => key.to_vec(),
            _ => {
                return Err(ScriptError::NotPushDrop(
                    "Script does not start with a public key".to_string(),
                ))
            }
        };

        if chunks.get(1) != Some(&ScriptChunk::Op(OP_CHECKSIG)) {
            return Err(ScriptError::NotPushDrop(
                "Public key is not followed by OP_CHECKSIG".to_string(),
            ));
        }

        let mut fields = Vec::new();
        let mut rest = chunks[2..].iter();
        let mut dropped = 0usize;
        for chunk in rest.by_ref() {
            match chunk {
                ScriptChunk::Push(data) => fields.push(data.clone()),
                ScriptChunk::Op(op) => {
                    dropped += drop_count(*op)?;
                    break;
                }
            }
        }
        for chunk in rest {
            match chunk {
                ScriptChunk::Op(op) => dropped += drop_count(*op)?,
                ScriptChunk::Push(_) => {
                    return Err(ScriptError::NotPushDrop(
                        "Data push after drop opcodes".to_string(),
                    ))
                }
            }
        }

        if fields.is_empty() {
            return Err(ScriptError::NotPushDrop("Script carries no fields".to_string()));
        }
        if dropped != fields.len() {
            return Err(ScriptError::NotPushDrop(format!(
                "{} fields pushed but {} dropped",
                fields.len(),
                dropped
            )));
        }

        Ok(TokenFields {
            locking_public_key,
            fields,
        })
    }

    fn encode(&self, token: &TokenFields) -> std::result::Result<ByteString, ScriptError> {
        if !is_public_key(&token.locking_public_key) {
            return Err(ScriptError::Encoding("Invalid locking public key".to_string()));
        }
        if token.fields.is_empty() {
            return Err(ScriptError::Encoding("At least one field is required".to_string()));
        }

        let mut script = Vec::new();
        push_data(&mut script, &token.locking_public_key);
        script.push(OP_CHECKSIG);
        for field in &token.fields {
            push_data(&mut script, field);
        }
        for _ in 0..token.fields.len() / 2 {
            script.push(OP_2DROP);
        }
        if token.fields.len() % 2 == 1 {
            script.push(OP_DROP);
        }
        Ok(script)
    }
}

fn drop_count(op: u8) -> std::result::Result<usize, ScriptError> {
    match op {
        OP_DROP => Ok(1),
        OP_2DROP => Ok(2),
        _ => Err(ScriptError::NotPushDrop(format!(
            "Unexpected opcode 0x{:02x} in drop tail",
            op
        ))),
    }
}

fn is_public_key(bytes: &[u8]) -> bool {
    matches!(bytes.len(), COMPRESSED_PUBKEY_SIZE | UNCOMPRESSED_PUBKEY_SIZE)
        && PublicKey::from_slice(bytes).is_ok()
}

/// SHA-256 over the concatenated data fields
fn fields_message(fields: &[ByteString]) -> Message {
    let mut hasher = Sha256::new();
    for field in fields {
        hasher.update(field);
    }
    let digest: [u8; 32] = hasher.finalize().into();
    Message::from_digest(digest)
}

/// Build a signed token script holding `amount` units, locked to the key of `secret_key`
pub fn create_token_script(
    secret_key: &SecretKey,
    amount: TokenAmount,
) -> std::result::Result<ByteString, ScriptError> {
    let secp = Secp256k1::new();
    let public_key = PublicKey::from_secret_key(&secp, secret_key);

    let amount_field = amount.to_string().into_bytes();
    let message = fields_message(std::slice::from_ref(&amount_field));
    let signature = secp.sign_ecdsa(&message, secret_key);

    PushDropCodec.encode(&TokenFields {
        locking_public_key: public_key.serialize().to_vec(),
        fields: vec![amount_field, signature.serialize_der().to_vec()],
    })
}

/// Check that the last field signs the preceding ones under the locking key
///
/// Admission does not depend on this; it is offered to wallets and auditors.
pub fn verify_token_signature(token: &TokenFields) -> bool {
    let (signature_bytes, data) = match token.fields.split_last() {
        Some((sig, data)) if !data.is_empty() => (sig, data),
        _ => return false,
    };

    let pubkey = match PublicKey::from_slice(&token.locking_public_key) {
        Ok(pk) => pk,
        Err(_) => return false,
    };

    let signature = match Signature::from_der(signature_bytes) {
        Ok(sig) => sig,
        Err(_) => return false,
    };

    let secp = Secp256k1::verification_only();
    secp.verify_ecdsa(&fields_message(data), &signature, &pubkey)
        .is_ok()
}
