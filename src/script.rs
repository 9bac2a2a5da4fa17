//! Locking script tokenization and data pushes

use crate::constants::*;
use crate::error::ScriptError;
use crate::types::*;

/// One parsed script element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptChunk {
    /// Data placed on the stack, including push-number opcodes
    Push(ByteString),
    /// Any non-push opcode
    Op(u8),
}

impl ScriptChunk {
    pub fn as_push(&self) -> Option<&[u8]> {
        match self {
            ScriptChunk::Push(data) => Some(data),
            ScriptChunk::Op(_) => None,
        }
    }
}

/// ParseScript: 𝕊 → 𝒞*
///
/// Splits a script into chunks:
/// 1. 0x01..=0x4b: push the next n bytes
/// 2. OP_PUSHDATA1/2/4: push length-prefixed data
/// 3. OP_0, OP_1NEGATE, OP_1..OP_16: push the equivalent one-byte value
/// 4. Anything else is a bare opcode
pub fn parse_script(script: &[u8]) -> std::result::Result<Vec<ScriptChunk>, ScriptError> {
    let mut chunks = Vec::new();
    let mut pos = 0;

    while pos < script.len() {
        let opcode = script[pos];
        pos += 1;

        let chunk = match opcode {
            OP_0 => ScriptChunk::Push(vec![]),
            0x01..=OP_PUSHBYTES_75 => {
                ScriptChunk::Push(take(script, &mut pos, opcode as usize)?.to_vec())
            }
            OP_PUSHDATA1 => {
                let len = read_le(script, &mut pos, 1)?;
                ScriptChunk::Push(take(script, &mut pos, len)?.to_vec())
            }
            OP_PUSHDATA2 => {
                let len = read_le(script, &mut pos, 2)?;
                ScriptChunk::Push(take(script, &mut pos, len)?.to_vec())
            }
            OP_PUSHDATA4 => {
                let len = read_le(script, &mut pos, 4)?;
                ScriptChunk::Push(take(script, &mut pos, len)?.to_vec())
            }
            OP_1NEGATE => ScriptChunk::Push(vec![0x81]),
            OP_1..=OP_16 => ScriptChunk::Push(vec![opcode - OP_1 + 1]),
            _ => ScriptChunk::Op(opcode),
        };
        chunks.push(chunk);
    }

    Ok(chunks)
}

/// Append a minimally encoded push of `data` to `script`
pub fn push_data(script: &mut ByteString, data: &[u8]) {
    match data {
        [] => script.push(OP_0),
        [n @ 1..=16] => script.push(OP_1 + n - 1),
        [0x81] => script.push(OP_1NEGATE),
        _ if data.len() <= OP_PUSHBYTES_75 as usize => {
            script.push(data.len() as u8);
            script.extend_from_slice(data);
        }
        _ if data.len() <= 0xff => {
            script.push(OP_PUSHDATA1);
            script.push(data.len() as u8);
            script.extend_from_slice(data);
        }
        _ if data.len() <= 0xffff => {
            script.push(OP_PUSHDATA2);
            script.extend_from_slice(&(data.len() as u16).to_le_bytes());
            script.extend_from_slice(data);
        }
        _ => {
            script.push(OP_PUSHDATA4);
            script.extend_from_slice(&(data.len() as u32).to_le_bytes());
            script.extend_from_slice(data);
        }
    }
}

fn take<'a>(
    script: &'a [u8],
    pos: &mut usize,
    len: usize,
) -> std::result::Result<&'a [u8], ScriptError> {
    let end = pos
        .checked_add(len)
        .filter(|end| *end <= script.len())
        .ok_or_else(|| {
            ScriptError::Malformed(format!("Push of {} bytes runs past end of script", len))
        })?;
    let data = &script[*pos..end];
    *pos = end;
    Ok(data)
}

fn read_le(script: &[u8], pos: &mut usize, width: usize) -> std::result::Result<usize, ScriptError> {
    let bytes = take(script, pos, width)?;
    Ok(bytes
        .iter()
        .rev()
        .fold(0usize, |acc, b| (acc << 8) | *b as usize))
}
