//! Token amounts carried in decoded script fields

use crate::constants::*;
use crate::error::{AmountError, DecodeFailure};
use crate::pushdrop::ScriptCodec;
use crate::types::*;

/// Interpret a raw field as a token amount.
///
/// The field must be UTF-8 decimal digits denoting a value of at least
/// `MIN_TOKEN_AMOUNT` that fits in 64 bits.
pub fn parse_amount(field: &[u8]) -> std::result::Result<TokenAmount, AmountError> {
    let text = std::str::from_utf8(field).map_err(|_| AmountError::NotUtf8)?;

    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AmountError::NotNumeric(text.to_string()));
    }

    let amount: TokenAmount = text
        .parse()
        .map_err(|_| AmountError::OutOfRange(text.to_string()))?;

    if amount < MIN_TOKEN_AMOUNT {
        return Err(AmountError::BelowMinimum(amount));
    }
    Ok(amount)
}

/// Amount field of an already decoded token
pub fn token_amount(token: &TokenFields) -> std::result::Result<TokenAmount, AmountError> {
    let field = token
        .fields
        .get(AMOUNT_FIELD_INDEX)
        .ok_or(AmountError::MissingField)?;
    parse_amount(field)
}

/// Decode a locking script and extract its token amount.
///
/// Spent outputs and candidate outputs both go through here.
pub fn decode_token_amount<C: ScriptCodec + ?Sized>(
    codec: &C,
    script: &[u8],
) -> std::result::Result<TokenAmount, DecodeFailure> {
    let token = codec.decode(script)?;
    Ok(token_amount(&token)?)
}
