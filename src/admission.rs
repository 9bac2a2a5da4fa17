//! Token conservation rule for topic admission
//!
//! A transaction may place token outputs into the topic only if the units it
//! creates do not exceed the units redeemed from the topic members it spends.
//! The configured issuance transaction is exempt and seeds the supply.

use crate::error::Result;
use crate::pushdrop::ScriptCodec;
use crate::token::decode_token_amount;
use crate::transaction::{check_transaction_shape, compute_txid, txid_to_hex};
use crate::types::*;
use tracing::{debug, trace};

/// IdentifyAdmissibleOutputs: ℍ × 𝒮𝒪* × 𝒯𝒳 → 𝒜
///
/// For issuance txid i, spent outputs sp and transaction tx:
/// 1. If |tx.ins| = 0 or |tx.outs| = 0: error
/// 2. If txid(tx) = i: return Issuance
/// 3. Let redeemed = Σ amount(s) for s ∈ sp; any undecodable s rejects tx
/// 4. Let C = {j : amount(tx.outs[j]) decodes and is ≥ 1}
/// 5. Let created = Σ amount(tx.outs[j]) for j ∈ C
/// 6. If created > redeemed: reject, else admit C
pub fn identify_admissible_outputs<C: ScriptCodec + ?Sized>(
    codec: &C,
    issuance_txid: &Hash,
    spent_outputs: &[SpentOutput],
    tx: &Transaction,
) -> Result<AdmissionResult> {
    check_transaction_shape(tx)?;

    // A transaction that cannot be serialized has no txid and is never the issuance
    let txid = match compute_txid(tx) {
        Ok(txid) if &txid == issuance_txid => {
            debug!(txid = %txid_to_hex(&txid), "admitting issuance transaction");
            return Ok(AdmissionResult::Issuance);
        }
        Ok(txid) => Some(txid_to_hex(&txid)),
        Err(e) => {
            debug!(error = %e, "transaction has no txid; checking conservation");
            None
        }
    };

    let mut redeemed: TokenTotal = 0;
    for (index, spent) in spent_outputs.iter().enumerate() {
        match decode_token_amount(codec, &spent.output_script) {
            Ok(amount) => redeemed += TokenTotal::from(amount),
            Err(reason) => {
                debug!(
                    txid = ?txid,
                    spent_index = index,
                    %reason,
                    "spent output is not a valid token"
                );
                return Ok(AdmissionResult::Rejected(
                    Rejection::MalformedSpentOutput { index, reason },
                ));
            }
        }
    }

    let mut tally = TokenTally {
        redeemed,
        ..TokenTally::default()
    };
    for (output_index, output) in tx.outputs.iter().enumerate() {
        match decode_token_amount(codec, &output.script_pubkey) {
            Ok(amount) => {
                tally.created += TokenTotal::from(amount);
                tally.admitted.push(output_index);
            }
            Err(reason) => {
                trace!(output_index, %reason, "output excluded");
                tally.excluded.push(ExcludedOutput { output_index, reason });
            }
        }
    }

    debug!(
        txid = ?txid,
        redeemed = %tally.redeemed,
        created = %tally.created,
        candidates = tally.admitted.len(),
        "token totals"
    );

    if tally.created > tally.redeemed {
        return Ok(AdmissionResult::Rejected(Rejection::ConservationViolated {
            created: tally.created,
            redeemed: tally.redeemed,
        }));
    }

    Ok(AdmissionResult::Admitted(tally))
}
