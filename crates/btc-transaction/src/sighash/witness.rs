//! Single-pass witness signature digest (BIP-143 scheme).
//!
//! Commits to the claimed amount and to precomputed double-hashes of
//! the prevouts, sequences, and outputs. Unlike the legacy algorithm it
//! never builds a working copy; it only reads the original transaction.

use btc_primitives::hash::sha256d;
use btc_primitives::wire::ByteWriter;
use btc_script::Script;

use crate::sighash::{SIGHASH_ANYONECANPAY, SIGHASH_MASK, SIGHASH_NONE, SIGHASH_SINGLE};
use crate::{Transaction, TransactionError};

/// Compute the witness signature digest for one input.
///
/// # Arguments
/// * `tx` - The transaction being signed; not mutated.
/// * `input_index` - Index of the input the signature is for.
/// * `prev_locking_script` - Script code of the output that input claims.
/// * `sighash_type` - Base hash type plus optional modifier bits.
/// * `amount` - The claimed output's value in satoshis.
///
/// # Returns
/// The 32-byte digest to sign, or an error for an out-of-range input.
pub fn signature_hash(
    tx: &Transaction,
    input_index: usize,
    prev_locking_script: &Script,
    sighash_type: u32,
    amount: i64,
) -> Result<[u8; 32], TransactionError> {
    let preimage = calc_preimage(tx, input_index, prev_locking_script, sighash_type, amount)?;
    Ok(sha256d(&preimage))
}

/// Build the digest preimage without hashing it.
///
/// Exposed so callers can inspect or log exactly what is being signed.
pub fn calc_preimage(
    tx: &Transaction,
    input_index: usize,
    prev_locking_script: &Script,
    sighash_type: u32,
    amount: i64,
) -> Result<Vec<u8>, TransactionError> {
    if input_index >= tx.inputs.len() {
        return Err(TransactionError::InputIndexOutOfRange {
            index: input_index,
            inputs: tx.inputs.len(),
        });
    }
    let base_type = sighash_type & SIGHASH_MASK;
    let anyone_can_pay = sighash_type & SIGHASH_ANYONECANPAY != 0;

    let hash_prevouts = if anyone_can_pay {
        [0u8; 32]
    } else {
        let mut writer = ByteWriter::new();
        for input in &tx.inputs {
            input.outpoint.write_to(&mut writer);
        }
        sha256d(writer.as_bytes())
    };

    let hash_sequence =
        if anyone_can_pay || base_type == SIGHASH_SINGLE || base_type == SIGHASH_NONE {
            [0u8; 32]
        } else {
            let mut writer = ByteWriter::new();
            for input in &tx.inputs {
                writer.write_u32_le(input.sequence);
            }
            sha256d(writer.as_bytes())
        };

    let hash_outputs = if base_type != SIGHASH_SINGLE && base_type != SIGHASH_NONE {
        let mut writer = ByteWriter::new();
        for output in &tx.outputs {
            output.write_to(&mut writer);
        }
        sha256d(writer.as_bytes())
    } else if base_type == SIGHASH_SINGLE && input_index < tx.outputs.len() {
        let mut writer = ByteWriter::new();
        tx.outputs[input_index].write_to(&mut writer);
        sha256d(writer.as_bytes())
    } else {
        [0u8; 32]
    };

    let input = &tx.inputs[input_index];
    let mut writer = ByteWriter::new();
    writer.write_u32_le(tx.version);
    writer.write_bytes(&hash_prevouts);
    writer.write_bytes(&hash_sequence);
    input.outpoint.write_to(&mut writer);
    writer.write_var_bytes(prev_locking_script.to_bytes());
    writer.write_u64_le(amount as u64);
    writer.write_u32_le(input.sequence);
    writer.write_bytes(&hash_outputs);
    writer.write_u32_le(tx.lock_time);
    writer.write_u32_le(sighash_type);
    Ok(writer.into_bytes())
}
