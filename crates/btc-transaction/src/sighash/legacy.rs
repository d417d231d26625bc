//! Legacy "prepare-and-hash" signature digest.
//!
//! Builds a pruned working copy of the transaction, serializes it with
//! the legacy layout, appends the hash type, and double-hashes. The
//! input transaction itself is never mutated.

use btc_primitives::hash::sha256d;
use btc_primitives::wire::ByteWriter;
use btc_script::Script;

use crate::sighash::{SIGHASH_ANYONECANPAY, SIGHASH_MASK, SIGHASH_NONE, SIGHASH_SINGLE};
use crate::{ScriptWitness, Transaction, TransactionError, TxOut};

/// Digest returned when SIGHASH_SINGLE targets an input index with no
/// matching output. A cross-implementation compatibility quirk that
/// must be preserved exactly.
pub const SINGLE_OUT_OF_RANGE_DIGEST: [u8; 32] = [
    0x01, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

/// Compute the legacy signature digest for one input.
///
/// # Arguments
/// * `tx` - The transaction being signed; not mutated.
/// * `input_index` - Index of the input the signature is for.
/// * `prev_locking_script` - Locking script of the output that input claims.
/// * `sighash_type` - Base hash type plus optional modifier bits.
///
/// # Returns
/// The 32-byte digest to sign, or an error for an out-of-range input.
pub fn signature_hash(
    tx: &Transaction,
    input_index: usize,
    prev_locking_script: &Script,
    sighash_type: u32,
) -> Result<[u8; 32], TransactionError> {
    if input_index >= tx.inputs.len() {
        return Err(TransactionError::InputIndexOutOfRange {
            index: input_index,
            inputs: tx.inputs.len(),
        });
    }
    let base_type = sighash_type & SIGHASH_MASK;
    if base_type == SIGHASH_SINGLE && input_index >= tx.outputs.len() {
        return Ok(SINGLE_OUT_OF_RANGE_DIGEST);
    }

    // 0xab bytes inside push data are not separators and stay put.
    let script_code = prev_locking_script.without_code_separators();

    let mut working = tx.clone();
    for input in &mut working.inputs {
        input.unlocking_script = Script::new();
    }
    working.inputs[input_index].unlocking_script = script_code;

    match base_type {
        SIGHASH_NONE => {
            working.outputs.clear();
            zero_other_sequences(&mut working, input_index);
        }
        SIGHASH_SINGLE => {
            working.outputs.truncate(input_index + 1);
            for output in &mut working.outputs[..input_index] {
                *output = TxOut::null();
            }
            zero_other_sequences(&mut working, input_index);
        }
        _ => {}
    }

    if sighash_type & SIGHASH_ANYONECANPAY != 0 {
        let target = working.inputs.swap_remove(input_index);
        working.inputs = vec![target];
        working.witnesses = vec![ScriptWitness::new()];
    }

    let mut writer = ByteWriter::new();
    working.write_to(&mut writer, false);
    writer.write_u32_le(sighash_type);
    Ok(sha256d(writer.as_bytes()))
}

fn zero_other_sequences(tx: &mut Transaction, keep: usize) {
    for (index, input) in tx.inputs.iter_mut().enumerate() {
        if index != keep {
            input.sequence = 0;
        }
    }
}
