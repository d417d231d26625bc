//! Spend verification: input resolution and context construction for an
//! external script-execution engine.

use btc_primitives::chainhash::Hash;
use btc_script::{Script, ScriptError, ScriptFlags};

use crate::{ScriptWitness, Transaction, TransactionError};

/// Per-input context handed to the script engine.
pub struct ScriptContext<'a> {
    /// The spending transaction.
    pub tx: &'a Transaction,
    /// Index of the input under evaluation.
    pub input_index: usize,
    /// Value in satoshis of the output being spent.
    pub amount: i64,
}

/// Contract for the external script-execution engine.
///
/// The engine owns all scripting semantics; the transaction core only
/// resolves inputs and builds the evaluation context.
pub trait ScriptEngine {
    /// Evaluate one input's spend. `Ok(false)` and `Err(_)` are both
    /// treated as verification failures by the caller.
    fn verify(
        &self,
        unlocking_script: &Script,
        locking_script: &Script,
        witness: &ScriptWitness,
        context: &ScriptContext,
        flags: ScriptFlags,
    ) -> Result<bool, ScriptError>;
}

impl Transaction {
    /// Verify that every non-coinbase input of this transaction
    /// correctly spends its referenced output.
    ///
    /// # Arguments
    /// * `referenced` - The prior transactions whose outputs this one spends.
    /// * `engine` - The script-execution engine evaluating each spend.
    /// * `flags` - Script verification flags passed through to the engine.
    ///
    /// # Returns
    /// `Ok(())` when every input verifies; otherwise a verification
    /// error naming the first failing input.
    pub fn correctly_spends(
        &self,
        referenced: &[Transaction],
        engine: &dyn ScriptEngine,
        flags: ScriptFlags,
    ) -> Result<(), TransactionError> {
        let referenced_by_hash: Vec<(Hash, &Transaction)> =
            referenced.iter().map(|tx| (tx.hash(), tx)).collect();

        for (index, input) in self.inputs.iter().enumerate() {
            if input.outpoint.is_coinbase() {
                continue;
            }
            let prev_tx = referenced_by_hash
                .iter()
                .find(|(hash, _)| *hash == input.outpoint.hash)
                .map(|(_, tx)| *tx)
                .ok_or_else(|| TransactionError::Verification {
                    index,
                    reason: format!("referenced transaction {} not found", input.outpoint.txid()),
                })?;
            let output = prev_tx
                .outputs
                .get(input.outpoint.index as usize)
                .ok_or_else(|| TransactionError::Verification {
                    index,
                    reason: format!(
                        "referenced output index {} out of range ({} outputs)",
                        input.outpoint.index,
                        prev_tx.outputs.len()
                    ),
                })?;

            let context = ScriptContext {
                tx: self,
                input_index: index,
                amount: output.amount,
            };
            match engine.verify(
                &input.unlocking_script,
                &output.locking_script,
                self.witness_at(index),
                &context,
                flags,
            ) {
                Ok(true) => {}
                Ok(false) => {
                    return Err(TransactionError::Verification {
                        index,
                        reason: "script evaluation failed".into(),
                    })
                }
                Err(e) => {
                    return Err(TransactionError::Verification {
                        index,
                        reason: e.to_string(),
                    })
                }
            }
        }
        Ok(())
    }
}
