//! Signing orchestration: per-input signature bytes and whole-transaction
//! signing with per-input key material.

use btc_primitives::ec::PrivateKey;
use btc_script::Script;

use crate::sighash::{legacy, witness, SIGHASH_ALL};
use crate::{Transaction, TransactionError};

/// Per-input signing parameters for [`Transaction::sign`]: the locking
/// script of the output being spent and the key authorized to spend it.
#[derive(Debug, Clone)]
pub struct SignData {
    pub prev_locking_script: Script,
    pub private_key: PrivateKey,
}

impl SignData {
    pub fn new(prev_locking_script: Script, private_key: PrivateKey) -> Self {
        SignData {
            prev_locking_script,
            private_key,
        }
    }
}

impl Transaction {
    /// Sign one input using the legacy digest algorithm.
    ///
    /// # Arguments
    /// * `input_index` - Index of the input to sign.
    /// * `prev_locking_script` - Locking script of the output being spent.
    /// * `sighash_type` - Hash type committed to by the signature.
    /// * `private_key` - Key to sign with.
    ///
    /// # Returns
    /// The DER-encoded signature with the hash-type byte appended,
    /// ready to be pushed into an unlocking script.
    pub fn sign_input(
        &self,
        input_index: usize,
        prev_locking_script: &Script,
        sighash_type: u32,
        private_key: &PrivateKey,
    ) -> Result<Vec<u8>, TransactionError> {
        let digest = legacy::signature_hash(self, input_index, prev_locking_script, sighash_type)?;
        let signature = private_key.sign(&digest)?;
        let mut sig_bytes = signature.to_der();
        sig_bytes.push(sighash_type as u8);
        Ok(sig_bytes)
    }

    /// Sign one input using the witness digest algorithm. The claimed
    /// `amount` is committed to by the digest.
    pub fn sign_input_witness(
        &self,
        input_index: usize,
        prev_locking_script: &Script,
        sighash_type: u32,
        amount: i64,
        private_key: &PrivateKey,
    ) -> Result<Vec<u8>, TransactionError> {
        let digest = witness::signature_hash(
            self,
            input_index,
            prev_locking_script,
            sighash_type,
            amount,
        )?;
        let signature = private_key.sign(&digest)?;
        let mut sig_bytes = signature.to_der();
        sig_bytes.push(sighash_type as u8);
        Ok(sig_bytes)
    }

    /// Sign every input with SIGHASH_ALL, producing a new transaction
    /// whose unlocking scripts are "push signature, push public key".
    ///
    /// Requires exactly one [`SignData`] per input; fails without
    /// signing anything otherwise. The receiver is never mutated and
    /// never partially signed.
    pub fn sign(&self, sign_data: &[SignData]) -> Result<Transaction, TransactionError> {
        if sign_data.len() != self.inputs.len() {
            return Err(TransactionError::SignDataMismatch {
                got: sign_data.len(),
                expected: self.inputs.len(),
            });
        }
        let mut signed = self.clone();
        for (index, data) in sign_data.iter().enumerate() {
            let sig_bytes = self.sign_input(
                index,
                &data.prev_locking_script,
                SIGHASH_ALL,
                &data.private_key,
            )?;
            let pub_key = data.private_key.pub_key();
            let mut unlocking = Script::new();
            unlocking.append_push_data(&sig_bytes)?;
            unlocking.append_push_data(&pub_key.to_compressed())?;
            signed.inputs[index].unlocking_script = unlocking;
        }
        Ok(signed)
    }
}
