//! Structural validation of fully built transactions.
//!
//! Validation is an explicit pass, separate from construction and
//! decoding, so the digest algorithms may build transient intermediate
//! transactions (nulled outputs, cleared scripts) without tripping
//! invariants meant for finalized transactions.

use std::collections::HashSet;

use crate::params::{MAX_BLOCK_SIZE, MAX_MONEY, MAX_SCRIPT_ELEMENT_SIZE};
use crate::{Transaction, TransactionError};

impl Transaction {
    /// Check every structural invariant, reporting the first violation.
    ///
    /// Checks, in order: non-empty inputs and outputs; legacy encoded
    /// size within the block limit; each output amount in
    /// `0..=MAX_MONEY` and their sum within `MAX_MONEY`; locking script
    /// lengths below the element limit; unlocking script lengths at or
    /// below it; no two inputs spending the same outpoint; coinbase
    /// script length bounds, or absence of the coinbase sentinel for
    /// ordinary transactions.
    pub fn validate(&self) -> Result<(), TransactionError> {
        if self.inputs.is_empty() {
            return Err(TransactionError::Validation(
                "transaction has no inputs".into(),
            ));
        }
        if self.outputs.is_empty() {
            return Err(TransactionError::Validation(
                "transaction has no outputs".into(),
            ));
        }

        let size = self.legacy_size();
        if size > MAX_BLOCK_SIZE {
            return Err(TransactionError::Validation(format!(
                "serialized size {size} exceeds maximum {MAX_BLOCK_SIZE}"
            )));
        }

        let mut total: i64 = 0;
        for (index, output) in self.outputs.iter().enumerate() {
            if output.amount < 0 {
                return Err(TransactionError::Validation(format!(
                    "output {index} has negative amount {}",
                    output.amount
                )));
            }
            if output.amount > MAX_MONEY {
                return Err(TransactionError::Validation(format!(
                    "output {index} amount {} exceeds maximum money",
                    output.amount
                )));
            }
            total = total
                .checked_add(output.amount)
                .filter(|t| *t <= MAX_MONEY)
                .ok_or_else(|| {
                    TransactionError::Validation(
                        "total output amount exceeds maximum money".into(),
                    )
                })?;
            if output.locking_script.len() >= MAX_SCRIPT_ELEMENT_SIZE {
                return Err(TransactionError::Validation(format!(
                    "output {index} locking script length {} exceeds {} byte limit",
                    output.locking_script.len(),
                    MAX_SCRIPT_ELEMENT_SIZE
                )));
            }
        }

        for (index, input) in self.inputs.iter().enumerate() {
            if input.unlocking_script.len() > MAX_SCRIPT_ELEMENT_SIZE {
                return Err(TransactionError::Validation(format!(
                    "input {index} unlocking script length {} exceeds {} byte limit",
                    input.unlocking_script.len(),
                    MAX_SCRIPT_ELEMENT_SIZE
                )));
            }
        }

        let mut seen = HashSet::with_capacity(self.inputs.len());
        for (index, input) in self.inputs.iter().enumerate() {
            if !seen.insert(input.outpoint) {
                return Err(TransactionError::Validation(format!(
                    "input {index} spends an outpoint already spent by this transaction"
                )));
            }
        }

        if self.is_coinbase() {
            let script_len = self.inputs[0].unlocking_script.len();
            if !(2..=100).contains(&script_len) {
                return Err(TransactionError::Validation(format!(
                    "coinbase script length {script_len} outside 2..=100"
                )));
            }
        } else {
            for (index, input) in self.inputs.iter().enumerate() {
                if input.outpoint.is_coinbase() {
                    return Err(TransactionError::Validation(format!(
                        "input {index} references the coinbase sentinel outpoint"
                    )));
                }
            }
        }

        Ok(())
    }
}
