use btc_primitives::wire::{ByteReader, ByteWriter};
use btc_script::Script;
use serde::{Deserialize, Serialize};

use crate::TransactionError;

/// A transaction output: an amount in satoshis and the locking script
/// that must be satisfied to spend it.
///
/// The amount is signed to admit the `-1` null sentinel used while
/// computing legacy `SIGHASH_SINGLE` digests; a valid output's amount
/// is always non-negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOut {
    /// Value in satoshis.
    pub amount: i64,
    /// Conditions under which the output may be spent.
    pub locking_script: Script,
}

impl TxOut {
    /// Create an output paying `amount` to `locking_script`.
    pub fn new(amount: i64, locking_script: Script) -> Self {
        TxOut {
            amount,
            locking_script,
        }
    }

    /// The null output placeholder: amount `-1`, empty script.
    pub fn null() -> Self {
        TxOut {
            amount: -1,
            locking_script: Script::new(),
        }
    }

    /// Whether this is the null placeholder.
    pub fn is_null(&self) -> bool {
        self.amount == -1 && self.locking_script.is_empty()
    }

    /// Decode an output from the reader.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let amount = reader.read_u64_le()? as i64;
        let locking_script = Script::from_bytes(reader.read_var_bytes()?);
        Ok(TxOut {
            amount,
            locking_script,
        })
    }

    /// Encode this output into the writer. The amount is written as the
    /// two's-complement little-endian bit pattern, so the null sentinel
    /// round-trips.
    pub fn write_to(&self, writer: &mut ByteWriter) {
        writer.write_u64_le(self.amount as u64);
        writer.write_var_bytes(self.locking_script.to_bytes());
    }
}
