use btc_primitives::wire::{ByteReader, ByteWriter};
use btc_script::Script;
use serde::{Deserialize, Serialize};

use crate::{OutPoint, TransactionError};

/// Sequence value that makes an input final.
pub const FINAL_SEQUENCE: u32 = 0xffff_ffff;

/// Bit disabling relative-locktime interpretation of a sequence.
pub const SEQUENCE_LOCKTIME_DISABLE_FLAG: u32 = 1 << 31;

/// Bit selecting time-based (rather than height-based) relative locktime.
pub const SEQUENCE_LOCKTIME_TYPE_FLAG: u32 = 1 << 22;

/// Mask extracting the relative-locktime value from a sequence.
pub const SEQUENCE_LOCKTIME_MASK: u32 = 0x0000_ffff;

/// A transaction input: the outpoint it spends, the unlocking script
/// satisfying that output's locking script, and a sequence number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxIn {
    /// The prior output being spent.
    pub outpoint: OutPoint,
    /// Script satisfying the referenced output's locking script. Empty
    /// until the input is signed.
    pub unlocking_script: Script,
    /// Sequence number; `FINAL_SEQUENCE` disables lock-time semantics
    /// for this input.
    pub sequence: u32,
}

impl TxIn {
    /// Create an unsigned, final input spending `outpoint`.
    pub fn new(outpoint: OutPoint) -> Self {
        TxIn {
            outpoint,
            unlocking_script: Script::new(),
            sequence: FINAL_SEQUENCE,
        }
    }

    /// Whether this input's sequence marks it final.
    pub fn is_final(&self) -> bool {
        self.sequence == FINAL_SEQUENCE
    }

    /// Whether relative locktime is disabled for this input.
    pub fn sequence_locktime_disabled(&self) -> bool {
        self.sequence & SEQUENCE_LOCKTIME_DISABLE_FLAG != 0
    }

    /// Whether the relative locktime is time-based rather than
    /// height-based.
    pub fn sequence_locktime_is_time_based(&self) -> bool {
        self.sequence & SEQUENCE_LOCKTIME_TYPE_FLAG != 0
    }

    /// The raw 16-bit relative-locktime value.
    pub fn sequence_locktime_value(&self) -> u32 {
        self.sequence & SEQUENCE_LOCKTIME_MASK
    }

    /// Decode an input from the reader.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let outpoint = OutPoint::read_from(reader)?;
        let unlocking_script = Script::from_bytes(reader.read_var_bytes()?);
        let sequence = reader.read_u32_le()?;
        Ok(TxIn {
            outpoint,
            unlocking_script,
            sequence,
        })
    }

    /// Encode this input into the writer.
    pub fn write_to(&self, writer: &mut ByteWriter) {
        self.outpoint.write_to(writer);
        writer.write_var_bytes(self.unlocking_script.to_bytes());
        writer.write_u32_le(self.sequence);
    }
}
