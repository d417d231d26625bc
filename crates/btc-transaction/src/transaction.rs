/// The transaction aggregate and its witness-aware wire codec.
///
/// One binary format carries two layouts. The legacy layout is version,
/// inputs, outputs, lock time. The extended layout inserts a `0x00`
/// marker and a flag byte after the version and appends one witness per
/// input before the lock time. The marker works because a real
/// transaction always has at least one input, so a legacy encoding can
/// never place a zero-length input count at that position.

use std::fmt;

use btc_primitives::chainhash::Hash;
use btc_primitives::hash::sha256d;
use btc_primitives::wire::{ByteReader, ByteWriter};
use btc_script::Script;
use serde::{Deserialize, Serialize};

use crate::params::{protocol_allows_witness, LOCKTIME_THRESHOLD};
use crate::{OutPoint, ScriptWitness, TransactionError, TxIn, TxOut};

/// Version given to newly built transactions.
pub const DEFAULT_VERSION: u32 = 1;

/// Decoder position within the transaction byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    ReadVersion,
    ReadFirstInputBatch,
    MaybeReadWitnessFlag,
    ReadOutputs,
    ReadWitnesses,
    ReadLockTime,
}

/// A Bitcoin-style transaction.
///
/// `witnesses` runs parallel to `inputs`; a legacy spend carries the
/// null (empty-stack) witness at its input's position. The witness list
/// never affects the transaction's `hash`/`txid`, which are always
/// computed over the legacy encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub version: u32,
    pub inputs: Vec<TxIn>,
    pub outputs: Vec<TxOut>,
    pub lock_time: u32,
    pub witnesses: Vec<ScriptWitness>,
}

impl Transaction {
    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Create an empty transaction with the default version and zero
    /// lock time.
    pub fn new() -> Self {
        Transaction {
            version: DEFAULT_VERSION,
            inputs: Vec::new(),
            outputs: Vec::new(),
            lock_time: 0,
            witnesses: Vec::new(),
        }
    }

    /// Append an input along with a null witness at the same position.
    pub fn add_input(&mut self, input: TxIn) {
        self.inputs.push(input);
        self.witnesses.push(ScriptWitness::new());
    }

    /// Append an output.
    pub fn add_output(&mut self, output: TxOut) {
        self.outputs.push(output);
    }

    /// Replace the witness at `index`.
    pub fn set_witness(
        &mut self,
        index: usize,
        witness: ScriptWitness,
    ) -> Result<(), TransactionError> {
        if index >= self.inputs.len() {
            return Err(TransactionError::InputIndexOutOfRange {
                index,
                inputs: self.inputs.len(),
            });
        }
        if self.witnesses.len() < self.inputs.len() {
            self.witnesses
                .resize(self.inputs.len(), ScriptWitness::new());
        }
        self.witnesses[index] = witness;
        Ok(())
    }

    /// Return a new transaction identical to this one except that input
    /// `index` carries the given unlocking script.
    pub fn with_unlocking_script(
        &self,
        index: usize,
        script: Script,
    ) -> Result<Transaction, TransactionError> {
        if index >= self.inputs.len() {
            return Err(TransactionError::InputIndexOutOfRange {
                index,
                inputs: self.inputs.len(),
            });
        }
        let mut tx = self.clone();
        tx.inputs[index].unlocking_script = script;
        Ok(tx)
    }

    // -----------------------------------------------------------------------
    // Decoding
    // -----------------------------------------------------------------------

    /// Decode a transaction from a hex string, accepting the extended
    /// encoding.
    pub fn from_hex(hex_str: &str) -> Result<Self, TransactionError> {
        let bytes = hex::decode(hex_str)
            .map_err(|e| TransactionError::Format(format!("invalid hex: {e}")))?;
        Self::from_bytes(&bytes)
    }

    /// Decode a transaction, accepting the extended encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        Self::from_bytes_with(bytes, true)
    }

    /// Decode a transaction. When `allow_witness` is false the extended
    /// encoding is not recognized and its marker byte reads as an empty
    /// input list. Trailing bytes after the transaction are rejected.
    pub fn from_bytes_with(bytes: &[u8], allow_witness: bool) -> Result<Self, TransactionError> {
        let mut reader = ByteReader::new(bytes);
        let tx = Self::read_from(&mut reader, allow_witness)?;
        if reader.remaining() != 0 {
            return Err(TransactionError::Format(format!(
                "{} trailing bytes after transaction",
                reader.remaining()
            )));
        }
        Ok(tx)
    }

    /// Decode a transaction from the reader, leaving the position just
    /// past the last byte consumed.
    pub fn read_from(
        reader: &mut ByteReader,
        allow_witness: bool,
    ) -> Result<Self, TransactionError> {
        let mut state = DecodeState::ReadVersion;
        let mut version = 0u32;
        let mut flag = 0u8;
        let mut inputs: Vec<TxIn> = Vec::new();
        let mut outputs: Vec<TxOut> = Vec::new();
        let mut witnesses: Vec<ScriptWitness> = Vec::new();
        let lock_time;

        loop {
            state = match state {
                DecodeState::ReadVersion => {
                    version = reader.read_u32_le()?;
                    DecodeState::ReadFirstInputBatch
                }
                DecodeState::ReadFirstInputBatch => {
                    inputs = reader.read_list(None, TxIn::read_from)?;
                    if inputs.is_empty() && allow_witness {
                        // A zero-length input list in this position is
                        // the extended-encoding marker.
                        DecodeState::MaybeReadWitnessFlag
                    } else {
                        DecodeState::ReadOutputs
                    }
                }
                DecodeState::MaybeReadWitnessFlag => {
                    flag = reader.read_u8()?;
                    inputs = reader.read_list(None, TxIn::read_from)?;
                    if flag == 0 && !inputs.is_empty() {
                        return Err(TransactionError::Format(
                            "extended encoding used unnecessarily".into(),
                        ));
                    }
                    DecodeState::ReadOutputs
                }
                DecodeState::ReadOutputs => {
                    outputs = reader.read_list(None, TxOut::read_from)?;
                    match flag {
                        0 => {
                            witnesses = vec![ScriptWitness::new(); inputs.len()];
                            DecodeState::ReadLockTime
                        }
                        1 => DecodeState::ReadWitnesses,
                        other => {
                            return Err(TransactionError::Format(format!(
                                "unknown transaction optional data: flag {other:#04x}"
                            )))
                        }
                    }
                }
                DecodeState::ReadWitnesses => {
                    witnesses = Vec::with_capacity(inputs.len());
                    for _ in 0..inputs.len() {
                        witnesses.push(ScriptWitness::read_from(reader)?);
                    }
                    DecodeState::ReadLockTime
                }
                DecodeState::ReadLockTime => {
                    lock_time = reader.read_u32_le()?;
                    break;
                }
            };
        }

        Ok(Transaction {
            version,
            inputs,
            outputs,
            lock_time,
            witnesses,
        })
    }

    // -----------------------------------------------------------------------
    // Encoding
    // -----------------------------------------------------------------------

    /// Serialize the transaction. The extended layout is used when at
    /// least one witness is non-null; otherwise the legacy layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        self.write_to(&mut writer, self.has_witness());
        writer.into_bytes()
    }

    /// Serialize the legacy (non-witness) layout regardless of attached
    /// witnesses. This is the byte stream `hash` and `txid` commit to.
    pub fn to_bytes_legacy(&self) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        self.write_to(&mut writer, false);
        writer.into_bytes()
    }

    /// Serialize for a peer at the given protocol version, falling back
    /// to the legacy layout for peers that predate witness support.
    pub fn to_bytes_for_protocol(&self, protocol_version: u32) -> Vec<u8> {
        if protocol_allows_witness(protocol_version) {
            self.to_bytes()
        } else {
            self.to_bytes_legacy()
        }
    }

    /// Serialize as a hex string (witness-aware).
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Encode into the writer, with or without the extended layout.
    pub fn write_to(&self, writer: &mut ByteWriter, extended: bool) {
        writer.write_u32_le(self.version);
        if extended {
            writer.write_u8(0x00); // marker: empty input list
            writer.write_u8(0x01); // flag: witnesses follow the outputs
        }
        writer.write_list(&self.inputs, |w, input| input.write_to(w));
        writer.write_list(&self.outputs, |w, output| output.write_to(w));
        if extended {
            for index in 0..self.inputs.len() {
                self.witness_at(index).write_to(writer);
            }
        }
        writer.write_u32_le(self.lock_time);
    }

    // -----------------------------------------------------------------------
    // Identity & accessors
    // -----------------------------------------------------------------------

    /// The transaction's hash: the double-SHA256 of its legacy encoding.
    pub fn hash(&self) -> Hash {
        Hash::new(sha256d(&self.to_bytes_legacy()))
    }

    /// The transaction id: the hash in reversed (display) hex.
    pub fn txid(&self) -> String {
        self.hash().to_string()
    }

    /// Whether any input carries a non-null witness.
    pub fn has_witness(&self) -> bool {
        self.witnesses.iter().any(|w| !w.is_null())
    }

    /// The witness for input `index`, or the null witness if the
    /// witness list is shorter than the input list.
    pub fn witness_at(&self, index: usize) -> &ScriptWitness {
        static NULL_WITNESS: ScriptWitness = ScriptWitness { stack: Vec::new() };
        self.witnesses.get(index).unwrap_or(&NULL_WITNESS)
    }

    /// Whether this is a coinbase transaction: exactly one input whose
    /// outpoint is the coinbase sentinel.
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].outpoint == OutPoint::coinbase()
    }

    /// Whether the lock time is a block height (below the threshold)
    /// rather than a Unix timestamp.
    pub fn lock_time_is_block_height(&self) -> bool {
        self.lock_time < LOCKTIME_THRESHOLD
    }

    /// Size of the legacy encoding in bytes.
    pub fn legacy_size(&self) -> usize {
        self.to_bytes_legacy().len()
    }

    /// Sum of all output amounts in satoshis.
    pub fn total_output_amount(&self) -> i64 {
        self.outputs.iter().map(|o| o.amount).sum()
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Transaction {
    /// Display the transaction as its serialized hex.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
