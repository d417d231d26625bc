use btc_primitives::chainhash::Hash;
use btc_primitives::wire::{ByteReader, ByteWriter};
use serde::{Deserialize, Serialize};

use crate::TransactionError;

/// Output index marking a coinbase input's outpoint.
pub const COINBASE_OUTPUT_INDEX: u32 = 0xffff_ffff;

/// A reference to a specific output of a prior transaction.
///
/// On the wire an outpoint is the 32-byte transaction hash followed by
/// the output index as a little-endian u32. The coinbase sentinel (an
/// all-zero hash with index `0xffffffff`) references no prior output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    /// Hash of the transaction holding the referenced output.
    pub hash: Hash,
    /// Position of the output within that transaction.
    pub index: u32,
}

impl OutPoint {
    /// Create an outpoint referencing output `index` of the transaction
    /// with the given hash.
    pub fn new(hash: Hash, index: u32) -> Self {
        OutPoint { hash, index }
    }

    /// The coinbase sentinel outpoint.
    pub fn coinbase() -> Self {
        OutPoint {
            hash: Hash::ZERO,
            index: COINBASE_OUTPUT_INDEX,
        }
    }

    /// Whether this is the coinbase sentinel.
    pub fn is_coinbase(&self) -> bool {
        self.index == COINBASE_OUTPUT_INDEX && self.hash.is_zero()
    }

    /// The referenced transaction's id (reversed-hex hash).
    pub fn txid(&self) -> String {
        self.hash.to_string()
    }

    /// Decode an outpoint from the reader.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let hash = Hash::from_bytes(reader.read_bytes(32)?)?;
        let index = reader.read_u32_le()?;
        Ok(OutPoint { hash, index })
    }

    /// Encode this outpoint into the writer.
    pub fn write_to(&self, writer: &mut ByteWriter) {
        writer.write_bytes(self.hash.as_bytes());
        writer.write_u32_le(self.index);
    }
}

impl std::fmt::Display for OutPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}:{}", self.hash, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coinbase_sentinel() {
        let cb = OutPoint::coinbase();
        assert!(cb.is_coinbase());
        assert!(cb.hash.is_zero());
        assert_eq!(cb.index, 0xffff_ffff);

        // Max index alone is not enough.
        let hash =
            Hash::from_hex("6fe28c0ab6f1b372c1a6a246ae63f74f931e8365e15a089c68d6190000000000")
                .unwrap();
        assert!(!OutPoint::new(hash, 0xffff_ffff).is_coinbase());
        // Zero hash alone is not enough either.
        assert!(!OutPoint::new(Hash::ZERO, 0).is_coinbase());
    }

    #[test]
    fn test_wire_roundtrip() {
        let hash =
            Hash::from_hex("4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b")
                .unwrap();
        let outpoint = OutPoint::new(hash, 7);

        let mut writer = ByteWriter::new();
        outpoint.write_to(&mut writer);
        let bytes = writer.into_bytes();
        assert_eq!(bytes.len(), 36);

        let mut reader = ByteReader::new(&bytes);
        let decoded = OutPoint::read_from(&mut reader).unwrap();
        assert_eq!(decoded, outpoint);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_truncated_outpoint() {
        let mut reader = ByteReader::new(&[0u8; 35]);
        assert!(OutPoint::read_from(&mut reader).is_err());
    }

    #[test]
    fn test_display() {
        let cb = OutPoint::coinbase();
        assert_eq!(
            cb.to_string(),
            "0000000000000000000000000000000000000000000000000000000000000000:4294967295"
        );
    }
}
