use btc_primitives::wire::{ByteReader, ByteWriter};

use crate::TransactionError;

/// The witness attached to a transaction input: a stack of byte strings
/// consumed by witness-aware script evaluation.
///
/// An empty stack is the null witness carried by inputs of legacy
/// spends. On the wire a witness is a VarInt item count followed by
/// each item as a length-prefixed byte string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptWitness {
    /// Stack items, bottom first.
    pub stack: Vec<Vec<u8>>,
}

impl ScriptWitness {
    /// Create the null (empty) witness.
    pub fn new() -> Self {
        ScriptWitness::default()
    }

    /// Create a witness from existing stack items.
    pub fn from_stack(stack: Vec<Vec<u8>>) -> Self {
        ScriptWitness { stack }
    }

    /// Whether this witness carries no items.
    pub fn is_null(&self) -> bool {
        self.stack.is_empty()
    }

    /// Append an item to the stack.
    pub fn push(&mut self, item: Vec<u8>) {
        self.stack.push(item);
    }

    /// Decode a witness from the reader.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let stack = reader.read_list(None, |r| {
            Ok::<_, TransactionError>(r.read_var_bytes()?.to_vec())
        })?;
        Ok(ScriptWitness { stack })
    }

    /// Encode this witness into the writer.
    pub fn write_to(&self, writer: &mut ByteWriter) {
        writer.write_list(&self.stack, |w, item| w.write_var_bytes(item));
    }
}

impl serde::Serialize for ScriptWitness {
    /// Serialize as a sequence of hex-encoded stack items.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.stack.len()))?;
        for item in &self.stack {
            seq.serialize_element(&hex::encode(item))?;
        }
        seq.end()
    }
}

impl<'de> serde::Deserialize<'de> for ScriptWitness {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let items = Vec::<String>::deserialize(deserializer)?;
        let stack = items
            .into_iter()
            .map(|item| hex::decode(&item).map_err(serde::de::Error::custom))
            .collect::<Result<Vec<Vec<u8>>, _>>()?;
        Ok(ScriptWitness { stack })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_witness() {
        assert!(ScriptWitness::new().is_null());
        assert!(!ScriptWitness::from_stack(vec![vec![]]).is_null());
    }

    #[test]
    fn test_wire_roundtrip() {
        let witness = ScriptWitness::from_stack(vec![vec![0x30, 0x44, 0x01], vec![0x02; 33]]);
        let mut writer = ByteWriter::new();
        witness.write_to(&mut writer);
        let bytes = writer.into_bytes();

        let mut reader = ByteReader::new(&bytes);
        let decoded = ScriptWitness::read_from(&mut reader).unwrap();
        assert_eq!(decoded, witness);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_null_witness_is_single_zero_byte() {
        let mut writer = ByteWriter::new();
        ScriptWitness::new().write_to(&mut writer);
        assert_eq!(writer.into_bytes(), vec![0x00]);
    }

    #[test]
    fn test_truncated_witness() {
        // Two items declared, only one present.
        let mut reader = ByteReader::new(&[0x02, 0x01, 0xaa]);
        assert!(ScriptWitness::read_from(&mut reader).is_err());
    }

    /// Stack items serialize to hex JSON strings.
    #[test]
    fn test_serde_roundtrip() {
        let witness = ScriptWitness::from_stack(vec![vec![0xAA, 0xBB], vec![]]);
        let json_str = serde_json::to_string(&witness).expect("should serialize");
        assert_eq!(json_str, r#"["aabb",""]"#);
        let witness2: ScriptWitness = serde_json::from_str(&json_str).expect("should deserialize");
        assert_eq!(witness2, witness);
    }

    /// Non-hex stack items are rejected on deserialization.
    #[test]
    fn test_serde_invalid_hex() {
        let result: Result<ScriptWitness, _> = serde_json::from_str(r#"["zz"]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_item_roundtrip() {
        let witness = ScriptWitness::from_stack(vec![vec![]]);
        let mut writer = ByteWriter::new();
        witness.write_to(&mut writer);
        let bytes = writer.into_bytes();
        assert_eq!(bytes, vec![0x01, 0x00]);

        let mut reader = ByteReader::new(&bytes);
        assert_eq!(ScriptWitness::read_from(&mut reader).unwrap(), witness);
    }
}
