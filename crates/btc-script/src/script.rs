/// Bitcoin Script type - a sequence of opcodes and data pushes.
///
/// Scripts are used in transaction inputs (unlocking) and outputs (locking)
/// to define spending conditions. The Script wraps a `Vec<u8>` and provides
/// methods for construction, classification, and serialization.

use std::fmt;

use crate::chunk::{decode_script, push_data_prefix, ScriptChunk};
use crate::opcodes::*;
use crate::ScriptError;

/// A Bitcoin script, represented as a byte vector newtype.
#[derive(Clone, PartialEq, Eq)]
pub struct Script(Vec<u8>);

impl Script {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Create a new empty script.
    ///
    /// # Returns
    /// An empty `Script` instance.
    pub fn new() -> Self {
        Script(Vec::new())
    }

    /// Create a script from a hex-encoded string.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string (e.g. "76a914...88ac").
    ///
    /// # Returns
    /// A `Script` wrapping the decoded bytes, or an error if the hex is invalid.
    pub fn from_hex(hex_str: &str) -> Result<Self, ScriptError> {
        let bytes = hex::decode(hex_str)?;
        Ok(Script(bytes))
    }

    /// Create a script from raw bytes.
    ///
    /// # Arguments
    /// * `bytes` - Raw script bytes.
    ///
    /// # Returns
    /// A `Script` wrapping a copy of the given bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Script(bytes.to_vec())
    }

    // -----------------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------------

    /// Encode the script as a hex string.
    ///
    /// # Returns
    /// A lowercase hex representation of the script bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Return a reference to the underlying bytes.
    ///
    /// # Returns
    /// A byte slice of the script contents.
    pub fn to_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Return the length of the script in bytes.
    ///
    /// # Returns
    /// The number of bytes in the script.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the script is empty (zero bytes).
    ///
    /// # Returns
    /// `true` if the script has no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    // -----------------------------------------------------------------------
    // Script classification
    // -----------------------------------------------------------------------

    /// Check if this is a Pay-to-Public-Key-Hash (P2PKH) output script.
    ///
    /// Pattern: OP_DUP OP_HASH160 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG
    ///
    /// # Returns
    /// `true` if the script matches the P2PKH pattern.
    pub fn is_p2pkh(&self) -> bool {
        let b = &self.0;
        b.len() == 25
            && b[0] == OP_DUP
            && b[1] == OP_HASH160
            && b[2] == OP_DATA_20
            && b[23] == OP_EQUALVERIFY
            && b[24] == OP_CHECKSIG
    }

    /// Extract the public key hash from a P2PKH script.
    ///
    /// Returns the 20-byte hash160 if the script starts with OP_DUP OP_HASH160.
    ///
    /// # Returns
    /// The 20-byte public key hash, or an error if the script is not P2PKH.
    pub fn public_key_hash(&self) -> Result<Vec<u8>, ScriptError> {
        if self.0.is_empty() {
            return Err(ScriptError::EmptyScript);
        }
        if self.0.len() <= 2 || self.0[0] != OP_DUP || self.0[1] != OP_HASH160 {
            return Err(ScriptError::NotP2PKH);
        }
        let tail = &self.0[2..];
        let parts = decode_script(tail)?;
        match parts.first() {
            Some(chunk) => match &chunk.data {
                Some(data) => Ok(data.clone()),
                None => Err(ScriptError::NotP2PKH),
            },
            None => Err(ScriptError::NotP2PKH),
        }
    }

    /// Parse the script into a vector of decoded chunks.
    ///
    /// # Returns
    /// A vector of `ScriptChunk` values, or an error if the script is malformed.
    pub fn chunks(&self) -> Result<Vec<ScriptChunk>, ScriptError> {
        decode_script(&self.0)
    }

    // -----------------------------------------------------------------------
    // Signature-hash preparation
    // -----------------------------------------------------------------------

    /// Return a copy of this script with all OP_CODESEPARATOR opcodes
    /// removed.
    ///
    /// Removal is chunk-aware: an 0xab byte inside push data is part of the
    /// pushed bytes, not an opcode, and is left alone. Non-minimal pushes
    /// are preserved as-is. If the script ends with a truncated push, the
    /// unparsable tail is copied through verbatim.
    ///
    /// # Returns
    /// A new `Script` with separator opcodes filtered out.
    pub fn without_code_separators(&self) -> Script {
        let mut out = Vec::with_capacity(self.0.len());
        let mut pos = 0;
        while pos < self.0.len() {
            let rest = &self.0[pos..];
            match decode_one(rest) {
                Some((chunk, consumed)) => {
                    if !(chunk.op == OP_CODESEPARATOR && chunk.data.is_none()) {
                        out.extend_from_slice(&rest[..consumed]);
                    }
                    pos += consumed;
                }
                None => {
                    // Truncated push at the tail.
                    out.extend_from_slice(rest);
                    break;
                }
            }
        }
        Script(out)
    }

    // -----------------------------------------------------------------------
    // Mutation / building
    // -----------------------------------------------------------------------

    /// Append data bytes to the script with the proper PUSHDATA prefix.
    ///
    /// Chooses the minimal encoding: direct push for 1-75 bytes,
    /// OP_PUSHDATA1 for 76-255, OP_PUSHDATA2 for 256-65535, etc.
    ///
    /// # Arguments
    /// * `data` - The data bytes to push.
    ///
    /// # Returns
    /// `Ok(())` on success, or an error if the data is too large.
    pub fn append_push_data(&mut self, data: &[u8]) -> Result<(), ScriptError> {
        let prefix = push_data_prefix(data.len())?;
        self.0.extend_from_slice(&prefix);
        self.0.extend_from_slice(data);
        Ok(())
    }

    /// Append a raw opcode byte to the script.
    ///
    /// # Arguments
    /// * `opcode` - The opcode byte to append.
    pub fn append_opcode(&mut self, opcode: u8) {
        self.0.push(opcode);
    }
}

/// Decode a single chunk from the front of `bytes`.
///
/// Returns the chunk and the number of bytes consumed, or `None` if the
/// chunk is a truncated push.
fn decode_one(bytes: &[u8]) -> Option<(ScriptChunk, usize)> {
    let op = bytes[0];
    let (header, length) = match op {
        OP_PUSHDATA1 => {
            if bytes.len() < 2 {
                return None;
            }
            (2, bytes[1] as usize)
        }
        OP_PUSHDATA2 => {
            if bytes.len() < 3 {
                return None;
            }
            (3, u16::from_le_bytes([bytes[1], bytes[2]]) as usize)
        }
        OP_PUSHDATA4 => {
            if bytes.len() < 5 {
                return None;
            }
            (
                5,
                u32::from_le_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]) as usize,
            )
        }
        0x01..=0x4b => (1, op as usize),
        _ => return Some((ScriptChunk { op, data: None }, 1)),
    };
    if bytes.len() < header + length {
        return None;
    }
    let data = bytes[header..header + length].to_vec();
    Some((ScriptChunk { op, data: Some(data) }, header + length))
}

impl Default for Script {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Script {
    /// Display the script as a lowercase hex string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", self.to_hex())
    }
}

impl serde::Serialize for Script {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Script {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Script::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Construction & roundtrip
    // -----------------------------------------------------------------------

    /// from_hex decodes a P2PKH script and to_hex round-trips it.
    #[test]
    fn test_from_hex_roundtrip() {
        let hex_str = "76a914e2a623699e81b291c0327f408fea765d534baa2a88ac";
        let script = Script::from_hex(hex_str).expect("valid hex should parse");
        assert_eq!(script.to_hex(), hex_str);
    }

    /// from_hex with an empty string produces an empty script.
    #[test]
    fn test_from_hex_empty() {
        let script = Script::from_hex("").expect("empty hex should parse");
        assert!(script.is_empty());
        assert_eq!(script.to_hex(), "");
    }

    /// from_hex rejects invalid hex characters.
    #[test]
    fn test_from_hex_invalid() {
        assert!(Script::from_hex("ZZZZ").is_err());
    }

    // -----------------------------------------------------------------------
    // Script classification
    // -----------------------------------------------------------------------

    /// is_p2pkh returns true for a standard P2PKH script.
    #[test]
    fn test_is_p2pkh() {
        let script = Script::from_hex("76a91403ececf2d12a7f614aef4c82ecf13c303bd9975d88ac")
            .expect("valid hex");
        assert!(script.is_p2pkh());
    }

    /// is_p2pkh returns false for a P2SH script.
    #[test]
    fn test_is_p2pkh_false_for_p2sh() {
        let script = Script::from_hex("a9149de5aeaff9c48431ba4dd6e8af73d51f38e451cb87")
            .expect("valid hex");
        assert!(!script.is_p2pkh());
    }

    // -----------------------------------------------------------------------
    // Public key hash extraction
    // -----------------------------------------------------------------------

    /// public_key_hash extracts the correct 20-byte hash from P2PKH.
    #[test]
    fn test_public_key_hash() {
        let script = Script::from_hex("76a91404d03f746652cfcb6cb55119ab473a045137d26588ac")
            .expect("valid hex");
        let pkh = script.public_key_hash().expect("should extract PKH");
        assert_eq!(hex::encode(&pkh), "04d03f746652cfcb6cb55119ab473a045137d265");
    }

    /// public_key_hash returns an error for an empty script.
    #[test]
    fn test_public_key_hash_empty() {
        let script = Script::new();
        assert!(script.public_key_hash().is_err());
    }

    /// public_key_hash returns an error for OP_DUP alone.
    #[test]
    fn test_public_key_hash_nonstandard() {
        let script = Script::from_hex("76").expect("valid hex");
        assert!(script.public_key_hash().is_err());
    }

    // -----------------------------------------------------------------------
    // OP_CODESEPARATOR removal
    // -----------------------------------------------------------------------

    /// Separator opcodes are removed wherever they appear.
    #[test]
    fn test_without_code_separators() {
        // OP_CODESEPARATOR OP_DUP OP_CODESEPARATOR OP_HASH160
        let script = Script::from_bytes(&[OP_CODESEPARATOR, OP_DUP, OP_CODESEPARATOR, OP_HASH160]);
        let filtered = script.without_code_separators();
        assert_eq!(filtered.to_bytes(), &[OP_DUP, OP_HASH160]);
    }

    /// An 0xab byte inside push data is not an opcode and stays put.
    #[test]
    fn test_without_code_separators_inside_push() {
        // Push of 3 bytes [0xab, 0xab, 0xab], then a real OP_CODESEPARATOR.
        let script = Script::from_bytes(&[0x03, 0xab, 0xab, 0xab, OP_CODESEPARATOR]);
        let filtered = script.without_code_separators();
        assert_eq!(filtered.to_bytes(), &[0x03, 0xab, 0xab, 0xab]);
    }

    /// A script with no separators is returned unchanged.
    #[test]
    fn test_without_code_separators_noop() {
        let script = Script::from_hex("76a91404d03f746652cfcb6cb55119ab473a045137d26588ac")
            .expect("valid hex");
        let filtered = script.without_code_separators();
        assert_eq!(filtered, script);
    }

    /// Non-minimal pushes survive separator removal byte-for-byte.
    #[test]
    fn test_without_code_separators_preserves_pushdata() {
        // OP_CODESEPARATOR then OP_PUSHDATA1 for a 2-byte push.
        let script = Script::from_bytes(&[OP_CODESEPARATOR, OP_PUSHDATA1, 0x02, 0xaa, 0xbb]);
        let filtered = script.without_code_separators();
        assert_eq!(filtered.to_bytes(), &[OP_PUSHDATA1, 0x02, 0xaa, 0xbb]);
    }

    /// A truncated push at the tail is copied through verbatim.
    #[test]
    fn test_without_code_separators_truncated_tail() {
        // OP_CODESEPARATOR then "push 5 bytes" with only 2 available.
        let script = Script::from_bytes(&[OP_CODESEPARATOR, 0x05, 0x01, 0x02]);
        let filtered = script.without_code_separators();
        assert_eq!(filtered.to_bytes(), &[0x05, 0x01, 0x02]);
    }

    // -----------------------------------------------------------------------
    // Append operations
    // -----------------------------------------------------------------------

    /// append_push_data correctly pushes small data (<=75 bytes).
    #[test]
    fn test_append_push_data_small() {
        let mut script = Script::new();
        let data = vec![0x01, 0x02, 0x03, 0x04, 0x05];
        script.append_push_data(&data).expect("push should succeed");
        assert_eq!(script.to_hex(), "050102030405");
    }

    /// append_push_data uses OP_PUSHDATA1 for data in 76..=255 range.
    #[test]
    fn test_append_push_data_medium() {
        let mut script = Script::new();
        let data = vec![0xAA; 80];
        script.append_push_data(&data).expect("push should succeed");
        let hex_str = script.to_hex();
        // OP_PUSHDATA1 = 0x4c, then 0x50 (80), then 80 bytes of 0xAA
        assert_eq!(&hex_str[..4], "4c50");
        assert_eq!(hex_str.len(), 4 + 80 * 2);
    }

    /// append_opcode appends raw opcode bytes.
    #[test]
    fn test_append_opcode() {
        let mut script = Script::new();
        script.append_opcode(OP_DUP);
        script.append_opcode(OP_HASH160);
        assert_eq!(script.to_bytes(), &[OP_DUP, OP_HASH160]);
    }

    // -----------------------------------------------------------------------
    // Serialization (JSON)
    // -----------------------------------------------------------------------

    /// Script serializes to a hex JSON string.
    #[test]
    fn test_serde_roundtrip() {
        let script = Script::from_hex("76a91403ececf2d12a7f614aef4c82ecf13c303bd9975d88ac")
            .expect("valid hex");
        let json_str = serde_json::to_string(&script).expect("should serialize");
        assert_eq!(
            json_str,
            r#""76a91403ececf2d12a7f614aef4c82ecf13c303bd9975d88ac""#
        );
        let script2: Script = serde_json::from_str(&json_str).expect("should deserialize");
        assert_eq!(script, script2);
    }

    // -----------------------------------------------------------------------
    // Display / Debug
    // -----------------------------------------------------------------------

    /// Display trait outputs the hex string.
    #[test]
    fn test_display() {
        let script = Script::from_hex("76a914e2a623699e81b291c0327f408fea765d534baa2a88ac")
            .expect("valid hex");
        assert_eq!(
            format!("{}", script),
            "76a914e2a623699e81b291c0327f408fea765d534baa2a88ac"
        );
    }

    /// Debug trait outputs the Script(...) format.
    #[test]
    fn test_debug() {
        let script = Script::from_hex("76a914e2a623699e81b291c0327f408fea765d534baa2a88ac")
            .expect("valid hex");
        let debug_str = format!("{:?}", script);
        assert!(debug_str.starts_with("Script("));
        assert!(debug_str.contains("76a914"));
    }

    /// Default produces an empty script.
    #[test]
    fn test_default() {
        let script = Script::default();
        assert!(script.is_empty());
        assert_eq!(script.len(), 0);
    }
}
