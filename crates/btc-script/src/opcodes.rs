//! Bitcoin script opcode constants.
//!
//! Only the opcodes the transaction code needs by name are defined here;
//! anything else travels through scripts as opaque bytes.

/// Push an empty byte array onto the stack.
pub const OP_0: u8 = 0x00;
/// Alias for OP_0.
pub const OP_FALSE: u8 = 0x00;

/// Lowest direct data push opcode (push 1 byte).
pub const OP_DATA_1: u8 = 0x01;
/// Direct push of 20 bytes, as used by P2PKH locking scripts.
pub const OP_DATA_20: u8 = 0x14;
/// Highest direct data push opcode (push 75 bytes).
pub const OP_DATA_75: u8 = 0x4b;

/// The next byte is the number of bytes to push.
pub const OP_PUSHDATA1: u8 = 0x4c;
/// The next two bytes (LE) are the number of bytes to push.
pub const OP_PUSHDATA2: u8 = 0x4d;
/// The next four bytes (LE) are the number of bytes to push.
pub const OP_PUSHDATA4: u8 = 0x4e;

/// Marks an output as unspendable data carrier.
pub const OP_RETURN: u8 = 0x6a;

/// Duplicate the top stack item.
pub const OP_DUP: u8 = 0x76;

/// Pop two items and push whether they are equal.
pub const OP_EQUAL: u8 = 0x87;
/// OP_EQUAL followed by OP_VERIFY.
pub const OP_EQUALVERIFY: u8 = 0x88;

/// Hash the top stack item with RIPEMD160(SHA256(x)).
pub const OP_HASH160: u8 = 0xa9;

/// Signature-scope separator; stripped from the script that is committed
/// to by the legacy signature hash.
pub const OP_CODESEPARATOR: u8 = 0xab;

/// Verify an ECDSA signature against the committed transaction digest.
pub const OP_CHECKSIG: u8 = 0xac;
