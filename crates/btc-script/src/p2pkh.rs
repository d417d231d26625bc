//! Pay-to-Public-Key-Hash locking script template.

use btc_primitives::ec::PublicKey;

use crate::opcodes::*;
use crate::Script;

/// Build a P2PKH locking script for a 20-byte public key hash.
///
/// Produces: OP_DUP OP_HASH160 <20-byte hash> OP_EQUALVERIFY OP_CHECKSIG
///
/// # Arguments
/// * `pubkey_hash` - The Hash160 of the recipient's compressed public key.
///
/// # Returns
/// A 25-byte locking `Script`.
pub fn lock(pubkey_hash: &[u8; 20]) -> Script {
    let mut script = Script::new();
    script.append_opcode(OP_DUP);
    script.append_opcode(OP_HASH160);
    // 20-byte direct push always fits, append cannot fail.
    script
        .append_push_data(pubkey_hash)
        .expect("20-byte push is always valid");
    script.append_opcode(OP_EQUALVERIFY);
    script.append_opcode(OP_CHECKSIG);
    script
}

/// Build a P2PKH locking script paying to the given public key.
///
/// # Arguments
/// * `pubkey` - The recipient's public key; its compressed form is hashed.
///
/// # Returns
/// A 25-byte locking `Script`.
pub fn lock_for_pubkey(pubkey: &PublicKey) -> Script {
    lock(&pubkey.hash160())
}
