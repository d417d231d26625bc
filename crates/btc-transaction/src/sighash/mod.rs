//! Signature-hash algorithms and hash-type flags.
//!
//! Two digest algorithms exist: the legacy "prepare-and-hash" scheme
//! ([`legacy`]) that serializes a pruned working copy, and the
//! single-pass scheme ([`witness`]) that commits to the claimed amount
//! and precomputed prevout/sequence/output hashes. The caller picks the
//! algorithm explicitly; nothing here auto-detects witness spends.

pub mod legacy;
pub mod witness;

/// Sign all inputs and all outputs.
pub const SIGHASH_ALL: u32 = 0x01;

/// Sign all inputs and no outputs.
pub const SIGHASH_NONE: u32 = 0x02;

/// Sign all inputs and the single output at the signing input's index.
pub const SIGHASH_SINGLE: u32 = 0x03;

/// Modifier bit: commit only to the signing input.
pub const SIGHASH_ANYONECANPAY: u32 = 0x80;

/// Mask isolating the base hash type from modifier bits.
pub const SIGHASH_MASK: u32 = 0x1f;
