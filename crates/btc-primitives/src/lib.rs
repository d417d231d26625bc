/// Primitives for Bitcoin-style transaction processing.
///
/// This crate provides the foundational building blocks for the SDK:
/// - Wire codec helpers (little-endian integers, compact-size VarInt,
///   length-prefixed byte strings, record collections)
/// - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160)
/// - Chain hash type for transaction identification
/// - Elliptic curve cryptography (secp256k1 keys and ECDSA signatures)

pub mod chainhash;
pub mod ec;
pub mod hash;
pub mod wire;

mod error;
pub use error::PrimitivesError;
