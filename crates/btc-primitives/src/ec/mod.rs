//! secp256k1 elliptic curve cryptography.
//!
//! Private keys, public keys, and ECDSA signatures with DER
//! serialization, RFC6979 deterministic nonces, and low-S
//! normalization.

pub mod private_key;
pub mod public_key;
pub mod signature;

pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use signature::Signature;
