/// Unified error type for all primitives operations.
///
/// Covers errors from the wire codec, hashing, and EC operations.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    /// The input stream ended before a complete value could be read.
    #[error("unexpected end of stream")]
    UnexpectedEof,

    /// A compact-size count declared more records than the caller allows.
    #[error("declared count {declared} exceeds maximum {max}")]
    CountTooLarge { declared: u64, max: u64 },

    /// A hash value had the wrong length or could not be parsed.
    #[error("invalid hash: {0}")]
    InvalidHash(String),

    /// A private key scalar was zero, out of range, or the wrong length.
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// A public key point was not on the curve or malformed.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// A signature was malformed or failed to encode/decode.
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    /// Hex decoding failed.
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// An error from the underlying ECDSA implementation.
    #[error("ecdsa error: {0}")]
    Ecdsa(#[from] k256::ecdsa::Error),
}
