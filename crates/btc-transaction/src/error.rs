/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// The byte stream does not form a well-formed transaction.
    #[error("format error: {0}")]
    Format(String),

    /// A structural invariant was violated during an explicit validation pass.
    #[error("validation error: {0}")]
    Validation(String),

    /// A signing precondition failed.
    #[error("signing error: {0}")]
    Signing(String),

    /// The number of sign-data entries does not match the input count.
    #[error("sign data count {got} does not match input count {expected}")]
    SignDataMismatch { got: usize, expected: usize },

    /// An input index was outside the transaction's input list.
    #[error("input index {index} out of range (tx has {inputs} inputs)")]
    InputIndexOutOfRange { index: usize, inputs: usize },

    /// The script engine rejected a specific input's spend.
    #[error("verification failed for input {index}: {reason}")]
    Verification { index: usize, reason: String },

    /// An underlying script error (forwarded from `btc-script`).
    #[error("script error: {0}")]
    Script(#[from] btc_script::ScriptError),

    /// An underlying primitives error (forwarded from `btc-primitives`).
    #[error("primitives error: {0}")]
    Primitives(#[from] btc_primitives::PrimitivesError),
}
