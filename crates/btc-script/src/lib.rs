/// Script parsing and construction for Bitcoin-style transactions.
///
/// Provides the Script type, opcode definitions, script chunk parsing,
/// verification flags, and the pay-to-pubkey-hash locking template.

pub mod chunk;
pub mod flags;
pub mod opcodes;
pub mod p2pkh;
pub mod script;

mod error;
pub use chunk::ScriptChunk;
pub use error::ScriptError;
pub use flags::ScriptFlags;
pub use script::Script;
