/// Bitcoin-style transaction core.
///
/// Provides the transaction data model (OutPoint, TxIn, TxOut,
/// ScriptWitness, Transaction), the witness-aware wire codec, structural
/// validation, both signature-digest algorithms (legacy and BIP-143),
/// signing orchestration, and the spend verification hook.

pub mod input;
pub mod outpoint;
pub mod output;
pub mod params;
pub mod sighash;
pub mod signing;
pub mod transaction;
pub mod validation;
pub mod verify;
pub mod witness;

mod error;
pub use error::TransactionError;
pub use input::TxIn;
pub use outpoint::OutPoint;
pub use output::TxOut;
pub use signing::SignData;
pub use transaction::Transaction;
pub use verify::{ScriptContext, ScriptEngine};
pub use witness::ScriptWitness;
