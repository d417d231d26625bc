#![deny(missing_docs)]

//! Bitcoin-style transaction SDK.
//!
//! Re-exports all component crates for convenient single-crate usage.

pub use btc_primitives as primitives;
pub use btc_script as script;
pub use btc_transaction as transaction;
