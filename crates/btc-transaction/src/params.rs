//! Protocol-wide numeric ceilings and thresholds.

/// Maximum total money supply in indivisible units (satoshis).
pub const MAX_MONEY: i64 = 21_000_000 * 100_000_000;

/// Maximum serialized block size in bytes; a single transaction's legacy
/// encoding must also fit within it.
pub const MAX_BLOCK_SIZE: usize = 1_000_000;

/// Maximum size of a single script element in bytes.
pub const MAX_SCRIPT_ELEMENT_SIZE: usize = 520;

/// Lock-time values below this threshold are interpreted as block
/// heights; values at or above it are Unix timestamps.
pub const LOCKTIME_THRESHOLD: u32 = 500_000_000;

/// The lowest peer protocol version that understands the extended
/// (witness-bearing) transaction encoding.
pub const WITNESS_PROTOCOL_VERSION: u32 = 70012;

/// Whether a peer at `protocol_version` may be sent witness-encoded
/// transactions.
pub fn protocol_allows_witness(protocol_version: u32) -> bool {
    protocol_version >= WITNESS_PROTOCOL_VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_witness_protocol_gate() {
        assert!(protocol_allows_witness(WITNESS_PROTOCOL_VERSION));
        assert!(protocol_allows_witness(WITNESS_PROTOCOL_VERSION + 1));
        assert!(!protocol_allows_witness(WITNESS_PROTOCOL_VERSION - 1));
    }

    #[test]
    fn test_max_money_value() {
        assert_eq!(MAX_MONEY, 2_100_000_000_000_000);
    }
}
