//! Script verification flags (bitmask).

use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Script verification flags controlling how a spend is checked.
///
/// The flags are carried through to the pluggable script engine; the
/// transaction code itself only composes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScriptFlags(pub u32);

impl ScriptFlags {
    pub const NONE: ScriptFlags = ScriptFlags(0);
    /// Evaluate P2SH subscripts (BIP16).
    pub const VERIFY_P2SH: ScriptFlags = ScriptFlags(1 << 0);
    /// Enforce strict DER encoding for signatures (BIP66).
    pub const VERIFY_DERSIG: ScriptFlags = ScriptFlags(1 << 1);
    /// Enforce low-S signatures (BIP62 rule 5).
    pub const VERIFY_LOW_S: ScriptFlags = ScriptFlags(1 << 2);
    /// A failed CHECKSIG must consume an empty signature.
    pub const VERIFY_NULLFAIL: ScriptFlags = ScriptFlags(1 << 3);
    /// Require exactly one truthy stack element after evaluation.
    pub const VERIFY_CLEANSTACK: ScriptFlags = ScriptFlags(1 << 4);
    /// Enable CHECKLOCKTIMEVERIFY (BIP65).
    pub const VERIFY_CHECKLOCKTIMEVERIFY: ScriptFlags = ScriptFlags(1 << 5);
    /// Enable CHECKSEQUENCEVERIFY (BIP112).
    pub const VERIFY_CHECKSEQUENCEVERIFY: ScriptFlags = ScriptFlags(1 << 6);
    /// Evaluate witness programs (BIP141).
    pub const VERIFY_WITNESS: ScriptFlags = ScriptFlags(1 << 7);
    /// Require minimal push encodings.
    pub const VERIFY_MINIMALDATA: ScriptFlags = ScriptFlags(1 << 8);

    /// Whether all bits of `flag` are set.
    pub fn has_flag(self, flag: ScriptFlags) -> bool {
        self.0 & flag.0 == flag.0
    }

    /// Set all bits of `flag`.
    pub fn add_flag(&mut self, flag: ScriptFlags) {
        self.0 |= flag.0;
    }
}

impl BitOr for ScriptFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        ScriptFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for ScriptFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for ScriptFlags {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        ScriptFlags(self.0 & rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_composition() {
        let flags = ScriptFlags::VERIFY_P2SH | ScriptFlags::VERIFY_DERSIG;
        assert!(flags.has_flag(ScriptFlags::VERIFY_P2SH));
        assert!(flags.has_flag(ScriptFlags::VERIFY_DERSIG));
        assert!(!flags.has_flag(ScriptFlags::VERIFY_WITNESS));
    }

    #[test]
    fn test_add_flag() {
        let mut flags = ScriptFlags::NONE;
        assert!(!flags.has_flag(ScriptFlags::VERIFY_WITNESS));
        flags.add_flag(ScriptFlags::VERIFY_WITNESS);
        assert!(flags.has_flag(ScriptFlags::VERIFY_WITNESS));
    }
}
