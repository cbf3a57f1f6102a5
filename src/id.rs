//! Variable identifiers.
//!
//! Input variables are identified by position, not by name; `VarId` is a
//! distinct newtype over `u32` so a variable index can't be accidentally
//! passed where some other count or offset is expected.

use std::fmt;

/// Identifies an input variable by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(u32);

impl VarId {
    /// Sentinel returned by accessors that have no associated variable
    /// (e.g. `varid()` on a non-literal node).
    pub const BAD: VarId = VarId(u32::MAX);

    /// Creates a variable id from a raw index.
    pub const fn new(index: u32) -> Self {
        VarId(index)
    }

    /// Returns the raw index.
    pub const fn index(self) -> u32 {
        self.0
    }

    /// True if this is the [`VarId::BAD`] sentinel.
    pub const fn is_bad(self) -> bool {
        self.0 == u32::MAX
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for VarId {
    fn from(index: u32) -> Self {
        VarId(index)
    }
}
