//! Canonical register identifiers for the RV32 integer register file.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Number of general-purpose registers compared.
pub const NUM_REGS: usize = REG_COUNT as usize;

const REG_COUNT: u8 = 32;

/// ABI names indexed by register number.
const ABI_NAMES: [&str; NUM_REGS] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

/// A canonical register identifier, `x00` through `x31`.
///
/// The textual form is always zero-padded to two digits. Spellings such as
/// `x4` or `ra` are not canonical and are rejected by [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegisterId(u8);

impl RegisterId {
    /// Create a register id from its index. Returns `None` above 31.
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < NUM_REGS {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Register index (0-31).
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// ABI name (`zero`, `ra`, `sp`, ...).
    #[must_use]
    pub const fn abi_name(self) -> &'static str {
        ABI_NAMES[self.0 as usize]
    }

    /// Iterate all 32 registers in ascending order.
    pub fn all() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator + Clone {
        (0..REG_COUNT).map(Self)
    }
}

impl fmt::Display for RegisterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{:02}", self.0)
    }
}

impl FromStr for RegisterId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('x')
            .filter(|d| d.len() == 2 && d.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| Error::InvalidRegister(s.to_string()))?;
        digits
            .parse::<u8>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| Error::InvalidRegister(s.to_string()))
    }
}

impl TryFrom<String> for RegisterId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RegisterId> for String {
    fn from(reg: RegisterId) -> Self {
        reg.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_zero_padded() {
        assert_eq!(RegisterId::new(4).unwrap().to_string(), "x04");
        assert_eq!(RegisterId::new(31).unwrap().to_string(), "x31");
    }

    #[test]
    fn test_parse_canonical() {
        assert_eq!("x00".parse::<RegisterId>().unwrap().index(), 0);
        assert_eq!("x29".parse::<RegisterId>().unwrap().index(), 29);
    }

    #[test]
    fn test_parse_rejects_non_canonical() {
        for name in ["x4", "x32", "x004", "ra", "X04", "x-1", ""] {
            assert!(
                name.parse::<RegisterId>().is_err(),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_all_ordered() {
        let regs: Vec<_> = RegisterId::all().collect();
        assert_eq!(regs.len(), NUM_REGS);
        assert!(regs.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(regs[10].abi_name(), "a0");
    }

    #[test]
    fn test_new_out_of_range() {
        assert!(RegisterId::new(32).is_none());
    }
}
