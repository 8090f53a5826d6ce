//! Bit positions inside a byte buffer.
//!
//! An [`Offset`] is a `(byte, bit)` pair. The raw form may carry `bit >= 8`;
//! every comparison and arithmetic operation works on the normalized form,
//! where `bit < 8`.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Add;

use crate::errors::BitError;

/// Absolute bit position measured from the start of a buffer.
///
/// Arithmetic wraps on `u64` overflow.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offset {
    /// Offset in bytes.
    pub byte: u64,
    /// Offset in bits, added on top of `byte`.
    pub bit: u64,
}

impl Offset {
    pub const ZERO: Offset = Offset { byte: 0, bit: 0 };

    pub const fn new(byte: u64, bit: u64) -> Self {
        Offset { byte, bit }
    }

    /// Offset of `bits` bits from the start, already normalized.
    pub const fn from_bits(bits: u64) -> Self {
        Offset {
            byte: bits / 8,
            bit: bits % 8,
        }
    }

    /// Moves whole bytes out of `bit` into `byte`.
    /// e.g. `Offset { byte: 3, bit: 53 }` -> `Offset { byte: 9, bit: 5 }`
    pub fn normalize(&mut self) {
        if self.bit < 8 {
            return;
        }

        self.byte = self.byte.wrapping_add(self.bit / 8);
        self.bit %= 8;
    }

    /// Returns the normalized copy of this offset.
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Total position in bits: `byte * 8 + bit`.
    pub fn bits(self) -> u64 {
        let off = self.normalized();
        off.byte.wrapping_mul(8).wrapping_add(off.bit)
    }

    /// Subtracts `diff`. Fails with [`BitError::Negative`] when `diff` lies past `self`.
    pub fn try_sub(self, diff: Offset) -> Result<Offset, BitError> {
        if self < diff {
            return Err(BitError::Negative);
        }

        Ok(Offset::from_bits(self.bits().wrapping_sub(diff.bits())))
    }
}

impl Add for Offset {
    type Output = Offset;

    fn add(self, diff: Offset) -> Offset {
        Offset {
            byte: self.byte.wrapping_add(diff.byte),
            bit: self.bit.wrapping_add(diff.bit),
        }
        .normalized()
    }
}

impl PartialEq for Offset {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Offset {}

impl PartialOrd for Offset {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Offset {
    fn cmp(&self, other: &Self) -> Ordering {
        let a = self.normalized();
        let b = other.normalized();
        (a.byte, a.bit).cmp(&(b.byte, b.bit))
    }
}

impl Hash for Offset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let off = self.normalized();
        off.byte.hash(state);
        off.bit.hash(state);
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Byte:{} Bit:{}", self.byte, self.bit)
    }
}
