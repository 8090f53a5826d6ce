//! Byte order and bit order.
//!
//! The two axes are independent. [`Endian`] decides how the bytes of a
//! multi-byte scalar are laid out; [`BitOrder`] decides which physical bit of
//! a byte a logical bit index lands on.

/// Bit order when addressing single bits of a byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BitOrder {
    /// Logical bit 0 is the high bit of the byte.
    MsbFirst,
    /// Logical bit 0 is the low bit of the byte.
    #[default]
    LsbFirst,
}

impl BitOrder {
    /// Physical bit index (0 = least significant) for logical bit `bit` of a byte.
    pub(crate) fn shift(self, bit: u64) -> u64 {
        match self {
            BitOrder::MsbFirst => 7 - bit,
            BitOrder::LsbFirst => bit,
        }
    }
}

/// Byte order of multi-byte values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Endian {
    #[default]
    Little,
    Big,
}

impl Endian {
    /// Bit order used for sub-byte runs under this byte order.
    pub fn bit_order(self) -> BitOrder {
        match self {
            Endian::Little => BitOrder::LsbFirst,
            Endian::Big => BitOrder::MsbFirst,
        }
    }
}

impl From<Endian> for BitOrder {
    fn from(value: Endian) -> Self {
        value.bit_order()
    }
}
