//! Conversion between runs of [`Bit`]s and packed bytes.
//!
//! A run of bits is always least-significant first: `bits[0]` is the lowest
//! bit of the value the run represents. Packing puts 8 bits into each byte,
//! low bit first. The byte order only decides which end of the output holds
//! the lowest group of 8 bits:
//!
//! - [`Endian::Little`]: bits `0..8` go to byte 0, bits `8..16` to byte 1, ...
//! - [`Endian::Big`]: bits `0..8` go to the last byte, bits `8..16` to the one
//!   before it, ...
//!
//! So a 4-bit run `[1, 0, 1, 0]` packs to `[0x05]` under both orders, and a
//! 12-bit run holding `0xabc` packs to `[0xbc, 0x0a]` (little) or
//! `[0x0a, 0xbc]` (big).

use crate::{errors::BitError, order::Endian};

/// A single bit. `true` is 1.
pub type Bit = bool;

/// Number of bytes needed to hold `bit_count` bits.
pub fn byte_len(bit_count: u64) -> usize {
    bit_count.div_ceil(8) as usize
}

/// Number of bytes [`bits_to_bytes`] produces for `bits`.
pub fn size_in_bytes(bits: &[Bit]) -> usize {
    byte_len(bits.len() as u64)
}

/// Packs a run of bits into bytes.
pub fn bits_to_bytes(bits: &[Bit], order: Endian) -> Vec<u8> {
    let n_bytes = size_in_bytes(bits);
    let mut out = vec![0u8; n_bytes];

    for (i, &bit) in bits.iter().enumerate() {
        let byte_index = match order {
            Endian::Little => i / 8,
            Endian::Big => n_bytes - 1 - i / 8,
        };
        out[byte_index] |= (bit as u8) << (i % 8);
    }

    out
}

/// Unpacks `count` bits from the first `byte_len(count)` bytes of `data`.
/// Inverse of [`bits_to_bytes`].
pub fn bytes_to_bits(data: &[u8], count: u64, order: Endian) -> Result<Vec<Bit>, BitError> {
    let n_bytes = byte_len(count);
    if data.len() < n_bytes {
        return Err(BitError::OutOfRange);
    }

    let bits = (0..count as usize)
        .map(|i| {
            let byte_index = match order {
                Endian::Little => i / 8,
                Endian::Big => n_bytes - 1 - i / 8,
            };
            (data[byte_index] >> (i % 8)) & 1 == 1
        })
        .collect();

    Ok(bits)
}
