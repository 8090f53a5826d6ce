//! Single-bit and bit-run access into byte slices at arbitrary [`Offset`]s.
//!
//! Under [`BitOrder::LsbFirst`] logical bit `n` of a byte is its `n`-th lowest
//! bit; under [`BitOrder::MsbFirst`] it is bit `7 - n`. Runs continue into the
//! following bytes either way, and index 0 of a returned run is always the
//! first bit requested.

use crate::{
    bits::{Bit, bits_to_bytes},
    errors::BitError,
    offset::Offset,
    order::{BitOrder, Endian},
};

fn byte_index(data: &[u8], off: Offset) -> Result<usize, BitError> {
    usize::try_from(off.byte)
        .ok()
        .filter(|&index| index < data.len())
        .ok_or(BitError::OutOfRange)
}

/// Checks that `count` bits starting at `off` fit in `data`. A run may end
/// exactly at the end of the buffer.
fn check_range(data: &[u8], off: Offset, count: u64) -> Result<(), BitError> {
    let capacity = (data.len() as u64).saturating_mul(8);

    if off
        .bits()
        .checked_add(count)
        .is_none_or(|end| end > capacity)
    {
        return Err(BitError::OutOfRange);
    }

    Ok(())
}

/// Reads the bit at `off`.
pub fn get_bit(data: &[u8], off: Offset, order: impl Into<BitOrder>) -> Result<Bit, BitError> {
    let off = off.normalized();
    let index = byte_index(data, off)?;

    Ok((data[index] >> order.into().shift(off.bit)) & 1 == 1)
}

/// Sets or clears the bit at `off` in place.
pub fn set_bit(
    data: &mut [u8],
    off: Offset,
    value: Bit,
    order: impl Into<BitOrder>,
) -> Result<(), BitError> {
    let off = off.normalized();
    let index = byte_index(data, off)?;
    let mask = 1u8 << order.into().shift(off.bit);

    if value {
        data[index] |= mask;
    } else {
        data[index] &= !mask;
    }

    Ok(())
}

/// Reads `count` consecutive bits starting at `off`.
pub fn get_bits(
    data: &[u8],
    off: Offset,
    count: u64,
    order: impl Into<BitOrder>,
) -> Result<Vec<Bit>, BitError> {
    check_range(data, off, count)?;
    let order = order.into();

    (0..count)
        .map(|i| get_bit(data, off + Offset::from_bits(i), order))
        .collect()
}

/// Writes `bits` starting at `off`. Nothing is written when the run does not fit.
pub fn set_bits(
    data: &mut [u8],
    off: Offset,
    bits: &[Bit],
    order: impl Into<BitOrder>,
) -> Result<(), BitError> {
    check_range(data, off, bits.len() as u64)?;
    let order = order.into();

    for (i, &bit) in bits.iter().enumerate() {
        set_bit(data, off + Offset::from_bits(i as u64), bit, order)?;
    }

    Ok(())
}

/// Reads `count` bits starting at `off` and packs them little-endian into
/// `ceil(count / 8)` bytes.
pub fn get_bits_as_bytes(
    data: &[u8],
    off: Offset,
    count: u64,
    order: impl Into<BitOrder>,
) -> Result<Vec<u8>, BitError> {
    let bits = get_bits(data, off, count, order)?;
    Ok(bits_to_bytes(&bits, Endian::Little))
}

/// Reads a run of `count` bits as one value, returned least-significant bit first.
///
/// Under [`Endian::Little`] this is [`get_bits`] with [`BitOrder::LsbFirst`].
/// Under [`Endian::Big`] the run is read high bit first, starting at the most
/// significant bit of the byte at `off`, and then reversed, so that a 4-bit
/// field holding `0b0101` at the top of a byte comes back as `[1, 0, 1, 0]`.
pub fn get_bit_run(data: &[u8], off: Offset, count: u64, order: Endian) -> Result<Vec<Bit>, BitError> {
    let mut bits = get_bits(data, off, count, order)?;
    if order == Endian::Big {
        bits.reverse();
    }

    Ok(bits)
}

/// Writes a least-significant-first run as one value. Inverse of [`get_bit_run`].
pub fn set_bit_run(data: &mut [u8], off: Offset, bits: &[Bit], order: Endian) -> Result<(), BitError> {
    match order {
        Endian::Little => set_bits(data, off, bits, order),
        Endian::Big => {
            let reversed: Vec<Bit> = bits.iter().rev().copied().collect();
            set_bits(data, off, &reversed, order)
        }
    }
}
