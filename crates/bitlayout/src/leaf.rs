//! [`BitLayout`] for leaf types.
//!
//! - Integers and floats occupy their natural width. Their bytes are taken
//!   from (or put at) the cursor in the bit order that goes with the field's
//!   byte order, whatever the bit alignment, and interpreted in that byte
//!   order. A big-endian byte that straddles two buffer bytes therefore starts
//!   with the lower bits of the first one.
//! - A [`Bit`] occupies one bit, addressed in the bit order that goes with the
//!   field's byte order. A run of bits is transferred as one unit with
//!   [`get_bit_run`]/[`set_bit_run`], so a big-endian flag group keeps its
//!   value instead of being reversed bit by bit.
//! - A run of `u8` is transferred as bytes. Under [`Endian::Big`] the element
//!   order is reversed: `[0xaa, 0xbb, 0xcc]` in the buffer decodes to
//!   `[0xcc, 0xbb, 0xaa]`, and encoding reverses it back.
//! - `usize` and `isize` have no fixed wire width; they are sized but
//!   transferring them fails with [`Error::Unsupported`].

use std::mem::size_of;

use byteorder::{BigEndian, ByteOrder, LittleEndian, WriteBytesExt};

use crate::{
    access::{get_bit, get_bit_run, get_bits, set_bit, set_bit_run, set_bits},
    bits::Bit,
    errors::Error,
    layout::BitLayout,
    offset::Offset,
    order::Endian,
};

/// Reads `len` bytes at `at`, each byte's bits addressed in `order`'s bit order.
fn read_bytes(src: &[u8], at: Offset, len: usize, order: Endian) -> Result<Vec<u8>, Error> {
    let bit_order = order.bit_order();
    let bits = get_bits(src, at, len as u64 * 8, bit_order)?;

    let bytes = bits
        .chunks(8)
        .map(|group| {
            group.iter().enumerate().fold(0u8, |byte, (i, &bit)| {
                byte | ((bit as u8) << bit_order.shift(i as u64))
            })
        })
        .collect();

    Ok(bytes)
}

/// Inverse of [`read_bytes`].
fn write_bytes(dst: &mut [u8], at: Offset, bytes: &[u8], order: Endian) -> Result<Offset, Error> {
    let bit_order = order.bit_order();
    let bits: Vec<Bit> = bytes
        .iter()
        .flat_map(|&byte| (0..8).map(move |i| (byte >> bit_order.shift(i)) & 1 == 1))
        .collect();
    set_bits(dst, at, &bits, bit_order)?;

    Ok(at + Offset::new(bytes.len() as u64, 0))
}

macro_rules! impl_scalar {
    ($($ty:ty => $read:ident, $write:ident;)*) => {$(
        impl BitLayout for $ty {
            fn bit_size(&self, _honor_tags: bool) -> u64 {
                (size_of::<$ty>() * 8) as u64
            }

            fn decode(&mut self, src: &[u8], at: Offset, order: Endian) -> Result<Offset, Error> {
                let bytes = read_bytes(src, at, size_of::<$ty>(), order)?;
                *self = match order {
                    Endian::Little => LittleEndian::$read(&bytes),
                    Endian::Big => BigEndian::$read(&bytes),
                };

                Ok(at + Offset::new(bytes.len() as u64, 0))
            }

            fn encode(&self, dst: &mut [u8], at: Offset, order: Endian) -> Result<Offset, Error> {
                let mut bytes = [0u8; size_of::<$ty>()];
                match order {
                    Endian::Little => LittleEndian::$write(&mut bytes, *self),
                    Endian::Big => BigEndian::$write(&mut bytes, *self),
                }

                write_bytes(dst, at, &bytes, order)
            }

            fn plain_bytes(&self, order: Endian) -> Option<Vec<u8>> {
                let mut out = Vec::with_capacity(size_of::<$ty>());
                let written = match order {
                    Endian::Little => out.$write::<LittleEndian>(*self),
                    Endian::Big => out.$write::<BigEndian>(*self),
                };
                written.ok()?;

                Some(out)
            }
        }
    )*};
}

impl_scalar! {
    u16 => read_u16, write_u16;
    u32 => read_u32, write_u32;
    u64 => read_u64, write_u64;
    i16 => read_i16, write_i16;
    i32 => read_i32, write_i32;
    i64 => read_i64, write_i64;
    f32 => read_f32, write_f32;
    f64 => read_f64, write_f64;
}

impl BitLayout for u8 {
    fn bit_size(&self, _honor_tags: bool) -> u64 {
        8
    }

    fn decode(&mut self, src: &[u8], at: Offset, order: Endian) -> Result<Offset, Error> {
        let bytes = read_bytes(src, at, 1, order)?;
        *self = bytes[0];

        Ok(at + Offset::new(1, 0))
    }

    fn encode(&self, dst: &mut [u8], at: Offset, order: Endian) -> Result<Offset, Error> {
        write_bytes(dst, at, &[*self], order)
    }

    fn decode_slice(items: &mut [u8], src: &[u8], at: Offset, order: Endian) -> Result<Offset, Error> {
        let bytes = read_bytes(src, at, items.len(), order)?;
        match order {
            Endian::Little => items.copy_from_slice(&bytes),
            Endian::Big => {
                for (item, byte) in items.iter_mut().zip(bytes.iter().rev()) {
                    *item = *byte;
                }
            }
        }

        Ok(at + Offset::new(items.len() as u64, 0))
    }

    fn encode_slice(items: &[u8], dst: &mut [u8], at: Offset, order: Endian) -> Result<Offset, Error> {
        match order {
            Endian::Little => write_bytes(dst, at, items, order),
            Endian::Big => {
                let reversed: Vec<u8> = items.iter().rev().copied().collect();
                write_bytes(dst, at, &reversed, order)
            }
        }
    }

    fn plain_bytes(&self, _order: Endian) -> Option<Vec<u8>> {
        Some(vec![*self])
    }
}

impl BitLayout for i8 {
    fn bit_size(&self, _honor_tags: bool) -> u64 {
        8
    }

    fn decode(&mut self, src: &[u8], at: Offset, order: Endian) -> Result<Offset, Error> {
        let bytes = read_bytes(src, at, 1, order)?;
        *self = bytes[0] as i8;

        Ok(at + Offset::new(1, 0))
    }

    fn encode(&self, dst: &mut [u8], at: Offset, order: Endian) -> Result<Offset, Error> {
        write_bytes(dst, at, &[*self as u8], order)
    }

    fn plain_bytes(&self, _order: Endian) -> Option<Vec<u8>> {
        let mut out = Vec::with_capacity(1);
        out.write_i8(*self).ok()?;
        Some(out)
    }
}

impl BitLayout for Bit {
    fn bit_size(&self, _honor_tags: bool) -> u64 {
        1
    }

    fn decode(&mut self, src: &[u8], at: Offset, order: Endian) -> Result<Offset, Error> {
        *self = get_bit(src, at, order)?;
        Ok(at + Offset::from_bits(1))
    }

    fn encode(&self, dst: &mut [u8], at: Offset, order: Endian) -> Result<Offset, Error> {
        set_bit(dst, at, *self, order)?;
        Ok(at + Offset::from_bits(1))
    }

    fn decode_slice(items: &mut [Bit], src: &[u8], at: Offset, order: Endian) -> Result<Offset, Error> {
        let bits = get_bit_run(src, at, items.len() as u64, order)?;
        items.copy_from_slice(&bits);

        Ok(at + Offset::from_bits(items.len() as u64))
    }

    fn encode_slice(items: &[Bit], dst: &mut [u8], at: Offset, order: Endian) -> Result<Offset, Error> {
        set_bit_run(dst, at, items, order)?;
        Ok(at + Offset::from_bits(items.len() as u64))
    }

    /// A bare bit is written as a whole byte holding 0 or 1.
    fn plain_bytes(&self, _order: Endian) -> Option<Vec<u8>> {
        Some(vec![*self as u8])
    }
}

macro_rules! impl_unsupported {
    ($($ty:ty),*) => {$(
        impl BitLayout for $ty {
            fn bit_size(&self, _honor_tags: bool) -> u64 {
                <$ty>::BITS as u64
            }

            fn decode(&mut self, _src: &[u8], _at: Offset, _order: Endian) -> Result<Offset, Error> {
                Err(Error::Unsupported(stringify!($ty)))
            }

            fn encode(&self, _dst: &mut [u8], _at: Offset, _order: Endian) -> Result<Offset, Error> {
                Err(Error::Unsupported(stringify!($ty)))
            }
        }
    )*};
}

impl_unsupported!(usize, isize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_u16() {
        let src = [0x01, 0x02];
        let mut value = 0u16;

        assert_eq!(value.decode(&src, Offset::ZERO, Endian::Little).unwrap(), Offset::new(2, 0));
        assert_eq!(value, 0x0201);

        value.decode(&src, Offset::ZERO, Endian::Big).unwrap();
        assert_eq!(value, 0x0102);
    }

    #[test]
    fn test_decode_unaligned_u8() {
        let src = [0xf0, 0x0a];
        let mut value = 0u8;

        let next = value.decode(&src, Offset::new(0, 4), Endian::Little).unwrap();
        assert_eq!(value, 0xaf);
        assert_eq!(next, Offset::new(1, 4));
    }

    #[test]
    fn test_encode_u32_big() {
        let mut dst = [0u8; 4];
        0xdeadbeef_u32.encode(&mut dst, Offset::ZERO, Endian::Big).unwrap();
        assert_eq!(dst, [0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn test_signed_and_float() {
        let mut dst = [0u8; 6];
        let next = (-2i16).encode(&mut dst, Offset::ZERO, Endian::Little).unwrap();
        1.5f32.encode(&mut dst, next, Endian::Big).unwrap();

        let mut a = 0i16;
        let mut b = 0f32;
        let next = a.decode(&dst, Offset::ZERO, Endian::Little).unwrap();
        b.decode(&dst, next, Endian::Big).unwrap();
        assert_eq!(a, -2);
        assert_eq!(b, 1.5);
    }

    #[test]
    fn test_decode_unaligned_big() {
        // 0001_0010 0011_0100, the byte sits in bits 4..12 read high bit first
        let src = [0x12, 0x34];
        let mut value = 0u8;

        let next = value.decode(&src, Offset::new(0, 4), Endian::Big).unwrap();
        assert_eq!(value, 0x23);
        assert_eq!(next, Offset::new(1, 4));

        let mut dst = [0u8; 2];
        value.encode(&mut dst, Offset::new(0, 4), Endian::Big).unwrap();
        assert_eq!(dst, [0x02, 0x30]);
    }

    #[test]
    fn test_unaligned_u16_big_round_trip() {
        let mut dst = [0u8; 3];
        0xabcd_u16.encode(&mut dst, Offset::new(0, 3), Endian::Big).unwrap();

        let mut value = 0u16;
        value.decode(&dst, Offset::new(0, 3), Endian::Big).unwrap();
        assert_eq!(value, 0xabcd);
        assert_eq!(dst[0] & 0xe0, 0);
    }

    #[test]
    fn test_byte_run_big_is_reversed() {
        let src = [0xaa, 0xbb, 0xcc];
        let mut items = [0u8; 3];

        u8::decode_slice(&mut items, &src, Offset::ZERO, Endian::Big).unwrap();
        assert_eq!(items, [0xcc, 0xbb, 0xaa]);

        let mut dst = [0u8; 3];
        u8::encode_slice(&items, &mut dst, Offset::ZERO, Endian::Big).unwrap();
        assert_eq!(dst, src);
    }

    #[test]
    fn test_bit_run() {
        let src = [0x50];
        let mut items = [false; 4];

        let next = Bit::decode_slice(&mut items, &src, Offset::ZERO, Endian::Big).unwrap();
        assert_eq!(items, [true, false, true, false]);
        assert_eq!(next, Offset::new(0, 4));
    }

    #[test]
    fn test_plain_bytes() {
        assert_eq!(0xbbee_u16.plain_bytes(Endian::Little), Some(vec![0xee, 0xbb]));
        assert_eq!(0xbbee_u16.plain_bytes(Endian::Big), Some(vec![0xbb, 0xee]));
        assert_eq!((-1i8).plain_bytes(Endian::Big), Some(vec![0xff]));
        assert_eq!(true.plain_bytes(Endian::Big), Some(vec![0x01]));
        assert_eq!([true; 2].plain_bytes(Endian::Big), None);
    }

    #[test]
    fn test_unsupported() {
        let mut value = 0usize;
        assert_eq!(value.bit_size(true), usize::BITS as u64);
        assert!(matches!(
            value.decode(&[0u8; 8], Offset::ZERO, Endian::Little),
            Err(Error::Unsupported("usize"))
        ));
    }

    #[test]
    fn test_out_of_range() {
        let mut value = 0u32;
        assert!(matches!(
            value.decode(&[0u8; 3], Offset::ZERO, Endian::Little),
            Err(Error::Bit(crate::errors::BitError::OutOfRange))
        ));
    }
}
