//! Reading and writing whole layouts through `std::io`.

use std::io::{ErrorKind, Read, Write};

use log::debug;

use crate::{
    bits::byte_len,
    errors::Error,
    layout::BitLayout,
    offset::Offset,
    order::Endian,
};

/// Fills `buf` from `source`, stopping early only when the source is exhausted.
fn fill<R: Read + ?Sized>(source: &mut R, buf: &mut [u8]) -> Result<usize, Error> {
    let mut filled = 0;

    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(filled)
}

/// Reads exactly the packed size of `target` from `source` and decodes it.
///
/// The size comes from `target` itself, with `ignore` tags honored, so slices
/// and `Vec`s must already have their final length. Fails with
/// [`Error::ShortRead`] when the source holds fewer bytes.
///
/// If a field could not be assigned, every other field is still filled and
/// [`Error::CannotAssign`] is returned at the end.
pub fn read<R, T>(source: &mut R, order: Endian, target: &mut T) -> Result<(), Error>
where
    R: Read + ?Sized,
    T: BitLayout + ?Sized,
{
    let bits = target.bit_size(true);
    let mut buf = vec![0u8; byte_len(bits)];

    let n = fill(source, &mut buf)?;
    if n != buf.len() {
        return Err(Error::ShortRead {
            expected: buf.len(),
            actual: n,
        });
    }
    debug!("read {} bytes for a {} bit layout ({:?})", n, bits, order);

    target.decode(&buf, Offset::ZERO, order)?;

    Ok(())
}

/// Encodes `value` into a zero-filled buffer of its packed size and writes
/// the buffer to `sink` in one call.
///
/// A bare scalar is written directly in `order`, without the bit layout.
/// Skipped and unassignable fields leave zero bits behind; in the latter case
/// the buffer is still written and [`Error::CannotAssign`] is returned.
pub fn write<W, T>(sink: &mut W, order: Endian, value: &T) -> Result<(), Error>
where
    W: Write + ?Sized,
    T: BitLayout + ?Sized,
{
    if let Some(bytes) = value.plain_bytes(order) {
        debug!("writing {} byte scalar ({:?})", bytes.len(), order);
        sink.write_all(&bytes)?;
        return Ok(());
    }

    let bits = value.bit_size(true);
    let mut buf = vec![0u8; byte_len(bits)];

    let encoded = value.encode(&mut buf, Offset::ZERO, order);
    if let Err(err) = encoded {
        if !matches!(err, Error::CannotAssign { .. }) {
            return Err(err);
        }

        sink.write_all(&buf)?;
        return Err(err);
    }

    debug!("writing {} bytes for a {} bit layout ({:?})", buf.len(), bits, order);
    sink.write_all(&buf)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bit, errors::BitError};

    #[test]
    fn test_read_primitive() {
        let data = [0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];

        let mut u8_value = 0xffu8;
        read(&mut &data[..], Endian::Little, &mut u8_value).unwrap();
        assert_eq!(u8_value, 0);

        let mut u16_value = 0u16;
        read(&mut &data[..], Endian::Little, &mut u16_value).unwrap();
        assert_eq!(u16_value, 0x0100);

        let mut u32_value = 0u32;
        read(&mut &data[..], Endian::Little, &mut u32_value).unwrap();
        assert_eq!(u32_value, 0x03020100);

        let mut u64_value = 0u64;
        read(&mut &data[..], Endian::Little, &mut u64_value).unwrap();
        assert_eq!(u64_value, 0x0706050403020100);
    }

    #[test]
    fn test_read_consumes_only_layout() {
        let data = [0xaa, 0xbb, 0xcc];
        let mut source = &data[..];

        let mut value = 0u8;
        read(&mut source, Endian::Little, &mut value).unwrap();
        assert_eq!(value, 0xaa);
        assert_eq!(source, &[0xbb, 0xcc]);
    }

    #[test]
    fn test_short_read() {
        let mut value = 0u32;
        let err = read(&mut &[0x01, 0x02][..], Endian::Little, &mut value).unwrap_err();
        assert!(matches!(err, Error::ShortRead { expected: 4, actual: 2 }));
    }

    #[test]
    fn test_read_array_big_endian() {
        let mut bytes = [0u8; 6];
        read(&mut &[0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff][..], Endian::Big, &mut bytes).unwrap();
        assert_eq!(bytes, [0xff, 0xee, 0xdd, 0xcc, 0xbb, 0xaa]);
    }

    #[test]
    fn test_read_slice() {
        let mut bits = vec![false; 12];
        read(&mut &[0xff, 0x0f][..], Endian::Little, bits.as_mut_slice()).unwrap();
        assert_eq!(bits, vec![true; 12]);
    }

    #[test]
    fn test_write_primitive() {
        let mut out = Vec::new();
        write(&mut out, Endian::Little, &0xbbeeccff_u32).unwrap();
        assert_eq!(out, vec![0xff, 0xcc, 0xee, 0xbb]);

        out.clear();
        write(&mut out, Endian::Big, &0xbbeeccff00112233_u64).unwrap();
        assert_eq!(out, vec![0xbb, 0xee, 0xcc, 0xff, 0x00, 0x11, 0x22, 0x33]);

        out.clear();
        write(&mut out, Endian::Big, &0xbb_u8).unwrap();
        assert_eq!(out, vec![0xbb]);

        out.clear();
        write(&mut out, Endian::Big, &true).unwrap();
        assert_eq!(out, vec![0x01]);
    }

    #[test]
    fn test_write_byte_slice() {
        let input = vec![0xaa, 0xbb, 0xcc, 0xdd];

        let mut out = Vec::new();
        write(&mut out, Endian::Little, &input).unwrap();
        assert_eq!(out, input);

        out.clear();
        write(&mut out, Endian::Big, &input).unwrap();
        assert_eq!(out, vec![0xdd, 0xcc, 0xbb, 0xaa]);
    }

    #[test]
    fn test_write_bits() {
        let bits: [Bit; 10] = [true, false, true, false, false, false, false, false, true, true];
        let mut out = Vec::new();
        write(&mut out, Endian::Little, &bits).unwrap();
        assert_eq!(out, vec![0x05, 0x03]);
    }

    #[test]
    fn test_write_empty() {
        let mut out = Vec::new();
        write(&mut out, Endian::Little, &Vec::<u16>::new()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_unsupported_aborts_write() {
        let mut out = Vec::new();
        let err = write(&mut out, Endian::Little, &[1usize, 2]).unwrap_err();
        assert!(matches!(err, Error::Unsupported("usize")));
        assert!(out.is_empty());
    }

    #[test]
    fn test_bit_error_converts() {
        let err: Error = BitError::OutOfRange.into();
        assert!(matches!(err, Error::Bit(BitError::OutOfRange)));
        assert_eq!(err.to_string(), "out of range");
    }
}
