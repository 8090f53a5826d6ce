//! The packed bit layout of typed values.
//!
//! [`BitLayout`] is implemented for every supported leaf type (see
//! [crate::leaf]), for slices, arrays and `Vec`s of layouts, and for
//! structures declared with [`bit_struct!`](crate::bit_struct). Decoding and
//! encoding walk the value in declaration order, each step taking the cursor
//! [`Offset`] and returning the one after the bits it consumed.
//!
//! Every field addresses bits in the bit order of its own byte order. A field
//! whose endian override flips that order must not share a buffer byte with
//! fields of the other order.

use log::trace;

use crate::{errors::Error, offset::Offset, order::Endian, tag::FieldConfig};

/// A value with a statically computable packed bit layout.
pub trait BitLayout {
    /// Size of the value in bits. With `honor_tags`, fields tagged `ignore`
    /// contribute nothing.
    fn bit_size(&self, honor_tags: bool) -> u64;

    /// Fills `self` from `src` starting at `at`, returns the offset after it.
    fn decode(&mut self, src: &[u8], at: Offset, order: Endian) -> Result<Offset, Error>;

    /// Writes `self` into `dst` starting at `at`, returns the offset after it.
    fn encode(&self, dst: &mut [u8], at: Offset, order: Endian) -> Result<Offset, Error>;

    /// Decodes a run of elements. Leaves whose runs must be transferred as a
    /// unit (bits, bytes) override this.
    #[doc(hidden)]
    fn decode_slice(items: &mut [Self], src: &[u8], at: Offset, order: Endian) -> Result<Offset, Error>
    where
        Self: Sized,
    {
        let mut walk = Walk::new(at);
        for item in items {
            walk.decode_field(item, FieldConfig::new(), src, order)?;
        }
        walk.finish()
    }

    /// Encodes a run of elements. See [`BitLayout::decode_slice`].
    #[doc(hidden)]
    fn encode_slice(items: &[Self], dst: &mut [u8], at: Offset, order: Endian) -> Result<Offset, Error>
    where
        Self: Sized,
    {
        let mut walk = Walk::new(at);
        for item in items {
            walk.encode_field(item, FieldConfig::new(), dst, order)?;
        }
        walk.finish()
    }

    /// Big- or little-endian bytes of a bare scalar, written as is by
    /// [`write`](crate::stream::write) without going through the bit layout.
    fn plain_bytes(&self, _order: Endian) -> Option<Vec<u8>> {
        None
    }
}

/// Size of `value` in bits, ignoring field tags.
pub fn size_in_bits<T: BitLayout + ?Sized>(value: &T) -> u64 {
    value.bit_size(false)
}

/// Cursor over the fields of one composite value.
///
/// A field that cannot be assigned does not stop the walk: its bits are
/// stepped over and the signal comes back from [`Walk::finish`] once every
/// field has been visited.
#[derive(Debug)]
pub struct Walk {
    at: Offset,
    unassigned: bool,
}

impl Walk {
    pub fn new(at: Offset) -> Self {
        Walk {
            at,
            unassigned: false,
        }
    }

    pub fn offset(&self) -> Offset {
        self.at
    }

    fn step(&mut self, result: Result<Offset, Error>) -> Result<(), Error> {
        match result {
            Ok(next) => self.at = next,
            Err(Error::CannotAssign { resume }) => {
                self.at = resume;
                self.unassigned = true;
            }
            Err(err) => return Err(err),
        }

        Ok(())
    }

    /// Moves past a skipped field. Returns false when the field takes part in the transfer.
    fn pass<T: BitLayout + ?Sized>(&mut self, field: &T, config: FieldConfig) -> bool {
        if config.ignore {
            trace!("ignoring field at {}", self.at);
            return true;
        }

        if config.skip {
            let bits = field.bit_size(true);
            trace!("skipping {} bits at {}", bits, self.at);
            self.at = self.at + Offset::from_bits(bits);
            return true;
        }

        false
    }

    pub fn decode_field<T: BitLayout + ?Sized>(
        &mut self,
        field: &mut T,
        config: FieldConfig,
        src: &[u8],
        order: Endian,
    ) -> Result<(), Error> {
        if self.pass(field, config) {
            return Ok(());
        }

        let result = field.decode(src, self.at, config.order(order));
        self.step(result)
    }

    pub fn encode_field<T: BitLayout + ?Sized>(
        &mut self,
        field: &T,
        config: FieldConfig,
        dst: &mut [u8],
        order: Endian,
    ) -> Result<(), Error> {
        if self.pass(field, config) {
            return Ok(());
        }

        let result = field.encode(dst, self.at, config.order(order));
        self.step(result)
    }

    /// Offset after the last field, or [`Error::CannotAssign`] if a field was stepped over.
    pub fn finish(self) -> Result<Offset, Error> {
        if self.unassigned {
            return Err(Error::CannotAssign { resume: self.at });
        }

        Ok(self.at)
    }
}

impl<T: BitLayout> BitLayout for [T] {
    fn bit_size(&self, honor_tags: bool) -> u64 {
        match self.first() {
            None => 0,
            Some(first) => first.bit_size(honor_tags) * self.len() as u64,
        }
    }

    fn decode(&mut self, src: &[u8], at: Offset, order: Endian) -> Result<Offset, Error> {
        if self.is_empty() {
            return Ok(at);
        }
        T::decode_slice(self, src, at, order)
    }

    fn encode(&self, dst: &mut [u8], at: Offset, order: Endian) -> Result<Offset, Error> {
        if self.is_empty() {
            return Ok(at);
        }
        T::encode_slice(self, dst, at, order)
    }
}

impl<T: BitLayout, const N: usize> BitLayout for [T; N] {
    fn bit_size(&self, honor_tags: bool) -> u64 {
        self.as_slice().bit_size(honor_tags)
    }

    fn decode(&mut self, src: &[u8], at: Offset, order: Endian) -> Result<Offset, Error> {
        self.as_mut_slice().decode(src, at, order)
    }

    fn encode(&self, dst: &mut [u8], at: Offset, order: Endian) -> Result<Offset, Error> {
        self.as_slice().encode(dst, at, order)
    }
}

impl<T: BitLayout> BitLayout for Vec<T> {
    fn bit_size(&self, honor_tags: bool) -> u64 {
        self.as_slice().bit_size(honor_tags)
    }

    fn decode(&mut self, src: &[u8], at: Offset, order: Endian) -> Result<Offset, Error> {
        self.as_mut_slice().decode(src, at, order)
    }

    fn encode(&self, dst: &mut [u8], at: Offset, order: Endian) -> Result<Offset, Error> {
        self.as_slice().encode(dst, at, order)
    }
}

/// A field whose value is never transferred.
///
/// Its bits are stepped over in both directions and the walk reports
/// [`Error::CannotAssign`]. Use it for fields the caller must not touch, such
/// as padding whose contents belong to someone else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Opaque<T>(T);

impl<T> Opaque<T> {
    pub fn new(value: T) -> Self {
        Opaque(value)
    }

    pub fn get(&self) -> &T {
        &self.0
    }
}

impl<T: BitLayout> BitLayout for Opaque<T> {
    /// Full size of the wrapped value. Tags inside it are never applied.
    fn bit_size(&self, _honor_tags: bool) -> u64 {
        self.0.bit_size(false)
    }

    fn decode(&mut self, _src: &[u8], at: Offset, _order: Endian) -> Result<Offset, Error> {
        let resume = at + Offset::from_bits(self.0.bit_size(false));
        trace!("stepping over opaque field at {}", at);
        Err(Error::CannotAssign { resume })
    }

    fn encode(&self, _dst: &mut [u8], at: Offset, _order: Endian) -> Result<Offset, Error> {
        let resume = at + Offset::from_bits(self.0.bit_size(false));
        trace!("stepping over opaque field at {}", at);
        Err(Error::CannotAssign { resume })
    }
}
