//! Declaring structures with a packed bit layout.

/// Builds a [`FieldConfig`](crate::tag::FieldConfig) from `#[bit(..)]` tokens.
///
/// ```
/// use bitlayout::{field_config, Endian};
///
/// let config = field_config!(big_endian);
/// assert_eq!(config.endian, Some(Endian::Big));
/// assert!(field_config!(skip).skip);
/// assert_eq!(field_config!(), bitlayout::FieldConfig::new());
/// ```
#[macro_export]
macro_rules! field_config {
    ($($tag:ident),* $(,)?) => {
        $crate::tag::FieldConfig::new()$(.$tag())*
    };
}

/// Declares a structure and implements [`BitLayout`](crate::layout::BitLayout)
/// for it, laying the fields out in declaration order.
///
/// Fields may carry one `#[bit(..)]` attribute after their doc comments, with
/// the tokens `ignore`, `skip`, `big_endian` and `little_endian`.
///
/// ```
/// use bitlayout::{bit_struct, Bit, Endian};
///
/// bit_struct! {
///     #[derive(Debug, Default)]
///     pub struct Flags {
///         pub id: [Bit; 4],
///         #[bit(skip)]
///         pub reserved: [Bit; 4],
///         #[bit(big_endian)]
///         pub value: u16,
///     }
/// }
///
/// let mut flags = Flags::default();
/// bitlayout::read(&mut &[0xf1, 0x12, 0x34][..], Endian::Little, &mut flags).unwrap();
/// assert_eq!(flags.id, [true, false, false, false]);
/// assert_eq!(flags.value, 0x1234);
/// ```
#[macro_export]
macro_rules! bit_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[doc = $doc:expr])*
                $(#[bit($($tag:ident),* $(,)?)])?
                $fvis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[doc = $doc])*
                $fvis $field: $ty,
            )*
        }

        #[allow(unused_mut, unused_variables)]
        impl $crate::layout::BitLayout for $name {
            fn bit_size(&self, honor_tags: bool) -> u64 {
                let mut bits = 0u64;
                $(
                    let config = $crate::field_config!($($($tag),*)?);
                    if !(honor_tags && config.ignore) {
                        bits += $crate::layout::BitLayout::bit_size(&self.$field, honor_tags);
                    }
                )*
                bits
            }

            fn decode(
                &mut self,
                src: &[u8],
                at: $crate::offset::Offset,
                order: $crate::order::Endian,
            ) -> ::std::result::Result<$crate::offset::Offset, $crate::errors::Error> {
                let mut walk = $crate::layout::Walk::new(at);
                $(
                    walk.decode_field(
                        &mut self.$field,
                        $crate::field_config!($($($tag),*)?),
                        src,
                        order,
                    )?;
                )*
                walk.finish()
            }

            fn encode(
                &self,
                dst: &mut [u8],
                at: $crate::offset::Offset,
                order: $crate::order::Endian,
            ) -> ::std::result::Result<$crate::offset::Offset, $crate::errors::Error> {
                let mut walk = $crate::layout::Walk::new(at);
                $(
                    walk.encode_field(
                        &self.$field,
                        $crate::field_config!($($($tag),*)?),
                        dst,
                        order,
                    )?;
                )*
                walk.finish()
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{Bit, BitLayout, Endian, Offset, Opaque, size_in_bits};

    bit_struct! {
        #[derive(Debug, Default, PartialEq)]
        struct Inner {
            a: u8,
            b: [Bit; 4],
        }
    }

    bit_struct! {
        #[derive(Debug, Default)]
        struct Outer {
            /// Leading byte.
            head: u8,
            inner: Inner,
            #[bit(ignore)]
            note: u64,
            #[bit(skip)]
            pad: [Bit; 4],
            hidden: Opaque<u8>,
            #[bit(big_endian)]
            tail: u16,
        }
    }

    #[test]
    fn test_size() {
        let outer = Outer::default();
        assert_eq!(outer.bit_size(true), 8 + 12 + 4 + 8 + 16);
        assert_eq!(size_in_bits(&outer), 8 + 12 + 64 + 4 + 8 + 16);
    }

    #[test]
    fn test_nested_decode() {
        let src = [0x11, 0x22, 0xf3, 0x00, 0xab, 0xcd];
        let mut outer = Outer::default();

        let result = outer.decode(&src, Offset::ZERO, Endian::Little);
        assert!(matches!(result, Err(crate::Error::CannotAssign { .. })));

        assert_eq!(outer.head, 0x11);
        assert_eq!(outer.inner, Inner { a: 0x22, b: [true, true, false, false] });
        assert_eq!(outer.note, 0);
        assert_eq!(outer.tail, 0xabcd);
    }

    #[test]
    fn test_empty_struct() {
        bit_struct! {
            #[derive(Default)]
            struct Empty {}
        }

        assert_eq!(size_in_bits(&Empty::default()), 0);
    }
}
