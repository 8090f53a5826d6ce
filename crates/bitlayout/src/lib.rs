//! # bitlayout
//!
//! Bit-level access to byte buffers, and packed bit layouts for whole structures.
//!
//! The low-level half reads and writes single bits or runs of bits at any
//! [`Offset`], in either [`BitOrder`]. The structured half maps a value whose
//! type implements [`BitLayout`] onto a packed buffer: integers, bits, byte
//! arrays, nested structures, with per-field `ignore`/`skip`/endian tags.
//! Byte order (of multi-byte scalars) and bit order (inside sub-byte runs) are
//! independent; the bit order of a run follows the [`Endian`] it is read with.
//!
//! ## Example
//!
//! ```
//! use bitlayout::{bit_struct, Bit, Endian};
//!
//! bit_struct! {
//!     #[derive(Debug, Default)]
//!     pub struct TcpHeader {
//!         pub src_port: u16,
//!         pub dst_port: u16,
//!         pub seq_no: u32,
//!         pub ack_no: u32,
//!         pub header_len: [Bit; 4],
//!         pub reserved: [Bit; 3],
//!         pub ns: Bit,
//!         pub cwr: Bit,
//!         pub ece: Bit,
//!         pub urg: Bit,
//!         pub ack: Bit,
//!         pub psh: Bit,
//!         pub rst: Bit,
//!         pub syn: Bit,
//!         pub fin: Bit,
//!         pub win_size: u16,
//!         pub checksum: u16,
//!         pub urgent_pointer: u16,
//!     }
//! }
//!
//! let data = [
//!     0xd8, 0x65, 0x01, 0xbb, 0x4b, 0xe0, 0x76, 0xcd, 0x48, 0xc8,
//!     0x70, 0x8f, 0x50, 0x10, 0x10, 0x18, 0x0e, 0xc1, 0x00, 0x00,
//! ];
//! let mut header = TcpHeader::default();
//! bitlayout::read(&mut &data[..], Endian::Big, &mut header).unwrap();
//!
//! assert_eq!(header.src_port, 0xd865);
//! assert_eq!(header.dst_port, 0x01bb);
//! assert!(header.ack);
//! ```

pub mod access;
pub mod bits;
pub mod errors;
pub mod layout;
pub mod leaf;
mod macros;
pub mod offset;
pub mod order;
pub mod stream;
pub mod tag;

#[cfg(feature = "serde")]
pub mod serde;

pub use access::{get_bit, get_bit_run, get_bits, get_bits_as_bytes, set_bit, set_bit_run, set_bits};
pub use bits::{Bit, bits_to_bytes, byte_len, bytes_to_bits, size_in_bytes};
pub use errors::{BitError, Error};
pub use layout::{BitLayout, Opaque, size_in_bits};
pub use offset::Offset;
pub use order::{BitOrder, Endian};
pub use stream::{read, write};
pub use tag::FieldConfig;
