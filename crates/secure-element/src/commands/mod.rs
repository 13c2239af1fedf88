//! APDU command builders for the secure element applet
//!
//! Builders are pure: the same inputs always produce the same bytes and no
//! builder performs I/O.

pub mod create;
pub use create::*;
pub mod read_object;
pub use read_object::*;
pub mod select;
pub use select::*;
pub mod sign;
pub use sign::*;

use bytes::BufMut;

/// Class byte of proprietary applet commands
pub const CLA_PROPRIETARY: u8 = 0x80;
/// Class byte of ISO 7816-4 interindustry commands
pub const CLA_ISO: u8 = 0x00;

/// Append a 4-byte identifier field (`tag, 0x04, id`)
pub(crate) fn put_identifier(buf: &mut impl BufMut, tag: u8, id: u32) {
    buf.put_u8(tag);
    buf.put_u8(0x04);
    buf.put_u32(id);
}
