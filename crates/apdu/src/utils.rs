//! Byte utilities shared by command builders and response codecs

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::FormatError;

/// Size of the blocks reordered by [`to_little_endian_chunks`]
pub const CHUNK_SIZE: usize = 32;

/// Largest length representable by a BER-TLV length field handled here
pub const MAX_TLV_LENGTH: usize = 0xFFFF;

/// Decode a hexadecimal string into bytes
///
/// Both upper and lower case digits are accepted.
///
/// # Errors
/// Returns [`FormatError::OddHexLength`] for an odd number of digits and
/// [`FormatError::InvalidHexCharacter`] for anything that is not a hex digit.
pub fn hex_to_bytes(s: &str) -> Result<Bytes, FormatError> {
    if s.len() % 2 != 0 {
        return Err(FormatError::OddHexLength(s.len()));
    }

    hex::decode(s).map(Bytes::from).map_err(|e| match e {
        hex::FromHexError::InvalidHexCharacter { c, index } => {
            FormatError::InvalidHexCharacter { c, index }
        }
        hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => {
            FormatError::OddHexLength(s.len())
        }
    })
}

/// Reverse the byte order inside every consecutive 32-byte block
///
/// A trailing partial block is reversed in place as well. Applying this twice
/// returns the input whenever its length is a multiple of 32.
pub fn to_little_endian_chunks(data: &[u8]) -> Bytes {
    let mut out = BytesMut::from(data);
    for chunk in out.chunks_mut(CHUNK_SIZE) {
        chunk.reverse();
    }
    out.freeze()
}

/// Append a BER-TLV length field for `len` to `buf`
///
/// # Errors
/// Returns [`FormatError::TlvLengthTooLarge`] when `len` exceeds 65535.
pub fn put_tlv_length(buf: &mut impl BufMut, len: usize) -> Result<(), FormatError> {
    match len {
        0..=0x7F => buf.put_u8(len as u8),
        0x80..=0xFF => {
            buf.put_u8(0x81);
            buf.put_u8(len as u8);
        }
        0x100..=MAX_TLV_LENGTH => {
            buf.put_u8(0x82);
            buf.put_u16(len as u16);
        }
        _ => return Err(FormatError::TlvLengthTooLarge(len)),
    }
    Ok(())
}

/// Encode a BER-TLV length field
///
/// One byte up to 127, `0x81,n` up to 255 and `0x82,hi,lo` up to 65535.
pub fn encode_tlv_length(len: usize) -> Result<Bytes, FormatError> {
    let mut buf = BytesMut::with_capacity(3);
    put_tlv_length(&mut buf, len)?;
    Ok(buf.freeze())
}

/// Decode a BER-TLV length field from the start of `input`
///
/// `0x81` prefixes a 1-byte length and `0x82` a 2-byte big-endian length;
/// any other first byte is the length itself.
///
/// Returns the decoded length and the number of bytes the field occupied.
pub fn decode_tlv_length(input: &[u8]) -> Result<(usize, usize), FormatError> {
    let truncated = |needed: usize| FormatError::Truncated {
        needed,
        available: input.len(),
    };

    match input.first() {
        None => Err(truncated(1)),
        Some(0x81) => input
            .get(1)
            .map(|&len| (len as usize, 2))
            .ok_or_else(|| truncated(2)),
        Some(0x82) => input
            .get(1..3)
            .map(|len| (u16::from_be_bytes([len[0], len[1]]) as usize, 3))
            .ok_or_else(|| truncated(3)),
        Some(&len) => Ok((len as usize, 1)),
    }
}
