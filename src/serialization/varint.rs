//! Bitcoin VarInt (CompactSize) encoding/decoding
//!
//! VarInt is the length/count prefix used at every level of the `tx` payload.
//! It uses 1, 3, 5 or 9 bytes depending on the value; the first byte is the
//! discriminator.
//!
//! Encoding rules:
//! - If value < 0xfd: single byte
//! - If value <= 0xffff: 0xfd prefix + 2 bytes (little-endian)
//! - If value <= 0xffffffff: 0xfe prefix + 4 bytes (little-endian)
//! - Otherwise: 0xff prefix + 8 bytes (little-endian)
//!
//! Writers always emit the minimal width. Readers reject wider-than-needed
//! encodings unless the strictness flag is turned off.

use super::reader::WireReader;
use crate::constants::{
    VARINT_MARKER_U16, VARINT_MARKER_U32, VARINT_MARKER_U64, VARINT_SINGLE_BYTE_MAX,
};
use crate::error::{CodecError, Result};
use std::io::Write;

/// Number of bytes the minimal encoding of `value` occupies
#[inline]
pub fn varint_size(value: u64) -> usize {
    if value <= VARINT_SINGLE_BYTE_MAX {
        1
    } else if value <= 0xffff {
        3
    } else if value <= 0xffffffff {
        5
    } else {
        9
    }
}

/// Encode a u64 value as a Bitcoin VarInt
///
/// # Examples
///
/// ```
/// use msgtx_codec::serialization::varint::encode_varint;
///
/// assert_eq!(encode_varint(0), vec![0]);
/// assert_eq!(encode_varint(252), vec![252]);
/// assert_eq!(encode_varint(253), vec![0xfd, 253, 0]);
/// assert_eq!(encode_varint(65535), vec![0xfd, 255, 255]);
/// assert_eq!(encode_varint(65536), vec![0xfe, 0, 0, 1, 0]);
/// ```
pub fn encode_varint(value: u64) -> Vec<u8> {
    let mut result = Vec::with_capacity(varint_size(value));
    push_varint(&mut result, value);
    result
}

/// Append the VarInt encoding of `value` to `buf`
pub fn push_varint(buf: &mut Vec<u8>, value: u64) {
    if value <= VARINT_SINGLE_BYTE_MAX {
        buf.push(value as u8);
    } else if value <= 0xffff {
        buf.push(VARINT_MARKER_U16);
        buf.extend_from_slice(&(value as u16).to_le_bytes());
    } else if value <= 0xffffffff {
        buf.push(VARINT_MARKER_U32);
        buf.extend_from_slice(&(value as u32).to_le_bytes());
    } else {
        buf.push(VARINT_MARKER_U64);
        buf.extend_from_slice(&value.to_le_bytes());
    }
}

/// Write a VarInt to an `io::Write` sink, returning the bytes written
pub fn write_varint<W: Write>(writer: &mut W, value: u64) -> Result<usize> {
    let mut buf = Vec::with_capacity(9);
    push_varint(&mut buf, value);
    writer.write_all(&buf)?;
    Ok(buf.len())
}

/// Read a VarInt from the cursor
///
/// The marker byte selects how many further bytes are consumed. With
/// `reject_non_canonical` set, a value that fits a narrower form fails with
/// `CodecError::NonCanonicalVarInt`. On error the cursor may have advanced.
pub fn read_varint(reader: &mut WireReader<'_>, reject_non_canonical: bool) -> Result<u64> {
    let marker = reader.read_u8()?;

    let (value, width, min) = match marker {
        VARINT_MARKER_U16 => (reader.read_u16_le()? as u64, 3, 0xfd),
        VARINT_MARKER_U32 => (reader.read_u32_le()? as u64, 5, 0x10000),
        VARINT_MARKER_U64 => (reader.read_u64_le()?, 9, 0x100000000),
        b => return Ok(b as u64),
    };

    // Bitcoin Core rejects values that fit a narrower prefix
    if reject_non_canonical && value < min {
        return Err(CodecError::NonCanonicalVarInt { value, width });
    }

    Ok(value)
}

/// Decode a Bitcoin VarInt from bytes, rejecting non-canonical encodings
///
/// Returns the decoded value and the number of bytes consumed.
///
/// # Examples
///
/// ```
/// use msgtx_codec::serialization::varint::decode_varint;
///
/// assert_eq!(decode_varint(&[0]), Ok((0, 1)));
/// assert_eq!(decode_varint(&[252]), Ok((252, 1)));
/// assert_eq!(decode_varint(&[0xfd, 253, 0]), Ok((253, 3)));
/// assert_eq!(decode_varint(&[0xfe, 0, 0, 1, 0]), Ok((65536, 5)));
/// assert!(decode_varint(&[]).is_err());
/// ```
pub fn decode_varint(data: &[u8]) -> Result<(u64, usize)> {
    decode_varint_with_policy(data, true)
}

/// Decode a VarInt from bytes with an explicit strictness policy
pub fn decode_varint_with_policy(data: &[u8], reject_non_canonical: bool) -> Result<(u64, usize)> {
    let mut reader = WireReader::new(data);
    let value = read_varint(&mut reader, reject_non_canonical)?;
    Ok((value, reader.position()))
}

/// Read a VarInt that declares a length or count, bounded by `max`
///
/// Values above `max` fail with `CodecError::MalformedLength` before the
/// caller can allocate anything for them.
pub fn read_bounded_length(
    reader: &mut WireReader<'_>,
    field: &'static str,
    max: usize,
    reject_non_canonical: bool,
) -> Result<usize> {
    let declared = read_varint(reader, reject_non_canonical)?;
    if declared > max as u64 {
        return Err(CodecError::MalformedLength {
            field,
            declared,
            max: max as u64,
        });
    }
    Ok(declared as usize)
}
